//! Attaching to a page that already carries the editor markup (a textarea,
//! a preview block and two spans), as served by the document server itself.

use std::rc::Rc;

use leptos::prelude::window;
use leptos::task::spawn_local;
use tracing::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, PageTransitionEvent};

use crate::config::ClientConfig;
use crate::error::{describe_js, SurfaceError};
use crate::fetch::FetchTransport;
use crate::session::{EditorSession, Phase};
use crate::surface::DomSurface;
use crate::timer::BrowserScheduler;

type HostSession = EditorSession<DomSurface, FetchTransport, BrowserScheduler>;

/// Events that count as a modification of the text field.
const EDIT_EVENTS: [&str; 3] = ["change", "input", "textInput"];

/// Binds a session to the host page's regions and starts it. Fails if any of
/// the four regions is missing.
pub fn attach(config: ClientConfig, document: Document) -> Result<(), SurfaceError> {
    let surface = DomSurface::locate(document, config.regions.clone())?;
    let transport = FetchTransport::new(config.title_header.clone());
    let session = HostSession::new(config, surface, transport, BrowserScheduler);

    spawn_local(async move {
        if session.start().await != Phase::Ready {
            return;
        }
        if let Err(err) = listen(&session) {
            error!(%err, "cannot observe the editor");
        }
    });
    Ok(())
}

fn listen(session: &Rc<HostSession>) -> Result<(), SurfaceError> {
    let editor = session.surface().editor()?;

    let on_edit = {
        let session = Rc::clone(session);
        Closure::<dyn FnMut(Event)>::new(move |_: Event| session.on_edit())
    };
    for event in EDIT_EVENTS {
        editor
            .add_event_listener_with_callback(event, on_edit.as_ref().unchecked_ref())
            .map_err(|e| SurfaceError::Dom(describe_js(&e)))?;
    }
    on_edit.forget();

    // A page kept in the back/forward cache comes back alive, so only a real
    // unload ends the session.
    let on_hide = {
        let session = Rc::clone(session);
        Closure::<dyn FnMut(PageTransitionEvent)>::new(move |e: PageTransitionEvent| {
            if !e.persisted() {
                session.shutdown();
            }
        })
    };
    window()
        .add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref())
        .map_err(|e| SurfaceError::Dom(describe_js(&e)))?;
    on_hide.forget();

    info!(events = ?EDIT_EVENTS, "observing host editor");
    Ok(())
}
