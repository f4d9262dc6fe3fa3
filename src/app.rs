use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::Event;

use crate::config::ClientConfig;
use crate::fetch::FetchTransport;
use crate::session::EditorSession;
use crate::surface::SignalSurface;
use crate::timer::BrowserScheduler;

type AppSession = EditorSession<SignalSurface, FetchTransport, BrowserScheduler>;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    let surface = SignalSurface::new();
    let transport = FetchTransport::new(config.title_header.clone());
    let session = StoredValue::new_local(AppSession::new(
        config,
        surface,
        transport,
        BrowserScheduler,
    ));

    Effect::new(move |_| {
        let session = session.get_value();
        spawn_local(async move {
            session.start().await;
        });
    });

    on_cleanup(move || {
        session.try_with_value(|s| s.shutdown());
    });

    // `input` alone covers typing, paste, drag-and-drop and IME commits.
    let on_edit = move |ev: Event| {
        surface.text.set(event_target_value(&ev));
        session.with_value(|s| s.on_edit());
    };

    view! {
        <main class="mdedit" style="display: flex; flex-direction: column; height: 100vh; width: 100vw; margin: 0;">
            <header class="topbar" style="display: flex; align-items: center; justify-content: space-between; padding: 0.5rem 1rem; border-bottom: 1px solid #ddd; font-family: sans-serif; font-size: 0.9rem;">
                <span id="title" style="font-weight: 600;">{move || surface.title.get()}</span>
                <span id="status" style="color: #666;">{move || surface.status.get()}</span>
            </header>
            <div class="panes" style="flex: 1; display: flex; min-height: 0;">
                <textarea
                    id="editor"
                    style="flex: 1; padding: 1rem; border: none; border-right: 1px solid #ddd; outline: none; resize: none; font-family: monospace; font-size: 14px; line-height: 1.5;"
                    prop:value=move || surface.text.get()
                    on:input=on_edit
                    spellcheck="false"
                ></textarea>
                <div
                    id="preview"
                    style="flex: 1; padding: 1rem; overflow-y: auto; font-family: sans-serif;"
                    inner_html=move || surface.preview.get()
                ></div>
            </div>
        </main>
    }
}
