//! The editor session: keeps the text field in sync with the document on the
//! server. Loads text and rendered HTML on startup, turns bursts of edits into
//! one delayed save, and shows what happened in the status region.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::debounce::{Debouncer, Ticket};
use crate::error::FetchError;
use crate::surface::{Status, Surface};
use crate::timer::{Scheduler, Task};
use crate::transport::{Request, Transport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Initial text and render are being fetched. Edits are not observed yet.
    Loading,
    /// Edits schedule saves.
    Ready,
    /// The initial text never arrived. Saving now would overwrite the
    /// document with whatever the page happens to hold, so edits stay local.
    Detached,
    /// Torn down. Pending and in-flight work is ignored.
    Closed,
}

struct SessionState<H> {
    phase: Phase,
    debounce: Debouncer<H>,
    /// Sequence number of the most recently issued save.
    saves_issued: u64,
    /// Editor text as of the last load or observed edit.
    last_seen: Option<String>,
}

pub struct EditorSession<S, T, C: Scheduler> {
    config: ClientConfig,
    surface: S,
    transport: T,
    scheduler: C,
    state: RefCell<SessionState<C::Handle>>,
}

impl<S, T, C> EditorSession<S, T, C>
where
    S: Surface + 'static,
    T: Transport + 'static,
    C: Scheduler + 'static,
    C::Handle: 'static,
{
    pub fn new(config: ClientConfig, surface: S, transport: T, scheduler: C) -> Rc<Self> {
        Rc::new(Self {
            config,
            surface,
            transport,
            scheduler,
            state: RefCell::new(SessionState {
                phase: Phase::Loading,
                debounce: Debouncer::new(),
                saves_issued: 0,
                last_seen: None,
            }),
        })
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &C {
        &self.scheduler
    }

    /// Loads the document text, then its rendered form, and only then starts
    /// observing edits, so filling the text field never counts as an edit.
    pub async fn start(&self) -> Phase {
        info!(url = %self.config.text_url, "loading document");
        let loaded = self
            .request(Request::get(&self.config.text_url), None, |text| {
                self.surface.set_editor_text(&text)?;
                self.state.borrow_mut().last_seen = Some(text);
                Ok(())
            })
            .await;
        if let Err(err) = loaded {
            self.report(&err);
            return self.finish_startup(Phase::Detached);
        }
        if self.phase() == Phase::Closed {
            return Phase::Closed;
        }

        let rendered = self
            .request(Request::get(&self.config.html_url), None, |html| {
                self.receive_html(&html)
            })
            .await;
        if let Err(err) = rendered {
            self.report(&err);
        }
        self.finish_startup(Phase::Ready)
    }

    fn finish_startup(&self, phase: Phase) -> Phase {
        let mut state = self.state.borrow_mut();
        if state.phase == Phase::Loading {
            state.phase = phase;
            match phase {
                Phase::Ready => info!("editor attached"),
                _ => warn!("initial load failed, edits will not be saved"),
            }
        }
        state.phase
    }

    /// Called for every observed modification of the text field. Replaces any
    /// pending save with one due after the quiet interval. Events that leave
    /// the text as it was (`change` on blur after `input`) are ignored.
    pub fn on_edit(self: &Rc<Self>) {
        if self.phase() != Phase::Ready {
            debug!(phase = ?self.phase(), "ignoring edit");
            return;
        }
        if let Ok(text) = self.surface.editor_text() {
            let mut state = self.state.borrow_mut();
            if state.last_seen.as_deref() == Some(text.as_str()) {
                debug!("text unchanged, ignoring event");
                return;
            }
            state.last_seen = Some(text);
        }

        let (ticket, previous) = self.state.borrow_mut().debounce.rearm();
        if let Some(handle) = previous {
            self.scheduler.cancel(handle);
        }

        let session = Rc::clone(self);
        let task: Task = Box::pin(async move { session.save_when_due(ticket).await });
        match self.scheduler.schedule(self.config.quiet_interval(), task) {
            Ok(handle) => {
                let stale = self.state.borrow_mut().debounce.arm(ticket, handle);
                if let Some(stale) = stale {
                    self.scheduler.cancel(stale);
                }
                debug!(delay_ms = self.config.quiet_interval_ms, "save scheduled");
                self.show(&Status::Changed);
            }
            Err(err) => {
                error!(%err, "cannot schedule save");
                self.show(&Status::Error(err.to_string()));
            }
        }
    }

    async fn save_when_due(self: Rc<Self>, ticket: Ticket) {
        if !self.state.borrow_mut().debounce.fire(ticket) {
            debug!("superseded save timer fired");
            return;
        }
        self.save_now().await;
    }

    /// Uploads the full text and shows the rendered HTML the server answers
    /// with. Cancels a pending save first; safe to call with none pending.
    pub async fn save_now(&self) {
        let (seq, pending) = {
            let mut state = self.state.borrow_mut();
            if state.phase != Phase::Ready {
                debug!(phase = ?state.phase, "not saving");
                return;
            }
            state.saves_issued += 1;
            (state.saves_issued, state.debounce.clear())
        };
        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
        }

        self.show(&Status::Saving);
        let text = match self.surface.editor_text() {
            Ok(text) => text,
            Err(err) => {
                self.report(&FetchError::from(err));
                return;
            }
        };
        debug!(seq, bytes = text.len(), "saving document");

        let saved = self
            .request(Request::put(&self.config.text_url, text), Some(seq), |html| {
                self.surface.set_preview_html(&html)?;
                // An edit made while this save was in flight is still unsaved.
                if !self.state.borrow().debounce.is_pending() {
                    self.surface.set_status(&Status::Saved)?;
                }
                Ok(())
            })
            .await;
        if let Err(err) = saved {
            self.report(&err);
        }
    }

    /// Stops observing edits and drops the pending save, if any.
    pub fn shutdown(&self) {
        let pending = {
            let mut state = self.state.borrow_mut();
            state.phase = Phase::Closed;
            state.debounce.clear()
        };
        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
        }
        info!("editor session closed");
    }

    /// Sends `request` and hands the body of a successful response to
    /// `on_body`, updating the title along the way.
    ///
    /// Responses to a save that has since been superseded by a newer one, and
    /// anything arriving after shutdown, are dropped without touching the page.
    async fn request(
        &self,
        request: Request,
        save_seq: Option<u64>,
        on_body: impl FnOnce(String) -> Result<(), FetchError>,
    ) -> Result<(), FetchError> {
        let method = request.method;
        let response = self.transport.send(request).await;

        if !self.accepts(save_seq) {
            warn!(seq = ?save_seq, ok = response.is_ok(), "dropping stale response");
            return Ok(());
        }

        let response = response?;
        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
                url: response.url,
            });
        }
        debug!(method = method.as_str(), url = %response.url, status = response.status, "response received");

        if let Some(title) = response.title() {
            self.surface
                .set_window_title(&format!("{}{}", self.config.window_title_prefix, title))?;
            self.surface.set_title_text(title)?;
        }

        on_body(response.body?)
    }

    fn accepts(&self, save_seq: Option<u64>) -> bool {
        let state = self.state.borrow();
        state.phase != Phase::Closed && save_seq.map_or(true, |seq| seq == state.saves_issued)
    }

    fn receive_html(&self, html: &str) -> Result<(), FetchError> {
        self.surface.set_preview_html(html)?;
        self.surface.set_status(&Status::Saved)?;
        Ok(())
    }

    fn report(&self, err: &FetchError) {
        error!(error = %err, "request failed");
        self.show(&Status::Error(err.to_string()));
    }

    fn show(&self, status: &Status) {
        if let Err(err) = self.surface.set_status(status) {
            error!(%err, %status, "cannot update status");
        }
    }
}
