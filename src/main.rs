mod app;
mod config;
mod debounce;
mod error;
mod fetch;
mod host;
mod logging;
mod session;
mod surface;
mod timer;
mod transport;

use app::*;
use config::ClientConfig;
use leptos::prelude::*;
use surface::DomSurface;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_problem) = ClientConfig::from_document();
    logging::init(&config.log_filter);
    if let Some(problem) = config_problem {
        tracing::warn!("{problem}");
    }

    let document = document();
    if DomSurface::has_editor(&document, &config.regions.editor) {
        tracing::info!("binding to host page regions");
        if let Err(err) = host::attach(config, document) {
            tracing::error!(%err, "cannot start editor");
        }
    } else {
        mount_to_body(move || {
            view! { <App config=config /> }
        })
    }
}
