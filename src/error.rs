use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Everything that can go wrong between issuing a request and handing its
/// body to the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connection refused, CORS, ...).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    /// The server answered, but not with a 2xx status.
    #[error("HTTP error, status = {status} from {url}")]
    Status { status: u16, url: String },
    /// A nominally successful response could not be applied.
    #[error("{0}")]
    Processing(String),
}

impl FetchError {
    pub fn transport(url: &str, cause: &JsValue) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: describe_js(cause),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("page region `{0}` is missing")]
    MissingRegion(String),
    #[error("page region `{selector}` is not a {expected}")]
    WrongElement {
        selector: String,
        expected: &'static str,
    },
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot schedule save: {0}")]
pub struct ScheduleError(pub String);

impl From<SurfaceError> for FetchError {
    fn from(err: SurfaceError) -> Self {
        Self::Processing(err.to_string())
    }
}

/// Best-effort human readable text for a thrown JS value.
pub fn describe_js(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}
