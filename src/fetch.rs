use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::RequestInit;

use crate::error::{describe_js, FetchError};
use crate::transport::{Request, Response, Transport};

/// `Transport` over the browser's `fetch()`.
pub struct FetchTransport {
    title_header: String,
}

impl FetchTransport {
    pub fn new(title_header: impl Into<String>) -> Self {
        Self {
            title_header: title_header.into(),
        }
    }
}

impl Transport for FetchTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let url = request.url.as_str();
        let window = web_sys::window().ok_or_else(|| FetchError::Transport {
            url: url.to_string(),
            message: "no window to fetch from".to_string(),
        })?;

        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }
        let js_request = web_sys::Request::new_with_str_and_init(url, &init)
            .map_err(|e| FetchError::transport(url, &e))?;

        let value = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(|e| FetchError::transport(url, &e))?;
        let response: web_sys::Response = value
            .dyn_into()
            .map_err(|v| FetchError::transport(url, &v))?;

        let title = response.headers().get(&self.title_header).ok().flatten();
        let body = if response.ok() {
            read_text(&response).await
        } else {
            Ok(String::new())
        };
        let response_url = response.url();

        Ok(Response {
            status: response.status(),
            url: if response_url.is_empty() {
                url.to_string()
            } else {
                response_url
            },
            title,
            body,
        })
    }
}

async fn read_text(response: &web_sys::Response) -> Result<String, FetchError> {
    let promise = response
        .text()
        .map_err(|e| FetchError::Processing(format!("cannot read body: {}", describe_js(&e))))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| FetchError::Processing(format!("cannot read body: {}", describe_js(&e))))?;
    value
        .as_string()
        .ok_or_else(|| FetchError::Processing("response body is not text".to_string()))
}
