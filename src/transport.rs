use std::future::Future;

use crate::error::FetchError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn put(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::Put,
            url: url.into(),
            body: Some(body.into()),
        }
    }
}

/// A completed HTTP exchange. The body is read eagerly by the transport; a
/// failure to read it surfaces only once the session asks for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub url: String,
    pub title: Option<String>,
    pub body: Result<String, FetchError>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The title header, when the server sent a non-empty one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

/// Sends requests to the document server. Implementations run on the single
/// UI thread, so neither the trait nor its futures need to be `Send`.
pub trait Transport {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, FetchError>>;
}
