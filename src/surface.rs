use std::fmt;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlTextAreaElement};

use crate::config::RegionSelectors;
use crate::error::{describe_js, SurfaceError};

/// Contents of the status region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Changed,
    Saving,
    Saved,
    Error(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Changed => f.write_str("Changed"),
            Status::Saving => f.write_str("Saving..."),
            Status::Saved => f.write_str("Saved"),
            Status::Error(message) => write!(f, "Error: {message}"),
        }
    }
}

/// The four regions the editor drives: editable text, rendered preview,
/// status line and document title (plus the window title next to it).
pub trait Surface {
    fn editor_text(&self) -> Result<String, SurfaceError>;
    fn set_editor_text(&self, text: &str) -> Result<(), SurfaceError>;
    fn set_preview_html(&self, html: &str) -> Result<(), SurfaceError>;
    fn set_status(&self, status: &Status) -> Result<(), SurfaceError>;
    fn set_title_text(&self, title: &str) -> Result<(), SurfaceError>;
    fn set_window_title(&self, title: &str) -> Result<(), SurfaceError>;
}

/// Regions rendered by the `App` component, backed by signals.
#[derive(Clone, Copy, Debug)]
pub struct SignalSurface {
    pub text: RwSignal<String>,
    pub preview: RwSignal<String>,
    pub status: RwSignal<String>,
    pub title: RwSignal<String>,
}

impl SignalSurface {
    pub fn new() -> Self {
        Self {
            text: RwSignal::new(String::new()),
            preview: RwSignal::new(String::new()),
            status: RwSignal::new(String::new()),
            title: RwSignal::new(String::new()),
        }
    }
}

impl Default for SignalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for SignalSurface {
    fn editor_text(&self) -> Result<String, SurfaceError> {
        Ok(self.text.get_untracked())
    }

    fn set_editor_text(&self, text: &str) -> Result<(), SurfaceError> {
        self.text.set(text.to_string());
        Ok(())
    }

    fn set_preview_html(&self, html: &str) -> Result<(), SurfaceError> {
        self.preview.set(html.to_string());
        Ok(())
    }

    fn set_status(&self, status: &Status) -> Result<(), SurfaceError> {
        self.status.set(status.to_string());
        Ok(())
    }

    fn set_title_text(&self, title: &str) -> Result<(), SurfaceError> {
        self.title.set(title.to_string());
        Ok(())
    }

    fn set_window_title(&self, title: &str) -> Result<(), SurfaceError> {
        document().set_title(title);
        Ok(())
    }
}

/// Regions that already exist in the host page, found by CSS selector.
///
/// Elements are looked up on every access so the surface keeps working when
/// the host re-renders parts of the page.
pub struct DomSurface {
    document: Document,
    regions: RegionSelectors,
}

impl DomSurface {
    /// Binds to the host page. Every region must be present up front.
    pub fn locate(document: Document, regions: RegionSelectors) -> Result<Self, SurfaceError> {
        let surface = Self { document, regions };
        surface.editor()?;
        surface.element(&surface.regions.preview)?;
        surface.html_element(&surface.regions.status)?;
        surface.html_element(&surface.regions.title)?;
        Ok(surface)
    }

    /// True if the host page carries an editor region at `selector`.
    pub fn has_editor(document: &Document, selector: &str) -> bool {
        matches!(document.query_selector(selector), Ok(Some(_)))
    }

    pub fn editor(&self) -> Result<HtmlTextAreaElement, SurfaceError> {
        let selector = &self.regions.editor;
        self.element(selector)?
            .dyn_into::<HtmlTextAreaElement>()
            .map_err(|_| SurfaceError::WrongElement {
                selector: selector.clone(),
                expected: "<textarea>",
            })
    }

    fn element(&self, selector: &str) -> Result<Element, SurfaceError> {
        self.document
            .query_selector(selector)
            .map_err(|e| SurfaceError::Dom(describe_js(&e)))?
            .ok_or_else(|| SurfaceError::MissingRegion(selector.to_string()))
    }

    fn html_element(&self, selector: &str) -> Result<HtmlElement, SurfaceError> {
        self.element(selector)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SurfaceError::WrongElement {
                selector: selector.to_string(),
                expected: "HTML element",
            })
    }
}

impl Surface for DomSurface {
    fn editor_text(&self) -> Result<String, SurfaceError> {
        Ok(self.editor()?.value())
    }

    fn set_editor_text(&self, text: &str) -> Result<(), SurfaceError> {
        self.editor()?.set_value(text);
        Ok(())
    }

    fn set_preview_html(&self, html: &str) -> Result<(), SurfaceError> {
        self.element(&self.regions.preview)?.set_inner_html(html);
        Ok(())
    }

    fn set_status(&self, status: &Status) -> Result<(), SurfaceError> {
        self.html_element(&self.regions.status)?
            .set_inner_text(&status.to_string());
        Ok(())
    }

    fn set_title_text(&self, title: &str) -> Result<(), SurfaceError> {
        self.html_element(&self.regions.title)?.set_inner_text(title);
        Ok(())
    }

    fn set_window_title(&self, title: &str) -> Result<(), SurfaceError> {
        self.document.set_title(title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels() {
        assert_eq!(Status::Changed.to_string(), "Changed");
        assert_eq!(Status::Saving.to_string(), "Saving...");
        assert_eq!(Status::Saved.to_string(), "Saved");
        assert_eq!(
            Status::Error("HTTP error, status = 500 from /data.md".to_string()).to_string(),
            "Error: HTTP error, status = 500 from /data.md"
        );
    }
}
