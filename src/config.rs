use std::time::Duration;

use serde::Deserialize;

/// Id of the optional `<script type="application/json">` block a host page
/// can use to override the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "mdedit-config";

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    pub text_url: String,
    pub html_url: String,
    pub title_header: String,
    /// Prepended to the title header for the window/tab title only; the
    /// on-page title region shows the header value as is.
    pub window_title_prefix: String,
    pub quiet_interval_ms: u64,
    pub log_filter: String,
    pub regions: RegionSelectors,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            text_url: "/data.md".to_string(),
            html_url: "/data.html".to_string(),
            title_header: "X-Mdedit-Path".to_string(),
            window_title_prefix: "mdedit: ".to_string(),
            quiet_interval_ms: 1000,
            log_filter: "info".to_string(),
            regions: RegionSelectors::default(),
        }
    }
}

/// CSS selectors of the four regions a host page must provide.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct RegionSelectors {
    pub editor: String,
    pub preview: String,
    pub status: String,
    pub title: String,
}

impl Default for RegionSelectors {
    fn default() -> Self {
        Self {
            editor: "textarea#editor".to_string(),
            preview: "div#preview".to_string(),
            status: "span#status".to_string(),
            title: "span#title".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn quiet_interval(&self) -> Duration {
        Duration::from_millis(self.quiet_interval_ms)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads the config block from the current document, falling back to the
    /// defaults when it is absent or unreadable. Runs before logging is up, so
    /// problems are returned alongside instead of logged here.
    pub fn from_document() -> (Self, Option<String>) {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match raw {
            None => (Self::default(), None),
            Some(raw) if raw.trim().is_empty() => (Self::default(), None),
            Some(raw) => match Self::from_json(&raw) {
                Ok(config) => (config, None),
                Err(e) => (
                    Self::default(),
                    Some(format!("ignoring malformed #{CONFIG_ELEMENT_ID}: {e}")),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = ClientConfig::from_json("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.quiet_interval(), Duration::from_secs(1));
    }

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let config = ClientConfig::from_json(
            r#"{"quiet_interval_ms": 250, "regions": {"editor": "textarea.md"}}"#,
        )
        .unwrap();
        assert_eq!(config.quiet_interval(), Duration::from_millis(250));
        assert_eq!(config.regions.editor, "textarea.md");
        assert_eq!(config.regions.preview, "div#preview");
        assert_eq!(config.text_url, "/data.md");
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(ClientConfig::from_json(r#"{"quiet_interval_ms": "soon"}"#).is_err());
    }
}
