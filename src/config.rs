//! Widget configuration.
//!
//! A [`WidgetConfig`] is built once from build-time defaults, optionally
//! overridden by a plain JS object handed to the `ChatWidget` constructor,
//! and then shared read-only with every component.

use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::constants::{
    DEFAULT_FEEDBACK_ENABLED, DEFAULT_MARKDOWN_ENABLED, DEFAULT_MULTILINGUAL_TOGGLE,
    DEFAULT_SHOW_FAQ, DEFAULT_SIDE_PANEL_OPEN,
};
use crate::i18n::Locale;
use crate::markup::TextPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid widget configuration: {0}")]
    Invalid(String),
    #[error("unsupported language code `{0}`")]
    UnsupportedLocale(String),
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Show the up/down vote controls under delivered bot answers.
    pub feedback_enabled: bool,
    /// Render bot answers as Markdown instead of plain text with line breaks.
    pub markdown_enabled: bool,
    /// Offer the English/Spanish switch.
    pub multilingual_toggle: bool,
    /// List the FAQ questions in the side panel.
    pub show_faq: bool,
    pub side_panel_open: bool,
    pub default_locale: Locale,
    /// Absolute URL the feedback client POSTs to.
    pub feedback_endpoint: Option<String>,
}

impl Default for WidgetConfig {
    /// Build-time defaults.  `FEEDBACK_ENDPOINT` and `DEFAULT_LANGUAGE` are
    /// read through `option_env!` so a release build can bake them in; an
    /// unparseable language falls back to English.
    fn default() -> Self {
        Self {
            feedback_enabled: DEFAULT_FEEDBACK_ENABLED,
            markdown_enabled: DEFAULT_MARKDOWN_ENABLED,
            multilingual_toggle: DEFAULT_MULTILINGUAL_TOGGLE,
            show_faq: DEFAULT_SHOW_FAQ,
            side_panel_open: DEFAULT_SIDE_PANEL_OPEN,
            default_locale: option_env!("DEFAULT_LANGUAGE")
                .and_then(|code| code.parse().ok())
                .unwrap_or_default(),
            feedback_endpoint: option_env!("FEEDBACK_ENDPOINT").map(normalize_endpoint),
        }
    }
}

impl WidgetConfig {
    /// Parse a JSON document; absent keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Convert the object passed from JavaScript.  `undefined` and `null`
    /// mean "use the defaults".
    pub fn from_js(value: JsValue) -> Result<Self, ConfigError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(value)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(config.normalized())
    }

    pub fn text_policy(&self) -> TextPolicy {
        TextPolicy::from_markdown_flag(self.markdown_enabled)
    }

    pub fn feedback_endpoint(&self) -> Option<&str> {
        self.feedback_endpoint.as_deref()
    }

    fn normalized(mut self) -> Self {
        self.feedback_endpoint = self
            .feedback_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(normalize_endpoint);
        self
    }
}

fn normalize_endpoint(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_keeps_defaults() {
        let config = WidgetConfig::from_json("{}").unwrap();
        assert_eq!(config, WidgetConfig::default().normalized());
        assert_eq!(config.feedback_enabled, DEFAULT_FEEDBACK_ENABLED);
        assert_eq!(config.markdown_enabled, DEFAULT_MARKDOWN_ENABLED);
    }

    #[test]
    fn camel_case_overrides_apply() {
        let config = WidgetConfig::from_json(
            r#"{
                "feedbackEnabled": false,
                "markdownEnabled": true,
                "defaultLocale": "es",
                "feedbackEndpoint": "https://api.example.com/feedback/"
            }"#,
        )
        .unwrap();

        assert!(!config.feedback_enabled);
        assert_eq!(config.text_policy(), TextPolicy::Markdown);
        assert_eq!(config.default_locale, Locale::Es);
        assert_eq!(
            config.feedback_endpoint(),
            Some("https://api.example.com/feedback")
        );
    }

    #[test]
    fn blank_endpoint_counts_as_unset() {
        let config = WidgetConfig::from_json(r#"{"feedbackEndpoint": "   "}"#).unwrap();
        assert_eq!(config.feedback_endpoint(), None);
    }

    #[test]
    fn unknown_locale_is_rejected() {
        let err = WidgetConfig::from_json(r#"{"defaultLocale": "de"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("de")));
    }
}
