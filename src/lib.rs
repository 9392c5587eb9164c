use wasm_bindgen::prelude::*;
use web_sys::Element;

mod components;
mod config;
mod constants; // Feature defaults, colours and DOM names
mod dom_utils;
mod feedback;
mod i18n;
mod markup;
mod models;
mod network;
mod storage;
mod turn;
mod widget;

// DOM tests need a real browser; see `wasm-pack test --headless --firefox`.
#[cfg(all(test, target_arch = "wasm32"))]
mod tests;

pub use config::{ConfigError, WidgetConfig};
pub use feedback::{
    BlockReason, FeedbackAck, FeedbackApi, FeedbackController, FeedbackError, FeedbackSnapshot,
    TransportError,
};
pub use i18n::{Locale, TextTable};
pub use markup::TextPolicy;
pub use models::{BotMessage, Citation, DeliveryState, FeedbackState, Vote};
pub use network::HttpFeedbackClient;
pub use turn::{dedupe_citations, RenderMode, TurnView};
pub use widget::Widget;

// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log_level()));
    log::info!("Chat widget module initialized");
    Ok(())
}

// Debug builds log everything, release builds stop at `info`.
fn log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}

/// JavaScript handle to one chat widget.
///
/// ```js
/// const widget = new ChatWidget({ feedbackEndpoint: "/api/feedback" });
/// widget.mount(document.getElementById("left-nav"));
/// widget.renderMessage(turnElement, { message, citations, messageId, conversationId, state });
/// ```
#[wasm_bindgen]
pub struct ChatWidget {
    widget: Widget<HttpFeedbackClient>,
}

#[wasm_bindgen]
impl ChatWidget {
    /// `config` is a plain object (camelCase keys) or `undefined`.  An
    /// invalid object is reported on the console and replaced by defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> ChatWidget {
        let config = WidgetConfig::from_js(config).unwrap_or_else(|e| {
            log::warn!("{}; falling back to defaults", e);
            WidgetConfig::default()
        });
        if config.feedback_enabled && config.feedback_endpoint().is_none() {
            log::warn!("Feedback is enabled but no feedback endpoint is configured");
        }
        let locale = storage::load_locale().unwrap_or(config.default_locale);
        let api = HttpFeedbackClient::new(config.feedback_endpoint());
        ChatWidget {
            widget: Widget::new(config, api, locale),
        }
    }

    /// Mount the side panel (and language switch) into `host`.
    pub fn mount(&self, host: &Element) -> Result<(), JsValue> {
        self.widget.mount(host)
    }

    /// Render one bot turn into `container`.  Call again with the updated
    /// record whenever the turn changes; feedback state survives re-renders.
    #[wasm_bindgen(js_name = renderMessage)]
    pub fn render_message(&self, container: &Element, message: JsValue) -> Result<(), JsValue> {
        let message: BotMessage = serde_wasm_bindgen::from_value(message)
            .map_err(|e| JsValue::from_str(&format!("Invalid bot message: {}", e)))?;
        self.widget.render_message(container, &message)?;
        Ok(())
    }

    /// Active locale code, `"EN"` or `"ES"`.
    #[wasm_bindgen(getter)]
    pub fn locale(&self) -> String {
        self.widget.locale().code().to_string()
    }

    #[wasm_bindgen(js_name = setLocale)]
    pub fn set_locale(&self, code: &str) -> Result<(), JsValue> {
        let locale: Locale = code.parse()?;
        self.widget.set_locale(locale)
    }

    /// Open or close the side panel; returns the new open state.
    #[wasm_bindgen(js_name = toggleSidePanel)]
    pub fn toggle_side_panel(&self) -> Result<bool, JsValue> {
        self.widget.toggle_side_panel()
    }

    /// Localised label by key, for host-rendered chrome (header, input
    /// placeholder, error banners).
    pub fn label(&self, key: &str) -> Option<String> {
        let text = self.widget.locale().text();
        let value = match key {
            "appName" => text.app_name,
            "assistantName" => text.assistant_name,
            "chatHeaderTitle" => text.chat_header_title,
            "thinking" => text.thinking,
            "noResponse" => text.no_response,
            "errorMessage" => text.error_message,
            _ => return None,
        };
        Some(value.to_string())
    }
}
