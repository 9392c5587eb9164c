// Feature defaults - these are the single source of truth when no runtime
// configuration is supplied by the host page.
pub const DEFAULT_FEEDBACK_ENABLED: bool = true;
// Markdown styling is still rough around the edges, keep it opt-in.
pub const DEFAULT_MARKDOWN_ENABLED: bool = false;
pub const DEFAULT_MULTILINGUAL_TOGGLE: bool = true;
pub const DEFAULT_SHOW_FAQ: bool = true;
pub const DEFAULT_SIDE_PANEL_OPEN: bool = true;

// Theme colours
pub const PRIMARY_MAIN: &str = "#444E56";
pub const SECONDARY_MAIN: &str = "#D3D3D3";
pub const LINK_COLOR: &str = "#0066cc";
pub const LINK_HOVER_COLOR: &str = "#004499";
pub const CHAT_LEFT_PANEL_BACKGROUND: &str = "#004D77";
pub const PANEL_TEXT: &str = "#FFFFFF";
pub const BOTMESSAGE_BACKGROUND: &str = "#C0EAE3";

// localStorage key holding the last chosen locale code ("EN" / "ES")
pub const LOCALE_STORAGE_KEY: &str = "qna_chat_locale";

// DOM events dispatched on `window`
pub const SIDE_PANEL_EVENT: &str = "leftNavChange";
pub const LOCALE_EVENT: &str = "localeChange";

pub const STYLE_ELEMENT_ID: &str = "qna-chat-styles";
