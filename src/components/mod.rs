pub mod bot_response;
pub mod language_switch;
pub mod side_panel;
