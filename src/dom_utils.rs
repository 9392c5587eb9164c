//! dom_utils.rs: thin helper layer for repetitive DOM operations.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, Document, Element, Event};

use crate::constants::{
    BOTMESSAGE_BACKGROUND, CHAT_LEFT_PANEL_BACKGROUND, LINK_COLOR, LINK_HOVER_COLOR, PANEL_TEXT,
    PRIMARY_MAIN, SECONDARY_MAIN, STYLE_ELEMENT_ID,
};

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document on window"))
}

/// Walk up from the event target to the nearest element carrying
/// `data-{attr}` and return that element together with the attribute value.
pub fn closest_with_data(event: &Event, attr: &str) -> Option<(Element, String)> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let selector = format!("[data-{}]", attr);
    let el = target.closest(&selector).ok()??;
    let value = el.get_attribute(&format!("data-{}", attr))?;
    Some((el, value))
}

/// Fire a `CustomEvent` on `window` carrying `detail`.
pub fn dispatch_window_event(name: &str, detail: &JsValue) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;
    let init = CustomEventInit::new();
    init.set_detail(detail);
    let event = CustomEvent::new_with_event_init_dict(name, &init)?;
    window.dispatch_event(&event)?;
    Ok(())
}

/// Inject the widget stylesheet once per page.
pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }

    let css = format!(
        "
.bot-row{{display:flex;align-items:flex-end;gap:8px;margin:8px 0}}
.bot-avatar{{width:40px;height:40px;border-radius:50%;background:{primary};flex-shrink:0}}
.bot-message{{background:{bot_bg};border-radius:8px;padding:16px;max-width:80%}}
.bot-message.thinking{{display:flex;align-items:center;gap:8px}}
.thinking-label{{color:rgba(0,0,0,.6);font-size:.875rem}}
.typing-dots{{display:flex;gap:4px}}
.typing-dots .dot{{width:6px;height:6px;border-radius:50%;background:{primary};animation:typing 1s infinite ease-in-out}}
.typing-dots .dot:nth-of-type(1){{animation-delay:.2s}}
.typing-dots .dot:nth-of-type(2){{animation-delay:.4s}}
.typing-dots .dot:nth-of-type(3){{animation-delay:.6s}}
@keyframes typing{{0%,100%{{transform:translateY(0)}}50%{{transform:translateY(-4px)}}}}
.citations{{margin-top:8px}}
.citations-caption{{font-size:.9rem;color:rgba(0,0,0,.6)}}
.citation a{{font-size:.9rem;color:{link};text-decoration:underline}}
.citation a:hover{{color:{link_hover}}}
.feedback-bar{{display:flex;justify-content:flex-end;margin-top:8px;padding-top:8px;border-top:1px solid {divider}}}
.feedback-btn{{background:none;border:0;cursor:pointer;font-size:1.1rem;color:rgba(0,0,0,.26)}}
.feedback-btn:hover,.feedback-btn.active{{color:{primary}}}
.feedback-btn[disabled]{{cursor:default}}
.side-panel{{background:{panel_bg};color:{panel_text};padding:32px;height:100%;box-sizing:border-box;display:flex;flex-direction:column;gap:16px}}
.side-panel.collapsed{{padding:16px;width:auto}}
.side-panel h2,.side-panel h3{{font-weight:bold;margin:0}}
.side-panel .panel-icon{{align-self:flex-end;background:none;border:0;color:{panel_text};cursor:pointer;font-size:1.25rem}}
.side-panel .simplify-box{{margin-top:auto;background:rgba(255,255,255,.1);padding:16px;border-radius:4px}}
.language-switch{{background:none;border:1px solid {primary};border-radius:4px;padding:4px 8px;cursor:pointer}}
",
        primary = PRIMARY_MAIN,
        bot_bg = BOTMESSAGE_BACKGROUND,
        link = LINK_COLOR,
        link_hover = LINK_HOVER_COLOR,
        divider = SECONDARY_MAIN,
        panel_bg = CHAT_LEFT_PANEL_BACKGROUND,
        panel_text = PANEL_TEXT,
    );

    let style = document.create_element("style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(&css));
    if let Some(head) = document.query_selector("head")? {
        head.append_child(&style)?;
    } else {
        let body = document.body().ok_or_else(|| JsValue::from_str("No body found"))?;
        body.append_child(&style)?;
    }
    Ok(())
}
