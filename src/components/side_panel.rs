//! Collapsible "About us / FAQ" panel shown next to the chat.
//!
//! Open/closed state lives here.  Mounting and every later change fire
//! `leftNavChange` on `window` with the current state as `detail`, so the
//! host layout can size the chat column from the start.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

use crate::constants::SIDE_PANEL_EVENT;
use crate::dom_utils;
use crate::i18n::{Locale, TextTable};
use crate::markup::escape_html;

/// Panel contents for the given state.
pub fn panel_markup(open: bool, text: &TextTable, show_faq: bool) -> String {
    if !open {
        return format!(
            r#"<button type="button" class="panel-icon" data-action="open" aria-label="{label}" title="{label}">&#9654;</button>"#,
            label = escape_html(text.open_panel)
        );
    }

    let mut html = format!(
        r#"<button type="button" class="panel-icon" data-action="close" aria-label="{label}" title="{label}">&#10005;</button>"#,
        label = escape_html(text.close_panel)
    );
    html.push_str(&format!(
        r#"<section class="about"><h2>{}</h2><p>{}</p></section>"#,
        escape_html(text.about_us_title),
        escape_html(text.about_us)
    ));
    if show_faq {
        html.push_str(&format!(r#"<section class="faq"><h3>{}</h3><ul>"#, escape_html(text.faq_title)));
        for question in text.faqs {
            html.push_str(&format!("<li>{}</li>", escape_html(question)));
        }
        html.push_str("</ul></section>");
    }
    html.push_str(&format!(
        r#"<div class="simplify-box"><h3>{}</h3><p>{}</p></div>"#,
        escape_html(text.simplify_mode_title),
        escape_html(text.simplify_mode_body)
    ));
    html
}

struct PanelInner {
    root: Element,
    open: Cell<bool>,
    locale: Rc<Cell<Locale>>,
    show_faq: bool,
}

/// Handle to a mounted panel.  Clones share the same DOM node and state.
#[derive(Clone)]
pub struct SidePanel {
    inner: Rc<PanelInner>,
}

impl SidePanel {
    /// Create the `<aside>` inside `host` and draw it.
    pub fn mount(
        document: &Document,
        host: &Element,
        panel_id: &str,
        locale: Rc<Cell<Locale>>,
        show_faq: bool,
        open: bool,
    ) -> Result<SidePanel, JsValue> {
        dom_utils::ensure_styles(document)?;

        let root = document.create_element("aside")?;
        root.set_id(panel_id);
        root.set_class_name("side-panel");
        host.append_child(&root)?;

        let panel = SidePanel {
            inner: Rc::new(PanelInner {
                root,
                open: Cell::new(open),
                locale,
                show_faq,
            }),
        };
        panel.render();
        panel.listen()?;
        dom_utils::dispatch_window_event(SIDE_PANEL_EVENT, &JsValue::from_bool(open))?;
        Ok(panel)
    }

    pub fn is_open(&self) -> bool {
        self.inner.open.get()
    }

    /// Redraw with the current locale and state.
    pub fn render(&self) {
        let inner = &self.inner;
        let locale = inner.locale.get();
        inner.root.set_inner_html(&panel_markup(inner.open.get(), locale.text(), inner.show_faq));
        let _ = inner.root.set_attribute("lang", locale.html_lang());
        let class_list = inner.root.class_list();
        let _ = if inner.open.get() {
            class_list.remove_1("collapsed")
        } else {
            class_list.add_1("collapsed")
        };
    }

    pub fn set_open(&self, open: bool) -> Result<(), JsValue> {
        if self.inner.open.replace(open) == open {
            return Ok(());
        }
        self.render();
        log::debug!("Side panel {}", if open { "opened" } else { "closed" });
        dom_utils::dispatch_window_event(SIDE_PANEL_EVENT, &JsValue::from_bool(open))
    }

    /// Flip the panel and return the new state.
    pub fn toggle(&self) -> Result<bool, JsValue> {
        let open = !self.is_open();
        self.set_open(open)?;
        Ok(open)
    }

    // One delegated listener for the lifetime of the panel; the icon buttons
    // are recreated on every render.
    fn listen(&self) -> Result<(), JsValue> {
        let panel = self.clone();
        let click = Closure::wrap(Box::new(move |e: Event| {
            let Some((_, action)) = dom_utils::closest_with_data(&e, "action") else {
                return;
            };
            let result = match action.as_str() {
                "open" => panel.set_open(true),
                "close" => panel.set_open(false),
                _ => Ok(()),
            };
            if let Err(e) = result {
                log::warn!("Failed to update side panel: {:?}", e);
            }
        }) as Box<dyn FnMut(_)>);

        self.inner
            .root
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        click.forget();
        Ok(())
    }
}
