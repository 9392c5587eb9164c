use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

use crate::i18n::Locale;

/// Button flipping between English and Spanish.  It is labelled with the
/// language it switches *to*, written in that language.
pub struct LanguageSwitch {
    button: Element,
}

impl LanguageSwitch {
    pub fn mount(
        document: &Document,
        host: &Element,
        current: Locale,
        on_switch: Rc<dyn Fn()>,
    ) -> Result<Self, JsValue> {
        let button = document.create_element("button")?;
        button.set_attribute("type", "button")?;
        button.set_class_name("language-switch");
        host.append_child(&button)?;

        let click = Closure::wrap(Box::new(move |_: Event| on_switch()) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        click.forget();

        let switch = Self { button };
        switch.render(current)?;
        Ok(switch)
    }

    pub fn render(&self, current: Locale) -> Result<(), JsValue> {
        let target = current.toggled();
        self.button.set_text_content(Some(target.native_name()));
        self.button.set_attribute("title", current.text().language_tooltip)?;
        self.button.set_attribute("lang", target.html_lang())?;
        self.button.set_attribute("data-locale", target.code())?;
        Ok(())
    }
}
