//! The widget as a whole: configuration, active locale, one feedback
//! controller per message and the mounted side panel / language switch.
//!
//! Generic over the feedback service so the browser build talks HTTP while
//! tests plug in a scripted service.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::components::bot_response;
use crate::components::language_switch::LanguageSwitch;
use crate::components::side_panel::SidePanel;
use crate::config::WidgetConfig;
use crate::constants::LOCALE_EVENT;
use crate::dom_utils;
use crate::feedback::{FeedbackApi, FeedbackController};
use crate::i18n::Locale;
use crate::models::BotMessage;
use crate::storage;
use crate::turn::{feedback_allowed, TurnView};

struct WidgetInner<A: FeedbackApi> {
    instance_id: String,
    config: WidgetConfig,
    api: Rc<A>,
    locale: Rc<Cell<Locale>>,
    controllers: RefCell<HashMap<String, Rc<FeedbackController<A>>>>,
    side_panel: RefCell<Option<SidePanel>>,
    language_switch: RefCell<Option<LanguageSwitch>>,
}

pub struct Widget<A: FeedbackApi> {
    inner: Rc<WidgetInner<A>>,
}

impl<A: FeedbackApi> Clone for Widget<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A: FeedbackApi + 'static> Widget<A> {
    pub fn new(config: WidgetConfig, api: A, locale: Locale) -> Self {
        Self {
            inner: Rc::new(WidgetInner {
                instance_id: uuid::Uuid::new_v4().simple().to_string(),
                config,
                api: Rc::new(api),
                locale: Rc::new(Cell::new(locale)),
                controllers: RefCell::new(HashMap::new()),
                side_panel: RefCell::new(None),
                language_switch: RefCell::new(None),
            }),
        }
    }

    pub fn locale(&self) -> Locale {
        self.inner.locale.get()
    }

    /// Controller for `message`, created on first use and reused for every
    /// later render of the same message id.  `None` when the message may not
    /// receive feedback.
    pub fn controller_for(&self, message: &BotMessage) -> Option<Rc<FeedbackController<A>>> {
        if !feedback_allowed(message, &self.inner.config) {
            return None;
        }
        let message_id = message.message_id()?;
        let mut controllers = self.inner.controllers.borrow_mut();
        let controller = controllers.entry(message_id.to_string()).or_insert_with(|| {
            log::debug!("Creating feedback controller for message {}", message_id);
            Rc::new(FeedbackController::new(
                Rc::clone(&self.inner.api),
                message.message_id(),
                message.conversation_id(),
            ))
        });
        Some(Rc::clone(controller))
    }

    /// Draw `message` into `container`, replacing whatever was there.
    pub fn render_message(&self, container: &Element, message: &BotMessage) -> Result<Element, JsValue> {
        let document = container
            .owner_document()
            .ok_or_else(|| JsValue::from_str("container is not attached to a document"))?;
        let view = TurnView::plan(message, &self.inner.config);
        let controller = self.controller_for(message);
        bot_response::render(&document, container, &view, self.locale().text(), controller)
    }

    /// Mount the side panel and, when enabled, the language switch into
    /// `host`.  Mounting twice is a no-op.
    pub fn mount(&self, host: &Element) -> Result<(), JsValue> {
        if self.inner.side_panel.borrow().is_some() {
            return Ok(());
        }
        let document = dom_utils::document()?;

        if self.inner.config.multilingual_toggle {
            let weak: Weak<WidgetInner<A>> = Rc::downgrade(&self.inner);
            let on_switch = Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let widget = Widget { inner };
                    if let Err(e) = widget.set_locale(widget.locale().toggled()) {
                        log::warn!("Failed to switch language: {:?}", e);
                    }
                }
            });
            let switch = LanguageSwitch::mount(&document, host, self.locale(), on_switch)?;
            *self.inner.language_switch.borrow_mut() = Some(switch);
        }

        let panel = SidePanel::mount(
            &document,
            host,
            &format!("side-panel-{}", self.inner.instance_id),
            Rc::clone(&self.inner.locale),
            self.inner.config.show_faq,
            self.inner.config.side_panel_open,
        )?;
        *self.inner.side_panel.borrow_mut() = Some(panel);
        Ok(())
    }

    /// Switch locale, remember it for the next visit and redraw the mounted
    /// components.  Hosts re-render their bot turns on `localeChange`.
    pub fn set_locale(&self, locale: Locale) -> Result<(), JsValue> {
        if self.inner.locale.replace(locale) == locale {
            return Ok(());
        }
        log::info!("Language switched to {}", locale);
        if let Err(e) = storage::save_locale(locale) {
            log::warn!("Could not persist language choice: {:?}", e);
        }
        if let Some(panel) = self.inner.side_panel.borrow().as_ref() {
            panel.render();
        }
        if let Some(switch) = self.inner.language_switch.borrow().as_ref() {
            switch.render(locale)?;
        }
        dom_utils::dispatch_window_event(LOCALE_EVENT, &JsValue::from_str(locale.code()))
    }

    pub fn toggle_side_panel(&self) -> Result<bool, JsValue> {
        // Clone the handle so no borrow is held while listeners run.
        let panel = self
            .inner
            .side_panel
            .borrow()
            .clone()
            .ok_or_else(|| JsValue::from_str("widget is not mounted"))?;
        panel.toggle()
    }

    pub fn side_panel_open(&self) -> Option<bool> {
        self.inner.side_panel.borrow().as_ref().map(SidePanel::is_open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{FeedbackAck, TransportError};
    use crate::models::{DeliveryState, FeedbackState};
    use async_trait::async_trait;

    struct AcceptAll;

    #[async_trait(?Send)]
    impl FeedbackApi for AcceptAll {
        async fn send_feedback(
            &self,
            _feedback: FeedbackState,
            _message_id: &str,
            _conversation_id: &str,
        ) -> Result<FeedbackAck, TransportError> {
            Ok(FeedbackAck::ok())
        }
    }

    fn widget(feedback_enabled: bool) -> Widget<AcceptAll> {
        let config = WidgetConfig {
            feedback_enabled,
            ..WidgetConfig::default()
        };
        Widget::new(config, AcceptAll, Locale::En)
    }

    fn message(id: &str, state: DeliveryState) -> BotMessage {
        BotMessage {
            text: Some("answer".into()),
            id: Some(id.into()),
            conversation_id: Some("conv".into()),
            state,
            ..Default::default()
        }
    }

    #[test]
    fn controller_is_created_once_per_message() {
        let w = widget(true);
        let first = w.controller_for(&message("m1", DeliveryState::Received)).unwrap();
        futures::executor::block_on(first.submit(crate::models::Vote::Up)).unwrap();

        let again = w.controller_for(&message("m1", DeliveryState::Received)).unwrap();
        assert!(Rc::ptr_eq(&first, &again));
        assert_eq!(again.state(), FeedbackState::Upvoted);

        let other = w.controller_for(&message("m2", DeliveryState::Received)).unwrap();
        assert!(!Rc::ptr_eq(&first, &other));
        assert_eq!(other.state(), FeedbackState::None);
    }

    #[test]
    fn no_controller_while_processing_or_when_disabled() {
        assert!(widget(true)
            .controller_for(&message("m1", DeliveryState::Processing))
            .is_none());
        assert!(widget(false)
            .controller_for(&message("m1", DeliveryState::Received))
            .is_none());
    }

    #[test]
    fn no_controller_without_identifiers() {
        let w = widget(true);
        let mut msg = message("m1", DeliveryState::Received);
        msg.conversation_id = None;
        assert!(w.controller_for(&msg).is_none());

        let mut msg = message("", DeliveryState::Received);
        msg.id = Some(String::new());
        assert!(w.controller_for(&msg).is_none());
    }

    #[test]
    fn clones_share_state() {
        let w = widget(true);
        let clone = w.clone();
        let a = w.controller_for(&message("m1", DeliveryState::Received)).unwrap();
        let b = clone.controller_for(&message("m1", DeliveryState::Received)).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(clone.locale(), Locale::En);
    }
}
