//! Browser-only tests that exercise real DOM rendering.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, Document, Element, Event, HtmlElement};

use crate::feedback::{FeedbackAck, FeedbackApi, TransportError};
use crate::models::FeedbackState;


/// Feedback service that records calls and answers from a script.  Clones
/// share the log, so a test keeps one while the widget owns the other.
#[derive(Clone, Default)]
pub(crate) struct RecordingApi {
    pub calls: Rc<RefCell<Vec<FeedbackState>>>,
    pub replies: Rc<RefCell<Vec<bool>>>,
}

#[async_trait(?Send)]
impl FeedbackApi for RecordingApi {
    async fn send_feedback(
        &self,
        feedback: FeedbackState,
        _message_id: &str,
        _conversation_id: &str,
    ) -> Result<FeedbackAck, TransportError> {
        self.calls.borrow_mut().push(feedback);
        let mut replies = self.replies.borrow_mut();
        let success = if replies.is_empty() { true } else { replies.remove(0) };
        Ok(if success {
            FeedbackAck::ok()
        } else {
            FeedbackAck::rejected("scripted failure")
        })
    }
}

pub(crate) fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Empty `<div>` appended to `<body>`.
pub(crate) fn container() -> Element {
    let doc = document();
    let el = doc.create_element("div").unwrap();
    doc.body().unwrap().append_child(&el).unwrap();
    el
}

pub(crate) fn click(el: &Element) {
    el.clone().dyn_into::<HtmlElement>().unwrap().click();
}

/// Let `spawn_local` tasks run to completion.
pub(crate) async fn settle() {
    for _ in 0..4 {
        let promise = js_sys::Promise::resolve(&wasm_bindgen::JsValue::NULL);
        let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    }
}

/// Records the boolean `detail` of every `name` event fired on `window`
/// until dropped.
pub(crate) struct WindowEvents {
    name: &'static str,
    pub seen: Rc<RefCell<Vec<bool>>>,
    listener: Closure<dyn FnMut(Event)>,
}

impl WindowEvents {
    pub(crate) fn record(name: &'static str) -> Self {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let listener = Closure::wrap(Box::new(move |e: Event| {
            if let Some(detail) = e
                .dyn_ref::<CustomEvent>()
                .and_then(|e| e.detail().as_bool())
            {
                sink.borrow_mut().push(detail);
            }
        }) as Box<dyn FnMut(Event)>);
        web_sys::window()
            .unwrap()
            .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
            .unwrap();
        Self { name, seen, listener }
    }
}

impl Drop for WindowEvents {
    fn drop(&mut self) {
        let _ = web_sys::window().unwrap().remove_event_listener_with_callback(
            self.name,
            self.listener.as_ref().unchecked_ref(),
        );
    }
}
