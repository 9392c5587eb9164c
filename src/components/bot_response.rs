//! Bot turn: typing indicator while processing, otherwise answer text,
//! deduplicated sources and the up/down controls.

use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event};

use crate::dom_utils;
use crate::feedback::{FeedbackApi, FeedbackController, FeedbackSnapshot};
use crate::i18n::TextTable;
use crate::markup::{escape_html, safe_href};
use crate::models::Vote;
use crate::turn::{RenderMode, TurnView};

/// Inner HTML of the `.bot-message` bubble.
///
/// `feedback` is `Some` only when the view allows feedback; the snapshot
/// decides which control is pressed and whether both are disabled.
pub fn bubble_markup(view: &TurnView, text: &TextTable, feedback: Option<FeedbackSnapshot>) -> String {
    if view.mode == RenderMode::Processing {
        return format!(
            r#"<span class="thinking-label">{}</span><span class="typing-dots" aria-hidden="true"><span class="dot"></span><span class="dot"></span><span class="dot"></span></span>"#,
            escape_html(text.thinking)
        );
    }

    let mut html = format!(r#"<div class="bot-text">{}</div>"#, view.body_html);

    if !view.citations.is_empty() {
        html.push_str(r#"<div class="citations">"#);
        html.push_str(&format!(
            r#"<span class="citations-caption">{}</span>"#,
            escape_html(text.sources_label)
        ));
        for citation in &view.citations {
            html.push_str(&format!(
                r#"<div class="citation"><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></div>"#,
                escape_html(safe_href(&citation.url)),
                escape_html(&citation.title)
            ));
        }
        html.push_str("</div>");
    }

    if let (true, Some(snapshot)) = (view.show_feedback, feedback) {
        html.push_str(r#"<div class="feedback-bar">"#);
        html.push_str(&feedback_button(Vote::Up, text.thumbs_up, "👍", snapshot));
        html.push_str(&feedback_button(Vote::Down, text.thumbs_down, "👎", snapshot));
        html.push_str("</div>");
    }

    html
}

fn feedback_button(vote: Vote, label: &str, glyph: &str, snapshot: FeedbackSnapshot) -> String {
    let pressed = snapshot.state == vote.as_state();
    format!(
        r#"<button type="button" class="feedback-btn feedback-{attr}{active}" data-vote="{attr}" aria-label="{label}" aria-pressed="{pressed}"{disabled}>{glyph}</button>"#,
        attr = vote.attr(),
        active = if pressed { " active" } else { "" },
        label = escape_html(label),
        pressed = pressed,
        disabled = if snapshot.in_flight { " disabled" } else { "" },
        glyph = glyph,
    )
}

/// Replace the children of `container` with the rendered turn and wire the
/// feedback controls to `controller`.
pub fn render<A: FeedbackApi + 'static>(
    document: &Document,
    container: &Element,
    view: &TurnView,
    text: &TextTable,
    controller: Option<Rc<FeedbackController<A>>>,
) -> Result<Element, JsValue> {
    dom_utils::ensure_styles(document)?;

    let row = document.create_element("div")?;
    row.set_class_name("bot-row");

    let avatar = document.create_element("div")?;
    avatar.set_class_name("bot-avatar");
    avatar.set_attribute("aria-hidden", "true")?;
    row.append_child(&avatar)?;

    let bubble = document.create_element("div")?;
    bubble.set_class_name(match view.mode {
        RenderMode::Processing => "bot-message thinking",
        RenderMode::Delivered => "bot-message",
    });
    if view.mode == RenderMode::Processing {
        bubble.set_attribute("aria-busy", "true")?;
    }
    let controller = controller.filter(|_| view.show_feedback);
    bubble.set_inner_html(&bubble_markup(
        view,
        text,
        controller.as_ref().map(|c| c.snapshot()),
    ));
    row.append_child(&bubble)?;

    container.set_inner_html("");
    container.append_child(&row)?;

    if let Some(controller) = controller {
        wire_feedback(&bubble, controller)?;
    }

    Ok(row)
}

/// Click listener on one rendered bubble.  Dropping it detaches the listener
/// and frees the closure.
struct ClickBinding {
    bubble: Element,
    click: Closure<dyn FnMut(Event)>,
}

impl Drop for ClickBinding {
    fn drop(&mut self) {
        let _ = self
            .bubble
            .remove_event_listener_with_callback("click", self.click.as_ref().unchecked_ref());
    }
}

fn wire_feedback<A: FeedbackApi + 'static>(
    bubble: &Element,
    controller: Rc<FeedbackController<A>>,
) -> Result<(), JsValue> {
    let weak: Weak<FeedbackController<A>> = Rc::downgrade(&controller);
    let click = Closure::wrap(Box::new(move |e: Event| {
        let Some((_, attr)) = dom_utils::closest_with_data(&e, "vote") else {
            return;
        };
        let (Some(vote), Some(controller)) = (Vote::from_attr(&attr), weak.upgrade()) else {
            return;
        };
        spawn_local(async move {
            // Failures are logged by the controller; the controls simply
            // stay in their previous state.
            let _ = controller.submit(vote).await;
        });
    }) as Box<dyn FnMut(Event)>);
    bubble.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;

    // The controller outlives re-renders.  Its observer owns the listener of
    // the bubble currently on screen, so the next render detaches the old
    // one when it installs its own.
    let binding = ClickBinding {
        bubble: bubble.clone(),
        click,
    };
    controller.set_observer(move |snapshot| sync_buttons(&binding.bubble, snapshot));
    Ok(())
}

fn sync_buttons(bubble: &Element, snapshot: FeedbackSnapshot) {
    for vote in [Vote::Up, Vote::Down] {
        let selector = format!(".feedback-{}", vote.attr());
        let Ok(Some(button)) = bubble.query_selector(&selector) else {
            continue;
        };
        let pressed = snapshot.state == vote.as_state();
        let classes = button.class_list();
        let _ = if pressed {
            classes.add_1("active")
        } else {
            classes.remove_1("active")
        };
        let _ = button.set_attribute("aria-pressed", if pressed { "true" } else { "false" });
        let _ = if snapshot.in_flight {
            button.set_attribute("disabled", "")
        } else {
            button.remove_attribute("disabled")
        };
    }
}
