//! Decides what a bot turn shows before anything touches the DOM.

use std::collections::HashSet;

use crate::config::WidgetConfig;
use crate::models::{BotMessage, Citation, DeliveryState};

/// The two mutually exclusive ways a turn is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Answer still being generated: typing indicator only.
    Processing,
    /// Answer text (possibly empty) with citations and feedback.
    Delivered,
}

impl From<DeliveryState> for RenderMode {
    fn from(state: DeliveryState) -> Self {
        match state {
            DeliveryState::Processing => RenderMode::Processing,
            DeliveryState::Pending | DeliveryState::Received => RenderMode::Delivered,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TurnView {
    pub mode: RenderMode,
    /// Sanitised HTML for the answer body; empty while processing.
    pub body_html: String,
    /// Deduplicated sources; empty while processing.
    pub citations: Vec<Citation>,
    pub show_feedback: bool,
}

impl TurnView {
    pub fn plan(message: &BotMessage, config: &WidgetConfig) -> Self {
        match RenderMode::from(message.state) {
            RenderMode::Processing => TurnView {
                mode: RenderMode::Processing,
                body_html: String::new(),
                citations: Vec::new(),
                show_feedback: false,
            },
            RenderMode::Delivered => TurnView {
                mode: RenderMode::Delivered,
                body_html: config.text_policy().render(message.text()),
                citations: dedupe_citations(&message.citations),
                show_feedback: feedback_allowed(message, config),
            },
        }
    }
}

/// Feedback needs the feature flag and both identifiers; without them the
/// controller could never submit anything.
pub fn feedback_allowed(message: &BotMessage, config: &WidgetConfig) -> bool {
    config.feedback_enabled
        && RenderMode::from(message.state) == RenderMode::Delivered
        && message.message_id().is_some()
        && message.conversation_id().is_some()
}

/// Keep the first citation for each title, in input order.
pub fn dedupe_citations(citations: &[Citation]) -> Vec<Citation> {
    let mut seen = HashSet::with_capacity(citations.len());
    citations
        .iter()
        .filter(|c| seen.insert(c.title.as_str()))
        .cloned()
        .collect()
}
