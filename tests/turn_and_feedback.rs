//! End-to-end checks of the public, DOM-free surface: a bot record goes in,
//! a render plan and a feedback controller come out.
//!
//! Run with: cargo test --test turn_and_feedback

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::executor::block_on;
use qna_chat_frontend::{
    BotMessage, DeliveryState, FeedbackAck, FeedbackApi, FeedbackController, FeedbackState,
    RenderMode, TransportError, TurnView, Vote, WidgetConfig,
};

#[derive(Default)]
struct Recorder {
    sent: RefCell<Vec<(FeedbackState, String, String)>>,
}

#[async_trait(?Send)]
impl FeedbackApi for Recorder {
    async fn send_feedback(
        &self,
        feedback: FeedbackState,
        message_id: &str,
        conversation_id: &str,
    ) -> Result<FeedbackAck, TransportError> {
        self.sent
            .borrow_mut()
            .push((feedback, message_id.to_string(), conversation_id.to_string()));
        Ok(FeedbackAck::ok())
    }
}

fn record(json: &str) -> BotMessage {
    serde_json::from_str(json).expect("valid bot record")
}

#[test]
fn host_record_with_aliases_plans_a_delivered_turn() {
    let config = WidgetConfig::from_json(r#"{"feedbackEnabled": true}"#).unwrap();
    let message = record(
        r#"{
            "message": "Line one\nLine two",
            "messageId": "msg-9",
            "conversationId": "conv-3",
            "state": "RECEIVED",
            "citations": [
                {"title": "Benefits", "url": "https://example.org/b"},
                {"title": "Benefits", "url": "https://example.org/b2"}
            ]
        }"#,
    );

    let view = TurnView::plan(&message, &config);
    assert_eq!(view.mode, RenderMode::Delivered);
    assert_eq!(view.body_html, "Line one<br>Line two");
    assert_eq!(view.citations.len(), 1);
    assert_eq!(view.citations[0].url, "https://example.org/b");
    assert!(view.show_feedback);
}

#[test]
fn processing_record_plans_indicator_only() {
    let config = WidgetConfig::from_json(r#"{"feedbackEnabled": true}"#).unwrap();
    let message = record(
        r#"{"text": "partial", "id": "m", "conversationId": "c", "state": "PROCESSING",
            "citations": [{"title": "t", "url": "u"}]}"#,
    );

    let view = TurnView::plan(&message, &config);
    assert_eq!(view.mode, RenderMode::Processing);
    assert!(view.body_html.is_empty());
    assert!(view.citations.is_empty());
    assert!(!view.show_feedback);
}

#[test]
fn votes_reach_the_service_with_both_identifiers() {
    let api = Rc::new(Recorder::default());
    let controller = FeedbackController::new(Rc::clone(&api), Some("msg-9"), Some("conv-3"));

    assert_eq!(block_on(controller.submit(Vote::Up)).unwrap(), FeedbackState::Upvoted);
    assert_eq!(block_on(controller.submit(Vote::Down)).unwrap(), FeedbackState::Downvoted);
    assert_eq!(block_on(controller.submit(Vote::Down)).unwrap(), FeedbackState::None);

    let sent = api.sent.borrow();
    let states: Vec<_> = sent.iter().map(|(s, _, _)| *s).collect();
    assert_eq!(
        states,
        vec![FeedbackState::Upvoted, FeedbackState::Downvoted, FeedbackState::None]
    );
    assert!(sent.iter().all(|(_, m, c)| m == "msg-9" && c == "conv-3"));
    assert!(!controller.is_in_flight());
}

#[test]
fn pending_state_is_drawn_like_a_delivered_answer() {
    let message = BotMessage {
        text: Some("queued".into()),
        state: DeliveryState::Pending,
        ..Default::default()
    };
    let view = TurnView::plan(&message, &WidgetConfig::default());
    assert_eq!(view.mode, RenderMode::Delivered);
    assert!(!view.show_feedback);
}
