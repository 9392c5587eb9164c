//! Up/down-vote controller for a single bot message.
//!
//! The controller owns the recorded [`FeedbackState`] of its message and an
//! in-flight flag.  A click turns into one call to [`FeedbackApi`]; the
//! recorded state only changes when the backend acknowledges success, so a
//! failed call leaves the controls exactly where they were.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{non_empty, FeedbackState, Vote};

/// Acknowledgement returned by the feedback service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FeedbackAck {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl FeedbackAck {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(reason.into()),
        }
    }
}

/// The call itself could not complete (network down, endpoint missing, …).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// External collaborator that records feedback.
#[async_trait(?Send)]
pub trait FeedbackApi {
    async fn send_feedback(
        &self,
        feedback: FeedbackState,
        message_id: &str,
        conversation_id: &str,
    ) -> Result<FeedbackAck, TransportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlockReason {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("message id is missing")]
    MissingMessageId,
    #[error("conversation id is missing")]
    MissingConversationId,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    /// Nothing was sent.
    #[error("feedback submission blocked: {0}")]
    Blocked(BlockReason),
    /// The call was made and did not succeed; recorded state is unchanged.
    #[error("feedback submission failed: {0}")]
    Failed(String),
}

/// What the controls need to draw themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackSnapshot {
    pub state: FeedbackState,
    pub in_flight: bool,
}

type Observer = Box<dyn Fn(FeedbackSnapshot)>;

pub struct FeedbackController<A: FeedbackApi> {
    api: Rc<A>,
    message_id: Option<String>,
    conversation_id: Option<String>,
    state: Cell<FeedbackState>,
    in_flight: Cell<bool>,
    observer: RefCell<Option<Observer>>,
}

/// Holds the in-flight flag for the duration of one submission and clears
/// it on drop, whichever way the submission ends.
struct InFlightGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

impl<A: FeedbackApi> FeedbackController<A> {
    pub fn new(api: Rc<A>, message_id: Option<&str>, conversation_id: Option<&str>) -> Self {
        Self {
            api,
            message_id: non_empty(message_id).map(str::to_string),
            conversation_id: non_empty(conversation_id).map(str::to_string),
            state: Cell::new(FeedbackState::None),
            in_flight: Cell::new(false),
            observer: RefCell::new(None),
        }
    }

    pub fn state(&self) -> FeedbackState {
        self.state.get()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    pub fn snapshot(&self) -> FeedbackSnapshot {
        FeedbackSnapshot {
            state: self.state.get(),
            in_flight: self.in_flight.get(),
        }
    }

    /// Replace the observer notified after every state or in-flight change.
    pub fn set_observer(&self, observer: impl Fn(FeedbackSnapshot) + 'static) {
        *self.observer.borrow_mut() = Some(Box::new(observer));
    }

    /// Handle one click on the up or down control.
    ///
    /// Returns the newly recorded state on success.  Blocked submissions make
    /// no call; failed ones leave the recorded state untouched.
    pub async fn submit(&self, vote: Vote) -> Result<FeedbackState, FeedbackError> {
        let guard = match InFlightGuard::acquire(&self.in_flight) {
            Some(guard) => guard,
            None => return Err(self.blocked(BlockReason::InFlight)),
        };
        let Some(message_id) = self.message_id.as_deref() else {
            return Err(self.blocked(BlockReason::MissingMessageId));
        };
        let Some(conversation_id) = self.conversation_id.as_deref() else {
            return Err(self.blocked(BlockReason::MissingConversationId));
        };

        let target = self.state.get().toggled_by(vote);
        self.notify();
        log::debug!(
            "Sending feedback {:?} for message {} in conversation {}",
            target,
            message_id,
            conversation_id
        );

        let result = match self
            .api
            .send_feedback(target, message_id, conversation_id)
            .await
        {
            Ok(ack) if ack.success => {
                self.state.set(target);
                log::info!("Feedback {:?} recorded for message {}", target, message_id);
                Ok(target)
            }
            Ok(ack) => {
                let reason = ack
                    .error
                    .unwrap_or_else(|| "service reported failure".to_string());
                log::error!("Feedback submission failed for message {}: {}", message_id, reason);
                Err(FeedbackError::Failed(reason))
            }
            Err(e) => {
                log::error!("Error submitting feedback for message {}: {}", message_id, e);
                Err(FeedbackError::Failed(e.to_string()))
            }
        };

        drop(guard);
        self.notify();
        result
    }

    fn blocked(&self, reason: BlockReason) -> FeedbackError {
        log::debug!(
            "Feedback submission blocked ({}) for message {:?}",
            reason,
            self.message_id
        );
        FeedbackError::Blocked(reason)
    }

    fn notify(&self) {
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer(self.snapshot());
        }
    }
}
