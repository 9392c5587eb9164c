use serde::{Deserialize, Serialize};

/// Lifecycle stage of a bot answer as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryState {
    Pending,
    Processing,
    #[default]
    Received,
}

/// A titled source link attached to an answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub url: String,
}

/// One bot turn as handed over by the conversation history collector.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotMessage {
    #[serde(default, alias = "message")]
    pub text: Option<String>,
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default, alias = "messageId")]
    pub id: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub state: DeliveryState,
}

impl BotMessage {
    /// Answer text; an absent text renders as the empty string.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Message id, treating the empty string as absent.
    pub fn message_id(&self) -> Option<&str> {
        non_empty(self.id.as_deref())
    }

    pub fn conversation_id(&self) -> Option<&str> {
        non_empty(self.conversation_id.as_deref())
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Recorded feedback for one message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedbackState {
    #[default]
    None,
    Upvoted,
    Downvoted,
}

impl FeedbackState {
    /// Wire representation expected by the feedback endpoint; `None` is sent
    /// as JSON `null`.
    pub fn wire_value(self) -> Option<&'static str> {
        match self {
            FeedbackState::None => None,
            FeedbackState::Upvoted => Some("UPVOTED"),
            FeedbackState::Downvoted => Some("DOWNVOTED"),
        }
    }

    /// State to request when the user clicks `vote`: the same vote again
    /// clears it, any other vote replaces it.
    pub fn toggled_by(self, vote: Vote) -> FeedbackState {
        let requested = vote.as_state();
        if self == requested {
            FeedbackState::None
        } else {
            requested
        }
    }
}

/// The user's click on one of the two controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vote {
    Up,
    Down,
}

impl Vote {
    pub fn as_state(self) -> FeedbackState {
        match self {
            Vote::Up => FeedbackState::Upvoted,
            Vote::Down => FeedbackState::Downvoted,
        }
    }

    /// Value of the `data-vote` attribute on the control.
    pub fn attr(self) -> &'static str {
        match self {
            Vote::Up => "up",
            Vote::Down => "down",
        }
    }

    pub fn from_attr(value: &str) -> Option<Vote> {
        match value {
            "up" => Some(Vote::Up),
            "down" => Some(Vote::Down),
            _ => None,
        }
    }
}
