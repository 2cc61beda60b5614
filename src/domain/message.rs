use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::time_format::format_created_at;

/// A chat message as delivered by the history endpoint or a `new_message` event.
///
/// Extra server fields (attachments, sender_image) are ignored on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub sender_id: i64,
    pub sender_name: String,
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub is_own: bool,
}

impl Message {
    /// A message is own when the sender matches the current user or the flag is set.
    pub fn is_own_for(&self, current_user_id: Option<i64>) -> bool {
        current_user_id == Some(self.sender_id) || self.is_own
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleAlignment {
    /// Left side, messages from other participants.
    Start,
    /// Right side, messages from the current user.
    End,
}

/// View-ready projection of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBubble {
    pub alignment: BubbleAlignment,
    pub sender_label: Option<String>,
    pub content: String,
    pub time_label: String,
}

impl MessageBubble {
    pub fn from_message(
        message: &Message,
        current_user_id: Option<i64>,
        now: &DateTime<Local>,
    ) -> Self {
        let is_own = message.is_own_for(current_user_id);

        Self {
            alignment: if is_own {
                BubbleAlignment::End
            } else {
                BubbleAlignment::Start
            },
            sender_label: (!is_own).then(|| message.sender_name.clone()),
            content: message.content.clone(),
            time_label: format_created_at(&message.created_at, now),
        }
    }

    pub fn is_own(&self) -> bool {
        self.alignment == BubbleAlignment::End
    }
}
