//! Use case for posting a chat message to the project room.

use crate::domain::events::OutboundEvent;

use super::contracts::{ChannelError, ChatChannel};

/// Command to send a message to a project room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageCommand {
    pub project_id: i64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// Message text is empty after trimming whitespace.
    EmptyMessage,
    /// The channel refused or could not take the event.
    ChannelUnavailable(ChannelError),
}

/// Trims and validates the text, then emits `send_message`.
///
/// Returns the content that went out.
pub fn send_message(
    channel: &dyn ChatChannel,
    command: SendMessageCommand,
) -> Result<String, SendMessageError> {
    let content = command.text.trim();
    if content.is_empty() {
        return Err(SendMessageError::EmptyMessage);
    }

    let event = OutboundEvent::SendMessage {
        project_id: command.project_id,
        content: content.to_owned(),
    };

    channel
        .emit(&event)
        .map_err(SendMessageError::ChannelUnavailable)?;

    Ok(content.to_owned())
}
