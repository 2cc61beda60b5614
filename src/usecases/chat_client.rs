//! Project chat widget: room membership, history, sending and typing signals.
//!
//! The client never touches the page directly. Everything it renders goes
//! through [`ChatView`], and every outgoing signal through [`ChatChannel`].
//! Time enters as the event-loop clock (`now_ms`, unix millis).

use crate::domain::{
    events::{InboundEvent, OutboundEvent},
    message::{Message, MessageBubble},
    session::SessionContext,
    time_format::local_from_millis,
    typing_state::{KeystrokeOutcome, TypingState},
};

use super::{
    contracts::{ChatChannel, ChatView},
    load_messages::{load_messages, HistorySource},
    send_message::{send_message, SendMessageCommand, SendMessageError},
};

const CHAT_EMIT_FAILED: &str = "CHAT_EMIT_FAILED";
const CHAT_HISTORY_LOAD_FAILED: &str = "CHAT_HISTORY_LOAD_FAILED";
const CHAT_NOT_INITIALIZED: &str = "CHAT_NOT_INITIALIZED";

pub struct ChatClient<C> {
    channel: C,
    session: Option<SessionContext>,
    typing: TypingState,
    typing_debounce_ms: u64,
}

impl<C: ChatChannel> ChatClient<C> {
    pub fn new(channel: C, typing_debounce_ms: u64) -> Self {
        Self {
            channel,
            session: None,
            typing: TypingState::Idle,
            typing_debounce_ms,
        }
    }

    pub fn session(&self) -> Option<SessionContext> {
        self.session
    }

    pub fn typing_state(&self) -> TypingState {
        self.typing
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Joins the project room and renders its history.
    ///
    /// A second call switches rooms: a pending typing signal for the old
    /// room is stopped first, then the new room is joined.
    pub fn init(
        &mut self,
        session: SessionContext,
        history: &dyn HistorySource,
        view: &mut dyn ChatView,
        now_ms: i64,
    ) {
        if self.session.is_some() {
            self.stop_typing();
        }

        self.session = Some(session);
        tracing::info!(
            project_id = session.project_id,
            user_id = session.user_id,
            "joining chat room"
        );
        self.emit(OutboundEvent::JoinRoom {
            project_id: session.project_id,
        });

        self.load_messages(history, view, now_ms);
    }

    pub fn leave(&mut self) {
        let Some(session) = self.session else {
            return;
        };

        self.stop_typing();
        self.emit(OutboundEvent::LeaveRoom {
            project_id: session.project_id,
        });
        self.session = None;
    }

    /// Replaces the message list with the room history.
    ///
    /// Failures are logged and leave the current list as it was.
    pub fn load_messages(&self, history: &dyn HistorySource, view: &mut dyn ChatView, now_ms: i64) {
        let Some(session) = self.session else {
            tracing::debug!(code = CHAT_NOT_INITIALIZED, "history load skipped");
            return;
        };

        match load_messages(history, session.project_id) {
            Ok(messages) => {
                view.clear_messages();
                for message in &messages {
                    self.append_message(message, view, now_ms);
                }
                view.scroll_to_bottom();
                tracing::debug!(
                    project_id = session.project_id,
                    count = messages.len(),
                    "chat history rendered"
                );
            }
            Err(error) => {
                tracing::warn!(
                    code = CHAT_HISTORY_LOAD_FAILED,
                    reason = error.code(),
                    project_id = session.project_id,
                    "failed to load messages"
                );
            }
        }
    }

    pub fn append_message(&self, message: &Message, view: &mut dyn ChatView, now_ms: i64) {
        let current_user_id = self.session.map(|session| session.user_id);
        let bubble =
            MessageBubble::from_message(message, current_user_id, &local_from_millis(now_ms));
        view.append_message(&bubble);
    }

    /// Sends the input content. Blank input is left untouched and nothing goes out.
    pub fn send_message(&mut self, view: &mut dyn ChatView) {
        let Some(session) = self.session else {
            tracing::debug!(code = CHAT_NOT_INITIALIZED, "send skipped");
            return;
        };

        let command = SendMessageCommand {
            project_id: session.project_id,
            text: view.input_text(),
        };

        match send_message(&self.channel, command) {
            Ok(_) => {
                view.set_input_text("");
                self.stop_typing();
            }
            Err(SendMessageError::EmptyMessage) => {}
            Err(SendMessageError::ChannelUnavailable(error)) => {
                tracing::warn!(
                    code = CHAT_EMIT_FAILED,
                    error = %error,
                    "message not sent, input kept"
                );
            }
        }
    }

    /// Input changed: announce typing on the first keystroke, push the deadline on every one.
    pub fn on_input(&mut self, now_ms: i64) {
        let Some(session) = self.session else {
            return;
        };

        if self.typing.keystroke(now_ms, self.typing_debounce_ms) == KeystrokeOutcome::Started {
            self.emit(OutboundEvent::Typing {
                project_id: session.project_id,
            });
        }
    }

    /// Returns true when the key was consumed (Enter without Shift sends).
    pub fn on_key_press(&mut self, key: &str, shift: bool, view: &mut dyn ChatView) -> bool {
        if key != "Enter" || shift {
            return false;
        }

        self.send_message(view);
        true
    }

    /// Fires the typing deadline once the clock reaches it.
    pub fn advance(&mut self, now_ms: i64) {
        if self.typing.expire(now_ms) {
            self.emit_stop_typing();
        }
    }

    pub fn stop_typing(&mut self) {
        if self.typing.stop() {
            self.emit_stop_typing();
        }
    }

    pub fn handle_inbound(&mut self, event: InboundEvent, view: &mut dyn ChatView, now_ms: i64) {
        let current_user_id = self.session.map(|session| session.user_id);

        match event {
            InboundEvent::NewMessage(mut message) => {
                if Some(message.sender_id) == current_user_id {
                    return;
                }
                message.is_own = false;
                self.append_message(&message, view, now_ms);
                view.scroll_to_bottom();
            }
            InboundEvent::UserTyping { user_id, user_name } => {
                if Some(user_id) != current_user_id {
                    view.show_typing_indicator(&format!("{user_name} is typing..."));
                }
            }
            InboundEvent::UserStopTyping { .. } => view.hide_typing_indicator(),
            InboundEvent::Status { msg } => {
                tracing::info!(status = %msg, "chat room status");
            }
        }
    }

    fn emit_stop_typing(&self) {
        if let Some(session) = self.session {
            self.emit(OutboundEvent::StopTyping {
                project_id: session.project_id,
            });
        }
    }

    fn emit(&self, event: OutboundEvent) {
        if let Err(error) = self.channel.emit(&event) {
            tracing::warn!(
                code = CHAT_EMIT_FAILED,
                event = event.name(),
                error = %error,
                "channel emit failed"
            );
        }
    }
}
