use serde::{Deserialize, Serialize};

use super::{
    file_preview::SelectedFile, message::Message, notice::ToastKind, request::RequestOptions,
};

/// Events the chat client emits on the room channel.
///
/// Wire form: `{"event": "<name>", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum OutboundEvent {
    JoinRoom { project_id: i64 },
    LeaveRoom { project_id: i64 },
    SendMessage { project_id: i64, content: String },
    Typing { project_id: i64 },
    StopTyping { project_id: i64 },
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::JoinRoom { .. } => "join_room",
            Self::LeaveRoom { .. } => "leave_room",
            Self::SendMessage { .. } => "send_message",
            Self::Typing { .. } => "typing",
            Self::StopTyping { .. } => "stop_typing",
        }
    }

    pub fn project_id(&self) -> i64 {
        match self {
            Self::JoinRoom { project_id }
            | Self::LeaveRoom { project_id }
            | Self::SendMessage { project_id, .. }
            | Self::Typing { project_id }
            | Self::StopTyping { project_id } => *project_id,
        }
    }
}

/// Events the room channel delivers to the chat client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum InboundEvent {
    NewMessage(Message),
    UserTyping {
        user_id: i64,
        user_name: String,
    },
    UserStopTyping {
        #[serde(default)]
        user_id: Option<i64>,
    },
    Status {
        msg: String,
    },
}

/// Everything that can happen on the page: DOM interactions, calls from
/// inline page scripts, channel deliveries and clock ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    ChatInit {
        project_id: i64,
        user_id: i64,
    },
    ChatLeave,
    /// The message input changed; `value` is its new content.
    ChatInput {
        value: String,
    },
    ChatKeyPress {
        key: String,
        #[serde(default)]
        shift: bool,
    },
    SendClicked,
    Inbound {
        payload: InboundEvent,
    },
    /// Document-level click, identified by the clicked element id.
    Click {
        target_id: String,
    },
    StarClicked {
        container_id: String,
        index: usize,
    },
    StarHovered {
        container_id: String,
        index: usize,
    },
    RatingLeft {
        container_id: String,
    },
    FilesSelected {
        input_id: String,
        files: Vec<SelectedFile>,
    },
    FormSubmitted {
        form_id: String,
    },
    OpenModal {
        modal_id: String,
    },
    CloseModal {
        modal_id: String,
    },
    ShowToast {
        message: String,
        #[serde(default)]
        kind: ToastKind,
    },
    FetchJson {
        url: String,
        #[serde(default)]
        options: RequestOptions,
    },
    Tick,
}

/// A page event stamped with the event-loop clock (unix millis).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub at_ms: i64,
    pub event: PageEvent,
}

impl TimedEvent {
    pub fn new(at_ms: i64, event: PageEvent) -> Self {
        Self { at_ms, event }
    }
}
