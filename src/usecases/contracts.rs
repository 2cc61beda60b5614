use anyhow::Result;
use thiserror::Error;

use crate::domain::{
    events::{OutboundEvent, TimedEvent},
    file_preview::SelectedFile,
    message::MessageBubble,
    notice::ToastKind,
    request::{HttpRequest, HttpResponse},
};

/// Outgoing side of the room channel. The transport itself lives outside this crate.
pub trait ChatChannel {
    fn emit(&self, event: &OutboundEvent) -> Result<(), ChannelError>;
}

impl<T: ChatChannel + ?Sized> ChatChannel for &T {
    fn emit(&self, event: &OutboundEvent) -> Result<(), ChannelError> {
        (*self).emit(event)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("channel is disconnected")]
    Disconnected,
    #[error("channel rejected `{event}`: {reason}")]
    Rejected { event: &'static str, reason: String },
}

/// Named slots of the chat widget: message list, input, typing indicator.
pub trait ChatView {
    fn clear_messages(&mut self);
    fn append_message(&mut self, bubble: &MessageBubble);
    fn scroll_to_bottom(&mut self);
    fn input_text(&self) -> String;
    fn set_input_text(&mut self, text: &str);
    fn show_typing_indicator(&mut self, text: &str);
    fn hide_typing_indicator(&mut self);
}

pub trait ToastSink {
    fn show_toast(&mut self, message: &str, kind: ToastKind);
}

pub trait HttpTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (*self).execute(request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid request url `{0}`")]
    InvalidUrl(String),
    #[error("{0}")]
    Network(String),
}

pub trait FileReader {
    /// Reads the file as a `data:` URL.
    fn read_data_url(&self, file: &SelectedFile) -> Result<String, FileReadError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to read `{name}`: {reason}")]
pub struct FileReadError {
    pub name: String,
    pub reason: String,
}

pub trait PageEventSource {
    fn next_event(&mut self) -> Result<Option<TimedEvent>>;
}

pub trait PageOrchestrator {
    fn handle_event(&mut self, event: TimedEvent) -> Result<()>;
}
