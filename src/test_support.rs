use std::cell::RefCell;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{
    domain::{
        events::OutboundEvent,
        file_preview::SelectedFile,
        message::{Message, MessageBubble},
        notice::ToastKind,
        request::{HttpRequest, HttpResponse},
    },
    usecases::{
        contracts::{
            ChannelError, ChatChannel, ChatView, FileReadError, FileReader, HttpTransport,
            ToastSink, TransportError,
        },
        load_messages::{HistorySource, HistorySourceError},
    },
};

#[derive(Debug, Default)]
pub struct RecordingChannel {
    events: RefCell<Vec<OutboundEvent>>,
    disconnected: bool,
}

impl RecordingChannel {
    pub fn disconnected() -> Self {
        Self {
            events: RefCell::default(),
            disconnected: true,
        }
    }

    pub fn events(&self) -> Vec<OutboundEvent> {
        self.events.borrow().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(OutboundEvent::name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.names().into_iter().filter(|event| *event == name).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl ChatChannel for RecordingChannel {
    fn emit(&self, event: &OutboundEvent) -> Result<(), ChannelError> {
        if self.disconnected {
            return Err(ChannelError::Disconnected);
        }

        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}

#[derive(Debug)]
pub struct StubTransport {
    outcome: Result<HttpResponse, TransportError>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            outcome: Ok(HttpResponse {
                status,
                body: body.to_owned(),
            }),
            requests: RefCell::default(),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(TransportError::Network(reason.to_owned())),
            requests: RefCell::default(),
        }
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl HttpTransport for StubTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        self.outcome.clone()
    }
}

#[derive(Debug, Default)]
pub struct RecordingToasts {
    pub shown: Vec<(String, ToastKind)>,
}

impl ToastSink for RecordingToasts {
    fn show_toast(&mut self, message: &str, kind: ToastKind) {
        self.shown.push((message.to_owned(), kind));
    }
}

#[derive(Debug)]
pub struct StubHistory {
    outcome: Result<Vec<Message>, HistorySourceError>,
}

impl StubHistory {
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            outcome: Ok(messages),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: Err(HistorySourceError::Unavailable("offline".to_owned())),
        }
    }
}

impl HistorySource for StubHistory {
    fn list_messages(&self, _project_id: i64) -> Result<Vec<Message>, HistorySourceError> {
        self.outcome.clone()
    }
}

#[derive(Debug, Default)]
pub struct MemoryChatView {
    pub bubbles: Vec<MessageBubble>,
    pub input: String,
    pub typing_indicator: Option<String>,
    pub clears: usize,
    pub scrolls: usize,
}

impl ChatView for MemoryChatView {
    fn clear_messages(&mut self) {
        self.clears += 1;
        self.bubbles.clear();
    }

    fn append_message(&mut self, bubble: &MessageBubble) {
        self.bubbles.push(bubble.clone());
    }

    fn scroll_to_bottom(&mut self) {
        self.scrolls += 1;
    }

    fn input_text(&self) -> String {
        self.input.clone()
    }

    fn set_input_text(&mut self, text: &str) {
        self.input = text.to_owned();
    }

    fn show_typing_indicator(&mut self, text: &str) {
        self.typing_indicator = Some(text.to_owned());
    }

    fn hide_typing_indicator(&mut self) {
        self.typing_indicator = None;
    }
}

/// Encodes the file *name* as the payload, so no file needs to exist.
#[derive(Debug, Default)]
pub struct StubFileReader {
    unreadable: Option<String>,
}

impl StubFileReader {
    pub fn failing_for(name: &str) -> Self {
        Self {
            unreadable: Some(name.to_owned()),
        }
    }
}

impl FileReader for StubFileReader {
    fn read_data_url(&self, file: &SelectedFile) -> Result<String, FileReadError> {
        if self.unreadable.as_deref() == Some(file.name.as_str()) {
            return Err(FileReadError {
                name: file.name.clone(),
                reason: "permission denied".to_owned(),
            });
        }

        Ok(format!(
            "data:{};base64,{}",
            file.mime_type,
            STANDARD.encode(file.name.as_bytes())
        ))
    }
}
