use crate::domain::{message::Message, request::HttpRequest};

use super::contracts::HttpTransport;

const HISTORY_PATH_PREFIX: &str = "/chat/api/messages";

pub fn history_path(project_id: i64) -> String {
    format!("{HISTORY_PATH_PREFIX}/{project_id}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistorySourceError {
    Unavailable(String),
    Status(u16),
    InvalidData(String),
}

pub trait HistorySource {
    fn list_messages(&self, project_id: i64) -> Result<Vec<Message>, HistorySourceError>;
}

impl<T> HistorySource for &T
where
    T: HistorySource + ?Sized,
{
    fn list_messages(&self, project_id: i64) -> Result<Vec<Message>, HistorySourceError> {
        (*self).list_messages(project_id)
    }
}

/// History over the page's HTTP transport: `GET /chat/api/messages/{project_id}`.
#[derive(Debug, Clone)]
pub struct HttpHistorySource<T> {
    transport: T,
}

impl<T: HttpTransport> HttpHistorySource<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

impl<T: HttpTransport> HistorySource for HttpHistorySource<T> {
    fn list_messages(&self, project_id: i64) -> Result<Vec<Message>, HistorySourceError> {
        let request = HttpRequest::get(history_path(project_id));
        let response = self
            .transport
            .execute(&request)
            .map_err(|error| HistorySourceError::Unavailable(error.to_string()))?;

        if !response.is_success() {
            return Err(HistorySourceError::Status(response.status));
        }

        serde_json::from_str(&response.body)
            .map_err(|error| HistorySourceError::InvalidData(error.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadMessagesError {
    TemporarilyUnavailable,
    Rejected { status: u16 },
    DataContractViolation,
}

impl LoadMessagesError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TemporarilyUnavailable => "CHAT_HISTORY_UNAVAILABLE",
            Self::Rejected { .. } => "CHAT_HISTORY_REJECTED",
            Self::DataContractViolation => "CHAT_HISTORY_INVALID_DATA",
        }
    }
}

pub fn load_messages(
    source: &dyn HistorySource,
    project_id: i64,
) -> Result<Vec<Message>, LoadMessagesError> {
    source.list_messages(project_id).map_err(map_source_error)
}

fn map_source_error(error: HistorySourceError) -> LoadMessagesError {
    match error {
        HistorySourceError::Unavailable(reason) => {
            tracing::debug!(reason = %reason, "chat history transport failed");
            LoadMessagesError::TemporarilyUnavailable
        }
        HistorySourceError::Status(status) => LoadMessagesError::Rejected { status },
        HistorySourceError::InvalidData(reason) => {
            tracing::debug!(reason = %reason, "chat history payload rejected");
            LoadMessagesError::DataContractViolation
        }
    }
}
