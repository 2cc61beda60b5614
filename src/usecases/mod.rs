//! Use case layer: chat workflows and page utility rules.

pub mod bootstrap;
pub mod chat_client;
pub mod context;
pub mod contracts;
pub mod fetch_json;
pub mod form_submit;
pub mod load_messages;
pub mod send_message;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
