//! UI layer: the in-memory page, its widgets and the page event loop.

pub mod chat_view;
pub mod dom;
pub mod event_source;
pub mod file_preview;
pub mod forms;
pub mod modal;
pub mod page;
pub mod page_template;
pub mod rating;
pub mod shell;
pub mod terminal_toast;
pub mod toasts;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
