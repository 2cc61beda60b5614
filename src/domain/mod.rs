//! Domain layer: page entities, state machines and pure formatting rules.

pub mod events;
pub mod file_preview;
pub mod form;
pub mod html;
pub mod message;
pub mod notice;
pub mod rating_state;
pub mod request;
pub mod session;
pub mod time_format;
pub mod typing_state;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
