//! Infrastructure layer: adapters for config, logging, HTTP and the filesystem.

pub mod config;
pub mod contracts;
pub mod error;
pub mod file_reader;
pub mod http;
pub mod logging;
pub mod stubs;

/// Returns the infra module name for smoke checks.
pub fn module_name() -> &'static str {
    "infra"
}
