//! CreatiLink page client: the project chat widget and the page utilities,
//! driven headless over an in-memory page.

pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;
#[cfg(test)]
mod test_support;
pub mod ui;
pub mod usecases;
