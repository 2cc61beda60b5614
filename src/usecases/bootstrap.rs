use std::path::Path;

use crate::{
    infra::{
        self, config::FileConfigAdapter, contracts::ConfigAdapter, error::AppError,
        http::ReqwestTransport,
    },
    usecases::context::AppContext,
};

pub fn bootstrap(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let context = build_context(config_path)?;
    infra::logging::init(&context.config.logging)?;

    tracing::debug!(config = ?context.config, "configuration resolved");
    Ok(context)
}

/// HTTP transport for history loads and JSON requests against the configured server.
pub fn compose_transport(context: &AppContext) -> Result<ReqwestTransport, AppError> {
    ReqwestTransport::new(&context.config.server)
}

fn build_context(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let config_adapter = FileConfigAdapter::new(config_path);
    let config = config_adapter.load().map_err(AppError::Other)?;

    Ok(AppContext::new(config))
}
