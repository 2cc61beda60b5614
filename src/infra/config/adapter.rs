use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::infra::{
    config::{load, resolve_path, AppConfig},
    contracts::ConfigAdapter,
};

/// Loads [`AppConfig`] from TOML, falling back to defaults when no file exists.
#[derive(Debug, Clone, Default)]
pub struct FileConfigAdapter {
    path: Option<PathBuf>,
}

impl FileConfigAdapter {
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
        }
    }

    pub fn source_path(&self) -> PathBuf {
        resolve_path(self.path.as_deref())
    }
}

impl ConfigAdapter for FileConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        let config = load(self.path.as_deref())?;
        tracing::debug!(path = %self.source_path().display(), "config loaded");
        Ok(config)
    }
}
