use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{
    domain::file_preview::SelectedFile,
    usecases::contracts::{FileReadError, FileReader},
};

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Reads picked files from disk as `data:<mime>;base64,<payload>` URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileReader;

impl FileReader for FsFileReader {
    fn read_data_url(&self, file: &SelectedFile) -> Result<String, FileReadError> {
        let bytes = std::fs::read(&file.path).map_err(|error| FileReadError {
            name: file.name.clone(),
            reason: error.to_string(),
        })?;

        let mime_type = if file.mime_type.is_empty() {
            FALLBACK_MIME_TYPE
        } else {
            file.mime_type.as_str()
        };

        Ok(format!("data:{mime_type};base64,{}", STANDARD.encode(bytes)))
    }
}
