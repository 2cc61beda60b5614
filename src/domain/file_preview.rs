use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A file picked in a file input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewMedia {
    Image,
    Video,
    /// Still gets a wrapper and a remove control, just no media element.
    Unsupported,
}

impl PreviewMedia {
    pub fn from_mime_type(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            Self::Image
        } else if mime_type.starts_with("video/") {
            Self::Video
        } else {
            Self::Unsupported
        }
    }

    pub fn element_tag(self) -> Option<&'static str> {
        match self {
            Self::Image => Some("img"),
            Self::Video => Some("video"),
            Self::Unsupported => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_mime_prefix() {
        assert_eq!(PreviewMedia::from_mime_type("image/png"), PreviewMedia::Image);
        assert_eq!(PreviewMedia::from_mime_type("video/mp4"), PreviewMedia::Video);
        assert_eq!(
            PreviewMedia::from_mime_type("application/pdf"),
            PreviewMedia::Unsupported
        );
    }

    #[test]
    fn empty_mime_type_is_unsupported() {
        assert_eq!(PreviewMedia::from_mime_type(""), PreviewMedia::Unsupported);
        assert_eq!(PreviewMedia::Unsupported.element_tag(), None);
    }
}
