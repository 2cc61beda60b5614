//! Preview thumbnails for file inputs.

use crate::{
    domain::file_preview::{PreviewMedia, SelectedFile},
    usecases::contracts::FileReader,
};

use super::dom::{Document, NodeId};

pub const PORTFOLIO_INPUT_ID: &str = "portfolio_files";
pub const PORTFOLIO_PREVIEW_ID: &str = "portfolio_preview";
pub const ATTACHMENTS_INPUT_ID: &str = "attachments";
pub const ATTACHMENTS_PREVIEW_ID: &str = "attachments_preview";

pub const FILE_PREVIEW_CLASS: &str = "file-preview";
pub const REMOVE_BUTTON_CLASS: &str = "remove-btn";

const FILE_READ_FAILED: &str = "FILE_READ_FAILED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePreviewBinding {
    input_id: String,
    preview_id: String,
}

impl FilePreviewBinding {
    /// Binds only when both the input and the preview container exist.
    pub fn setup(doc: &Document, input_id: &str, preview_id: &str) -> Option<Self> {
        doc.get_element_by_id(input_id)?;
        doc.get_element_by_id(preview_id)?;

        Some(Self {
            input_id: input_id.to_owned(),
            preview_id: preview_id.to_owned(),
        })
    }

    pub fn input_id(&self) -> &str {
        &self.input_id
    }

    /// Replaces the preview with one wrapper per readable file.
    ///
    /// Returns how many wrappers were rendered.
    pub fn render(
        &self,
        doc: &mut Document,
        files: &[SelectedFile],
        reader: &dyn FileReader,
    ) -> usize {
        let Some(preview) = doc.get_element_by_id(&self.preview_id) else {
            return 0;
        };
        doc.clear_children(preview);

        let mut rendered = 0;
        for (index, file) in files.iter().enumerate() {
            match reader.read_data_url(file) {
                Ok(data_url) => {
                    self.render_one(doc, preview, index, file, &data_url);
                    rendered += 1;
                }
                Err(error) => {
                    tracing::warn!(
                        code = FILE_READ_FAILED,
                        input_id = %self.input_id,
                        error = %error,
                        "file skipped in preview"
                    );
                }
            }
        }

        rendered
    }

    fn render_one(
        &self,
        doc: &mut Document,
        preview: NodeId,
        index: usize,
        file: &SelectedFile,
        data_url: &str,
    ) {
        let wrapper_id = format!("{}-item-{index}", self.preview_id);
        let wrapper = doc.append_element(preview, "div", Some(&wrapper_id), FILE_PREVIEW_CLASS);

        let media = PreviewMedia::from_mime_type(&file.mime_type);
        if let Some(tag) = media.element_tag() {
            let element = doc.append_element(wrapper, tag, None, "");
            doc.set_attribute(element, "src", data_url);
            if media == PreviewMedia::Video {
                doc.set_flag(element, "controls", true);
            }
        }

        let remove_id = format!("{wrapper_id}-remove");
        let remove = doc.append_element(wrapper, "div", Some(&remove_id), REMOVE_BUTTON_CLASS);
        doc.set_text(remove, "\u{d7}");
    }
}

/// Removes the preview wrapper owning `remove_button`. Other wrappers stay.
pub fn remove_preview(doc: &mut Document, remove_button: NodeId) -> bool {
    if !doc.has_class(remove_button, REMOVE_BUTTON_CLASS) {
        return false;
    }

    match doc.parent(remove_button) {
        Some(wrapper) if doc.has_class(wrapper, FILE_PREVIEW_CLASS) => {
            doc.remove(wrapper);
            true
        }
        _ => false,
    }
}
