//! Form submit handlers bound to forms in the document.

use std::collections::HashMap;

use crate::{
    domain::form::FormData,
    usecases::form_submit::{
        submit_with, FormSubmitError, SubmitCallback, SubmitControl, LOADING_LABEL,
    },
};

use super::dom::{Document, NodeId};

const SPINNER_CLASSES: &str = "fas fa-spinner fa-spin";

/// The submit button of a form inside a [`Document`].
pub struct DocumentSubmitControl<'a> {
    document: &'a mut Document,
    button: NodeId,
}

impl<'a> DocumentSubmitControl<'a> {
    pub fn new(document: &'a mut Document, button: NodeId) -> Self {
        Self { document, button }
    }
}

impl SubmitControl for DocumentSubmitControl<'_> {
    fn label(&self) -> String {
        self.document.text_content(self.button)
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.document.set_flag(self.button, "disabled", disabled);
    }

    fn show_loading(&mut self) {
        let doc = &mut *self.document;
        doc.clear_children(self.button);
        doc.append_element(self.button, "i", None, SPINNER_CLASSES);
        let text = doc.create_text(&format!(" {LOADING_LABEL}"));
        doc.append_child(self.button, text);
    }

    fn set_label(&mut self, label: &str) {
        self.document.set_text(self.button, label);
    }
}

/// Collects the form's named, enabled controls in document order.
///
/// Unchecked checkboxes and radios, file inputs and buttons contribute nothing.
pub fn collect_form_data(doc: &Document, form: NodeId) -> FormData {
    let mut data = FormData::default();

    for node in doc.descendants(form) {
        let Some(tag) = doc.tag(node) else {
            continue;
        };
        let Some(name) = doc.attribute(node, "name").filter(|name| !name.is_empty()) else {
            continue;
        };
        if doc.has_attribute(node, "disabled") {
            continue;
        }

        let value = match tag {
            "input" => {
                let kind = doc.attribute(node, "type").unwrap_or("text");
                match kind {
                    "checkbox" | "radio" if !doc.has_attribute(node, "checked") => continue,
                    "checkbox" | "radio" => doc.attribute(node, "value").unwrap_or("on").to_owned(),
                    "file" | "submit" | "button" | "reset" | "image" => continue,
                    _ => doc.attribute(node, "value").unwrap_or_default().to_owned(),
                }
            }
            "textarea" => doc
                .attribute(node, "value")
                .map(str::to_owned)
                .unwrap_or_else(|| doc.text_content(node)),
            "select" => select_value(doc, node),
            _ => continue,
        };

        data.append(name, value);
    }

    data
}

fn select_value(doc: &Document, select: NodeId) -> String {
    let options = doc.query_tag_within(select, "option");
    let chosen = options
        .iter()
        .copied()
        .find(|option| doc.has_attribute(*option, "selected"))
        .or_else(|| options.first().copied());

    chosen
        .map(|option| {
            doc.attribute(option, "value")
                .map(str::to_owned)
                .unwrap_or_else(|| doc.text_content(option))
        })
        .unwrap_or_default()
}

/// `button[type="submit"]` inside the form.
pub fn find_submit_button(doc: &Document, form: NodeId) -> Option<NodeId> {
    doc.query_tag_within(form, "button")
        .into_iter()
        .find(|button| doc.attribute(*button, "type") == Some("submit"))
}

#[derive(Default)]
pub struct FormRegistry {
    handlers: HashMap<String, SubmitCallback>,
}

impl FormRegistry {
    /// Registers `callback` for `form_id`. Returns false, registering nothing,
    /// when the form is not on the page.
    pub fn setup_form_submit(
        &mut self,
        doc: &Document,
        form_id: &str,
        callback: SubmitCallback,
    ) -> bool {
        if doc.get_element_by_id(form_id).is_none() {
            tracing::debug!(form_id, "form submit setup skipped, form missing");
            return false;
        }

        self.handlers.insert(form_id.to_owned(), callback);
        true
    }

    /// Handles a submit of `form_id`. Returns `Ok(false)` when no handler is
    /// registered, leaving the submit to its default behaviour.
    pub fn submit(&mut self, doc: &mut Document, form_id: &str) -> Result<bool, FormSubmitError> {
        let Some(callback) = self.handlers.get_mut(form_id) else {
            return Ok(false);
        };
        let Some(form) = doc.get_element_by_id(form_id) else {
            return Ok(false);
        };

        let data = collect_form_data(doc, form);
        match find_submit_button(doc, form) {
            Some(button) => {
                let mut control = DocumentSubmitControl::new(doc, button);
                submit_with(form_id, &mut control, data, |data| callback(data))?;
            }
            None => callback(data).map_err(|reason| FormSubmitError::Callback {
                form_id: form_id.to_owned(),
                reason,
            })?,
        }

        Ok(true)
    }
}
