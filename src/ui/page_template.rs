//! Page skeletons carrying the element contract the page scripts bind to.

use serde::{Deserialize, Serialize};

use super::{
    chat_view::{MESSAGES_CONTAINER_ID, MESSAGE_INPUT_ID, SEND_BUTTON_ID, TYPING_INDICATOR_ID},
    dom::{Document, NodeId},
    file_preview::{
        ATTACHMENTS_INPUT_ID, ATTACHMENTS_PREVIEW_ID, PORTFOLIO_INPUT_ID, PORTFOLIO_PREVIEW_ID,
    },
    rating::RATING_CONTAINER_ID,
};

pub const PROFILE_FORM_ID: &str = "profile-form";
pub const DELIVERY_FORM_ID: &str = "delivery-form";
pub const REVIEW_FORM_ID: &str = "review-form";
pub const APPLY_MODAL_ID: &str = "apply-modal";
pub const APPLY_FORM_ID: &str = "apply-form";

const STAR_COUNT: usize = 5;

/// Which page sections to build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSkeleton {
    pub chat: bool,
    pub portfolio_upload: bool,
    pub attachments_upload: bool,
    pub review_form: bool,
    pub apply_modal: bool,
    /// Flash messages rendered as `.alert` banners.
    pub alerts: Vec<String>,
}

impl Default for PageSkeleton {
    fn default() -> Self {
        Self {
            chat: true,
            portfolio_upload: true,
            attachments_upload: true,
            review_form: true,
            apply_modal: true,
            alerts: Vec::new(),
        }
    }
}

impl PageSkeleton {
    pub fn chat_only() -> Self {
        Self {
            chat: true,
            portfolio_upload: false,
            attachments_upload: false,
            review_form: false,
            apply_modal: false,
            alerts: Vec::new(),
        }
    }
}

pub fn build_page(skeleton: &PageSkeleton) -> Document {
    let mut doc = Document::new();
    let body = doc.body();

    for message in &skeleton.alerts {
        let alert = doc.append_element(body, "div", None, "alert bg-green-100 text-green-800 px-4 py-3 rounded");
        doc.set_text(alert, message);
    }
    if skeleton.chat {
        build_chat(&mut doc, body);
    }
    if skeleton.portfolio_upload {
        build_upload_form(
            &mut doc,
            body,
            PROFILE_FORM_ID,
            ("skills", "input"),
            (PORTFOLIO_INPUT_ID, PORTFOLIO_PREVIEW_ID),
            "Save Profile",
        );
    }
    if skeleton.attachments_upload {
        build_upload_form(
            &mut doc,
            body,
            DELIVERY_FORM_ID,
            ("notes", "textarea"),
            (ATTACHMENTS_INPUT_ID, ATTACHMENTS_PREVIEW_ID),
            "Deliver Work",
        );
    }
    if skeleton.review_form {
        build_review_form(&mut doc, body);
    }
    if skeleton.apply_modal {
        build_apply_modal(&mut doc, body);
    }

    doc
}

fn build_chat(doc: &mut Document, body: NodeId) {
    let panel = doc.append_element(body, "div", None, "bg-white rounded-xl shadow-lg overflow-hidden");
    doc.append_element(
        panel,
        "div",
        Some(MESSAGES_CONTAINER_ID),
        "flex-1 overflow-y-auto p-4 bg-gray-50",
    );
    doc.append_element(
        panel,
        "div",
        Some(TYPING_INDICATOR_ID),
        "hidden px-4 py-2 text-sm text-gray-500 italic",
    );

    let bar = doc.append_element(panel, "div", None, "flex space-x-2");
    let input = doc.append_element(bar, "input", Some(MESSAGE_INPUT_ID), "flex-1 px-4 py-2 border rounded-lg");
    doc.set_attribute(input, "type", "text");
    doc.set_attribute(input, "placeholder", "Type your message...");
    doc.set_attribute(input, "value", "");

    let send = doc.append_element(bar, "button", Some(SEND_BUTTON_ID), "bg-indigo-600 text-white px-6 py-2 rounded-lg");
    doc.append_element(send, "i", None, "fas fa-paper-plane");
    let label = doc.create_text(" Send");
    doc.append_child(send, label);
}

fn build_upload_form(
    doc: &mut Document,
    body: NodeId,
    form_id: &str,
    (field_name, field_tag): (&str, &str),
    (input_id, preview_id): (&str, &str),
    submit_label: &str,
) {
    let form = doc.append_element(body, "form", Some(form_id), "");
    let field = doc.append_element(form, field_tag, None, "w-full px-4 py-2 border rounded-lg");
    doc.set_attribute(field, "name", field_name);
    if field_tag == "input" {
        doc.set_attribute(field, "type", "text");
        doc.set_attribute(field, "value", "");
    }

    let files = doc.append_element(form, "input", Some(input_id), "w-full px-4 py-2 border rounded-lg");
    doc.set_attribute(files, "type", "file");
    doc.set_attribute(files, "name", input_id);
    doc.set_flag(files, "multiple", true);
    doc.set_attribute(files, "accept", "image/*,video/*");

    doc.append_element(form, "div", Some(preview_id), "mt-4 flex flex-wrap gap-2");
    submit_button(doc, form, submit_label);
}

fn build_review_form(doc: &mut Document, body: NodeId) {
    let form = doc.append_element(body, "form", Some(REVIEW_FORM_ID), "");
    let stars = doc.append_element(form, "div", Some(RATING_CONTAINER_ID), "star-rating text-3xl");
    for rating in 1..=STAR_COUNT {
        let star = doc.append_element(stars, "i", None, "far fa-star");
        doc.set_attribute(star, "data-rating", &rating.to_string());
    }
    let hidden = doc.append_element(stars, "input", None, "");
    doc.set_attribute(hidden, "type", "hidden");
    doc.set_attribute(hidden, "name", "rating");

    let comment = doc.append_element(form, "textarea", None, "w-full px-4 py-2 border rounded-lg");
    doc.set_attribute(comment, "name", "comment");
    submit_button(doc, form, "Submit Review");
}

fn build_apply_modal(doc: &mut Document, body: NodeId) {
    let modal = doc.append_element(
        body,
        "div",
        Some(APPLY_MODAL_ID),
        "modal-backdrop hidden fixed inset-0 bg-black bg-opacity-50 items-center justify-center z-50",
    );
    let dialog = doc.append_element(modal, "div", None, "bg-white rounded-xl p-8 max-w-md w-full mx-4");
    let form = doc.append_element(dialog, "form", Some(APPLY_FORM_ID), "");

    for name in ["quote", "delivery_days"] {
        let input = doc.append_element(form, "input", None, "w-full px-4 py-2 border rounded");
        doc.set_attribute(input, "type", "number");
        doc.set_attribute(input, "name", name);
        doc.set_attribute(input, "value", "");
    }
    let message = doc.append_element(form, "textarea", None, "w-full px-4 py-2 border rounded");
    doc.set_attribute(message, "name", "message");

    submit_button(doc, form, "Submit Application");
    let cancel = doc.append_element(form, "button", None, "flex-1 bg-gray-200 py-2 rounded");
    doc.set_attribute(cancel, "type", "button");
    doc.set_text(cancel, "Cancel");
}

fn submit_button(doc: &mut Document, form: NodeId, label: &str) {
    let button = doc.append_element(form, "button", None, "w-full bg-indigo-600 text-white py-3 rounded-lg");
    doc.set_attribute(button, "type", "submit");
    doc.set_text(button, label);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_page_exposes_element_contract() {
        let doc = build_page(&PageSkeleton::default());

        for id in [
            MESSAGES_CONTAINER_ID,
            MESSAGE_INPUT_ID,
            SEND_BUTTON_ID,
            TYPING_INDICATOR_ID,
            PORTFOLIO_INPUT_ID,
            PORTFOLIO_PREVIEW_ID,
            ATTACHMENTS_INPUT_ID,
            ATTACHMENTS_PREVIEW_ID,
            RATING_CONTAINER_ID,
            APPLY_MODAL_ID,
        ] {
            assert!(doc.get_element_by_id(id).is_some(), "missing #{id}");
        }
    }

    #[test]
    fn alerts_are_rendered_as_banners() {
        let skeleton = PageSkeleton {
            alerts: vec!["Saved".to_owned(), "Welcome back".to_owned()],
            ..PageSkeleton::chat_only()
        };

        let doc = build_page(&skeleton);

        let alerts = doc.query_class("alert");
        assert_eq!(alerts.len(), 2);
        assert_eq!(doc.text_content(alerts[1]), "Welcome back");
    }

    #[test]
    fn skeleton_fields_default_when_missing() {
        let skeleton: PageSkeleton =
            serde_json::from_str(r#"{"review_form":false}"#).expect("must parse");

        assert!(skeleton.chat);
        assert!(!skeleton.review_form);
    }
}
