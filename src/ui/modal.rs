use super::dom::{Document, NodeId};

pub const MODAL_BACKDROP_CLASS: &str = "modal-backdrop";

/// Shows the modal. Returns false when no element has that id.
pub fn open_modal(doc: &mut Document, modal_id: &str) -> bool {
    let Some(modal) = doc.get_element_by_id(modal_id) else {
        return false;
    };

    doc.remove_class(modal, "hidden");
    doc.add_class(modal, "flex");
    true
}

pub fn close_modal(doc: &mut Document, modal_id: &str) -> bool {
    let Some(modal) = doc.get_element_by_id(modal_id) else {
        return false;
    };

    hide(doc, modal);
    true
}

/// Document-level click: a click landing on the backdrop itself closes it.
pub fn close_if_backdrop(doc: &mut Document, target: NodeId) -> bool {
    if !doc.has_class(target, MODAL_BACKDROP_CLASS) {
        return false;
    }

    hide(doc, target);
    true
}

fn hide(doc: &mut Document, modal: NodeId) {
    doc.add_class(modal, "hidden");
    doc.remove_class(modal, "flex");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_modal() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let modal = doc.append_element(doc.body(), "div", Some("apply-modal"), "modal-backdrop hidden");
        let dialog = doc.append_element(modal, "div", Some("dialog"), "bg-white");
        (doc, modal, dialog)
    }

    #[test]
    fn open_then_close_toggles_visibility_classes() {
        let (mut doc, modal, _) = page_with_modal();

        assert!(open_modal(&mut doc, "apply-modal"));
        assert!(doc.has_class(modal, "flex"));
        assert!(!doc.has_class(modal, "hidden"));

        assert!(close_modal(&mut doc, "apply-modal"));
        assert!(doc.has_class(modal, "hidden"));
        assert!(!doc.has_class(modal, "flex"));
    }

    #[test]
    fn missing_modal_is_a_no_op() {
        let (mut doc, modal, _) = page_with_modal();

        assert!(!open_modal(&mut doc, "nope"));
        assert!(!close_modal(&mut doc, "nope"));
        assert!(doc.has_class(modal, "hidden"));
    }

    #[test]
    fn only_clicks_on_the_backdrop_close_it() {
        let (mut doc, modal, dialog) = page_with_modal();
        open_modal(&mut doc, "apply-modal");

        assert!(!close_if_backdrop(&mut doc, dialog));
        assert!(doc.has_class(modal, "flex"));

        assert!(close_if_backdrop(&mut doc, modal));
        assert!(doc.has_class(modal, "hidden"));
    }
}
