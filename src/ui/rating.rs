//! Star rating widget: `i` stars plus a hidden input holding the value.

use crate::domain::rating_state::RatingState;

use super::dom::{Document, NodeId};

pub const RATING_CONTAINER_ID: &str = "rating-stars";

#[derive(Debug, Clone)]
pub struct RatingWidget {
    stars: Vec<NodeId>,
    input: Option<NodeId>,
    state: RatingState,
}

impl RatingWidget {
    /// Binds the widget inside `container_id`. The stored value is read back
    /// from the hidden input, so pre-filled ratings survive.
    pub fn setup(doc: &mut Document, container_id: &str) -> Option<Self> {
        let container = doc.get_element_by_id(container_id)?;
        let stars = doc.query_tag_within(container, "i");
        let input = doc
            .query_tag_within(container, "input")
            .into_iter()
            .find(|node| doc.attribute(*node, "type") == Some("hidden"));

        let committed = input
            .and_then(|node| doc.attribute(node, "value"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        let widget = Self {
            state: RatingState::new(stars.len(), committed),
            stars,
            input,
        };
        if committed > 0 {
            widget.paint(doc);
        }

        tracing::debug!(container_id, stars = widget.stars.len(), committed, "rating bound");
        Some(widget)
    }

    pub fn state(&self) -> &RatingState {
        &self.state
    }

    pub fn value(&self) -> usize {
        self.state.committed()
    }

    pub fn click(&mut self, doc: &mut Document, index: usize) {
        let Some(value) = self.state.click(index) else {
            return;
        };

        if let Some(input) = self.input {
            doc.set_attribute(input, "value", &value.to_string());
        }
        self.paint(doc);
    }

    pub fn hover(&mut self, doc: &mut Document, index: usize) {
        self.state.hover(index);
        self.paint(doc);
    }

    pub fn leave(&mut self, doc: &mut Document) {
        self.state.leave();
        self.paint(doc);
    }

    fn paint(&self, doc: &mut Document) {
        for (index, star) in self.stars.iter().enumerate() {
            if self.state.is_filled(index) {
                doc.remove_class(*star, "far");
                doc.add_class(*star, "fas");
            } else {
                doc.remove_class(*star, "fas");
                doc.add_class(*star, "far");
            }

            if self.state.is_active(index) {
                doc.add_class(*star, "active");
            } else {
                doc.remove_class(*star, "active");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(prefilled: Option<&str>) -> (Document, Vec<NodeId>, NodeId) {
        let mut doc = Document::new();
        let container = doc.append_element(doc.body(), "div", Some(RATING_CONTAINER_ID), "star-rating");
        let stars = (0..5)
            .map(|_| doc.append_element(container, "i", None, "far fa-star"))
            .collect();
        let input = doc.append_element(container, "input", None, "");
        doc.set_attribute(input, "type", "hidden");
        if let Some(value) = prefilled {
            doc.set_attribute(input, "value", value);
        }
        (doc, stars, input)
    }

    fn active_count(doc: &Document, stars: &[NodeId]) -> usize {
        stars.iter().filter(|star| doc.has_class(**star, "active")).count()
    }

    #[test]
    fn click_fills_stars_and_stores_value() {
        let (mut doc, stars, input) = page(None);
        let mut widget = RatingWidget::setup(&mut doc, RATING_CONTAINER_ID).expect("widget");

        widget.click(&mut doc, 2);

        assert_eq!(doc.attribute(input, "value"), Some("3"));
        assert_eq!(doc.classes(stars[2]), ["fa-star", "fas", "active"]);
        assert!(doc.has_class(stars[3], "far"));
        assert!(!doc.has_class(stars[3], "active"));
    }

    #[test]
    fn click_hover_leave_keeps_committed_stars() {
        let (mut doc, stars, _) = page(None);
        let mut widget = RatingWidget::setup(&mut doc, RATING_CONTAINER_ID).expect("widget");

        widget.click(&mut doc, 2);
        widget.hover(&mut doc, 0);
        assert_eq!(active_count(&doc, &stars), 3);

        widget.leave(&mut doc);
        assert_eq!(active_count(&doc, &stars), 3);
        assert_eq!(widget.value(), 3);
    }

    #[test]
    fn hover_previews_without_committing() {
        let (mut doc, stars, input) = page(None);
        let mut widget = RatingWidget::setup(&mut doc, RATING_CONTAINER_ID).expect("widget");

        widget.hover(&mut doc, 3);
        assert_eq!(active_count(&doc, &stars), 4);
        assert_eq!(doc.attribute(input, "value"), None);

        widget.leave(&mut doc);
        assert_eq!(active_count(&doc, &stars), 0);
    }

    #[test]
    fn prefilled_value_is_painted_on_setup() {
        let (mut doc, stars, _) = page(Some("4"));

        let widget = RatingWidget::setup(&mut doc, RATING_CONTAINER_ID).expect("widget");

        assert_eq!(widget.value(), 4);
        assert!(doc.has_class(stars[3], "fas"));
        assert!(doc.has_class(stars[4], "far"));
    }

    #[test]
    fn missing_container_binds_nothing() {
        let mut doc = Document::new();

        assert!(RatingWidget::setup(&mut doc, RATING_CONTAINER_ID).is_none());
    }
}
