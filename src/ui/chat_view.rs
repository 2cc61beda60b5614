//! [`ChatView`] bound to the chat widget's elements in a [`Document`].

use crate::{
    domain::message::{BubbleAlignment, MessageBubble},
    usecases::contracts::ChatView,
};

use super::dom::{Document, NodeId};

pub const MESSAGES_CONTAINER_ID: &str = "messages-container";
pub const MESSAGE_INPUT_ID: &str = "message-input";
pub const SEND_BUTTON_ID: &str = "send-btn";
pub const TYPING_INDICATOR_ID: &str = "typing-indicator";

const HIDDEN_CLASS: &str = "hidden";

pub struct DocumentChatView<'a> {
    document: &'a mut Document,
}

impl<'a> DocumentChatView<'a> {
    pub fn new(document: &'a mut Document) -> Self {
        Self { document }
    }

    fn slot(&self, id: &str) -> Option<NodeId> {
        let node = self.document.get_element_by_id(id);
        if node.is_none() {
            tracing::debug!(element_id = id, "chat widget element missing");
        }
        node
    }
}

impl ChatView for DocumentChatView<'_> {
    fn clear_messages(&mut self) {
        if let Some(container) = self.slot(MESSAGES_CONTAINER_ID) {
            self.document.clear_children(container);
        }
    }

    fn append_message(&mut self, bubble: &MessageBubble) {
        let Some(container) = self.slot(MESSAGES_CONTAINER_ID) else {
            return;
        };
        let doc = &mut *self.document;

        let (row_class, bubble_class) = match bubble.alignment {
            BubbleAlignment::End => ("flex justify-end mb-4", "chat-bubble chat-bubble-sent"),
            BubbleAlignment::Start => (
                "flex justify-start mb-4",
                "chat-bubble chat-bubble-received",
            ),
        };

        let row = doc.append_element(container, "div", None, row_class);
        let body = doc.append_element(row, "div", None, bubble_class);

        if let Some(sender) = &bubble.sender_label {
            let label = doc.append_element(body, "div", None, "text-xs font-semibold mb-1");
            doc.set_text(label, sender);
        }

        let content = doc.append_element(body, "div", None, "");
        doc.set_text(content, &bubble.content);

        let time = doc.append_element(body, "div", None, "text-xs mt-1 opacity-75");
        doc.set_text(time, &bubble.time_label);
    }

    fn scroll_to_bottom(&mut self) {
        if let Some(container) = self.slot(MESSAGES_CONTAINER_ID) {
            self.document.scroll_to_bottom(container);
        }
    }

    fn input_text(&self) -> String {
        self.slot(MESSAGE_INPUT_ID)
            .and_then(|input| self.document.attribute(input, "value"))
            .unwrap_or_default()
            .to_owned()
    }

    fn set_input_text(&mut self, text: &str) {
        if let Some(input) = self.slot(MESSAGE_INPUT_ID) {
            self.document.set_attribute(input, "value", text);
        }
    }

    fn show_typing_indicator(&mut self, text: &str) {
        if let Some(indicator) = self.slot(TYPING_INDICATOR_ID) {
            self.document.set_text(indicator, text);
            self.document.remove_class(indicator, HIDDEN_CLASS);
        }
    }

    fn hide_typing_indicator(&mut self) {
        if let Some(indicator) = self.slot(TYPING_INDICATOR_ID) {
            self.document.add_class(indicator, HIDDEN_CLASS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::page_template::{build_page, PageSkeleton};

    fn bubble(alignment: BubbleAlignment, sender: Option<&str>, content: &str) -> MessageBubble {
        MessageBubble {
            alignment,
            sender_label: sender.map(str::to_owned),
            content: content.to_owned(),
            time_label: "Just now".to_owned(),
        }
    }

    fn container_html(doc: &Document) -> String {
        let container = doc
            .get_element_by_id(MESSAGES_CONTAINER_ID)
            .expect("container must exist");
        doc.inner_html(container)
    }

    #[test]
    fn foreign_bubble_is_left_aligned_with_sender_label() {
        let mut doc = build_page(&PageSkeleton::chat_only());

        DocumentChatView::new(&mut doc).append_message(&bubble(
            BubbleAlignment::Start,
            Some("Bob"),
            "hi",
        ));

        assert_eq!(
            container_html(&doc),
            concat!(
                r#"<div class="flex justify-start mb-4">"#,
                r#"<div class="chat-bubble chat-bubble-received">"#,
                r#"<div class="text-xs font-semibold mb-1">Bob</div>"#,
                r#"<div>hi</div>"#,
                r#"<div class="text-xs mt-1 opacity-75">Just now</div>"#,
                "</div></div>"
            )
        );
    }

    #[test]
    fn own_bubble_is_right_aligned_without_label() {
        let mut doc = build_page(&PageSkeleton::chat_only());

        DocumentChatView::new(&mut doc).append_message(&bubble(BubbleAlignment::End, None, "mine"));

        let html = container_html(&doc);
        assert!(html.contains("justify-end"));
        assert!(html.contains("chat-bubble-sent"));
        assert!(!html.contains("font-semibold"));
    }

    #[test]
    fn markup_in_content_and_sender_is_rendered_as_text() {
        let mut doc = build_page(&PageSkeleton::chat_only());

        DocumentChatView::new(&mut doc).append_message(&bubble(
            BubbleAlignment::Start,
            Some("<b>Eve</b>"),
            "<script>alert(1)</script> & more",
        ));

        let html = container_html(&doc);
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; more"));
        assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn typing_indicator_toggles_hidden_class() {
        let mut doc = build_page(&PageSkeleton::chat_only());
        let indicator = doc
            .get_element_by_id(TYPING_INDICATOR_ID)
            .expect("indicator must exist");

        DocumentChatView::new(&mut doc).show_typing_indicator("Bob is typing...");
        assert!(!doc.has_class(indicator, HIDDEN_CLASS));
        assert_eq!(doc.text_content(indicator), "Bob is typing...");

        DocumentChatView::new(&mut doc).hide_typing_indicator();
        assert!(doc.has_class(indicator, HIDDEN_CLASS));
    }

    #[test]
    fn missing_widget_is_a_no_op() {
        let mut doc = Document::new();
        let mut view = DocumentChatView::new(&mut doc);

        view.append_message(&bubble(BubbleAlignment::End, None, "lost"));
        view.set_input_text("x");

        assert_eq!(view.input_text(), "");
    }
}
