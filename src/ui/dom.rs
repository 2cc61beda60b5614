//! Minimal element tree standing in for the browser DOM.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. `remove` and
//! `clear_children` free the whole subtree; freed slots are reused and ids
//! that pointed at them go stale, so every lookup through a stale id misses.
//! `append_child` only moves a node and keeps it alive.

use crate::domain::html::escape_html;

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    styles: Vec<(String, String)>,
    scroll_top: usize,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let body = Node {
            kind: NodeKind::Element(Element {
                tag: "body".to_owned(),
                ..Element::default()
            }),
            parent: None,
            children: Vec::new(),
        };

        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(body),
            }],
            free: Vec::new(),
            body: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Live nodes, attached or not.
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        }))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_owned()))
    }

    /// Creates `<tag id=".." class="..">` and appends it to `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        id: Option<&str>,
        classes: &str,
    ) -> NodeId {
        let node = self.create_element(tag);
        if let Some(id) = id {
            self.set_attribute(node, "id", id);
        }
        self.set_class_name(node, classes);
        self.append_child(parent, node);
        node
    }

    /// Moves `child` under `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node(parent).is_none()
            || self.node(child).is_none()
            || self.contains(child, parent)
        {
            return;
        }

        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    /// Detaches `id` and frees it with its descendants.
    pub fn remove(&mut self, id: NodeId) {
        if id != self.body {
            self.detach(id);
            self.release(id);
        }
    }

    pub fn clear_children(&mut self, id: NodeId) {
        let children = self
            .node_mut(id)
            .map(|node| std::mem::take(&mut node.children))
            .unwrap_or_default();
        for child in children {
            self.release(child);
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    /// Element children only, text nodes skipped.
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .into_iter()
            .filter(|child| self.element(*child).is_some())
            .collect()
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(self.body, id)
    }

    /// True when `node` is `ancestor` or sits somewhere below it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.parent(node_id);
        }
        false
    }

    /// Descendants of `root` in document order, `root` excluded.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).into_iter().rev().collect();

        while let Some(id) = stack.pop() {
            found.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }

        found
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|node| self.attribute(*node, "id") == Some(id))
    }

    pub fn query_class(&self, class: &str) -> Vec<NodeId> {
        self.query_class_within(self.body, class)
    }

    pub fn query_class_within(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|node| self.has_class(*node, class))
            .collect()
    }

    pub fn query_tag_within(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|node| self.tag(*node) == Some(tag))
            .collect()
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|element| element.tag.as_str())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|element| {
            element
                .attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        })
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(element) = self.element_mut(id) else {
            return;
        };

        match element.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_owned(),
            None => element
                .attributes
                .push((name.to_owned(), value.to_owned())),
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(element) = self.element_mut(id) {
            element.attributes.retain(|(key, _)| key != name);
        }
    }

    /// Boolean attributes (`disabled`, `controls`, `checked`) are present or absent.
    pub fn set_flag(&mut self, id: NodeId, name: &str, on: bool) {
        if on {
            self.set_attribute(id, name, "");
        } else {
            self.remove_attribute(id, name);
        }
    }

    pub fn classes(&self, id: NodeId) -> Vec<String> {
        self.element(id)
            .map(|element| element.classes.clone())
            .unwrap_or_default()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|element| element.classes.iter().any(|existing| existing == class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        if let Some(element) = self.element_mut(id) {
            element.classes.push(class.to_owned());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(element) = self.element_mut(id) {
            element.classes.retain(|existing| existing != class);
        }
    }

    /// Replaces the class list with the whitespace-separated `classes`.
    pub fn set_class_name(&mut self, id: NodeId, classes: &str) {
        if let Some(element) = self.element_mut(id) {
            element.classes.clear();
            for class in classes.split_whitespace() {
                if !element.classes.iter().any(|existing| existing == class) {
                    element.classes.push(class.to_owned());
                }
            }
        }
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id).and_then(|element| {
            element
                .styles
                .iter()
                .find(|(key, _)| key == property)
                .map(|(_, value)| value.as_str())
        })
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        let Some(element) = self.element_mut(id) else {
            return;
        };

        match element.styles.iter_mut().find(|(key, _)| key == property) {
            Some((_, existing)) => *existing = value.to_owned(),
            None => element
                .styles
                .push((property.to_owned(), value.to_owned())),
        }
    }

    /// Replaces the children of `id` with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if self.element(id).is_none() {
            return;
        }

        self.clear_children(id);
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node);
        }
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.node(id) else {
            return String::new();
        };

        match &node.kind {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Element(_) => node
                .children
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
        }
    }

    pub fn scroll_top(&self, id: NodeId) -> usize {
        self.element(id).map_or(0, |element| element.scroll_top)
    }

    /// One unit per child node.
    pub fn scroll_height(&self, id: NodeId) -> usize {
        self.node(id).map_or(0, |node| node.children.len())
    }

    pub fn scroll_to_bottom(&mut self, id: NodeId) {
        let height = self.scroll_height(id);
        if let Some(element) = self.element_mut(id) {
            element.scroll_top = height;
        }
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_html(child, &mut out);
        }
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };

        let element = match &node.kind {
            NodeKind::Text(text) => {
                out.push_str(&escape_html(text));
                return;
            }
            NodeKind::Element(element) => element,
        };

        out.push('<');
        out.push_str(&element.tag);
        for (name, value) in &element.attributes {
            write_attribute(out, name, value);
        }
        if !element.classes.is_empty() {
            write_attribute(out, "class", &element.classes.join(" "));
        }
        if !element.styles.is_empty() {
            let style = element
                .styles
                .iter()
                .map(|(property, value)| format!("{property}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            write_attribute(out, "style", &style);
        }
        out.push('>');

        if VOID_TAGS.contains(&element.tag.as_str()) {
            return;
        }

        for child in &node.children {
            self.write_html(*child, out);
        }
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let node = Node {
            kind,
            parent: None,
            children: Vec::new(),
        };

        let reused = self
            .free
            .pop()
            .and_then(|index| self.slots.get_mut(index).map(|slot| (index, slot)));
        match reused {
            Some((index, slot)) => {
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Frees `id` and everything below it. The caller detaches first.
    fn release(&mut self, id: NodeId) {
        let mut pending = vec![id];

        while let Some(id) = pending.pop() {
            let Some(slot) = self
                .slots
                .get_mut(id.index)
                .filter(|slot| slot.generation == id.generation)
            else {
                continue;
            };
            let Some(node) = slot.node.take() else {
                continue;
            };

            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.index);
            pending.extend(node.children);
        }
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };

        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|child| *child != id);
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.node(id)?.kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }
}

fn write_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    if !value.is_empty() {
        out.push_str("=\"");
        out.push_str(&escape_html(value));
        out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_escaped_on_serialisation() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.body(), "div", Some("box"), "note");

        doc.set_text(div, "<script>alert(1)</script> & co");

        assert_eq!(
            doc.outer_html(div),
            r#"<div id="box" class="note">&lt;script&gt;alert(1)&lt;/script&gt; &amp; co</div>"#
        );
        assert_eq!(doc.text_content(div), "<script>alert(1)</script> & co");
    }

    #[test]
    fn void_and_boolean_attributes_render_without_closing_tag() {
        let mut doc = Document::new();
        let video = doc.append_element(doc.body(), "video", None, "");
        doc.set_flag(video, "controls", true);
        let img = doc.append_element(doc.body(), "img", None, "");
        doc.set_attribute(img, "src", "data:image/png;base64,AA==");

        assert_eq!(doc.outer_html(video), "<video controls></video>");
        assert_eq!(doc.outer_html(img), r#"<img src="data:image/png;base64,AA==">"#);
    }

    #[test]
    fn removed_nodes_disappear_from_lookups() {
        let mut doc = Document::new();
        let outer = doc.append_element(doc.body(), "div", Some("outer"), "alert");
        doc.append_element(outer, "span", Some("inner"), "");

        doc.remove(outer);

        assert_eq!(doc.get_element_by_id("outer"), None);
        assert_eq!(doc.get_element_by_id("inner"), None);
        assert!(doc.query_class("alert").is_empty());
        assert!(!doc.is_attached(outer));
    }

    #[test]
    fn removed_slots_are_reused_and_old_ids_go_stale() {
        let mut doc = Document::new();
        let old = doc.append_element(doc.body(), "div", Some("old"), "");
        doc.set_text(old, "bye");
        doc.remove(old);

        let fresh = doc.append_element(doc.body(), "div", Some("fresh"), "");

        assert_eq!(doc.slots.len(), 3);
        assert_eq!(doc.node_count(), 2);
        assert_eq!(doc.attribute(old, "id"), None);
        assert_eq!(doc.attribute(fresh, "id"), Some("fresh"));
        doc.set_text(old, "ignored");
        assert_eq!(doc.text_content(fresh), "");
    }

    #[test]
    fn repeated_set_text_keeps_the_arena_flat() {
        let mut doc = Document::new();
        let label = doc.append_element(doc.body(), "span", None, "");

        for n in 0..1_000 {
            doc.set_text(label, &format!("tick {n}"));
        }

        assert_eq!(doc.text_content(label), "tick 999");
        assert_eq!(doc.node_count(), 3);
        assert!(doc.slots.len() <= 3);
    }

    #[test]
    fn moved_nodes_survive_and_stay_addressable() {
        let mut doc = Document::new();
        let from = doc.append_element(doc.body(), "div", None, "");
        let to = doc.append_element(doc.body(), "div", None, "");
        let item = doc.append_element(from, "p", Some("item"), "");

        doc.append_child(to, item);
        doc.clear_children(from);

        assert_eq!(doc.parent(item), Some(to));
        assert_eq!(doc.get_element_by_id("item"), Some(item));
    }

    #[test]
    fn class_list_behaves_like_a_set() {
        let mut doc = Document::new();
        let star = doc.append_element(doc.body(), "i", None, "far fa-star far");

        doc.add_class(star, "active");
        doc.add_class(star, "active");
        doc.remove_class(star, "far");

        assert_eq!(doc.classes(star), ["fa-star", "active"]);
    }

    #[test]
    fn descendants_follow_document_order() {
        let mut doc = Document::new();
        let a = doc.append_element(doc.body(), "div", Some("a"), "");
        let b = doc.append_element(a, "div", Some("b"), "");
        let c = doc.append_element(doc.body(), "div", Some("c"), "");

        assert_eq!(doc.descendants(doc.body()), vec![a, b, c]);
    }

    #[test]
    fn scroll_to_bottom_tracks_child_count() {
        let mut doc = Document::new();
        let list = doc.append_element(doc.body(), "div", None, "");
        doc.append_element(list, "p", None, "");
        doc.append_element(list, "p", None, "");

        doc.scroll_to_bottom(list);

        assert_eq!(doc.scroll_top(list), 2);
        assert_eq!(doc.scroll_top(list), doc.scroll_height(list));
    }

    #[test]
    fn styles_serialise_in_insertion_order() {
        let mut doc = Document::new();
        let toast = doc.append_element(doc.body(), "div", None, "toast");

        doc.set_style(toast, "opacity", "0");

        assert_eq!(
            doc.outer_html(toast),
            r#"<div class="toast" style="opacity: 0"></div>"#
        );
    }
}
