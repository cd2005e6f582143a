//! # Document Arena
//!
//! Owned rich text tree with DOM-style tree surgery.
//!
//! Nodes live in a flat arena and are addressed by [`NodeId`]. Removing a
//! node only detaches it; the id stays valid so callers holding on to it can
//! still read its content or re-insert it.

use crate::events::Listeners;
use crate::node::{char_len, Node, NodeData, NodeId};
use crate::selection::Selection;
use crate::{DomError, DomResult};

/// Rich text document
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    selection: Selection,
    listeners: Listeners,
}

impl Document {
    /// Empty document containing only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
            selection: Selection::default(),
            listeners: Listeners::default(),
        }
    }

    /// Document with an `html > body` skeleton
    pub fn with_body() -> Self {
        let mut doc = Self::new();
        let html = doc.create_element("html");
        let body = doc.create_element("body");
        doc.nodes[html.0].children.push(body);
        doc.nodes[body.0].parent = Some(html);
        doc.nodes[0].children.push(html);
        doc.nodes[html.0].parent = Some(NodeId(0));
        doc
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.nodes.get(id.0).ok_or(DomError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(DomError::NodeNotFound(id))
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    pub fn create_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(data));
        id
    }

    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.create_node(NodeData::element(tag))
    }

    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.create_node(NodeData::text(content))
    }

    pub fn create_comment(&mut self, content: impl Into<String>) -> NodeId {
        self.create_node(NodeData::comment(content))
    }

    // ------------------------------------------------------------------
    // Structure queries
    // ------------------------------------------------------------------

    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0).map(|n| &n.data)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.data(id)? {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.data(id), Some(NodeData::Element { .. }))
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.data(id), Some(NodeData::Text { .. }))
    }

    /// Content of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.data(id)? {
            NodeData::Text { content } => Some(content),
            _ => None,
        }
    }

    /// Length in chars of a text node's content (0 for anything else)
    pub fn text_len(&self, id: NodeId) -> usize {
        self.text(id).map(char_len).unwrap_or(0)
    }

    /// DOM node length: chars for character data, child count otherwise
    pub fn node_length(&self, id: NodeId) -> usize {
        match self.data(id) {
            Some(data) => match data.character_data() {
                Some(content) => char_len(content),
                None => self.children(id).len(),
            },
            None => 0,
        }
    }

    /// Concatenated text of every text node at or below `id`
    pub fn text_content(&self, id: NodeId) -> String {
        match self.data(id) {
            Some(NodeData::Text { content }) | Some(NodeData::Comment { content }) => {
                content.clone()
            }
            Some(_) => self
                .text_nodes(id)
                .filter_map(|t| self.text(t))
                .collect(),
            None => String::new(),
        }
    }

    pub fn set_text(&mut self, id: NodeId, value: impl Into<String>) -> DomResult<()> {
        match &mut self.node_mut(id)?.data {
            NodeData::Text { content } | NodeData::Comment { content } => {
                *content = value.into();
                Ok(())
            }
            _ => Err(DomError::NotCharacterData(id)),
        }
    }

    /// True when `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Inclusive ancestors of `id`, nearest first
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.contains(id).then_some(id);
        while let Some(node) = current {
            chain.push(node);
            current = self.parent(node);
        }
        chain
    }

    /// First `body` element, falling back to the root
    pub fn body(&self) -> NodeId {
        self.descendants(self.root())
            .find(|id| self.tag(*id) == Some("body"))
            .unwrap_or_else(|| self.root())
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Pre-order walk of everything below `root` (root itself excluded)
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(root).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Text nodes below `root`, in tree order
    pub fn text_nodes(&self, root: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(root).filter(move |id| self.is_text(*id))
    }

    /// Child-index path from the root, `None` when detached
    pub fn path_of(&self, id: NodeId) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        let mut current = id;
        loop {
            if current == self.root() {
                path.reverse();
                return Some(path);
            }
            path.push(self.index_in_parent(current)?);
            current = self.parent(current)?;
        }
    }

    pub fn node_at_path(&self, path: &[usize]) -> Option<NodeId> {
        path.iter().try_fold(self.root(), |node, index| {
            self.children(node).get(*index).copied()
        })
    }

    // ------------------------------------------------------------------
    // Tree surgery
    // ------------------------------------------------------------------

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if !self.node(parent)?.data.can_have_children() {
            return Err(DomError::CannotHaveChildren(parent));
        }
        self.node(child)?;
        if child == self.root() || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyCycle { parent, child });
        }
        Ok(())
    }

    /// Unlink `id` from its parent, if any
    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.check_insertion(parent, child)?;
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Insert `child` before `reference`, or append when `reference` is `None`
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        let Some(reference) = reference else {
            return self.append_child(parent, child);
        };
        if self.parent(reference) != Some(parent) {
            return Err(DomError::NotAChild {
                parent,
                child: reference,
            });
        }
        if reference == child {
            return Ok(());
        }
        self.check_insertion(parent, child)?;
        self.detach(child);
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|c| *c == reference)
            .ok_or(DomError::NotAChild {
                parent,
                child: reference,
            })?;
        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(())
    }

    /// Put `new` where `old` was; `old` ends up detached
    pub fn replace_child(&mut self, parent: NodeId, new: NodeId, old: NodeId) -> DomResult<()> {
        if self.node(old)?.parent != Some(parent) {
            return Err(DomError::NotAChild { parent, child: old });
        }
        if new == old {
            return Ok(());
        }
        self.check_insertion(parent, new)?;
        self.detach(new);
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|c| *c == old)
            .ok_or(DomError::NotAChild { parent, child: old })?;
        self.nodes[parent.0].children[index] = new;
        self.nodes[new.0].parent = Some(parent);
        self.nodes[old.0].parent = None;
        Ok(())
    }

    /// `Node.normalize()`: drop empty text nodes and merge adjacent text
    /// siblings everywhere below `id`. Element boundaries are never crossed.
    pub fn normalize(&mut self, id: NodeId) -> DomResult<()> {
        self.node(id)?;
        let children = self.nodes[id.0].children.clone();
        let mut run: Option<NodeId> = None;

        for child in children {
            match &self.nodes[child.0].data {
                NodeData::Text { content } if content.is_empty() => {
                    self.detach(child);
                }
                NodeData::Text { content } => match run {
                    Some(head) => {
                        let tail = content.clone();
                        if let NodeData::Text { content } = &mut self.nodes[head.0].data {
                            content.push_str(&tail);
                        }
                        self.detach(child);
                    }
                    None => run = Some(child),
                },
                _ => {
                    run = None;
                    self.normalize(child)?;
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.data(id)? {
            NodeData::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> DomResult<()> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element { attributes, .. } => {
                attributes.insert(name.into(), value.into());
                Ok(())
            }
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element { attributes, .. } => Ok(attributes.remove(name)),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class")
            .map(|list| list.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        if self.has_class(id, class) {
            return Ok(());
        }
        let list = match self.attribute(id, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attribute(id, "class", list)
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        let Some(existing) = self.attribute(id, "class") else {
            return Ok(());
        };
        let remaining: Vec<&str> = existing.split_whitespace().filter(|c| *c != class).collect();
        if remaining.is_empty() {
            self.remove_attribute(id, "class")?;
            Ok(())
        } else {
            let list = remaining.join(" ");
            self.set_attribute(id, "class", list)
        }
    }

    /// Elements whose attribute `name` equals `value`, in tree order
    pub fn query_attribute(&self, name: &str, value: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .filter(|id| self.attribute(*id, name) == Some(value))
            .collect()
    }

    /// Elements carrying `class`, in tree order
    pub fn query_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    // ------------------------------------------------------------------
    // Selection and listeners
    // ------------------------------------------------------------------

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut Listeners {
        &mut self.listeners
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order iterator returned by [`Document::descendants`]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(doc: &mut Document, parts: &[&str]) -> NodeId {
        let body = doc.body();
        let p = doc.create_element("p");
        doc.append_child(body, p).unwrap();
        for part in parts {
            let t = doc.create_text(*part);
            doc.append_child(p, t).unwrap();
        }
        p
    }

    #[test]
    fn test_with_body_skeleton() {
        let doc = Document::with_body();
        let body = doc.body();
        assert_eq!(doc.tag(body), Some("body"));
        assert_eq!(doc.path_of(body), Some(vec![0, 0]));
        assert_eq!(doc.node_at_path(&[0, 0]), Some(body));
    }

    #[test]
    fn test_descendants_are_pre_order() {
        let mut doc = Document::with_body();
        let p = paragraph(&mut doc, &["a"]);
        let b = doc.create_element("b");
        let bt = doc.create_text("b");
        doc.append_child(b, bt).unwrap();
        doc.append_child(p, b).unwrap();
        let c = doc.create_text("c");
        doc.append_child(p, c).unwrap();

        let texts: Vec<String> = doc
            .text_nodes(p)
            .map(|t| doc.text(t).unwrap().to_string())
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(doc.text_content(p), "abc");
    }

    #[test]
    fn test_insert_before_and_replace() {
        let mut doc = Document::with_body();
        let p = paragraph(&mut doc, &["middle"]);
        let middle = doc.children(p)[0];

        let first = doc.create_text("first ");
        doc.insert_before(p, first, Some(middle)).unwrap();
        let span = doc.create_element("span");
        doc.replace_child(p, span, middle).unwrap();

        assert_eq!(doc.children(p), &[first, span]);
        assert_eq!(doc.parent(middle), None);
        assert_eq!(doc.parent(span), Some(p));
    }

    #[test]
    fn test_remove_child_rejects_non_child() {
        let mut doc = Document::with_body();
        let p = paragraph(&mut doc, &["x"]);
        let stray = doc.create_text("stray");
        assert!(matches!(
            doc.remove_child(p, stray),
            Err(DomError::NotAChild { .. })
        ));
    }

    #[test]
    fn test_cycle_is_rejected() {
        let mut doc = Document::with_body();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner).unwrap();
        assert!(matches!(
            doc.append_child(inner, outer),
            Err(DomError::HierarchyCycle { .. })
        ));
    }

    #[test]
    fn test_text_nodes_cannot_have_children() {
        let mut doc = Document::with_body();
        let t = doc.create_text("leaf");
        let u = doc.create_text("other");
        assert!(matches!(
            doc.append_child(t, u),
            Err(DomError::CannotHaveChildren(_))
        ));
    }

    #[test]
    fn test_normalize_merges_adjacent_text() {
        let mut doc = Document::with_body();
        let p = paragraph(&mut doc, &["Hello", "", " ", "world"]);
        let em = doc.create_element("em");
        let inner_a = doc.create_text("x");
        let inner_b = doc.create_text("y");
        doc.append_child(em, inner_a).unwrap();
        doc.append_child(em, inner_b).unwrap();
        doc.append_child(p, em).unwrap();
        let tail = doc.create_text("!");
        doc.append_child(p, tail).unwrap();

        doc.normalize(p).unwrap();

        let children = doc.children(p).to_vec();
        assert_eq!(children.len(), 3);
        assert_eq!(doc.text(children[0]), Some("Hello world"));
        assert_eq!(doc.children(em).len(), 1);
        assert_eq!(doc.text(doc.children(em)[0]), Some("xy"));
        assert_eq!(doc.text(children[2]), Some("!"));
    }

    #[test]
    fn test_class_list_editing() {
        let mut doc = Document::with_body();
        let body = doc.body();
        doc.add_class(body, "one").unwrap();
        doc.add_class(body, "two").unwrap();
        doc.add_class(body, "one").unwrap();
        assert_eq!(doc.attribute(body, "class"), Some("one two"));

        doc.remove_class(body, "one").unwrap();
        assert_eq!(doc.attribute(body, "class"), Some("two"));
        doc.remove_class(body, "two").unwrap();
        assert_eq!(doc.attribute(body, "class"), None);
    }

    #[test]
    fn test_query_attribute_in_tree_order() {
        let mut doc = Document::with_body();
        let body = doc.body();
        let a = doc.create_element("span");
        let b = doc.create_element("span");
        doc.set_attribute(a, "data-k", "v").unwrap();
        doc.set_attribute(b, "data-k", "v").unwrap();
        doc.append_child(body, a).unwrap();
        doc.append_child(body, b).unwrap();
        assert_eq!(doc.query_attribute("data-k", "v"), vec![a, b]);
        assert!(doc.query_attribute("data-k", "w").is_empty());
    }
}
