//! Boundary points and ranges.
//!
//! Offsets follow DOM rules: a char index inside text and comment nodes, a
//! child index everywhere else.

use crate::node::{char_len, char_slice};
use crate::{Document, DomError, DomResult, NodeId};
use std::cmp::Ordering;

/// A `(node, offset)` position in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryPoint {
    pub node: NodeId,
    pub offset: usize,
}

impl BoundaryPoint {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// Order two boundary points in tree order.
///
/// Both points must be attached to the document.
pub fn compare_points(doc: &Document, a: BoundaryPoint, b: BoundaryPoint) -> DomResult<Ordering> {
    if a.node == b.node {
        return Ok(a.offset.cmp(&b.offset));
    }
    let path_a = doc.path_of(a.node).ok_or(DomError::Detached(a.node))?;
    let path_b = doc.path_of(b.node).ok_or(DomError::Detached(b.node))?;
    Ok(compare_paths(&path_a, a.offset, &path_b, b.offset))
}

fn compare_paths(path_a: &[usize], offset_a: usize, path_b: &[usize], offset_b: usize) -> Ordering {
    if path_a > path_b {
        return compare_paths(path_b, offset_b, path_a, offset_a).reverse();
    }
    if path_b.starts_with(path_a) {
        // a's node is an ancestor of b's node
        let child_index = path_b[path_a.len()];
        if child_index < offset_a {
            return Ordering::Greater;
        }
    }
    Ordering::Less
}

/// A span of content between two boundary points, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    start: BoundaryPoint,
    end: BoundaryPoint,
}

impl Range {
    pub fn new(doc: &Document, start: BoundaryPoint, end: BoundaryPoint) -> DomResult<Self> {
        validate_point(doc, start)?;
        validate_point(doc, end)?;
        if compare_points(doc, start, end)? == Ordering::Greater {
            return Err(DomError::InvertedRange);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> BoundaryPoint {
        self.start
    }

    pub fn end(&self) -> BoundaryPoint {
        self.end
    }

    pub fn start_container(&self) -> NodeId {
        self.start.node
    }

    pub fn start_offset(&self) -> usize {
        self.start.offset
    }

    pub fn end_container(&self) -> NodeId {
        self.end.node
    }

    pub fn end_offset(&self) -> usize {
        self.end.offset
    }

    pub fn collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Deepest node containing both boundary containers
    pub fn common_ancestor(&self, doc: &Document) -> NodeId {
        let start_chain = doc.ancestors(self.start.node);
        doc.ancestors(self.end.node)
            .into_iter()
            .find(|id| start_chain.contains(id))
            .unwrap_or_else(|| doc.root())
    }

    /// `Range.intersectsNode`
    pub fn intersects_node(&self, doc: &Document, node: NodeId) -> DomResult<bool> {
        let Some(parent) = doc.parent(node) else {
            return Ok(doc.path_of(node).is_some());
        };
        let offset = doc
            .index_in_parent(node)
            .ok_or(DomError::Detached(node))?;
        let before_end =
            compare_points(doc, BoundaryPoint::new(parent, offset), self.end)? == Ordering::Less;
        let after_start = compare_points(doc, BoundaryPoint::new(parent, offset + 1), self.start)?
            == Ordering::Greater;
        Ok(before_end && after_start)
    }

    /// `Range.toString`: characters of every text node inside the range
    pub fn selected_text(&self, doc: &Document) -> DomResult<String> {
        if self.start.node == self.end.node {
            if let Some(content) = doc.text(self.start.node) {
                return Ok(char_slice(content, self.start.offset, self.end.offset).to_string());
            }
        }

        let mut out = String::new();
        for text in doc.text_nodes(self.common_ancestor(doc)) {
            if let Some((from, to)) = self.span_within(doc, text)? {
                if let Some(content) = doc.text(text) {
                    out.push_str(char_slice(content, from, to));
                }
            }
        }
        Ok(out)
    }

    /// The `[from, to)` char span of text node `text` covered by this range
    pub fn span_within(&self, doc: &Document, text: NodeId) -> DomResult<Option<(usize, usize)>> {
        let length = char_len(doc.text(text).ok_or(DomError::NotCharacterData(text))?);

        let from = if text == self.start.node {
            self.start.offset
        } else if compare_points(doc, BoundaryPoint::new(text, 0), self.start)? != Ordering::Less {
            0
        } else {
            return Ok(None);
        };

        let to = if text == self.end.node {
            self.end.offset
        } else if compare_points(doc, BoundaryPoint::new(text, length), self.end)?
            != Ordering::Greater
        {
            length
        } else {
            return Ok(None);
        };

        Ok((from < to).then_some((from, to)))
    }
}

fn validate_point(doc: &Document, point: BoundaryPoint) -> DomResult<()> {
    if !doc.contains(point.node) {
        return Err(DomError::NodeNotFound(point.node));
    }
    if doc.path_of(point.node).is_none() {
        return Err(DomError::Detached(point.node));
    }
    let length = doc.node_length(point.node);
    if point.offset > length {
        return Err(DomError::InvalidOffset {
            node: point.node,
            offset: point.offset,
            length,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `<p>Hello <b>bold</b> text</p>`
    fn sample() -> (Document, NodeId, NodeId, NodeId, NodeId) {
        let mut doc = Document::with_body();
        let body = doc.body();
        let p = doc.create_element("p");
        doc.append_child(body, p).unwrap();
        let hello = doc.create_text("Hello ");
        let b = doc.create_element("b");
        let bold = doc.create_text("bold");
        let text = doc.create_text(" text");
        doc.append_child(p, hello).unwrap();
        doc.append_child(b, bold).unwrap();
        doc.append_child(p, b).unwrap();
        doc.append_child(p, text).unwrap();
        (doc, p, hello, bold, text)
    }

    #[test]
    fn test_compare_points_in_tree_order() {
        let (doc, p, hello, bold, _) = sample();
        let a = BoundaryPoint::new(hello, 3);
        let b = BoundaryPoint::new(bold, 0);
        assert_eq!(compare_points(&doc, a, b).unwrap(), Ordering::Less);
        assert_eq!(compare_points(&doc, b, a).unwrap(), Ordering::Greater);

        // (p, 1) sits right before <b>, so it precedes anything inside it
        let before_b = BoundaryPoint::new(p, 1);
        assert_eq!(compare_points(&doc, before_b, b).unwrap(), Ordering::Less);
        // (p, 2) sits after <b>
        let after_b = BoundaryPoint::new(p, 2);
        assert_eq!(compare_points(&doc, after_b, b).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let (doc, _, hello, bold, _) = sample();
        let result = Range::new(
            &doc,
            BoundaryPoint::new(bold, 2),
            BoundaryPoint::new(hello, 1),
        );
        assert!(matches!(result, Err(DomError::InvertedRange)));
    }

    #[test]
    fn test_offset_out_of_bounds() {
        let (doc, _, hello, _, _) = sample();
        let result = Range::new(
            &doc,
            BoundaryPoint::new(hello, 0),
            BoundaryPoint::new(hello, 42),
        );
        assert!(matches!(result, Err(DomError::InvalidOffset { .. })));
    }

    #[test]
    fn test_selected_text_across_elements() {
        let (doc, p, hello, _, text) = sample();
        let range = Range::new(
            &doc,
            BoundaryPoint::new(hello, 2),
            BoundaryPoint::new(text, 3),
        )
        .unwrap();
        assert_eq!(range.selected_text(&doc).unwrap(), "llo bold te");
        assert_eq!(range.common_ancestor(&doc), p);
    }

    #[test]
    fn test_intersects_node() {
        let (doc, p, hello, bold, text) = sample();
        let range = Range::new(
            &doc,
            BoundaryPoint::new(bold, 1),
            BoundaryPoint::new(text, 2),
        )
        .unwrap();
        assert!(!range.intersects_node(&doc, hello).unwrap());
        assert!(range.intersects_node(&doc, bold).unwrap());
        assert!(range.intersects_node(&doc, text).unwrap());
        assert!(range.intersects_node(&doc, p).unwrap());

        // An element-level range ending right before <b> does not touch it
        let element_range = Range::new(
            &doc,
            BoundaryPoint::new(p, 0),
            BoundaryPoint::new(p, 1),
        )
        .unwrap();
        assert!(element_range.intersects_node(&doc, hello).unwrap());
        assert!(!element_range.intersects_node(&doc, bold).unwrap());
    }

    #[test]
    fn test_span_within_boundary_leaves() {
        let (doc, _, hello, bold, text) = sample();
        let range = Range::new(
            &doc,
            BoundaryPoint::new(hello, 6),
            BoundaryPoint::new(text, 3),
        )
        .unwrap();
        // Start sits at the very end of "Hello ": nothing selected there
        assert_eq!(range.span_within(&doc, hello).unwrap(), None);
        assert_eq!(range.span_within(&doc, bold).unwrap(), Some((0, 4)));
        assert_eq!(range.span_within(&doc, text).unwrap(), Some((0, 3)));
    }

    #[test]
    fn test_collapsed() {
        let (doc, _, hello, _, _) = sample();
        let point = BoundaryPoint::new(hello, 2);
        let range = Range::new(&doc, point, point).unwrap();
        assert!(range.collapsed());
        assert_eq!(range.selected_text(&doc).unwrap(), "");
    }
}
