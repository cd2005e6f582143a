//! Range decomposition: which text leaves a range touches, and which chars
//! of each one it covers.

use inkmark_dom::{Document, DomResult, NodeId, Range};

/// Chars `[start, end)` of `leaf` fall inside the range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafSpan {
    pub leaf: NodeId,
    pub start: usize,
    pub end: usize,
}

/// Text leaves the range intersects, in tree order.
///
/// A range inside one text node yields that node. Otherwise the common
/// ancestor is walked in pre-order and whitespace-only leaves are dropped.
pub fn text_leaves(doc: &Document, range: &Range) -> DomResult<Vec<NodeId>> {
    let start = range.start_container();
    if start == range.end_container() && doc.is_text(start) {
        return Ok(vec![start]);
    }

    let mut leaves = Vec::new();
    for node in doc.text_nodes(range.common_ancestor(doc)) {
        if !range.intersects_node(doc, node)? {
            continue;
        }
        let blank = doc.text(node).map(|t| t.trim().is_empty()).unwrap_or(true);
        if !blank {
            leaves.push(node);
        }
    }
    Ok(leaves)
}

/// Per-leaf spans; leaves whose span would be empty are skipped
pub fn leaf_spans(doc: &Document, range: &Range) -> DomResult<Vec<LeafSpan>> {
    Ok(text_leaves(doc, range)?
        .into_iter()
        .filter_map(|leaf| {
            let start = if leaf == range.start_container() {
                range.start_offset()
            } else {
                0
            };
            let end = if leaf == range.end_container() {
                range.end_offset()
            } else {
                doc.text_len(leaf)
            };
            (start < end).then_some(LeafSpan { leaf, start, end })
        })
        .collect())
}
