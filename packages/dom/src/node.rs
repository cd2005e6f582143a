use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Handle to a node in a [`Document`](crate::Document) arena.
///
/// Ids are never reused; a detached node keeps its id until the document is
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node payload
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Tree root
    Document,

    /// Element with a tag name and attributes
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
    },

    /// Text-bearing leaf
    Text { content: String },

    /// Comment (never text-bearing)
    Comment { content: String },
}

impl NodeData {
    pub fn element(tag: impl Into<String>) -> Self {
        NodeData::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        NodeData::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        NodeData::Comment {
            content: content.into(),
        }
    }

    pub fn can_have_children(&self) -> bool {
        matches!(self, NodeData::Document | NodeData::Element { .. })
    }

    /// Character data for text and comment nodes
    pub fn character_data(&self) -> Option<&str> {
        match self {
            NodeData::Text { content } | NodeData::Comment { content } => Some(content),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Number of chars in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Slice `s` by char offsets, clamping both ends to the string length.
pub fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let start_byte = byte_offset(s, start);
    let end_byte = byte_offset(s, end.max(start));
    &s[start_byte..end_byte]
}

fn byte_offset(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_slice_handles_multibyte() {
        let s = "héllo wörld";
        assert_eq!(char_slice(s, 0, 5), "héllo");
        assert_eq!(char_slice(s, 6, 11), "wörld");
        assert_eq!(char_slice(s, 6, 100), "wörld");
        assert_eq!(char_slice(s, 4, 2), "");
        assert_eq!(char_len(s), 11);
    }
}
