//! Serializable document and selection snapshots.
//!
//! Hosts hand documents across the wasm boundary and the CLI reads them
//! from disk in this shape.

use crate::{BoundaryPoint, Document, DomError, DomResult, NodeData, NodeId, Range};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Owned node tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeSnapshot {
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<NodeSnapshot>,
    },

    Text { content: String },

    Comment { content: String },
}

impl NodeSnapshot {
    pub fn element(tag: impl Into<String>) -> Self {
        NodeSnapshot::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        NodeSnapshot::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        NodeSnapshot::Comment {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let NodeSnapshot::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: NodeSnapshot) -> Self {
        if let NodeSnapshot::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<NodeSnapshot>) -> Self {
        if let NodeSnapshot::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }
}

impl Document {
    /// Build a document whose root holds `nodes`
    pub fn from_snapshot(nodes: &[NodeSnapshot]) -> DomResult<Self> {
        let mut doc = Document::new();
        let root = doc.root();
        for node in nodes {
            doc.build_snapshot(root, node)?;
        }
        Ok(doc)
    }

    pub fn from_json(json: &str) -> DomResult<Self> {
        let nodes: Vec<NodeSnapshot> = serde_json::from_str(json)?;
        Self::from_snapshot(&nodes)
    }

    fn build_snapshot(&mut self, parent: NodeId, node: &NodeSnapshot) -> DomResult<()> {
        let id = match node {
            NodeSnapshot::Element {
                tag,
                attributes,
                children,
            } => {
                let id = self.create_node(NodeData::Element {
                    tag: tag.clone(),
                    attributes: attributes.clone(),
                });
                self.append_child(parent, id)?;
                for child in children {
                    self.build_snapshot(id, child)?;
                }
                return Ok(());
            }
            NodeSnapshot::Text { content } => self.create_text(content.clone()),
            NodeSnapshot::Comment { content } => self.create_comment(content.clone()),
        };
        self.append_child(parent, id)
    }

    /// Snapshot of everything attached under the root
    pub fn snapshot(&self) -> Vec<NodeSnapshot> {
        self.children(self.root())
            .iter()
            .filter_map(|id| self.snapshot_node(*id))
            .collect()
    }

    pub fn snapshot_node(&self, id: NodeId) -> Option<NodeSnapshot> {
        Some(match self.data(id)? {
            NodeData::Document => return None,
            NodeData::Element { tag, attributes } => NodeSnapshot::Element {
                tag: tag.clone(),
                attributes: attributes.clone(),
                children: self
                    .children(id)
                    .iter()
                    .filter_map(|c| self.snapshot_node(*c))
                    .collect(),
            },
            NodeData::Text { content } => NodeSnapshot::text(content.clone()),
            NodeData::Comment { content } => NodeSnapshot::comment(content.clone()),
        })
    }

    pub fn to_json(&self, pretty: bool) -> DomResult<String> {
        let nodes = self.snapshot();
        Ok(if pretty {
            serde_json::to_string_pretty(&nodes)?
        } else {
            serde_json::to_string(&nodes)?
        })
    }
}

/// Boundary point addressed by a child-index path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSnapshot {
    pub path: Vec<usize>,
    pub offset: usize,
}

impl PointSnapshot {
    pub fn resolve(&self, doc: &Document) -> DomResult<BoundaryPoint> {
        let node = doc
            .node_at_path(&self.path)
            .ok_or_else(|| DomError::PathNotFound(self.path.clone()))?;
        Ok(BoundaryPoint::new(node, self.offset))
    }

    pub fn capture(doc: &Document, point: BoundaryPoint) -> DomResult<Self> {
        let path = doc
            .path_of(point.node)
            .ok_or(DomError::Detached(point.node))?;
        Ok(Self {
            path,
            offset: point.offset,
        })
    }
}

/// Parses `0/1/0:3` (path segments, then the offset)
impl FromStr for PointSnapshot {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, offset) = s
            .rsplit_once(':')
            .ok_or_else(|| DomError::InvalidPoint(format!("missing ':offset' in '{}'", s)))?;
        let offset = offset
            .trim()
            .parse()
            .map_err(|_| DomError::InvalidPoint(format!("bad offset in '{}'", s)))?;
        let path = path
            .split('/')
            .filter(|segment| !segment.trim().is_empty())
            .map(|segment| {
                segment
                    .trim()
                    .parse()
                    .map_err(|_| DomError::InvalidPoint(format!("bad path segment '{}'", segment)))
            })
            .collect::<DomResult<Vec<usize>>>()?;
        Ok(Self { path, offset })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub start: PointSnapshot,
    pub end: PointSnapshot,
}

impl SelectionSnapshot {
    pub fn resolve(&self, doc: &Document) -> DomResult<Range> {
        Range::new(doc, self.start.resolve(doc)?, self.end.resolve(doc)?)
    }

    pub fn capture(doc: &Document, range: &Range) -> DomResult<Self> {
        Ok(Self {
            start: PointSnapshot::capture(doc, range.start())?,
            end: PointSnapshot::capture(doc, range.end())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_json() {
        let json = r#"[
            {"type": "Element", "tag": "p", "children": [
                {"type": "Text", "content": "Hello "},
                {"type": "Element", "tag": "b", "attributes": {"class": "x"}, "children": [
                    {"type": "Text", "content": "bold"}
                ]},
                {"type": "Comment", "content": "note"}
            ]}
        ]"#;

        let doc = Document::from_json(json).unwrap();
        let p = doc.node_at_path(&[0]).unwrap();
        assert_eq!(doc.tag(p), Some("p"));
        assert_eq!(doc.text_content(p), "Hello bold");
        let b = doc.node_at_path(&[0, 1]).unwrap();
        assert_eq!(doc.attribute(b, "class"), Some("x"));
        assert_eq!(doc.snapshot().len(), 1);
    }

    #[test]
    fn test_snapshot_reflects_mutations() {
        let mut doc = Document::from_snapshot(&[
            NodeSnapshot::element("p").with_child(NodeSnapshot::text("abc"))
        ])
        .unwrap();
        let t = doc.node_at_path(&[0, 0]).unwrap();
        doc.set_text(t, "xyz").unwrap();

        assert_eq!(
            doc.snapshot(),
            vec![NodeSnapshot::element("p").with_child(NodeSnapshot::text("xyz"))]
        );
    }

    #[test]
    fn test_parse_point() {
        let point: PointSnapshot = "0/1/0:3".parse().unwrap();
        assert_eq!(point.path, vec![0, 1, 0]);
        assert_eq!(point.offset, 3);

        let root: PointSnapshot = ":2".parse().unwrap();
        assert!(root.path.is_empty());
        assert_eq!(root.offset, 2);

        assert!("0/1".parse::<PointSnapshot>().is_err());
        assert!("0/x:1".parse::<PointSnapshot>().is_err());
    }

    #[test]
    fn test_selection_resolves_to_range() {
        let doc = Document::from_snapshot(&[
            NodeSnapshot::element("p").with_child(NodeSnapshot::text("Hello world"))
        ])
        .unwrap();
        let selection = SelectionSnapshot {
            start: "0/0:0".parse().unwrap(),
            end: "0/0:5".parse().unwrap(),
        };
        let range = selection.resolve(&doc).unwrap();
        assert_eq!(range.selected_text(&doc).unwrap(), "Hello");
        assert_eq!(SelectionSnapshot::capture(&doc, &range).unwrap(), selection);

        let missing = SelectionSnapshot {
            start: "3:0".parse().unwrap(),
            end: "3:1".parse().unwrap(),
        };
        assert!(matches!(
            missing.resolve(&doc),
            Err(DomError::PathNotFound(_))
        ));
    }
}
