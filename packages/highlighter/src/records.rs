//! Listing the highlights present in a document.

use crate::fragment::{fragment_color, fragment_text, GROUP_ATTR, HIGHLIGHT_CLASS};
use crate::ColorKey;
use inkmark_dom::Document;
use serde::{Deserialize, Serialize};

/// One highlight group as it currently appears in the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorKey>,
    /// Text of each fragment, in document order
    pub chunks: Vec<String>,
}

impl HighlightRecord {
    pub fn text(&self) -> String {
        self.chunks.concat()
    }
}

/// Every group still present, ordered by first appearance
pub fn collect_highlights(doc: &Document) -> Vec<HighlightRecord> {
    let mut records: Vec<HighlightRecord> = Vec::new();

    for fragment in doc.query_class(HIGHLIGHT_CLASS) {
        let Some(id) = doc.attribute(fragment, GROUP_ATTR) else {
            continue;
        };
        let chunk = fragment_text(doc, fragment);
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => record.chunks.push(chunk),
            None => records.push(HighlightRecord {
                id: id.to_string(),
                color: fragment_color(doc, fragment),
                chunks: vec![chunk],
            }),
        }
    }

    records
}
