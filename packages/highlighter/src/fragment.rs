//! Fragment markup: wrapping a leaf span and turning a fragment back into
//! plain text.

use crate::decompose::LeafSpan;
use crate::{ColorKey, HighlightResult};
use inkmark_dom::{char_len, char_slice, Document, DomError, NodeData, NodeId};

/// Marker class carried by every fragment this crate creates
pub const HIGHLIGHT_CLASS: &str = "text-highlight";
pub const COLOR_CLASS_PREFIX: &str = "text-highlight-";
pub const GROUP_ATTR: &str = "data-highlight-id";
pub const PART_ATTR: &str = "data-highlight-part";

pub const REMOVE_BUTTON_CLASS: &str = "highlight-remove-btn";
pub const REMOVE_ATTR: &str = "data-highlight-remove";
pub const REMOVE_BUTTON_LABEL: &str = "×";

pub const CURSOR_CLASS: &str = "highlight-cursor";
pub const CURSOR_CLASS_PREFIX: &str = "highlight-cursor-";

/// Replace the leaf in `span` with `[before?, fragment, after?]` and return
/// the fragment.
///
/// `ordinal` counts fragments created so far in the group, not leaves
/// visited, so ordinal 0 (the one with the removal button) always exists.
pub(crate) fn wrap_leaf(
    doc: &mut Document,
    span: &LeafSpan,
    group_id: &str,
    color: &ColorKey,
    ordinal: usize,
) -> HighlightResult<NodeId> {
    let leaf = span.leaf;
    let content = doc
        .text(leaf)
        .ok_or(DomError::NotCharacterData(leaf))?
        .to_string();
    let parent = doc.parent(leaf).ok_or(DomError::Detached(leaf))?;

    let before = char_slice(&content, 0, span.start);
    let middle = char_slice(&content, span.start, span.end);
    let after = char_slice(&content, span.end, char_len(&content));

    let fragment = doc.create_element("span");
    doc.set_attribute(
        fragment,
        "class",
        format!("{} {}{}", HIGHLIGHT_CLASS, COLOR_CLASS_PREFIX, color),
    )?;
    doc.set_attribute(fragment, GROUP_ATTR, group_id)?;
    doc.set_attribute(fragment, PART_ATTR, ordinal.to_string())?;

    let text = doc.create_text(middle);
    doc.append_child(fragment, text)?;
    if ordinal == 0 {
        let button = create_remove_button(doc, group_id)?;
        doc.append_child(fragment, button)?;
    }

    if !before.is_empty() {
        let node = doc.create_text(before);
        doc.insert_before(parent, node, Some(leaf))?;
    }
    doc.insert_before(parent, fragment, Some(leaf))?;
    if !after.is_empty() {
        let node = doc.create_text(after);
        doc.insert_before(parent, node, Some(leaf))?;
    }
    doc.remove_child(parent, leaf)?;

    Ok(fragment)
}

fn create_remove_button(doc: &mut Document, group_id: &str) -> HighlightResult<NodeId> {
    let button = doc.create_element("button");
    doc.set_attribute(button, "class", REMOVE_BUTTON_CLASS)?;
    doc.set_attribute(button, REMOVE_ATTR, group_id)?;
    let label = doc.create_text(REMOVE_BUTTON_LABEL);
    doc.append_child(button, label)?;
    Ok(button)
}

pub(crate) fn is_remove_button(doc: &Document, id: NodeId) -> bool {
    doc.has_class(id, REMOVE_BUTTON_CLASS)
}

/// Group id of the removal button at or above `target`
pub(crate) fn remove_target(doc: &Document, target: NodeId) -> Option<String> {
    doc.ancestors(target)
        .into_iter()
        .find(|id| is_remove_button(doc, *id))
        .and_then(|button| doc.attribute(button, REMOVE_ATTR).map(str::to_string))
}

/// Highlighted characters of a fragment, removal button excluded
pub(crate) fn fragment_text(doc: &Document, fragment: NodeId) -> String {
    let mut out = String::new();
    collect_text(doc, fragment, &mut out);
    out
}

fn collect_text(doc: &Document, id: NodeId, out: &mut String) {
    for child in doc.children(id) {
        match doc.data(*child) {
            Some(NodeData::Text { content }) => out.push_str(content),
            Some(NodeData::Element { .. }) if !is_remove_button(doc, *child) => {
                collect_text(doc, *child, out)
            }
            _ => {}
        }
    }
}

/// Color key recovered from a fragment's class list
pub(crate) fn fragment_color(doc: &Document, fragment: NodeId) -> Option<ColorKey> {
    doc.attribute(fragment, "class")?
        .split_whitespace()
        .find_map(|class| class.strip_prefix(COLOR_CLASS_PREFIX))
        .and_then(|key| ColorKey::new(key).ok())
}

/// Replace each fragment with a plain text node, then normalize every
/// parent that was touched. Returns how many fragments were replaced.
pub(crate) fn unwrap_fragments(doc: &mut Document, fragments: &[NodeId]) -> HighlightResult<usize> {
    let mut parents: Vec<NodeId> = Vec::new();
    let mut replaced = 0;

    for fragment in fragments {
        // An enclosing fragment replaced earlier already carried this one away
        if doc.path_of(*fragment).is_none() {
            continue;
        }
        let parent = doc
            .parent(*fragment)
            .ok_or(DomError::Detached(*fragment))?;
        let text = fragment_text(doc, *fragment);
        let node = doc.create_text(text);
        doc.replace_child(parent, node, *fragment)?;
        if !parents.contains(&parent) {
            parents.push(parent);
        }
        replaced += 1;
    }

    for parent in parents {
        if doc.path_of(parent).is_some() {
            doc.normalize(parent)?;
        }
    }
    Ok(replaced)
}
