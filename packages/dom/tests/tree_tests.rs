//! Tree surgery sequences checked through snapshots and serialized HTML

use inkmark_dom::{
    compare_points, to_html, BoundaryPoint, Document, DomError, HtmlOptions, NodeSnapshot, Range,
    SelectionSnapshot,
};
use std::cmp::Ordering;

fn paragraph() -> Document {
    // <p>one <em>two</em> three</p>
    Document::from_snapshot(&[NodeSnapshot::element("p").with_children(vec![
        NodeSnapshot::text("one "),
        NodeSnapshot::element("em").with_child(NodeSnapshot::text("two")),
        NodeSnapshot::text(" three"),
    ])])
    .unwrap()
}

#[test]
fn test_split_and_normalize_restores_text_node() {
    let mut doc = paragraph();
    let p = doc.node_at_path(&[0]).unwrap();
    let first = doc.node_at_path(&[0, 0]).unwrap();

    // Split "one " into "on" + "e " the way a wrapper insertion would
    let head = doc.create_text("on");
    let tail = doc.create_text("e ");
    doc.insert_before(p, head, Some(first)).unwrap();
    doc.insert_before(p, tail, Some(first)).unwrap();
    doc.remove_child(p, first).unwrap();
    assert_eq!(doc.children(p).len(), 4);

    doc.normalize(p).unwrap();
    assert_eq!(doc.children(p).len(), 3);
    assert_eq!(doc.text(doc.children(p)[0]), Some("one "));
    assert_eq!(
        to_html(&doc, HtmlOptions::default()),
        "<p>one <em>two</em> three</p>"
    );
}

#[test]
fn test_replace_element_with_text_then_normalize() {
    let mut doc = paragraph();
    let p = doc.node_at_path(&[0]).unwrap();
    let em = doc.node_at_path(&[0, 1]).unwrap();

    let flat = doc.create_text(doc.text_content(em));
    doc.replace_child(p, flat, em).unwrap();
    doc.normalize(p).unwrap();

    assert_eq!(
        doc.snapshot(),
        vec![NodeSnapshot::element("p").with_child(NodeSnapshot::text("one two three"))]
    );
    assert!(doc.path_of(em).is_none());
}

#[test]
fn test_detached_nodes_cannot_be_compared() {
    let mut doc = paragraph();
    let p = doc.node_at_path(&[0]).unwrap();
    let em = doc.node_at_path(&[0, 1]).unwrap();
    let first = doc.node_at_path(&[0, 0]).unwrap();
    doc.remove_child(p, em).unwrap();

    let result = compare_points(&doc, BoundaryPoint::new(first, 0), BoundaryPoint::new(em, 0));
    assert!(result.is_err());
}

#[test]
fn test_point_order_follows_tree_order() {
    let doc = paragraph();
    let p = doc.node_at_path(&[0]).unwrap();
    let two = doc.node_at_path(&[0, 1, 0]).unwrap();
    let three = doc.node_at_path(&[0, 2]).unwrap();

    let before_em = BoundaryPoint::new(p, 1);
    let inside = BoundaryPoint::new(two, 1);
    let after_em = BoundaryPoint::new(p, 2);

    assert_eq!(compare_points(&doc, before_em, inside).unwrap(), Ordering::Less);
    assert_eq!(compare_points(&doc, after_em, inside).unwrap(), Ordering::Greater);
    assert_eq!(
        compare_points(&doc, after_em, BoundaryPoint::new(three, 0)).unwrap(),
        Ordering::Less
    );
}

#[test]
fn test_selection_snapshot_survives_json() {
    let doc = paragraph();
    let selection = SelectionSnapshot {
        start: "0/0:2".parse().unwrap(),
        end: "0/2:3".parse().unwrap(),
    };
    let json = serde_json::to_string(&selection).unwrap();
    let parsed: SelectionSnapshot = serde_json::from_str(&json).unwrap();

    let range = parsed.resolve(&doc).unwrap();
    assert_eq!(range.selected_text(&doc).unwrap(), "e two th");
    assert!(range.intersects_node(&doc, doc.node_at_path(&[0, 1]).unwrap()).unwrap());
}

#[test]
fn test_inverted_range_is_rejected() {
    let doc = paragraph();
    let three = doc.node_at_path(&[0, 2]).unwrap();
    let one = doc.node_at_path(&[0, 0]).unwrap();
    let result = Range::new(&doc, BoundaryPoint::new(three, 1), BoundaryPoint::new(one, 1));
    assert!(matches!(result, Err(DomError::InvertedRange)));
}

#[test]
fn test_document_json_round_trip_after_edits() {
    let mut doc = paragraph();
    let em = doc.node_at_path(&[0, 1]).unwrap();
    doc.add_class(em, "loud").unwrap();
    doc.set_attribute(em, "data-note", "x").unwrap();

    let json = doc.to_json(false).unwrap();
    let restored = Document::from_json(&json).unwrap();
    assert_eq!(restored.snapshot(), doc.snapshot());
    assert_eq!(
        to_html(&restored, HtmlOptions::default()),
        "<p>one <em class=\"loud\" data-note=\"x\">two</em> three</p>"
    );
}
