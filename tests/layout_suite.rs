use std::collections::{HashMap, HashSet};
use std::path::Path;

use family_tree_layout::interaction::{CanvasEdge, Connection, PendingRelationships, classify_connection};
use family_tree_layout::layout::{Connector, EdgeKind};
use family_tree_layout::{
    Person, Position, SavedLayout, Theme, TreeDocument, TreeLayout, attach_relationships,
    derive_layout, derive_read_only_layout,
};

fn load_fixture(name: &str) -> (Vec<Person>, SavedLayout) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let raw = std::fs::read_to_string(&path).expect("fixture read failed");
    let document: TreeDocument = serde_json::from_str(&raw).expect("fixture parse failed");
    document.into_parts()
}

fn positions(layout: &TreeLayout<'_>) -> Vec<(String, Position)> {
    layout
        .nodes
        .iter()
        .map(|node| (node.id.clone(), node.position))
        .collect()
}

fn edge_ids(layout: &TreeLayout<'_>) -> Vec<String> {
    layout.edges.iter().map(|edge| edge.id.clone()).collect()
}

fn generations(layout: &TreeLayout<'_>) -> HashMap<String, usize> {
    layout
        .nodes
        .iter()
        .filter_map(|node| node.generation.map(|g| (node.id.clone(), g)))
        .collect()
}

#[test]
fn three_generations_are_placed_in_centred_rows() {
    let (persons, saved) = load_fixture("three_generations.json");
    let layout = derive_layout(&persons, &saved);

    let expected = [
        ("grandpa", -200.0, 0.0),
        ("grandma", 0.0, 0.0),
        ("mum", 200.0, 0.0),
        ("dad", -100.0, 150.0),
        ("aunt", 100.0, 150.0),
        ("kid1", -100.0, 300.0),
        ("kid2", 100.0, 300.0),
    ];
    let expected: Vec<(String, Position)> = expected
        .iter()
        .map(|(id, x, y)| (id.to_string(), Position::new(*x, *y)))
        .collect();
    assert_eq!(positions(&layout), expected);
}

#[test]
fn three_generations_edges() {
    let (persons, saved) = load_fixture("three_generations.json");
    let layout = derive_layout(&persons, &saved);

    assert_eq!(
        edge_ids(&layout),
        vec![
            "parent-grandpa-dad",
            "parent-grandma-dad",
            "parent-grandma-aunt",
            "parent-dad-kid1",
            "parent-dad-kid2",
            "parent-mum-kid1",
            "married-grandpa-grandma",
            "married-dad-mum",
        ]
    );
}

#[test]
fn parents_sit_strictly_above_children() {
    let (persons, saved) = load_fixture("three_generations.json");
    let layout = derive_layout(&persons, &saved);
    let levels = generations(&layout);

    for edge in layout.edges_of_kind(EdgeKind::Parent) {
        assert!(
            levels[&edge.source] < levels[&edge.target],
            "{} should be above {}",
            edge.source,
            edge.target
        );
    }
}

#[test]
fn at_most_one_married_edge_per_pair() {
    let (persons, saved) = load_fixture("three_generations.json");
    let layout = derive_layout(&persons, &saved);

    let mut pairs = HashSet::new();
    for edge in layout.edges_of_kind(EdgeKind::Married) {
        let mut pair = [edge.source.as_str(), edge.target.as_str()];
        pair.sort();
        assert!(pairs.insert(pair), "duplicate marriage {:?}", pair);
    }
    assert_eq!(pairs.len(), 2);
}

#[test]
fn derivation_is_deterministic() {
    let (persons, saved) = load_fixture("three_generations.json");
    let first = derive_layout(&persons, &saved);
    let second = derive_layout(&persons, &saved);
    assert_eq!(positions(&first), positions(&second));
    assert_eq!(first.edges, second.edges);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn snapshot_positions_are_restored_exactly() {
    let (persons, saved) = load_fixture("three_generations.json");
    let mut layout = derive_layout(&persons, &saved);
    layout.nodes[3].position = Position::new(1234.5678, -98.7654321);

    let snapshot = SavedLayout::snapshot(&layout);
    let restored_json = snapshot.to_json().unwrap();
    let restored = SavedLayout::from_json(&restored_json).unwrap();
    let again = derive_layout(&persons, &restored);

    for saved_node in &restored.nodes {
        let node = again.node(&saved_node.id).unwrap();
        assert_eq!(node.position, saved_node.position);
    }
    assert_eq!(again.node("dad").unwrap().position, Position::new(1234.5678, -98.7654321));
}

#[test]
fn cyclic_data_degrades_without_failing() {
    let (persons, saved) = load_fixture("cyclic.json");
    let layout = derive_layout(&persons, &saved);
    let levels = generations(&layout);

    assert_eq!(layout.nodes.len(), 4);
    assert_eq!(levels["a"], 0);
    assert_eq!(levels["b"], 0);
    assert_eq!(levels["c"], 0);
    assert_eq!(levels["d"], 1);
    assert_eq!(
        edge_ids(&layout),
        vec!["parent-a-b", "parent-b-c", "parent-c-a", "parent-c-d"]
    );
    assert_eq!(positions(&layout), positions(&derive_layout(&persons, &saved)));
}

#[test]
fn shared_view_uses_saved_nodes_only() {
    let (persons, saved) = load_fixture("shared_with_layout.json");
    let layout = derive_read_only_layout(&persons, &saved);

    assert_eq!(
        positions(&layout),
        vec![
            ("p3".to_string(), Position::new(310.5, 420.0)),
            ("p1".to_string(), Position::new(-12.25, 3.0)),
        ]
    );
    assert!(layout.nodes.iter().all(|node| !node.draggable && node.data.read_only));
    assert_eq!(edge_ids(&layout), vec!["parent-p1-p3", "married-p1-p2"]);
    assert_eq!(layout.edges[1].connector, Connector::Straight);
}

#[test]
fn editable_view_fills_in_persons_missing_from_saved_layout() {
    let (persons, saved) = load_fixture("shared_with_layout.json");
    let layout = derive_layout(&persons, &saved);

    assert_eq!(
        positions(&layout),
        vec![
            ("p1".to_string(), Position::new(-12.25, 3.0)),
            ("p2".to_string(), Position::new(100.0, 0.0)),
            ("p3".to_string(), Position::new(310.5, 420.0)),
        ]
    );
    assert_eq!(layout.edges[1].connector, Connector::SmoothStep);
}

#[test]
fn shared_view_without_saved_layout_falls_back_to_generations() {
    let (persons, _) = load_fixture("shared_with_layout.json");
    let read_only = derive_read_only_layout(&persons, &SavedLayout::new());
    let editable = derive_layout(&persons, &SavedLayout::new());
    assert_eq!(positions(&read_only), positions(&editable));
    assert_eq!(edge_ids(&read_only), edge_ids(&editable));
}

#[test]
fn drawn_connections_appear_after_save() {
    let (mut persons, saved) = load_fixture("shared_with_layout.json");
    let theme = Theme::standard();
    let before = derive_layout(&persons, &saved);
    let canvas: Vec<CanvasEdge> = before.edges.iter().map(CanvasEdge::from).collect();
    let before_edge_count = before.edges.len();

    let mut pending = PendingRelationships::new();
    let drawn = Connection {
        source: "p3".to_string(),
        target: "p2".to_string(),
        source_handle: Some("child-target".to_string()),
        target_handle: Some("parent-source".to_string()),
    };
    let proposed = classify_connection(&drawn, &canvas, &theme).expect("parent connection");
    assert_eq!(proposed.edge.id, "parent-p2-p3");
    pending.push(proposed.relationship);

    // Already married: a second marriage between the pair is refused.
    let remarry = Connection {
        source: "p2".to_string(),
        target: "p1".to_string(),
        source_handle: Some("married-left".to_string()),
        target_handle: Some("married-right".to_string()),
    };
    assert!(classify_connection(&remarry, &canvas, &theme).is_none());

    let saved_relationships: Vec<_> = pending
        .drain()
        .into_iter()
        .map(|rel| rel.into_relationship())
        .collect();
    attach_relationships(&mut persons, &saved_relationships);

    let after = derive_layout(&persons, &saved);
    assert!(after.edge("parent-p2-p3").is_some());
    assert_eq!(after.edges.len(), before_edge_count + 1);
}

#[test]
fn empty_input_is_empty_output() {
    let layout = derive_layout(&[], &SavedLayout::new());
    assert!(layout.nodes.is_empty());
    assert!(layout.edges.is_empty());
}
