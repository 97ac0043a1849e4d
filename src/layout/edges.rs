use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::ir::{Person, RelationshipKind};
use crate::theme::Theme;

use super::{
    Connector, DrawableEdge, EdgeKind, EdgeStyle, Handle, Marker, MarkerType,
};

pub(crate) fn parent_edge(parent_id: &str, child_id: &str, theme: &Theme) -> DrawableEdge {
    DrawableEdge {
        id: format!("parent-{parent_id}-{child_id}"),
        source: parent_id.to_string(),
        target: child_id.to_string(),
        kind: EdgeKind::Parent,
        connector: Connector::SmoothStep,
        source_handle: Handle::ParentSource,
        target_handle: Handle::ChildTarget,
        animated: false,
        style: EdgeStyle {
            stroke: theme.parent_stroke.clone(),
            stroke_width: theme.stroke_width,
            stroke_dasharray: None,
        },
        marker_end: Some(Marker {
            marker_type: MarkerType::Arrow,
            color: theme.parent_stroke.clone(),
        }),
    }
}

pub(crate) fn married_edge(
    one_id: &str,
    two_id: &str,
    connector: Connector,
    theme: &Theme,
) -> DrawableEdge {
    DrawableEdge {
        id: format!("married-{one_id}-{two_id}"),
        source: one_id.to_string(),
        target: two_id.to_string(),
        kind: EdgeKind::Married,
        connector,
        source_handle: Handle::MarriedLeft,
        target_handle: Handle::MarriedRight,
        animated: true,
        style: EdgeStyle {
            stroke: theme.married_stroke.clone(),
            stroke_width: theme.stroke_width,
            stroke_dasharray: Some(theme.married_dasharray.clone()),
        },
        marker_end: None,
    }
}

fn unordered_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Parent edges first, then married edges, each in person input order.
/// Married edges are kept once per unordered pair; edges touching an unknown
/// person are dropped.
pub(super) fn derive_edges(
    persons: &[Person],
    index: &HashMap<&str, &Person>,
    married_connector: Connector,
    theme: &Theme,
) -> Vec<DrawableEdge> {
    let known = |rel_source: &str, rel_target: &str| {
        let ok = index.contains_key(rel_source) && index.contains_key(rel_target);
        if !ok {
            warn!(
                source = rel_source,
                target = rel_target,
                "skipping relationship with unknown person"
            );
        }
        ok
    };

    let mut edges = Vec::new();
    for person in persons {
        for rel in person.outgoing(RelationshipKind::Parent) {
            if known(&rel.person_one_id, &rel.person_two_id) {
                edges.push(parent_edge(&rel.person_one_id, &rel.person_two_id, theme));
            }
        }
    }

    let mut seen_pairs: HashSet<(&str, &str)> = HashSet::new();
    for person in persons {
        for rel in person.outgoing(RelationshipKind::Married) {
            if !known(&rel.person_one_id, &rel.person_two_id) {
                continue;
            }
            if !seen_pairs.insert(unordered_pair(&rel.person_one_id, &rel.person_two_id)) {
                continue;
            }
            edges.push(married_edge(
                &rel.person_one_id,
                &rel.person_two_id,
                married_connector,
                theme,
            ));
        }
    }

    edges
}
