//! Semantics of drawing and deleting connections on the editable diagram.
//!
//! Connections made on the canvas are not persisted immediately: they are
//! queued as pending relationships and flushed when the layout is saved.

use serde::{Deserialize, Serialize};

use crate::ir::{Relationship, RelationshipKind};
use crate::layout::{Connector, DrawableEdge, Handle, married_edge, parent_edge};
use crate::theme::Theme;

/// A connection the user dragged between two node handles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub target_handle: Option<String>,
}

/// An edge as the canvas reports it, which may predate any derived layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub target_handle: Option<String>,
}

impl From<&DrawableEdge> for CanvasEdge {
    fn from(edge: &DrawableEdge) -> Self {
        Self {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
            source_handle: Some(edge.source_handle.as_str().to_string()),
            target_handle: Some(edge.target_handle.as_str().to_string()),
        }
    }
}

impl CanvasEdge {
    fn joins(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRelationship {
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    pub person_one_id: String,
    pub person_two_id: String,
}

impl PendingRelationship {
    pub fn into_relationship(self) -> Relationship {
        Relationship::new(self.kind, self.person_one_id, self.person_two_id)
    }
}

/// Outcome of an accepted connection: the relationship to persist and the
/// provisional edge to draw until the next layout derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposedConnection {
    pub relationship: PendingRelationship,
    pub edge: DrawableEdge,
}

pub fn classify_connection(
    conn: &Connection,
    existing: &[CanvasEdge],
    theme: &Theme,
) -> Option<ProposedConnection> {
    if conn.source == conn.target {
        return None;
    }

    let source_handle = conn.source_handle.as_deref().and_then(Handle::from_id)?;
    let target_handle = conn.target_handle.as_deref().and_then(Handle::from_id)?;

    match (source_handle, target_handle) {
        (Handle::MarriedLeft, Handle::MarriedRight) | (Handle::MarriedRight, Handle::MarriedLeft) => {
            if existing
                .iter()
                .any(|edge| edge.joins(&conn.source, &conn.target))
            {
                return None;
            }
            let mut edge = married_edge(&conn.source, &conn.target, Connector::Straight, theme);
            edge.source_handle = source_handle;
            edge.target_handle = target_handle;
            Some(ProposedConnection {
                relationship: PendingRelationship {
                    kind: RelationshipKind::Married,
                    person_one_id: conn.source.clone(),
                    person_two_id: conn.target.clone(),
                },
                edge,
            })
        }
        (Handle::ParentSource, Handle::ChildTarget) => {
            Some(parent_connection(&conn.source, &conn.target, theme))
        }
        (Handle::ChildTarget, Handle::ParentSource) => {
            Some(parent_connection(&conn.target, &conn.source, theme))
        }
        _ => None,
    }
}

fn parent_connection(parent_id: &str, child_id: &str, theme: &Theme) -> ProposedConnection {
    ProposedConnection {
        relationship: PendingRelationship {
            kind: RelationshipKind::Parent,
            person_one_id: parent_id.to_string(),
            person_two_id: child_id.to_string(),
        },
        edge: parent_edge(parent_id, child_id, theme),
    }
}

pub fn detect_relationship_kind(edge: &CanvasEdge) -> RelationshipKind {
    let mentions_married =
        |handle: &Option<String>| handle.as_deref().is_some_and(|h| h.contains("married"));
    if mentions_married(&edge.source_handle)
        || mentions_married(&edge.target_handle)
        || edge.id.starts_with("married")
    {
        RelationshipKind::Married
    } else {
        RelationshipKind::Parent
    }
}

/// Relationships drawn since the last save, in the order they were made.
#[derive(Debug, Clone, Default)]
pub struct PendingRelationships {
    entries: Vec<PendingRelationship>,
}

impl PendingRelationships {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, relationship: PendingRelationship) {
        self.entries.push(relationship);
    }

    /// Forgets every pending entry the deleted edge stood for. Returns how
    /// many were dropped.
    pub fn remove_for_edge(&mut self, edge: &CanvasEdge) -> usize {
        let kind = detect_relationship_kind(edge);
        let before = self.entries.len();
        self.entries.retain(|rel| {
            !(rel.kind == kind && edge.joins(&rel.person_one_id, &rel.person_two_id))
        });
        before - self.entries.len()
    }

    pub fn drain(&mut self) -> Vec<PendingRelationship> {
        std::mem::take(&mut self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
