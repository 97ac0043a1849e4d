use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::layout::{Position, TreeLayout};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedNode {
    pub id: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Node positions the user arranged by hand. Only a source of position
/// hints; edges are kept for round-tripping but never drive topology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedLayout {
    #[serde(default)]
    pub nodes: Vec<SavedNode>,
    #[serde(default)]
    pub edges: Vec<SavedEdge>,
}

impl SavedLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn snapshot(layout: &TreeLayout<'_>) -> Self {
        Self {
            nodes: layout
                .nodes
                .iter()
                .map(|node| SavedNode {
                    id: node.id.clone(),
                    position: node.position,
                })
                .collect(),
            edges: layout
                .edges
                .iter()
                .map(|edge| SavedEdge {
                    id: edge.id.clone(),
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                })
                .collect(),
        }
    }

    pub fn position_of(&self, id: &str) -> Option<Position> {
        self.nodes
            .iter()
            .find(|node| node.id == id)
            .map(|node| node.position)
    }

    /// Position lookup keyed by node id; the first entry wins for repeated ids.
    pub fn positions(&self) -> HashMap<&str, Position> {
        let mut positions = HashMap::with_capacity(self.nodes.len());
        for node in &self.nodes {
            positions.entry(node.id.as_str()).or_insert(node.position);
        }
        positions
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parses JSON, then JSON5; anything unreadable becomes the empty layout.
    pub fn from_json_lenient(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<Self>(raw) {
            Ok(layout) => layout,
            Err(json_err) => match json5::from_str::<Self>(raw) {
                Ok(layout) => layout,
                Err(_) => {
                    warn!(error = %json_err, "ignoring unreadable saved layout");
                    Self::default()
                }
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Reads a saved layout file. Missing or unreadable files yield the empty
/// layout.
pub fn load(path: &Path) -> SavedLayout {
    match std::fs::read_to_string(path) {
        Ok(raw) => SavedLayout::from_json_lenient(&raw),
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %err, "cannot read saved layout");
            }
            SavedLayout::default()
        }
    }
}

pub fn store(path: &Path, layout: &SavedLayout) -> Result<()> {
    let json = layout.to_json()?;
    std::fs::write(path, json).map_err(|err| Error::io(path, err))
}
