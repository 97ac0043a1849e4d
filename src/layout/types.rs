use serde::{Deserialize, Serialize};

use crate::ir::Person;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Person,
}

/// Affordances the caller may bind handlers to on a person node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeActions {
    pub edit: bool,
    pub add_child: bool,
    pub view_profile: bool,
    pub delete: bool,
}

impl NodeActions {
    pub const EDITABLE: Self = Self {
        edit: true,
        add_child: true,
        view_profile: true,
        delete: true,
    };

    pub const READ_ONLY: Self = Self {
        edit: false,
        add_child: false,
        view_profile: true,
        delete: false,
    };
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData<'a> {
    pub person: &'a Person,
    pub read_only: bool,
    pub actions: NodeActions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonNode<'a> {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub position: Position,
    pub data: NodeData<'a>,
    pub draggable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<usize>,
}

impl<'a> PersonNode<'a> {
    pub(crate) fn editable(person: &'a Person, position: Position, generation: usize) -> Self {
        Self {
            id: person.id.clone(),
            node_type: NodeType::Person,
            position,
            data: NodeData {
                person,
                read_only: false,
                actions: NodeActions::EDITABLE,
            },
            draggable: true,
            generation: Some(generation),
        }
    }

    pub(crate) fn read_only(
        person: &'a Person,
        position: Position,
        generation: Option<usize>,
    ) -> Self {
        Self {
            id: person.id.clone(),
            node_type: NodeType::Person,
            position,
            data: NodeData {
                person,
                read_only: true,
                actions: NodeActions::READ_ONLY,
            },
            draggable: false,
            generation,
        }
    }

    pub fn person(&self) -> &'a Person {
        self.data.person
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Parent,
    Married,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Connector {
    /// Orthogonal stepped connector.
    SmoothStep,
    Straight,
}

/// Connection points on a person node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handle {
    ParentSource,
    ChildTarget,
    MarriedLeft,
    MarriedRight,
}

impl Handle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParentSource => "parent-source",
            Self::ChildTarget => "child-target",
            Self::MarriedLeft => "married-left",
            Self::MarriedRight => "married-right",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "parent-source" => Some(Self::ParentSource),
            "child-target" => Some(Self::ChildTarget),
            "married-left" => Some(Self::MarriedLeft),
            "married-right" => Some(Self::MarriedRight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub stroke: String,
    pub stroke_width: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerType {
    Arrow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    #[serde(rename = "type")]
    pub marker_type: MarkerType,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawableEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    #[serde(rename = "type")]
    pub connector: Connector,
    pub source_handle: Handle,
    pub target_handle: Handle,
    pub animated: bool,
    pub style: EdgeStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_end: Option<Marker>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TreeLayout<'a> {
    pub nodes: Vec<PersonNode<'a>>,
    pub edges: Vec<DrawableEdge>,
}

impl<'a> TreeLayout<'a> {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&PersonNode<'a>> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&DrawableEdge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &DrawableEdge> {
        self.edges.iter().filter(move |edge| edge.kind == kind)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
