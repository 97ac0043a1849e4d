use crate::layout::{LayoutVariant, TreeLayout};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub variant: String,
    pub generations: usize,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub name: String,
    pub lifespan: String,
    pub generation: Option<usize>,
    pub x: f64,
    pub y: f64,
    pub draggable: bool,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub id: String,
    pub kind: String,
    pub source: String,
    pub target: String,
}

impl LayoutDump {
    pub fn from_layout(layout: &TreeLayout<'_>, variant: LayoutVariant) -> Self {
        let nodes: Vec<NodeDump> = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                name: node.person().display_name(),
                lifespan: node.person().lifespan(),
                generation: node.generation,
                x: node.position.x,
                y: node.position.y,
                draggable: node.draggable,
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.clone(),
                kind: format!("{:?}", edge.kind),
                source: edge.source.clone(),
                target: edge.target.clone(),
            })
            .collect();

        let generations = nodes
            .iter()
            .filter_map(|node| node.generation)
            .max()
            .map(|deepest| deepest + 1)
            .unwrap_or(0);

        LayoutDump {
            variant: format!("{:?}", variant),
            generations,
            nodes,
            edges,
        }
    }
}

pub fn write_layout_dump(
    path: &Path,
    layout: &TreeLayout<'_>,
    variant: LayoutVariant,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, variant);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
