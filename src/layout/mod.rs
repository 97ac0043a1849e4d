mod edges;
mod placement;
mod ranking;
pub(crate) mod types;
pub use types::*;

pub(crate) use edges::{married_edge, parent_edge};
use edges::derive_edges;
use placement::place_by_generation;
use ranking::{compute_generation_levels, index_persons};

use std::collections::HashSet;

use tracing::debug;

use crate::config::Config;
use crate::ir::Person;
use crate::saved_layout::SavedLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutVariant {
    Editable,
    ReadOnly,
}

/// Layout for the editable diagram with default theme and geometry.
pub fn derive_layout<'a>(persons: &'a [Person], saved: &SavedLayout) -> TreeLayout<'a> {
    derive_layout_with(persons, saved, &Config::default())
}

/// Layout for the shared, read-only diagram with default theme and geometry.
pub fn derive_read_only_layout<'a>(persons: &'a [Person], saved: &SavedLayout) -> TreeLayout<'a> {
    derive_read_only_layout_with(persons, saved, &Config::default())
}

pub fn derive<'a>(
    variant: LayoutVariant,
    persons: &'a [Person],
    saved: &SavedLayout,
    config: &Config,
) -> TreeLayout<'a> {
    match variant {
        LayoutVariant::Editable => derive_layout_with(persons, saved, config),
        LayoutVariant::ReadOnly => derive_read_only_layout_with(persons, saved, config),
    }
}

/// Every person gets a generation-based position unless the saved layout has
/// one for it, in which case the saved position is used as is.
pub fn derive_layout_with<'a>(
    persons: &'a [Person],
    saved: &SavedLayout,
    config: &Config,
) -> TreeLayout<'a> {
    let index = index_persons(persons);
    let levels = compute_generation_levels(persons, &index);
    let saved_positions = saved.positions();

    let nodes: Vec<PersonNode<'a>> = place_by_generation(persons, &levels, &config.layout)
        .into_iter()
        .map(|placement| {
            let position = saved_positions
                .get(placement.person.id.as_str())
                .copied()
                .unwrap_or(placement.position);
            PersonNode::editable(placement.person, position, placement.generation)
        })
        .collect();

    let edges = derive_edges(persons, &index, Connector::SmoothStep, &config.theme);

    debug!(
        persons = persons.len(),
        saved = saved.nodes.len(),
        nodes = nodes.len(),
        edges = edges.len(),
        "derived editable layout"
    );
    TreeLayout { nodes, edges }
}

/// With an empty saved layout, places everyone by generation. Otherwise only
/// persons present in the saved layout are shown, at their saved positions.
pub fn derive_read_only_layout_with<'a>(
    persons: &'a [Person],
    saved: &SavedLayout,
    config: &Config,
) -> TreeLayout<'a> {
    let index = index_persons(persons);

    let nodes: Vec<PersonNode<'a>> = if saved.is_empty() {
        let levels = compute_generation_levels(persons, &index);
        place_by_generation(persons, &levels, &config.layout)
            .into_iter()
            .map(|placement| {
                PersonNode::read_only(placement.person, placement.position, Some(placement.generation))
            })
            .collect()
    } else {
        let mut placed: HashSet<&str> = HashSet::new();
        saved
            .nodes
            .iter()
            .filter_map(|saved_node| {
                let person = index.get(saved_node.id.as_str()).copied()?;
                if !placed.insert(person.id.as_str()) {
                    return None;
                }
                Some(PersonNode::read_only(person, saved_node.position, None))
            })
            .collect()
    };

    let edges = derive_edges(persons, &index, Connector::Straight, &config.theme);

    debug!(
        persons = persons.len(),
        saved = saved.nodes.len(),
        nodes = nodes.len(),
        edges = edges.len(),
        "derived read-only layout"
    );
    TreeLayout { nodes, edges }
}
