use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::{condensation, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{trace, warn};

use crate::ir::Person;

/// Person lookup by id. The first record wins when ids repeat.
pub(super) fn index_persons(persons: &[Person]) -> HashMap<&str, &Person> {
    let mut index = HashMap::with_capacity(persons.len());
    for person in persons {
        index.entry(person.id.as_str()).or_insert(person);
    }
    index
}

/// Generation level of every person: 0 without known parents, otherwise one
/// more than the deepest parent.
///
/// Parent cycles are collapsed into a single component first, so every member
/// of a cycle shares one level: 0 when nothing outside the cycle is its
/// parent, otherwise one more than the deepest such parent. Levels are then
/// the longest path over the resulting DAG, which keeps the work linear in
/// persons and relationships whatever the data looks like.
pub(super) fn compute_generation_levels<'a>(
    persons: &'a [Person],
    index: &HashMap<&'a str, &'a Person>,
) -> HashMap<&'a str, usize> {
    let mut graph: DiGraph<&'a str, ()> = DiGraph::with_capacity(index.len(), persons.len());
    let mut nodes: HashMap<&'a str, NodeIndex> = HashMap::with_capacity(index.len());
    for person in persons {
        let id = person.id.as_str();
        nodes.entry(id).or_insert_with(|| graph.add_node(id));
    }

    for person in persons {
        let id = person.id.as_str();
        // Repeated ids take their parents from the first record only.
        if !index.get(id).is_some_and(|first| std::ptr::eq(*first, person)) {
            continue;
        }
        let child = nodes[id];
        for rel in person.parent_relationships() {
            // Unknown parents do not push the child down.
            if let Some(&parent) = nodes.get(rel.person_one_id.as_str()) {
                graph.add_edge(parent, child, ());
            }
        }
    }

    let components = condensation(graph, true);
    let order = match toposort(&components, None) {
        Ok(order) => order,
        Err(cycle) => {
            warn!(component = ?cycle.node_id(), "parent graph still cyclic after condensation");
            components.node_indices().collect()
        }
    };

    let mut component_levels = vec![0usize; components.node_count()];
    for component in order {
        component_levels[component.index()] = components
            .neighbors_directed(component, Direction::Incoming)
            .map(|parent| component_levels[parent.index()] + 1)
            .max()
            .unwrap_or(0);
    }

    let mut levels = HashMap::with_capacity(nodes.len());
    for component in components.node_indices() {
        let members = &components[component];
        if members.len() > 1 {
            trace!(?members, "parent cycle collapsed");
        }
        for &id in members {
            levels.insert(id, component_levels[component.index()]);
        }
    }
    levels
}
