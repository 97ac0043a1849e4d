use std::collections::{BTreeMap, HashMap};

use crate::config::LayoutConfig;
use crate::ir::Person;

use super::Position;

pub(super) struct Placement<'a> {
    pub person: &'a Person,
    pub generation: usize,
    pub position: Position,
}

/// Groups persons by level, ascending, keeping input order inside a level.
pub(super) fn group_generations<'a>(
    persons: &'a [Person],
    levels: &HashMap<&str, usize>,
) -> BTreeMap<usize, Vec<&'a Person>> {
    let mut generations: BTreeMap<usize, Vec<&'a Person>> = BTreeMap::new();
    for person in persons {
        let level = levels.get(person.id.as_str()).copied().unwrap_or(0);
        generations.entry(level).or_default().push(person);
    }
    generations
}

/// Centred row for each generation.
pub(super) fn default_position(
    index: usize,
    generation_size: usize,
    level: usize,
    config: &LayoutConfig,
) -> Position {
    let x = (index as f64 - generation_size as f64 / 2.0) * config.node_pitch
        + config.node_offset_x;
    let y = level as f64 * config.row_pitch;
    Position::new(x, y)
}

pub(super) fn place_by_generation<'a>(
    persons: &'a [Person],
    levels: &HashMap<&str, usize>,
    config: &LayoutConfig,
) -> Vec<Placement<'a>> {
    let mut placements = Vec::with_capacity(persons.len());
    for (level, people) in group_generations(persons, levels) {
        let size = people.len();
        for (idx, person) in people.into_iter().enumerate() {
            placements.push(Placement {
                person,
                generation: level,
                position: default_position(idx, size, level, config),
            });
        }
    }
    placements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_centred_on_the_offset() {
        let config = LayoutConfig::default();
        assert_eq!(default_position(0, 1, 0, &config), Position::new(0.0, 0.0));
        assert_eq!(default_position(0, 2, 1, &config), Position::new(-100.0, 150.0));
        assert_eq!(default_position(1, 2, 1, &config), Position::new(100.0, 150.0));
        assert_eq!(default_position(0, 3, 2, &config), Position::new(-200.0, 300.0));
        assert_eq!(default_position(2, 3, 2, &config), Position::new(200.0, 300.0));
    }

    #[test]
    fn generations_keep_input_order() {
        let persons = vec![
            Person::new("child", "C"),
            Person::new("b", "B"),
            Person::new("a", "A"),
        ];
        let levels: HashMap<&str, usize> = [("child", 1), ("b", 0), ("a", 0)].into_iter().collect();
        let placements = place_by_generation(&persons, &levels, &LayoutConfig::default());
        let order: Vec<(&str, usize)> = placements
            .iter()
            .map(|p| (p.person.id.as_str(), p.generation))
            .collect();
        assert_eq!(order, vec![("b", 0), ("a", 0), ("child", 1)]);
        assert_eq!(placements[2].position, Position::new(0.0, 150.0));
    }
}
