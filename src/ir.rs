use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::saved_layout::SavedLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipKind {
    Parent,
    Married,
    /// Any kind the layout does not draw, including legacy values such as
    /// `BIOLOGICAL_PARENT`.
    #[serde(other)]
    Other,
}

impl RelationshipKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "PARENT",
            Self::Married => "MARRIED",
            Self::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "MALE" => Some(Self::Male),
            "FEMALE" => Some(Self::Female),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A typed edge between two persons. For `Parent`, person one is the parent
/// and person two the child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    pub person_one_id: String,
    pub person_two_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_tree_id: Option<String>,
}

impl Relationship {
    pub fn new(
        kind: RelationshipKind,
        person_one_id: impl Into<String>,
        person_two_id: impl Into<String>,
    ) -> Self {
        let person_one_id = person_one_id.into();
        let person_two_id = person_two_id.into();
        Self {
            id: format!(
                "{}-{}-{}",
                kind.as_str().to_ascii_lowercase(),
                person_one_id,
                person_two_id
            ),
            kind,
            person_one_id,
            person_two_id,
            family_tree_id: None,
        }
    }

    pub fn parent(parent_id: impl Into<String>, child_id: impl Into<String>) -> Self {
        Self::new(RelationshipKind::Parent, parent_id, child_id)
    }

    pub fn married(one_id: impl Into<String>, two_id: impl Into<String>) -> Self {
        Self::new(RelationshipKind::Married, one_id, two_id)
    }
}

/// A person record together with the relationship edges it takes part in:
/// `relationships_as_one` where it is person one, `relationships_as_two` where
/// it is person two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(
        default,
        with = "crate::person::date_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<NaiveDate>,
    #[serde(
        default,
        with = "crate::person::date_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub death_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_tree_id: Option<String>,
    #[serde(default)]
    pub relationships_as_one: Vec<Relationship>,
    #[serde(default)]
    pub relationships_as_two: Vec<Relationship>,
}

impl Person {
    pub fn new(id: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: None,
            birth_date: None,
            death_date: None,
            gender: None,
            photo_path: None,
            biography: None,
            created_by_id: None,
            family_tree_id: None,
            relationships_as_one: Vec::new(),
            relationships_as_two: Vec::new(),
        }
    }

    /// Incoming `Parent` edges naming this person as the child.
    pub fn parent_relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships_as_two.iter().filter(move |rel| {
            rel.kind == RelationshipKind::Parent && rel.person_two_id == self.id
        })
    }

    pub fn outgoing(&self, kind: RelationshipKind) -> impl Iterator<Item = &Relationship> {
        self.relationships_as_one
            .iter()
            .filter(move |rel| rel.kind == kind)
    }
}

/// Distributes a flat relationship list onto the persons it joins. Records
/// already present on a person are not added twice.
pub fn attach_relationships(persons: &mut [Person], relationships: &[Relationship]) {
    let mut slots: HashMap<String, usize> = HashMap::new();
    for (idx, person) in persons.iter().enumerate() {
        slots.entry(person.id.clone()).or_insert(idx);
    }

    for rel in relationships {
        if let Some(&idx) = slots.get(&rel.person_one_id) {
            let list = &mut persons[idx].relationships_as_one;
            if !list.contains(rel) {
                list.push(rel.clone());
            }
        }
        if let Some(&idx) = slots.get(&rel.person_two_id) {
            let list = &mut persons[idx].relationships_as_two;
            if !list.contains(rel) {
                list.push(rel.clone());
            }
        }
    }
}

/// A family tree as served for viewing: persons, the tree's flat
/// relationship list and the layout saved with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default, alias = "treeLayout", skip_serializing_if = "Option::is_none")]
    pub layout: Option<SavedLayout>,
}

impl TreeDocument {
    pub fn into_persons(self) -> Vec<Person> {
        self.into_parts().0
    }

    pub fn into_parts(self) -> (Vec<Person>, SavedLayout) {
        let mut persons = self.persons;
        attach_relationships(&mut persons, &self.relationships);
        (persons, self.layout.unwrap_or_default())
    }
}
