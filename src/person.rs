use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ir::{Gender, Person};

/// Parses a calendar date or an RFC 3339 timestamp (taken in UTC).
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc).date_naive());
    }
    Err(Error::InvalidDate {
        value: trimmed.to_string(),
    })
}

pub(crate) mod date_serde {
    use chrono::NaiveDate;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => super::parse_date(value).map(Some).map_err(D::Error::custom),
        }
    }
}

/// Raw values submitted from the add/edit person form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonForm {
    #[serde(default)]
    pub first_name: String,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub gender: Option<String>,
    pub notes: Option<String>,
    pub photo_path: Option<String>,
}

/// Validated person attributes ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonFields {
    pub first_name: String,
    pub last_name: Option<String>,
    #[serde(with = "date_serde")]
    pub birth_date: Option<NaiveDate>,
    #[serde(with = "date_serde")]
    pub death_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub biography: Option<String>,
    pub photo_path: Option<String>,
}

impl PersonForm {
    pub fn normalize(&self) -> Result<PersonFields> {
        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            return Err(Error::MissingFirstName);
        }
        Ok(PersonFields {
            first_name: first_name.to_string(),
            last_name: non_empty(self.last_name.as_deref()),
            birth_date: optional_date(self.birth_date.as_deref())?,
            death_date: optional_date(self.death_date.as_deref())?,
            gender: self.gender.as_deref().and_then(Gender::from_token),
            biography: non_empty(self.notes.as_deref()),
            photo_path: non_empty(self.photo_path.as_deref()),
        })
    }
}

impl PersonFields {
    pub fn apply_to(self, person: &mut Person) {
        person.first_name = self.first_name;
        person.last_name = self.last_name;
        person.birth_date = self.birth_date;
        person.death_date = self.death_date;
        person.gender = self.gender;
        person.biography = self.biography;
        person.photo_path = self.photo_path;
    }

    pub fn into_person(self, id: impl Into<String>) -> Person {
        let mut person = Person::new(id, String::new());
        self.apply_to(&mut person);
        person
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn optional_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_date(v).map(Some),
    }
}

/// Whole years lived up to the death date, or up to `today` when alive.
pub fn calculate_age(
    birth: Option<NaiveDate>,
    death: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<i32> {
    let birth = birth?;
    let end = death.unwrap_or(today);
    let mut age = end.year() - birth.year();
    if (end.month(), end.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    Some(age)
}

pub fn format_date_range(birth: Option<NaiveDate>, death: Option<NaiveDate>) -> String {
    let birth_year = birth
        .map(|d| d.year().to_string())
        .unwrap_or_else(|| "?".to_string());
    let death_year = match (death, birth) {
        (Some(d), _) => d.year().to_string(),
        (None, Some(_)) => "present".to_string(),
        (None, None) => "?".to_string(),
    };
    format!("{birth_year} - {death_year}")
}

impl Person {
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref().map(str::trim) {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }

    pub fn lifespan(&self) -> String {
        format_date_range(self.birth_date, self.death_date)
    }
}
