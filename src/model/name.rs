use serde::{Deserialize, Serialize};

use super::validation::normalize_name;

/// Whose name a set of name fields belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Person {
    Child,
    Father,
    Mother,
    Applicant,
}

static ALL_PEOPLE: &[Person] = &[
    Person::Child,
    Person::Father,
    Person::Mother,
    Person::Applicant,
];

impl Person {
    /// Returns every person named on the application, in form order.
    pub fn all() -> &'static [Person] {
        ALL_PEOPLE
    }

    /// Heading shown above this person's name fields.
    pub const fn heading(self) -> &'static str {
        match self {
            Person::Child => "Child's Name",
            Person::Father => "Father's Name",
            Person::Mother => "Mother's Name",
            Person::Applicant => "Applicant's Name",
        }
    }
}

/// One of the three parts of a [`PersonName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamePart {
    First,
    Middle,
    Last,
}

static ALL_PARTS: &[NamePart] = &[NamePart::First, NamePart::Middle, NamePart::Last];

impl NamePart {
    /// Returns the three parts in form order.
    pub fn all() -> &'static [NamePart] {
        ALL_PARTS
    }

    /// Field label, e.g. `"First Name"`.
    pub fn label(self) -> &'static str {
        match self {
            NamePart::First => "First Name",
            NamePart::Middle => "Middle Name",
            NamePart::Last => "Last Name",
        }
    }

    /// Subject used in the "is required" message, e.g. `"First name"`.
    pub fn required_label(self) -> &'static str {
        match self {
            NamePart::First => "First name",
            NamePart::Middle => "Middle name",
            NamePart::Last => "Last name",
        }
    }
}

/// A validated three-part name. Every part is `^[A-Z][a-z]*$`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
}

/// Name parts as typed, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameInput {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
}

impl NameInput {
    /// Returns the given part.
    pub fn part(&self, part: NamePart) -> &str {
        match part {
            NamePart::First => &self.first_name,
            NamePart::Middle => &self.middle_name,
            NamePart::Last => &self.last_name,
        }
    }

    /// Stores `value` in the given part, normalizing its capitalization.
    pub fn set_part(&mut self, part: NamePart, value: &str) {
        let slot = match part {
            NamePart::First => &mut self.first_name,
            NamePart::Middle => &mut self.middle_name,
            NamePart::Last => &mut self.last_name,
        };
        *slot = normalize_name(value);
    }
}
