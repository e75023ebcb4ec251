//! Student roster record.
//!
//! # Responsibility
//! - Define the persisted student shape.
//! - Convert raw form input into a validated student.
//!
//! # Invariants
//! - `name` is never blank for students built from a draft.
//! - `email` is either empty or shaped like `local@domain.tld`.
//! - Stored blobs may use `phoneNumber` and numeric strings for `age`/`grade`;
//!   both decode, but snapshots are always written in the canonical shape.

use crate::model::form::{optional_email, required_text, required_u32, FormError};
use crate::model::record::{Keyed, RecordId};
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

/// One student in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: RecordId,
    pub name: String,
    #[serde(deserialize_with = "u32_or_numeric_text")]
    pub age: u32,
    #[serde(deserialize_with = "u32_or_numeric_text")]
    pub grade: u32,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "phoneNumber")]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
}

impl Student {
    /// Creates a student with only the required fields set.
    pub fn new(id: RecordId, name: impl Into<String>, age: u32, grade: u32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            grade,
            email: String::new(),
            phone_number: String::new(),
            address: String::new(),
        }
    }

    /// One-line list row text, e.g. `Ana (20) - Grade 90`.
    pub fn summary(&self) -> String {
        format!("{} ({}) - Grade {}", self.name, self.age, self.grade)
    }
}

fn u32_or_numeric_text<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(u32),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text.trim().parse().map_err(|_| {
            de::Error::invalid_value(Unexpected::Str(&text), &"a non-negative integer")
        }),
    }
}

impl Keyed for Student {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Raw creation-form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub age: String,
    pub grade: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
}

impl StudentDraft {
    /// Validates the draft and assigns `id`.
    ///
    /// # Errors
    /// - `MissingField` when name, age or grade is blank.
    /// - `InvalidNumber` when age or grade is not an unsigned integer.
    /// - `InvalidEmail` when a non-blank email is malformed.
    pub fn into_student(&self, id: RecordId) -> Result<Student, FormError> {
        let name = required_text("name", &self.name)?;
        let age = required_u32("age", &self.age)?;
        let grade = required_u32("grade", &self.grade)?;
        let email = optional_email(&self.email)?;

        Ok(Student {
            id,
            name,
            age,
            grade,
            email,
            phone_number: self.phone_number.trim().to_string(),
            address: self.address.trim().to_string(),
        })
    }
}
