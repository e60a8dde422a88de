//! Equality through a canonical representation.

use vc_core::{stable_hash, Contract, Operand};

/// Student whose identity is the trimmed, lowercased name.
#[derive(Debug, Clone)]
pub struct Student {
    name: String,
    age: u8,
}

impl Student {
    /// Creates a student.
    pub fn new(name: impl Into<String>, age: u8) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    /// Name as given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age in years. Not part of equality.
    pub fn age(&self) -> u8 {
        self.age
    }

    /// Trimmed and lowercased name.
    pub fn canonical_name(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Equality and hash over the canonical name.
    pub fn contract() -> Contract<Student> {
        Contract::new(
            "student",
            |lhs: &Student, rhs: Operand<'_, Student>| {
                rhs.value()
                    .is_some_and(|rhs| lhs.canonical_name() == rhs.canonical_name())
            },
            |student: &Student| stable_hash(&student.canonical_name()),
        )
    }

    /// Equality over the canonical name, hash over the raw name.
    pub fn raw_hash_contract() -> Contract<Student> {
        Contract::new(
            "student-raw-hash",
            |lhs: &Student, rhs: Operand<'_, Student>| {
                rhs.value()
                    .is_some_and(|rhs| lhs.canonical_name() == rhs.canonical_name())
            },
            |student: &Student| stable_hash(&student.name),
        )
    }
}
