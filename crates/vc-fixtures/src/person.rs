//! Records whose hash functions disagree with their equality.

use vc_core::{stable_hash, Contract, HashBuilder, Operand};

/// Identified person.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    id: u32,
    name: String,
}

impl Person {
    /// Creates a person.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Identifier.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn same_fields(lhs: &Person, rhs: Operand<'_, Person>) -> bool {
        rhs.value()
            .is_some_and(|rhs| lhs.id == rhs.id && lhs.name == rhs.name)
    }

    /// Equality and hash both cover id and name.
    pub fn contract() -> Contract<Person> {
        Contract::new("person", Person::same_fields, |person: &Person| {
            HashBuilder::new()
                .field(&person.id)
                .field(&person.name)
                .finish()
        })
    }

    /// Field equality with an address-derived hash, as if equality had been
    /// overridden without the hash. Equal but distinct instances hash apart.
    pub fn identity_hash_contract() -> Contract<Person> {
        Contract::new("person-identity-hash", Person::same_fields, |person: &Person| {
            stable_hash(&(person as *const Person as usize))
        })
    }

    /// Hash covers the id only. Legal: it only causes collisions.
    pub fn id_hash_contract() -> Contract<Person> {
        Contract::new("person-id-hash", Person::same_fields, |person: &Person| {
            stable_hash(&person.id)
        })
    }
}
