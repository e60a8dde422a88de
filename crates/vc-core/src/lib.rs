#![deny(missing_docs)]
#![doc = "Core data model for value-contract checking: candidates, sample sets, contract function bundles and copy modes."]

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

pub mod copy;
pub mod errors;
pub mod hash;
pub mod provenance;
mod sample;

pub use copy::{duplicate, CopyMode, Duplicate};
pub use errors::{ContractError, ErrorInfo};
pub use hash::{stable_hash, HashBuilder};
pub use provenance::SchemaVersion;
pub use sample::{Candidate, CandidateRef, GroupId, SampleEntry, SampleSet};

/// Right-hand operand of an equality function.
///
/// The left operand is always a real value; only the right side may be the
/// reserved null sentinel.
#[derive(Debug)]
pub enum Operand<'a, T> {
    /// A candidate value.
    Value(&'a T),
    /// The null sentinel. Equality against it must be `false`.
    Null,
}

impl<T> Clone for Operand<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Operand<'_, T> {}

impl<'a, T> Operand<'a, T> {
    /// Returns the referenced value, or `None` for the null sentinel.
    pub fn value(self) -> Option<&'a T> {
        match self {
            Operand::Value(value) => Some(value),
            Operand::Null => None,
        }
    }

    /// Returns whether this operand is the null sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Operand::Null)
    }
}

impl<'a, T> From<&'a T> for Operand<'a, T> {
    fn from(value: &'a T) -> Self {
        Operand::Value(value)
    }
}

/// Equality function stored in a [`Contract`].
pub type EqFn<T> = dyn Fn(&T, Operand<'_, T>) -> bool + Send + Sync;
/// Hash function stored in a [`Contract`].
pub type HashFn<T> = dyn Fn(&T) -> u64 + Send + Sync;
/// Order function stored in a [`Contract`].
pub type CmpFn<T> = dyn Fn(&T, &T) -> Ordering + Send + Sync;

/// Bundle of the equality, hash and optional order functions of a value type.
///
/// The functions are opaque to the checker; a contract may deliberately be
/// broken so that the checker has something to report.
pub struct Contract<T> {
    name: String,
    eq: Box<EqFn<T>>,
    hash: Box<HashFn<T>>,
    cmp: Option<Box<CmpFn<T>>>,
}

impl<T> fmt::Debug for Contract<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contract")
            .field("name", &self.name)
            .field("ordered", &self.cmp.is_some())
            .finish_non_exhaustive()
    }
}

impl<T> Contract<T> {
    /// Creates an unordered contract from an equality and a hash function.
    pub fn new<E, H>(name: impl Into<String>, eq: E, hash: H) -> Self
    where
        E: Fn(&T, Operand<'_, T>) -> bool + Send + Sync + 'static,
        H: Fn(&T) -> u64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            eq: Box::new(eq),
            hash: Box::new(hash),
            cmp: None,
        }
    }

    /// Attaches an order function, making the contract usable with ordering rules.
    pub fn with_order<C>(mut self, cmp: C) -> Self
    where
        C: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.cmp = Some(Box::new(cmp));
        self
    }

    /// Returns the contract name used in reports and errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluates the equality function.
    pub fn equals(&self, lhs: &T, rhs: Operand<'_, T>) -> bool {
        (self.eq)(lhs, rhs)
    }

    /// Evaluates the equality function between two values.
    pub fn equals_value(&self, lhs: &T, rhs: &T) -> bool {
        (self.eq)(lhs, Operand::Value(rhs))
    }

    /// Evaluates the hash function.
    pub fn hash_of(&self, value: &T) -> u64 {
        (self.hash)(value)
    }

    /// Evaluates the order function, or returns `None` for unordered contracts.
    pub fn compare(&self, lhs: &T, rhs: &T) -> Option<Ordering> {
        self.cmp.as_ref().map(|cmp| cmp(lhs, rhs))
    }

    /// Returns whether an order function is attached.
    pub fn is_ordered(&self) -> bool {
        self.cmp.is_some()
    }
}

impl<T: PartialEq + Hash + 'static> Contract<T> {
    /// Builds a contract from the type's own `PartialEq` and `Hash` impls.
    pub fn derived(name: impl Into<String>) -> Self {
        Self::new(
            name,
            |lhs: &T, rhs: Operand<'_, T>| rhs.value().is_some_and(|rhs| lhs == rhs),
            |value: &T| stable_hash(value),
        )
    }
}

impl<T: Ord + Hash + 'static> Contract<T> {
    /// Builds a contract from the type's `PartialEq`, `Hash` and `Ord` impls.
    pub fn derived_ordered(name: impl Into<String>) -> Self {
        Self::derived(name).with_order(|lhs: &T, rhs: &T| lhs.cmp(rhs))
    }
}
