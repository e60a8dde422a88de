//! Shared, mutable student records for shallow and deep copy demonstrations.

use std::cell::RefCell;
use std::rc::Rc;

use vc_core::{stable_hash, Contract, CopyMode, Duplicate, HashBuilder, Operand};

/// Mutable student record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Enrollee {
    /// Student number.
    pub id: u32,
    /// Display name.
    pub name: String,
}

impl Enrollee {
    /// Creates a record.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Duplicate for Enrollee {
    fn duplicate(&self, mode: CopyMode) -> Self {
        Self {
            id: self.id.duplicate(mode),
            name: self.name.duplicate(mode),
        }
    }
}

/// Shared handle to a mutable record. Shallow duplicates alias the record.
#[derive(Debug, Clone)]
pub struct Handle(Rc<RefCell<Enrollee>>);

impl Handle {
    /// Wraps a record in a fresh shared cell.
    pub fn new(enrollee: Enrollee) -> Self {
        Self(Rc::new(RefCell::new(enrollee)))
    }

    /// Replaces the record's name through the shared cell.
    pub fn rename(&self, name: impl Into<String>) {
        self.0.borrow_mut().name = name.into();
    }

    /// Snapshot of the current record.
    pub fn snapshot(&self) -> Enrollee {
        self.0.borrow().clone()
    }

    /// Returns whether both handles point at the same record.
    pub fn aliases(&self, other: &Handle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Equality and hash of the referenced record's contents.
    pub fn value_contract() -> Contract<Handle> {
        Contract::new(
            "handle-value",
            |lhs: &Handle, rhs: Operand<'_, Handle>| {
                rhs.value()
                    .is_some_and(|rhs| *lhs.0.borrow() == *rhs.0.borrow())
            },
            |handle: &Handle| {
                let record = handle.0.borrow();
                HashBuilder::new().field(&record.id).field(&record.name).finish()
            },
        )
    }

    /// Equality and hash of the allocation, as if equality were never overridden.
    pub fn identity_contract() -> Contract<Handle> {
        Contract::new(
            "handle-identity",
            |lhs: &Handle, rhs: Operand<'_, Handle>| {
                rhs.value().is_some_and(|rhs| lhs.aliases(rhs))
            },
            |handle: &Handle| stable_hash(&(Rc::as_ptr(&handle.0) as usize)),
        )
    }
}

impl Duplicate for Handle {
    fn duplicate(&self, mode: CopyMode) -> Self {
        Self(self.0.duplicate(mode))
    }
}

/// Ordered list of shared records.
pub type Roster = Vec<Handle>;
