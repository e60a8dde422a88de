use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Identifier for an equivalence group within a [`SampleSet`].
///
/// Candidates sharing a group are expected to be mutually equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(u32);

impl GroupId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u32 {
        self.0
    }
}

/// One entry of a sample set: either a candidate value or an explicit null.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate<T> {
    /// A candidate value belonging to an equivalence group.
    Value {
        /// The instance under test.
        value: T,
        /// Equivalence group the instance is expected to belong to.
        group: GroupId,
        /// Rendering used when the instance is named in a report.
        label: String,
    },
    /// Explicitly marked null sentinel.
    Null,
}

/// Serializable reference to a candidate, used by reports.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateRef {
    /// Position of the candidate within its sample set.
    pub index: usize,
    /// Equivalence group the candidate was declared in.
    pub group: GroupId,
    /// Rendering of the candidate.
    pub label: String,
}

/// Borrowed view of a non-null candidate.
#[derive(Debug)]
pub struct SampleEntry<'a, T> {
    /// Position of the candidate within its sample set.
    pub index: usize,
    /// The instance under test.
    pub value: &'a T,
    /// Declared equivalence group.
    pub group: GroupId,
    /// Rendering of the candidate.
    pub label: &'a str,
}

impl<T> Clone for SampleEntry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SampleEntry<'_, T> {}

impl<T> SampleEntry<'_, T> {
    /// Converts the view into an owned reference for reports.
    pub fn to_ref(&self) -> CandidateRef {
        CandidateRef {
            index: self.index,
            group: self.group,
            label: self.label.to_string(),
        }
    }
}

/// Ordered sequence of candidates supplied to a contract check.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet<T> {
    candidates: Vec<Candidate<T>>,
}

impl<T> Default for SampleSet<T> {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }
}

impl<T> SampleSet<T> {
    /// Creates an empty sample set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a candidate with an explicit label.
    pub fn push_labeled(&mut self, value: T, group: GroupId, label: impl Into<String>) -> usize {
        self.candidates.push(Candidate::Value {
            value,
            group,
            label: label.into(),
        });
        self.candidates.len() - 1
    }

    /// Appends an explicit null sentinel.
    pub fn push_null(&mut self) -> usize {
        self.candidates.push(Candidate::Null);
        self.candidates.len() - 1
    }

    /// Returns all entries, nulls included, in insertion order.
    pub fn candidates(&self) -> &[Candidate<T>] {
        &self.candidates
    }

    /// Iterates over the non-null candidates in insertion order.
    pub fn values(&self) -> impl Iterator<Item = SampleEntry<'_, T>> + '_ {
        self.candidates
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| match candidate {
                Candidate::Value {
                    value,
                    group,
                    label,
                } => Some(SampleEntry {
                    index,
                    value,
                    group: *group,
                    label: label.as_str(),
                }),
                Candidate::Null => None,
            })
    }

    /// Returns the number of entries, nulls included.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns whether the set has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns the number of non-null candidates.
    pub fn value_count(&self) -> usize {
        self.values().count()
    }

    /// Returns the number of explicit null sentinels.
    pub fn null_count(&self) -> usize {
        self.candidates
            .iter()
            .filter(|candidate| matches!(candidate, Candidate::Null))
            .count()
    }
}

impl<T: Debug> SampleSet<T> {
    /// Appends a candidate labelled with its `Debug` rendering.
    pub fn push(&mut self, value: T, group: GroupId) -> usize {
        let label = format!("{value:?}");
        self.push_labeled(value, group, label)
    }

    /// Builder form of [`SampleSet::push`].
    pub fn with(mut self, value: T, group: u32) -> Self {
        self.push(value, GroupId::from_raw(group));
        self
    }

    /// Builder form of [`SampleSet::push_null`].
    pub fn with_null(mut self) -> Self {
        self.push_null();
        self
    }
}

impl<T: Debug> FromIterator<(T, GroupId)> for SampleSet<T> {
    fn from_iter<I: IntoIterator<Item = (T, GroupId)>>(iter: I) -> Self {
        let mut set = SampleSet::new();
        for (value, group) in iter {
            set.push(value, group);
        }
        set
    }
}
