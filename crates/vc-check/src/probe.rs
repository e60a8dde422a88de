use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vc_core::errors::ContractError;
use vc_core::{Contract, SampleSet};

/// Sizes a hash-keyed and an ordered container would reach after inserting every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Number of candidates inserted.
    pub inserted: usize,
    /// Distinct elements retained when deduplicating by hash then equality.
    pub hashed_len: usize,
    /// Distinct elements retained when deduplicating by order equivalence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered_len: Option<usize>,
}

impl ProbeReport {
    /// Returns whether the two container kinds would disagree on the element count.
    pub fn diverges(&self) -> bool {
        self.ordered_len
            .is_some_and(|ordered_len| ordered_len != self.hashed_len)
    }
}

/// Inserts every candidate into a simulated hash set and, when the contract is
/// ordered, a simulated ordered set.
///
/// The hash set looks up the bucket of the new element and keeps it unless
/// `eq(new, existing)` holds for some element of that bucket. The ordered set
/// binary-searches with the order function and keeps the element unless the
/// search lands on an order-equivalent one.
pub fn probe_collections<T>(
    contract: &Contract<T>,
    samples: &SampleSet<T>,
) -> Result<ProbeReport, ContractError> {
    let values: Vec<&T> = samples.values().map(|entry| entry.value).collect();
    if values.is_empty() {
        return Err(ContractError::empty_sample_set(contract.name()));
    }

    let mut buckets: BTreeMap<u64, Vec<&T>> = BTreeMap::new();
    let mut hashed_len = 0;
    for &value in &values {
        let bucket = buckets.entry(contract.hash_of(value)).or_default();
        if !bucket
            .iter()
            .any(|existing| contract.equals_value(value, existing))
        {
            bucket.push(value);
            hashed_len += 1;
        }
    }

    let ordered_len = if contract.is_ordered() {
        let mut sorted: Vec<&T> = Vec::new();
        for &value in &values {
            let search = sorted.binary_search_by(|probe| {
                contract
                    .compare(probe, value)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            if let Err(position) = search {
                sorted.insert(position, value);
            }
        }
        Some(sorted.len())
    } else {
        None
    };

    let report = ProbeReport {
        inserted: values.len(),
        hashed_len,
        ordered_len,
    };
    debug!(
        contract = contract.name(),
        inserted = report.inserted,
        hashed_len = report.hashed_len,
        ordered_len = ?report.ordered_len,
        "collection probe complete"
    );
    Ok(report)
}
