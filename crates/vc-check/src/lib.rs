#![deny(missing_docs)]
#![doc = "Checks that a value type's equality, hash and ordering functions honour their contracts, and reports every break in one pass."]

/// Rule passes and aggregate runs.
pub mod checker;
/// Hash-set versus ordered-set size probe.
pub mod probe;
/// Policy definitions controlling finding classification.
pub mod policies;
/// Findings, rules and aggregated reports.
pub mod report;
/// Canonical JSON and YAML helpers.
pub mod serde;

pub use checker::ContractChecker;
pub use policies::CheckPolicy;
pub use probe::{probe_collections, ProbeReport};
pub use report::{
    CollisionPair, CollisionSummary, ContractReport, Finding, FindingKind, ReportProvenance, Rule,
    Severity, Sign, REPORT_SCHEMA,
};

use vc_core::errors::ContractError;
use vc_core::{Contract, SampleSet};

/// Checks `samples` against `contract` with the default policy.
pub fn check_contract<T>(
    contract: &Contract<T>,
    samples: &SampleSet<T>,
) -> Result<ContractReport, ContractError> {
    ContractChecker::new(contract).run(samples)
}
