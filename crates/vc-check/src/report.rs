use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use vc_core::errors::{ContractError, ErrorInfo};
use vc_core::{CandidateRef, CopyMode, SchemaVersion};

use crate::policies::CheckPolicy;
use crate::serde::{from_json_slice, to_canonical_json_bytes};

/// Schema version written into every [`ContractReport`].
pub const REPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Contract rules evaluated by the checker, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// `eq(x, x)` holds.
    Reflexivity,
    /// `eq(x, y) == eq(y, x)`.
    Symmetry,
    /// `eq(x, y) && eq(y, z)` implies `eq(x, z)`.
    Transitivity,
    /// `eq(x, null)` is false.
    NullHandling,
    /// Repeated `hash(x)` and `eq(x, y)` calls agree.
    Consistency,
    /// Equal values hash equally.
    HashConsistency,
    /// Declared equivalence groups agree with the equality function.
    GroupAgreement,
    /// The order function is a strict weak ordering consistent with equality.
    OrderConsistency,
    /// Duplicates equal and hash like their originals.
    Duplicates,
}

impl Rule {
    /// All rules in execution order.
    pub const ALL: [Rule; 9] = [
        Rule::Reflexivity,
        Rule::Symmetry,
        Rule::Transitivity,
        Rule::NullHandling,
        Rule::Consistency,
        Rule::HashConsistency,
        Rule::GroupAgreement,
        Rule::OrderConsistency,
        Rule::Duplicates,
    ];

    /// Stable snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Reflexivity => "reflexivity",
            Rule::Symmetry => "symmetry",
            Rule::Transitivity => "transitivity",
            Rule::NullHandling => "null_handling",
            Rule::Consistency => "consistency",
            Rule::HashConsistency => "hash_consistency",
            Rule::GroupAgreement => "group_agreement",
            Rule::OrderConsistency => "order_consistency",
            Rule::Duplicates => "duplicates",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an order function, serialized as `-1`, `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Sign {
    /// `lhs < rhs`.
    Less,
    /// `lhs` and `rhs` are order-equivalent.
    Equal,
    /// `lhs > rhs`.
    Greater,
}

impl From<Ordering> for Sign {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Sign::Less,
            Ordering::Equal => Sign::Equal,
            Ordering::Greater => Sign::Greater,
        }
    }
}

impl From<Sign> for i8 {
    fn from(sign: Sign) -> Self {
        match sign {
            Sign::Less => -1,
            Sign::Equal => 0,
            Sign::Greater => 1,
        }
    }
}

impl TryFrom<i8> for Sign {
    type Error = String;

    fn try_from(raw: i8) -> Result<Self, Self::Error> {
        match raw {
            -1 => Ok(Sign::Less),
            0 => Ok(Sign::Equal),
            1 => Ok(Sign::Greater),
            other => Err(format!("order sign must be -1, 0 or 1, got {other}")),
        }
    }
}

/// Whether a finding breaks the contract or only deserves attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Legal but surprising behaviour.
    Warning,
    /// A broken contract rule.
    Violation,
}

/// Kind of a finding together with the offending candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingKind {
    /// `eq(x, x)` returned false.
    Reflexivity {
        /// Offending candidate.
        subject: CandidateRef,
    },
    /// `eq(x, y)` and `eq(y, x)` disagree.
    Symmetry {
        /// Left candidate.
        lhs: CandidateRef,
        /// Right candidate.
        rhs: CandidateRef,
        /// Result of `eq(lhs, rhs)`.
        forward: bool,
        /// Result of `eq(rhs, lhs)`.
        backward: bool,
    },
    /// `eq(x, y)` and `eq(y, z)` hold but `eq(x, z)` does not.
    Transitivity {
        /// First candidate.
        x: CandidateRef,
        /// Bridging candidate.
        y: CandidateRef,
        /// Last candidate.
        z: CandidateRef,
    },
    /// `eq(x, null)` returned true.
    NullHandling {
        /// Offending candidate.
        subject: CandidateRef,
    },
    /// Two `hash(x)` calls on an unchanged candidate returned different values.
    HashDrift {
        /// Offending candidate.
        subject: CandidateRef,
        /// First hash.
        first: u64,
        /// Second hash.
        second: u64,
    },
    /// Two `eq(x, y)` calls on unchanged candidates returned different results.
    EqualityDrift {
        /// Left candidate.
        lhs: CandidateRef,
        /// Right candidate.
        rhs: CandidateRef,
        /// First result.
        first: bool,
        /// Second result.
        second: bool,
    },
    /// Equal candidates produced different hashes.
    HashConsistency {
        /// Left candidate.
        lhs: CandidateRef,
        /// Right candidate.
        rhs: CandidateRef,
        /// Hash of the left candidate.
        lhs_hash: u64,
        /// Hash of the right candidate.
        rhs_hash: u64,
    },
    /// Declared groups and the equality function disagree.
    GroupMismatch {
        /// Left candidate.
        lhs: CandidateRef,
        /// Right candidate.
        rhs: CandidateRef,
        /// Whether both were declared in the same group.
        same_group: bool,
        /// Result of `eq(lhs, rhs)`.
        equal: bool,
    },
    /// `cmp(x, y)` is not the reverse of `cmp(y, x)`.
    OrderAntisymmetry {
        /// Left candidate.
        lhs: CandidateRef,
        /// Right candidate.
        rhs: CandidateRef,
        /// Result of `cmp(lhs, rhs)`.
        forward: Sign,
        /// Result of `cmp(rhs, lhs)`.
        backward: Sign,
    },
    /// `cmp(x, z)` contradicts what `cmp(x, y)` and `cmp(y, z)` imply.
    OrderTransitivity {
        /// First candidate.
        x: CandidateRef,
        /// Bridging candidate.
        y: CandidateRef,
        /// Last candidate.
        z: CandidateRef,
        /// Result of `cmp(x, y)`.
        xy: Sign,
        /// Result of `cmp(y, z)`.
        yz: Sign,
        /// Result of `cmp(x, z)`.
        xz: Sign,
    },
    /// `eq(x, y)` holds but `cmp(x, y)` is not zero.
    OrderSplitsEqualValues {
        /// Left candidate.
        lhs: CandidateRef,
        /// Right candidate.
        rhs: CandidateRef,
        /// Result of `cmp(lhs, rhs)`.
        compare: Sign,
    },
    /// `cmp(x, y)` is zero but `eq(x, y)` is false.
    OrderEqualityMismatch {
        /// Left candidate.
        lhs: CandidateRef,
        /// Right candidate.
        rhs: CandidateRef,
        /// Result of `cmp(lhs, rhs)`.
        compare: Sign,
        /// Result of `eq(lhs, rhs)`.
        equals: bool,
    },
    /// A duplicate is not equal, or not hash-equal, to its original.
    DuplicateDivergence {
        /// Original candidate.
        subject: CandidateRef,
        /// Copy mode used to build the duplicate.
        mode: CopyMode,
        /// Result of `eq(original, duplicate)`.
        equal: bool,
        /// Whether both hashed to the same value.
        hash_equal: bool,
    },
}

impl FindingKind {
    /// Returns the rule this finding belongs to.
    pub fn rule(&self) -> Rule {
        match self {
            FindingKind::Reflexivity { .. } => Rule::Reflexivity,
            FindingKind::Symmetry { .. } => Rule::Symmetry,
            FindingKind::Transitivity { .. } => Rule::Transitivity,
            FindingKind::NullHandling { .. } => Rule::NullHandling,
            FindingKind::HashDrift { .. } | FindingKind::EqualityDrift { .. } => Rule::Consistency,
            FindingKind::HashConsistency { .. } => Rule::HashConsistency,
            FindingKind::GroupMismatch { .. } => Rule::GroupAgreement,
            FindingKind::OrderAntisymmetry { .. }
            | FindingKind::OrderTransitivity { .. }
            | FindingKind::OrderSplitsEqualValues { .. }
            | FindingKind::OrderEqualityMismatch { .. } => Rule::OrderConsistency,
            FindingKind::DuplicateDivergence { .. } => Rule::Duplicates,
        }
    }

    /// Returns the candidates named by the finding.
    pub fn subjects(&self) -> Vec<&CandidateRef> {
        match self {
            FindingKind::Reflexivity { subject }
            | FindingKind::NullHandling { subject }
            | FindingKind::HashDrift { subject, .. }
            | FindingKind::DuplicateDivergence { subject, .. } => vec![subject],
            FindingKind::Symmetry { lhs, rhs, .. }
            | FindingKind::EqualityDrift { lhs, rhs, .. }
            | FindingKind::HashConsistency { lhs, rhs, .. }
            | FindingKind::GroupMismatch { lhs, rhs, .. }
            | FindingKind::OrderAntisymmetry { lhs, rhs, .. }
            | FindingKind::OrderSplitsEqualValues { lhs, rhs, .. }
            | FindingKind::OrderEqualityMismatch { lhs, rhs, .. } => vec![lhs, rhs],
            FindingKind::Transitivity { x, y, z }
            | FindingKind::OrderTransitivity { x, y, z, .. } => vec![x, y, z],
        }
    }
}

/// One entry of a [`ContractReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Severity under the policy in effect.
    pub severity: Severity,
    /// What was found.
    #[serde(flatten)]
    pub kind: FindingKind,
}

impl Finding {
    /// Creates a hard violation.
    pub fn violation(kind: FindingKind) -> Self {
        Self {
            severity: Severity::Violation,
            kind,
        }
    }

    /// Creates a warning.
    pub fn warning(kind: FindingKind) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
        }
    }

    /// Returns the rule this finding belongs to.
    pub fn rule(&self) -> Rule {
        self.kind.rule()
    }

    /// Returns whether the finding breaks the contract.
    pub fn is_violation(&self) -> bool {
        self.severity == Severity::Violation
    }
}

/// Unequal candidates that share a hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionPair {
    /// Left candidate.
    pub lhs: CandidateRef,
    /// Right candidate.
    pub rhs: CandidateRef,
    /// The shared hash.
    pub hash: u64,
}

/// Informational summary of legal hash collisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CollisionSummary {
    /// Number of unequal pairs sharing a hash.
    pub count: usize,
    /// The colliding pairs, when the policy lists them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pairs: Vec<CollisionPair>,
}

/// Provenance metadata attached to [`ContractReport`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportProvenance {
    /// Schema of the report payload.
    pub schema_version: SchemaVersion,
    /// Policy applied during the run.
    pub policy: CheckPolicy,
    /// Rules that were executed, in order.
    pub rule_order: Vec<Rule>,
}

/// Aggregated outcome of a contract check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractReport {
    /// Content-addressed hash of the report payload.
    pub analysis_hash: String,
    /// Name of the checked contract.
    pub contract: String,
    /// Number of non-null candidates checked.
    pub sample_size: usize,
    /// Number of explicit null sentinels in the sample set.
    pub null_count: usize,
    /// Findings in rule execution order.
    pub findings: Vec<Finding>,
    /// Findings dropped by the per-rule cap, keyed by rule name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub suppressed: BTreeMap<String, usize>,
    /// Legal hash collisions.
    pub collisions: CollisionSummary,
    /// Policy and rule order.
    pub provenance: ReportProvenance,
}

/// Report fields covered by [`ContractReport::analysis_hash`].
#[derive(Serialize)]
struct HashedPayload<'a> {
    contract: &'a str,
    sample_size: usize,
    null_count: usize,
    findings: &'a [Finding],
    suppressed: &'a BTreeMap<String, usize>,
    collisions: &'a CollisionSummary,
    provenance: &'a ReportProvenance,
}

impl ContractReport {
    /// Assembles a report and computes its content hash.
    pub fn new(
        contract: impl Into<String>,
        sample_size: usize,
        null_count: usize,
        findings: Vec<Finding>,
        suppressed: BTreeMap<String, usize>,
        collisions: CollisionSummary,
        provenance: ReportProvenance,
    ) -> Result<Self, ContractError> {
        let contract = contract.into();
        let payload = HashedPayload {
            contract: &contract,
            sample_size,
            null_count,
            findings: &findings,
            suppressed: &suppressed,
            collisions: &collisions,
            provenance: &provenance,
        };
        let digest = Sha256::digest(to_canonical_json_bytes(&payload)?);
        Ok(Self {
            analysis_hash: format!("{digest:x}"),
            contract,
            sample_size,
            null_count,
            findings,
            suppressed,
            collisions,
            provenance,
        })
    }

    /// Returns whether no violation was found. Warnings do not fail a report.
    pub fn passed(&self) -> bool {
        !self.findings.iter().any(Finding::is_violation)
    }

    /// Iterates over hard violations.
    pub fn violations(&self) -> impl Iterator<Item = &Finding> + '_ {
        self.findings.iter().filter(|finding| finding.is_violation())
    }

    /// Iterates over warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> + '_ {
        self.findings.iter().filter(|finding| !finding.is_violation())
    }

    /// Returns the recorded findings for `rule`.
    pub fn for_rule(&self, rule: Rule) -> impl Iterator<Item = &Finding> + '_ {
        self.findings
            .iter()
            .filter(move |finding| finding.rule() == rule)
    }

    /// Persists the report as canonical JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ContractError> {
        to_canonical_json_bytes(self)
    }

    /// Restores a report written by [`ContractReport::to_bytes`], rejecting
    /// schemas this build cannot read.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ContractError> {
        let report: ContractReport = from_json_slice(data)?;
        let written = report.provenance.schema_version;
        if !REPORT_SCHEMA.reads(&written) {
            return Err(ContractError::Serde(
                ErrorInfo::new("schema-version", "report schema is not readable by this build")
                    .with_context("contract", report.contract.as_str())
                    .with_context(
                        "written",
                        format!("{}.{}.{}", written.major, written.minor, written.patch),
                    ),
            ));
        }
        Ok(report)
    }
}
