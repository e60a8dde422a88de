use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::{debug, trace, warn};
use vc_core::errors::ContractError;
use vc_core::{Contract, CopyMode, Duplicate, Operand, SampleEntry, SampleSet};

use crate::policies::CheckPolicy;
use crate::report::{
    CollisionPair, CollisionSummary, ContractReport, Finding, FindingKind, ReportProvenance, Rule,
    Sign, REPORT_SCHEMA,
};

/// Runs contract rules for one [`Contract`] under one [`CheckPolicy`].
///
/// The checker holds no mutable state: every pass is a pure function of the
/// contract, the policy and the sample set.
#[derive(Debug)]
pub struct ContractChecker<'c, T> {
    contract: &'c Contract<T>,
    policy: CheckPolicy,
}

type Pass<'c, T> =
    fn(&ContractChecker<'c, T>, &SampleSet<T>) -> Result<Vec<Finding>, ContractError>;

fn entries<T>(samples: &SampleSet<T>) -> Vec<SampleEntry<'_, T>> {
    samples.values().collect()
}

fn log_pass(contract: &str, rule: Rule, findings: &[Finding]) {
    for finding in findings {
        trace!(contract, rule = rule.as_str(), finding = ?finding.kind, "contract finding");
    }
    debug!(
        contract,
        rule = rule.as_str(),
        findings = findings.len(),
        "rule pass complete"
    );
}

impl<'c, T> ContractChecker<'c, T> {
    /// Creates a checker with the default policy.
    pub fn new(contract: &'c Contract<T>) -> Self {
        Self::with_policy(contract, CheckPolicy::default())
    }

    /// Creates a checker with an explicit policy.
    pub fn with_policy(contract: &'c Contract<T>, policy: CheckPolicy) -> Self {
        Self { contract, policy }
    }

    /// Returns the policy in effect.
    pub fn policy(&self) -> &CheckPolicy {
        &self.policy
    }

    fn require_values<'s>(
        &self,
        samples: &'s SampleSet<T>,
    ) -> Result<Vec<SampleEntry<'s, T>>, ContractError> {
        let values = entries(samples);
        if values.is_empty() {
            return Err(ContractError::empty_sample_set(self.contract.name()));
        }
        Ok(values)
    }

    fn eq(&self, lhs: &SampleEntry<'_, T>, rhs: &SampleEntry<'_, T>) -> bool {
        self.contract.equals_value(lhs.value, rhs.value)
    }

    fn finish(&self, rule: Rule, findings: Vec<Finding>) -> Vec<Finding> {
        log_pass(self.contract.name(), rule, &findings);
        findings
    }

    /// Requires `eq(x, x)` for every candidate.
    pub fn check_reflexivity(&self, samples: &SampleSet<T>) -> Result<Vec<Finding>, ContractError> {
        let values = self.require_values(samples)?;
        let findings = values
            .iter()
            .filter(|entry| !self.eq(entry, entry))
            .map(|entry| {
                Finding::violation(FindingKind::Reflexivity {
                    subject: entry.to_ref(),
                })
            })
            .collect();
        Ok(self.finish(Rule::Reflexivity, findings))
    }

    /// Requires `eq(x, y) == eq(y, x)`; each unordered pair is reported once.
    pub fn check_symmetry(&self, samples: &SampleSet<T>) -> Result<Vec<Finding>, ContractError> {
        let values = self.require_values(samples)?;
        let mut findings = Vec::new();
        for (i, lhs) in values.iter().enumerate() {
            for rhs in &values[i + 1..] {
                let forward = self.eq(lhs, rhs);
                let backward = self.eq(rhs, lhs);
                if forward != backward {
                    findings.push(Finding::violation(FindingKind::Symmetry {
                        lhs: lhs.to_ref(),
                        rhs: rhs.to_ref(),
                        forward,
                        backward,
                    }));
                }
            }
        }
        Ok(self.finish(Rule::Symmetry, findings))
    }

    /// Requires `eq(x, z)` whenever `eq(x, y)` and `eq(y, z)` hold, over distinct candidates.
    pub fn check_transitivity(
        &self,
        samples: &SampleSet<T>,
    ) -> Result<Vec<Finding>, ContractError> {
        let values = self.require_values(samples)?;
        let n = values.len();
        let mut equal = vec![false; n * n];
        for (i, lhs) in values.iter().enumerate() {
            for (j, rhs) in values.iter().enumerate() {
                equal[i * n + j] = self.eq(lhs, rhs);
            }
        }
        let mut findings = Vec::new();
        for x in 0..n {
            for y in (0..n).filter(|&y| y != x && equal[x * n + y]) {
                for z in (0..n).filter(|&z| z != x && z != y) {
                    if equal[y * n + z] && !equal[x * n + z] {
                        findings.push(Finding::violation(FindingKind::Transitivity {
                            x: values[x].to_ref(),
                            y: values[y].to_ref(),
                            z: values[z].to_ref(),
                        }));
                    }
                }
            }
        }
        Ok(self.finish(Rule::Transitivity, findings))
    }

    /// Requires `eq(x, null) == false` for every candidate.
    pub fn check_null_handling(
        &self,
        samples: &SampleSet<T>,
    ) -> Result<Vec<Finding>, ContractError> {
        let values = self.require_values(samples)?;
        let findings = values
            .iter()
            .filter(|entry| self.contract.equals(entry.value, Operand::Null))
            .map(|entry| {
                Finding::violation(FindingKind::NullHandling {
                    subject: entry.to_ref(),
                })
            })
            .collect();
        Ok(self.finish(Rule::NullHandling, findings))
    }

    /// Requires repeated `hash(x)` and `eq(x, y)` calls on unchanged candidates to agree.
    ///
    /// Every candidate is hashed twice and every ordered pair, the diagonal
    /// included, is compared twice.
    pub fn check_consistency(&self, samples: &SampleSet<T>) -> Result<Vec<Finding>, ContractError> {
        let values = self.require_values(samples)?;
        let mut findings = Vec::new();
        for entry in &values {
            let first = self.contract.hash_of(entry.value);
            let second = self.contract.hash_of(entry.value);
            if first != second {
                findings.push(Finding::violation(FindingKind::HashDrift {
                    subject: entry.to_ref(),
                    first,
                    second,
                }));
            }
        }
        for lhs in &values {
            for rhs in &values {
                let first = self.eq(lhs, rhs);
                let second = self.eq(lhs, rhs);
                if first != second {
                    findings.push(Finding::violation(FindingKind::EqualityDrift {
                        lhs: lhs.to_ref(),
                        rhs: rhs.to_ref(),
                        first,
                        second,
                    }));
                }
            }
        }
        Ok(self.finish(Rule::Consistency, findings))
    }

    /// Requires equal hashes for pairs that are equal in either direction.
    pub fn check_hash_consistency(
        &self,
        samples: &SampleSet<T>,
    ) -> Result<Vec<Finding>, ContractError> {
        let values = self.require_values(samples)?;
        let hashes: Vec<u64> = values
            .iter()
            .map(|entry| self.contract.hash_of(entry.value))
            .collect();
        let mut findings = Vec::new();
        for (i, lhs) in values.iter().enumerate() {
            for (offset, rhs) in values[i + 1..].iter().enumerate() {
                let j = i + 1 + offset;
                let equal = self.eq(lhs, rhs) || self.eq(rhs, lhs);
                if equal && hashes[i] != hashes[j] {
                    findings.push(Finding::violation(FindingKind::HashConsistency {
                        lhs: lhs.to_ref(),
                        rhs: rhs.to_ref(),
                        lhs_hash: hashes[i],
                        rhs_hash: hashes[j],
                    }));
                }
            }
        }
        Ok(self.finish(Rule::HashConsistency, findings))
    }

    /// Counts unequal pairs that share a hash. Collisions are legal.
    pub fn collisions(&self, samples: &SampleSet<T>) -> Result<CollisionSummary, ContractError> {
        let values = self.require_values(samples)?;
        let hashes: Vec<u64> = values
            .iter()
            .map(|entry| self.contract.hash_of(entry.value))
            .collect();
        let mut summary = CollisionSummary::default();
        for (i, lhs) in values.iter().enumerate() {
            for (offset, rhs) in values[i + 1..].iter().enumerate() {
                let j = i + 1 + offset;
                if hashes[i] != hashes[j] || self.eq(lhs, rhs) || self.eq(rhs, lhs) {
                    continue;
                }
                summary.count += 1;
                if self.policy.list_collisions {
                    summary.pairs.push(CollisionPair {
                        lhs: lhs.to_ref(),
                        rhs: rhs.to_ref(),
                        hash: hashes[i],
                    });
                }
            }
        }
        debug!(
            contract = self.contract.name(),
            collisions = summary.count,
            "hash collision scan complete"
        );
        Ok(summary)
    }

    /// Requires candidates of one group to be equal and candidates of different groups not to be.
    pub fn check_group_agreement(
        &self,
        samples: &SampleSet<T>,
    ) -> Result<Vec<Finding>, ContractError> {
        let values = self.require_values(samples)?;
        let mut findings = Vec::new();
        for (i, lhs) in values.iter().enumerate() {
            for rhs in &values[i + 1..] {
                let same_group = lhs.group == rhs.group;
                let equal = self.eq(lhs, rhs);
                if same_group != equal {
                    findings.push(Finding::violation(FindingKind::GroupMismatch {
                        lhs: lhs.to_ref(),
                        rhs: rhs.to_ref(),
                        same_group,
                        equal,
                    }));
                }
            }
        }
        Ok(self.finish(Rule::GroupAgreement, findings))
    }

    /// Requires the order function to be a strict weak ordering consistent with equality.
    ///
    /// Pairs that compare equal but are unequal under the equality function
    /// are warnings (violations under a strict policy). Pairs that are equal
    /// but compare unequal are violations.
    pub fn check_order_consistency(
        &self,
        samples: &SampleSet<T>,
    ) -> Result<Vec<Finding>, ContractError> {
        if !self.contract.is_ordered() {
            return Err(ContractError::incomparable_type(self.contract.name()));
        }
        let values = self.require_values(samples)?;
        let n = values.len();
        let mut order = Vec::with_capacity(n * n);
        for lhs in &values {
            for rhs in &values {
                let ordering = self
                    .contract
                    .compare(lhs.value, rhs.value)
                    .unwrap_or(Ordering::Equal);
                order.push(ordering);
            }
        }
        let cmp = |i: usize, j: usize| order[i * n + j];

        let mut findings = Vec::new();
        for i in 0..n {
            for j in i..n {
                let forward = cmp(i, j);
                let backward = cmp(j, i);
                if forward != backward.reverse() {
                    findings.push(Finding::violation(FindingKind::OrderAntisymmetry {
                        lhs: values[i].to_ref(),
                        rhs: values[j].to_ref(),
                        forward: forward.into(),
                        backward: backward.into(),
                    }));
                }
            }
        }

        for x in 0..n {
            for y in (0..n).filter(|&y| y != x) {
                for z in (0..n).filter(|&z| z != x && z != y) {
                    let (xy, yz, xz) = (cmp(x, y), cmp(y, z), cmp(x, z));
                    let implied = match (xy, yz) {
                        (Ordering::Equal, other) | (other, Ordering::Equal) => Some(other),
                        (a, b) if a == b => Some(a),
                        _ => None,
                    };
                    if implied.is_some_and(|implied| implied != xz) {
                        findings.push(Finding::violation(FindingKind::OrderTransitivity {
                            x: values[x].to_ref(),
                            y: values[y].to_ref(),
                            z: values[z].to_ref(),
                            xy: xy.into(),
                            yz: yz.into(),
                            xz: xz.into(),
                        }));
                    }
                }
            }
        }

        for i in 0..n {
            for j in i + 1..n {
                let compare = cmp(i, j);
                let equals = self.eq(&values[i], &values[j]);
                let lhs = values[i].to_ref();
                let rhs = values[j].to_ref();
                if compare == Ordering::Equal && !equals {
                    let kind = FindingKind::OrderEqualityMismatch {
                        lhs,
                        rhs,
                        compare: Sign::Equal,
                        equals,
                    };
                    findings.push(if self.policy.strict {
                        Finding::violation(kind)
                    } else {
                        Finding::warning(kind)
                    });
                } else if compare != Ordering::Equal && equals {
                    findings.push(Finding::violation(FindingKind::OrderSplitsEqualValues {
                        lhs,
                        rhs,
                        compare: compare.into(),
                    }));
                }
            }
        }
        Ok(self.finish(Rule::OrderConsistency, findings))
    }

    fn record(&self, rule: Rule, findings: Vec<Finding>, report: &mut Assembly) {
        report.rule_order.push(rule);
        let cap = self.policy.max_findings_per_rule.unwrap_or(usize::MAX);
        let total = findings.len();
        report.findings.extend(findings.into_iter().take(cap));
        if total > cap {
            report
                .suppressed
                .insert(rule.as_str().to_string(), total - cap);
        }
    }

    fn run_core(&self, samples: &SampleSet<T>) -> Result<Assembly, ContractError> {
        self.policy.validate()?;
        self.require_values(samples)?;
        let mut assembly = Assembly::default();
        let passes: [(Rule, Pass<'c, T>); 7] = [
            (Rule::Reflexivity, Self::check_reflexivity),
            (Rule::Symmetry, Self::check_symmetry),
            (Rule::Transitivity, Self::check_transitivity),
            (Rule::NullHandling, Self::check_null_handling),
            (Rule::Consistency, Self::check_consistency),
            (Rule::HashConsistency, Self::check_hash_consistency),
            (Rule::GroupAgreement, Self::check_group_agreement),
        ];
        for (rule, pass) in passes {
            if self.policy.enabled(rule) {
                let findings = pass(self, samples)?;
                self.record(rule, findings, &mut assembly);
            }
        }
        if self.contract.is_ordered() && self.policy.enabled(Rule::OrderConsistency) {
            let findings = self.check_order_consistency(samples)?;
            self.record(Rule::OrderConsistency, findings, &mut assembly);
        }
        Ok(assembly)
    }

    fn seal(
        &self,
        samples: &SampleSet<T>,
        assembly: Assembly,
    ) -> Result<ContractReport, ContractError> {
        let collisions = self.collisions(samples)?;
        let provenance = ReportProvenance {
            schema_version: REPORT_SCHEMA,
            policy: self.policy.clone(),
            rule_order: assembly.rule_order,
        };
        let report = ContractReport::new(
            self.contract.name(),
            samples.value_count(),
            samples.null_count(),
            assembly.findings,
            assembly.suppressed,
            collisions,
            provenance,
        )?;
        let violations = report.violations().count();
        if violations > 0 {
            warn!(
                contract = self.contract.name(),
                violations,
                warnings = report.warnings().count(),
                "contract check found violations"
            );
        } else {
            debug!(
                contract = self.contract.name(),
                warnings = report.warnings().count(),
                "contract check passed"
            );
        }
        Ok(report)
    }

    /// Runs every enabled rule and aggregates the findings into one report.
    ///
    /// The order rule runs only when the contract carries an order function.
    pub fn run(&self, samples: &SampleSet<T>) -> Result<ContractReport, ContractError> {
        let assembly = self.run_core(samples)?;
        self.seal(samples, assembly)
    }
}

impl<T: Duplicate> ContractChecker<'_, T> {
    /// Requires `duplicate(x, mode)` to equal `x` and to share its hash.
    pub fn check_duplicates(
        &self,
        samples: &SampleSet<T>,
        mode: CopyMode,
    ) -> Result<Vec<Finding>, ContractError> {
        let values = self.require_values(samples)?;
        debug!(
            contract = self.contract.name(),
            mode = mode.as_str(),
            candidates = values.len(),
            "duplicating candidates"
        );
        let mut findings = Vec::new();
        for entry in &values {
            let copy = entry.value.duplicate(mode);
            let equal = self.contract.equals_value(entry.value, &copy);
            let hash_equal = self.contract.hash_of(entry.value) == self.contract.hash_of(&copy);
            if !equal || !hash_equal {
                findings.push(Finding::violation(FindingKind::DuplicateDivergence {
                    subject: entry.to_ref(),
                    mode,
                    equal,
                    hash_equal,
                }));
            }
        }
        Ok(self.finish(Rule::Duplicates, findings))
    }

    /// Runs [`ContractChecker::run`] plus the duplicate rule for each mode in `modes`.
    pub fn run_with_duplicates(
        &self,
        samples: &SampleSet<T>,
        modes: &[CopyMode],
    ) -> Result<ContractReport, ContractError> {
        let mut assembly = self.run_core(samples)?;
        if self.policy.enabled(Rule::Duplicates) && !modes.is_empty() {
            let mut findings = Vec::new();
            for mode in modes {
                findings.extend(self.check_duplicates(samples, *mode)?);
            }
            self.record(Rule::Duplicates, findings, &mut assembly);
        }
        self.seal(samples, assembly)
    }
}

#[derive(Debug, Default)]
struct Assembly {
    findings: Vec<Finding>,
    suppressed: BTreeMap<String, usize>,
    rule_order: Vec<Rule>,
}
