mod common;

use std::sync::atomic::{AtomicU64, Ordering};

use common::{bridged_points, color_points, kinds_for, one_way_text, spaced_students, twin_people};
use vc_check::{check_contract, ContractChecker, FindingKind, Rule, Severity};
use vc_core::errors::ContractError;
use vc_core::{stable_hash, Contract, Operand, SampleSet};
use vc_fixtures::{Color, Figure, Person, Student, TaggedPoint, Text};

#[test]
fn one_way_interoperability_breaks_symmetry() -> Result<(), ContractError> {
    let contract = Text::one_way_contract();
    let report = check_contract(&contract, &one_way_text())?;

    assert!(!report.passed());
    let symmetry = kinds_for(&report, Rule::Symmetry);
    assert_eq!(symmetry.len(), 1);
    match &symmetry[0] {
        FindingKind::Symmetry {
            lhs,
            rhs,
            forward,
            backward,
        } => {
            assert_eq!((lhs.index, rhs.index), (0, 1));
            assert!(*forward);
            assert!(!*backward);
        }
        other => panic!("unexpected finding {other:?}"),
    }
    assert_eq!(report.violations().count(), 1);
    Ok(())
}

#[test]
fn tagged_text_is_symmetric() -> Result<(), ContractError> {
    let contract = Text::tagged_contract();
    let samples = SampleSet::new()
        .with(Text::folded("Polish"), 0)
        .with(Text::folded("polish"), 0)
        .with(Text::plain("polish"), 1);
    let report = check_contract(&contract, &samples)?;
    assert!(report.passed(), "{:?}", report.findings);
    assert_eq!(report.collisions.count, 0);
    Ok(())
}

#[test]
fn mixed_kind_points_break_transitivity() -> Result<(), ContractError> {
    let contract = TaggedPoint::lenient_contract();
    let checker = ContractChecker::new(&contract);
    let findings = checker.check_transitivity(&bridged_points())?;

    assert_eq!(findings.len(), 2);
    for finding in &findings {
        match &finding.kind {
            FindingKind::Transitivity { x, y, z } => {
                assert_eq!(y.index, 1);
                assert_ne!(x.index, z.index);
            }
            other => panic!("unexpected finding {other:?}"),
        }
    }
    assert!(checker.check_symmetry(&bridged_points())?.is_empty());
    Ok(())
}

#[test]
fn smelly_points_bridge_colors_too() -> Result<(), ContractError> {
    let contract = TaggedPoint::lenient_contract();
    let samples = SampleSet::new()
        .with(TaggedPoint::colored(1, 2, Color::Green), 0)
        .with(TaggedPoint::smelly(1, 2, "garlic"), 1)
        .with(TaggedPoint::colored(1, 2, Color::Red), 2);
    let findings = ContractChecker::new(&contract).check_transitivity(&samples)?;
    assert_eq!(findings.len(), 2);
    Ok(())
}

#[test]
fn tagged_and_composed_points_pass() -> Result<(), ContractError> {
    let tagged = TaggedPoint::tagged_contract();
    assert!(check_contract(&tagged, &bridged_points())?.passed());

    let composed = vc_fixtures::ColorPoint::contract();
    let report = check_contract(&composed, &color_points())?;
    assert!(report.passed(), "{:?}", report.findings);
    assert!(report.provenance.rule_order.contains(&Rule::OrderConsistency));
    Ok(())
}

#[test]
fn accepting_null_is_reported_per_candidate() -> Result<(), ContractError> {
    let contract = Contract::new(
        "null-accepting",
        |lhs: &i64, rhs: Operand<'_, i64>| rhs.value().map_or(true, |rhs| lhs == rhs),
        |value: &i64| stable_hash(value),
    );
    let samples = SampleSet::new().with(1i64, 0).with(2i64, 1).with_null();
    let report = check_contract(&contract, &samples)?;

    assert_eq!(report.sample_size, 2);
    assert_eq!(report.null_count, 1);
    let nulls = kinds_for(&report, Rule::NullHandling);
    assert_eq!(nulls.len(), 2);
    assert_eq!(report.violations().count(), 2);
    Ok(())
}

#[test]
fn identity_hash_splits_equal_people() -> Result<(), ContractError> {
    let contract = Person::identity_hash_contract();
    let report = check_contract(&contract, &twin_people())?;

    let hashes = kinds_for(&report, Rule::HashConsistency);
    assert_eq!(hashes.len(), 1);
    match &hashes[0] {
        FindingKind::HashConsistency {
            lhs,
            rhs,
            lhs_hash,
            rhs_hash,
        } => {
            assert_eq!((lhs.index, rhs.index), (0, 1));
            assert_ne!(lhs_hash, rhs_hash);
        }
        other => panic!("unexpected finding {other:?}"),
    }
    Ok(())
}

#[test]
fn partial_hash_only_collides() -> Result<(), ContractError> {
    let contract = Person::id_hash_contract();
    let samples = SampleSet::new()
        .with(Person::new(1, "Ann"), 0)
        .with(Person::new(1, "Anne"), 1)
        .with(Person::new(2, "Bob"), 2);
    let report = check_contract(&contract, &samples)?;

    assert!(report.passed(), "{:?}", report.findings);
    assert_eq!(report.collisions.count, 1);
    assert_eq!(report.collisions.pairs.len(), 1);
    assert_eq!(report.collisions.pairs[0].lhs.index, 0);
    assert_eq!(report.collisions.pairs[0].rhs.index, 1);

    let full = Person::contract();
    let report = check_contract(&full, &samples)?;
    assert!(report.passed());
    assert_eq!(report.collisions.count, 0);
    Ok(())
}

#[test]
fn raw_name_hash_breaks_consistency() -> Result<(), ContractError> {
    let broken = Student::raw_hash_contract();
    let report = check_contract(&broken, &spaced_students())?;
    assert_eq!(kinds_for(&report, Rule::HashConsistency).len(), 1);
    assert_eq!(report.violations().count(), 1);

    let canonical = Student::contract();
    assert!(check_contract(&canonical, &spaced_students())?.passed());
    Ok(())
}

#[test]
fn nan_is_not_equal_to_itself() -> Result<(), ContractError> {
    let contract = Figure::ieee_contract();
    let samples = SampleSet::new()
        .with(Figure::Circle { radius: f64::NAN }, 0)
        .with(Figure::Circle { radius: 1.0 }, 1);
    let findings = ContractChecker::new(&contract).check_reflexivity(&samples)?;
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Violation);
    assert_eq!(findings[0].kind.subjects()[0].index, 0);

    let bitwise = Figure::bitwise_contract();
    assert!(check_contract(&bitwise, &samples)?.passed());
    Ok(())
}

#[test]
fn signed_zeros_hash_apart() -> Result<(), ContractError> {
    let contract = Figure::ieee_contract();
    let findings = ContractChecker::new(&contract).check_hash_consistency(&common::signed_zeros())?;
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].rule(), Rule::HashConsistency);
    Ok(())
}

#[test]
fn group_disagreement_in_both_directions() -> Result<(), ContractError> {
    let contract = Contract::<i64>::derived("int");
    let samples = SampleSet::new().with(1i64, 0).with(1i64, 1).with(2i64, 0);
    let findings = ContractChecker::new(&contract).check_group_agreement(&samples)?;

    assert_eq!(findings.len(), 2);
    let flags: Vec<(bool, bool)> = findings
        .iter()
        .map(|finding| match &finding.kind {
            FindingKind::GroupMismatch {
                same_group, equal, ..
            } => (*same_group, *equal),
            other => panic!("unexpected finding {other:?}"),
        })
        .collect();
    assert_eq!(flags, vec![(false, true), (true, false)]);
    Ok(())
}

#[test]
fn labels_follow_debug_rendering() -> Result<(), ContractError> {
    let contract = Text::one_way_contract();
    let report = check_contract(&contract, &one_way_text())?;
    let subjects = report.findings[0].kind.subjects();
    assert_eq!(subjects[0].label, "Folded(\"Polish\")");
    assert_eq!(subjects[1].label, "Plain(\"polish\")");
    Ok(())
}

#[test]
fn counter_hash_drifts_between_calls() -> Result<(), ContractError> {
    let calls = AtomicU64::new(0);
    let contract = Contract::new(
        "counter-hash",
        |lhs: &i64, rhs: Operand<'_, i64>| rhs.value().is_some_and(|rhs| lhs == rhs),
        move |_: &i64| calls.fetch_add(1, Ordering::Relaxed),
    );
    let samples = SampleSet::new().with(1i64, 0).with(2i64, 1);
    let report = check_contract(&contract, &samples)?;

    assert!(!report.passed());
    let drifts = kinds_for(&report, Rule::Consistency);
    assert_eq!(drifts.len(), 2);
    for kind in &drifts {
        match kind {
            FindingKind::HashDrift { first, second, .. } => assert_ne!(first, second),
            other => panic!("unexpected finding {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn stable_contracts_raise_no_drift() -> Result<(), ContractError> {
    let contract = Person::contract();
    let report = check_contract(&contract, &twin_people())?;
    assert!(report.passed());
    assert!(report.provenance.rule_order.contains(&Rule::Consistency));
    assert_eq!(kinds_for(&report, Rule::Consistency).len(), 0);
    Ok(())
}
