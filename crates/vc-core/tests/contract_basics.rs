use std::cmp::Ordering;

use vc_core::{stable_hash, Candidate, Contract, Operand, SampleSet};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Code(u16);

#[test]
fn derived_contract_follows_trait_impls() {
    let contract = Contract::<Code>::derived_ordered("code");
    let a = Code(7);
    let b = Code(7);
    let c = Code(9);
    assert!(contract.equals_value(&a, &b));
    assert!(!contract.equals_value(&a, &c));
    assert!(!contract.equals(&a, Operand::Null));
    assert_eq!(contract.hash_of(&a), stable_hash(&b));
    assert_eq!(contract.compare(&a, &c), Some(Ordering::Less));
    assert!(contract.is_ordered());
}

#[test]
fn unordered_contract_has_no_compare() {
    let contract = Contract::<Code>::derived("code");
    assert_eq!(contract.compare(&Code(1), &Code(2)), None);
    assert!(!contract.is_ordered());
    assert!(format!("{contract:?}").contains("ordered: false"));
}

#[test]
fn closures_can_inspect_the_null_sentinel() {
    let contract = Contract::new(
        "lenient",
        |_: &Code, rhs: Operand<'_, Code>| rhs.is_null(),
        |_: &Code| 0,
    );
    assert!(contract.equals(&Code(1), Operand::Null));
    assert!(!contract.equals(&Code(1), Operand::from(&Code(1))));
}

#[test]
fn sample_set_tracks_nulls_and_indices() {
    let mut samples = SampleSet::new();
    samples.push_labeled(Code(1), vc_core::GroupId::from_raw(0), "one");
    samples.push_null();
    samples.push(Code(1), vc_core::GroupId::from_raw(0));

    assert_eq!(samples.len(), 3);
    assert_eq!(samples.value_count(), 2);
    assert_eq!(samples.null_count(), 1);
    assert!(matches!(samples.candidates()[1], Candidate::Null));

    let indices: Vec<_> = samples.values().map(|entry| entry.index).collect();
    assert_eq!(indices, vec![0, 2]);
    let labels: Vec<_> = samples.values().map(|entry| entry.label).collect();
    assert_eq!(labels, vec!["one", "Code(1)"]);
}
