use vc_core::{ContractError, CopyMode, GroupId, SampleSet, SchemaVersion};

#[test]
fn error_round_trip_json() {
    let err = ContractError::incomparable_type("decimal");
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"IncomparableType\""));
    let decoded: ContractError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}

#[test]
fn candidate_refs_serialize_with_group() {
    let samples = SampleSet::new().with("a", 0).with_null().with("b", 7);
    let refs: Vec<_> = samples.values().map(|entry| entry.to_ref()).collect();
    let json = serde_json::to_value(&refs).expect("serialize");
    assert_eq!(json[1]["index"], 2);
    assert_eq!(json[1]["group"], 7);
    assert_eq!(json[1]["label"], "\"b\"");
    assert_eq!(refs[1].group, GroupId::from_raw(7));
}

#[test]
fn copy_mode_uses_snake_case() {
    let json = serde_json::to_string(&CopyMode::Shallow).expect("serialize");
    assert_eq!(json, "\"shallow\"");
}

#[test]
fn schema_version_compatibility() {
    let current = SchemaVersion::new(1, 2, 0);
    assert!(current.reads(&SchemaVersion::new(1, 1, 5)));
    assert!(!current.reads(&SchemaVersion::new(2, 0, 0)));
    assert!(!current.reads(&SchemaVersion::new(1, 3, 0)));
}
