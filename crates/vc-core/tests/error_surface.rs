use vc_core::errors::{ContractError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("contract", "point")
        .with_context("samples", "0")
}

#[test]
fn empty_sample_set_surface() {
    let err = ContractError::empty_sample_set("point");
    assert_eq!(err.info().code, "empty-sample-set");
    assert_eq!(err.info().context.get("contract").map(String::as_str), Some("point"));
    assert!(err.info().hint.is_some());
}

#[test]
fn incomparable_type_surface() {
    let err = ContractError::incomparable_type("text");
    assert_eq!(err.info().code, "incomparable-type");
    assert!(err.to_string().starts_with("incomparable type:"));
}

#[test]
fn config_error_surface() {
    let err = ContractError::Config(sample_info("policy-parse", "bad yaml"));
    assert_eq!(err.info().code, "policy-parse");
    assert!(err.info().context.contains_key("samples"));
}

#[test]
fn display_lists_context_and_hint() {
    let bare = ContractError::Config(ErrorInfo::new("policy-cap", "cap must be positive"));
    assert_eq!(bare.to_string(), "config error: [policy-cap] cap must be positive");

    let info = sample_info("S001", "schema mismatch").with_hint("regenerate the report");
    let rendered = ContractError::Serde(info).to_string();
    assert_eq!(
        rendered,
        "serde error: [S001] schema mismatch (contract=point, samples=0); hint: regenerate the report"
    );
}
