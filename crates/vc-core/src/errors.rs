//! Fatal errors raised while checking a contract.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnostic carried by every [`ContractError`].
///
/// `context` names the contract under check and, where it applies, the
/// policy file or the report schema involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case code such as `empty-sample-set` or `policy-parse`.
    pub code: String,
    /// What went wrong.
    pub message: String,
    /// Contract name, policy path and similar lookup keys.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested fix, when one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Starts a diagnostic without context or hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `key=value`, replacing any earlier value for `key`.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches the suggested fix.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " ({})", pairs.join(", "))?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

/// Canonical error type for contract checking.
///
/// Only precondition and I/O style failures surface here. Broken contract
/// rules are data, collected into a report rather than returned as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum ContractError {
    /// The sample set holds no candidate values.
    #[error("empty sample set: {0}")]
    EmptySampleSet(ErrorInfo),
    /// An ordering rule was requested for a contract without an order function.
    #[error("incomparable type: {0}")]
    IncomparableType(ErrorInfo),
    /// Policy loading or validation errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl ContractError {
    /// Builds the fatal error raised when a rule pass receives no candidates.
    pub fn empty_sample_set(contract: &str) -> Self {
        ContractError::EmptySampleSet(
            ErrorInfo::new("empty-sample-set", "sample set holds no candidate values")
                .with_context("contract", contract)
                .with_hint("add at least one non-null candidate before checking"),
        )
    }

    /// Builds the fatal error raised when ordering rules run without an order function.
    pub fn incomparable_type(contract: &str) -> Self {
        ContractError::IncomparableType(
            ErrorInfo::new(
                "incomparable-type",
                "order consistency requested but the contract has no order function",
            )
            .with_context("contract", contract)
            .with_hint("attach an order function with `Contract::with_order`"),
        )
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            ContractError::EmptySampleSet(info)
            | ContractError::IncomparableType(info)
            | ContractError::Config(info)
            | ContractError::Serde(info) => info,
        }
    }
}
