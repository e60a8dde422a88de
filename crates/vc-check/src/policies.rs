use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vc_core::errors::{ContractError, ErrorInfo};

use crate::report::Rule;

fn config_error(code: &str, message: impl Into<String>, path: Option<&Path>) -> ContractError {
    let mut info = ErrorInfo::new(code, message.into());
    if let Some(path) = path {
        info = info.with_context("path", path.display().to_string());
    }
    ContractError::Config(info)
}

/// Policy controlling how findings are classified and recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckPolicy {
    /// Escalate warnings (order/equality mismatches) to violations.
    #[serde(default)]
    pub strict: bool,
    /// Record every colliding pair rather than only the collision count.
    #[serde(default = "CheckPolicy::default_list_collisions")]
    pub list_collisions: bool,
    /// Maximum number of findings recorded per rule; the rest are counted as suppressed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_findings_per_rule: Option<usize>,
    /// Rules excluded from aggregate runs.
    #[serde(default)]
    pub skip_rules: BTreeSet<Rule>,
}

impl CheckPolicy {
    const fn default_list_collisions() -> bool {
        true
    }

    /// Returns whether `rule` takes part in aggregate runs.
    pub fn enabled(&self, rule: Rule) -> bool {
        !self.skip_rules.contains(&rule)
    }

    /// Checks internal consistency of the policy.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.max_findings_per_rule == Some(0) {
            return Err(config_error(
                "policy-cap",
                "max_findings_per_rule must be positive when set",
                None,
            ));
        }
        Ok(())
    }

    /// Parses and validates a policy from YAML bytes.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, ContractError> {
        let policy: CheckPolicy = serde_yaml::from_slice(data)
            .map_err(|err| config_error("policy-parse", err.to_string(), None))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Reads, parses and validates a YAML policy file.
    pub fn load(path: &Path) -> Result<Self, ContractError> {
        let bytes = fs::read(path).map_err(|err| {
            config_error(
                "policy-read",
                format!("failed to read policy: {err}"),
                Some(path),
            )
        })?;
        Self::from_yaml_slice(&bytes).map_err(|err| match err {
            ContractError::Config(info) => {
                ContractError::Config(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }
}

impl Default for CheckPolicy {
    fn default() -> Self {
        Self {
            strict: false,
            list_collisions: Self::default_list_collisions(),
            max_findings_per_rule: None,
            skip_rules: BTreeSet::new(),
        }
    }
}
