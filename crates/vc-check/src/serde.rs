use ::serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use vc_core::errors::{ContractError, ErrorInfo};

fn serde_error(code: &str, err: impl ToString) -> ContractError {
    ContractError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Rebuilds every object of `value` with its keys in sorted order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(lhs, _), (rhs, _)| lhs.cmp(rhs));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect::<Map<_, _>>(),
            )
        }
        Value::Array(items) => items.into_iter().map(sort_keys).collect(),
        other => other,
    }
}

/// Encodes a report, policy or finding as compact JSON with sorted keys, so
/// equal values always produce equal bytes.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, ContractError> {
    let tree = serde_json::to_value(value).map_err(|err| serde_error("json-encode", err))?;
    serde_json::to_vec(&sort_keys(tree)).map_err(|err| serde_error("json-write", err))
}

/// Decodes a value previously written by [`to_canonical_json_bytes`].
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, ContractError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json-read", err))
}

/// Renders a value, typically a [`crate::CheckPolicy`], as YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, ContractError> {
    serde_yaml::to_string(value).map_err(|err| serde_error("yaml-encode", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_keys_are_sorted() {
        let value = json!({"zeta": [{"b": 1, "a": 2}], "alpha": {"y": true, "x": null}});
        let bytes = to_canonical_json_bytes(&value).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"alpha":{"x":null,"y":true},"zeta":[{"a":2,"b":1}]}"#
        );
    }
}
