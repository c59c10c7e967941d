use serde::Serialize;
use serde_json::Value;

/// Serialize CLI overrides, dropping nulls and empty arrays so unset flags do
/// not mask values from config files.
pub fn filter_unset<T: Serialize>(input: T) -> Value {
    let mut value = serde_json::to_value(input).unwrap_or(Value::Null);
    filter_unset_recursive(&mut value);
    value
}

fn filter_unset_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !is_unset(v));

            for (_, v) in map.iter_mut() {
                filter_unset_recursive(v);
            }

            // Sections left empty by the pass above
            map.retain(|_, v| !matches!(v, Value::Object(inner) if inner.is_empty()));
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                filter_unset_recursive(item);
            }
        }
        _ => {}
    }
}

fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(arr) => arr.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_unset() {
        let filtered = filter_unset(json!({
            "linker": {
                "match_key": "license-plate",
                "custom_pattern": null,
                "allowed_extensions": [],
                "folder": null
            },
            "preview": { "limit": null }
        }));

        assert_eq!(filtered, json!({ "linker": { "match_key": "license-plate" } }));
    }

    #[test]
    fn test_non_empty_arrays_survive() {
        let filtered = filter_unset(json!({ "linker": { "allowed_extensions": ["pdf"] } }));
        assert_eq!(filtered["linker"]["allowed_extensions"], json!(["pdf"]));
    }
}
