//! Query-Operator Sanitization
//!
//! Request bodies arrive as arbitrary JSON. Before any field is read, keys
//! that a document store would interpret as operators (`$gt`, `$where`, ...)
//! or as nested paths (`profile.email`) are stripped, recursively through
//! objects and arrays.

use serde_json::Value;

/// Whether an object key is safe to keep
///
/// A key is rejected if it starts with `$` or contains `.`.
pub fn is_safe_key(key: &str) -> bool {
    !key.starts_with('$') && !key.contains('.')
}

/// Remove operator-shaped keys from `value` in place
///
/// Returns the number of keys removed so callers can log suspicious input.
pub fn sanitize_value(value: &mut Value) -> usize {
    match value {
        Value::Object(map) => {
            let before = map.len();
            map.retain(|key, _| is_safe_key(key));
            let mut removed = before - map.len();
            for nested in map.values_mut() {
                removed += sanitize_value(nested);
            }
            removed
        }
        Value::Array(items) => items.iter_mut().map(sanitize_value).sum(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_strips_top_level_operators() {
        let mut body = json!({
            "submitterName": "Ada",
            "$where": "sleep(1000)",
            "a.b": "x",
        });
        let removed = sanitize_value(&mut body);
        assert_eq!(removed, 2);
        assert_eq!(body, json!({ "submitterName": "Ada" }));
    }

    #[test]
    fn test_strips_nested_operators() {
        let mut body = json!({
            "theme": { "$gt": "" },
            "updatedData": [{ "$set": { "uniqueID": 9 }, "company": "C" }],
        });
        let removed = sanitize_value(&mut body);
        assert_eq!(removed, 2);
        assert_eq!(
            body,
            json!({ "theme": {}, "updatedData": [{ "company": "C" }] })
        );
    }

    #[test]
    fn test_leaves_string_values_alone() {
        let mut body = json!({ "abstractContent": "costs $5 per unit. really." });
        assert_eq!(sanitize_value(&mut body), 0);
        assert_eq!(body["abstractContent"], "costs $5 per unit. really.");
    }
}
