//! Parameter resolution: deep structural merge of override trees into defaults.

use serde_json::Value;

/// Merge `overrides` into `defaults` and return the resolved tree.
///
/// Nested mappings are merged key by key so a partial override like
/// `{"ihx": {"dT_sh": 10.0}}` replaces only that leaf and leaves its siblings
/// intact. Any non-mapping override value (including one replacing an entire
/// subtree) is taken wholesale. Neither input is mutated and the result shares
/// no mapping nodes with `defaults` — the default trees are process-wide and
/// must stay immutable.
pub fn resolve(defaults: &Value, overrides: &Value) -> Value {
    match (defaults, overrides) {
        (Value::Object(base), Value::Object(over)) => {
            let mut merged = base.clone();
            for (key, value) in over {
                let entry = match merged.get(key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        resolve(existing, value)
                    }
                    _ => value.clone(),
                };
                merged.insert(key.clone(), entry);
            }
            Value::Object(merged)
        }
        // Malformed override shapes are accepted permissively: anything that
        // is not a mapping/mapping pair replaces the defaults wholesale.
        _ => overrides.clone(),
    }
}

/// Look up a value at a key path in a parameter tree.
pub fn get_path<'a>(tree: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = tree;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    Some(current)
}

/// Numeric leaf at a key path, if present and numeric.
pub fn get_f64(tree: &Value, path: &[&str]) -> Option<f64> {
    get_path(tree, path)?.as_f64()
}

/// String leaf at a key path, if present.
pub fn get_str<'a>(tree: &'a Value, path: &[&str]) -> Option<&'a str> {
    get_path(tree, path)?.as_str()
}
