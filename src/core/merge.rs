use serde_json::{Map, Value};

/// Recursively merge `overlay` into a copy of `base`.
///
/// Every key of `base` is kept and keys only in `overlay` are added. When both
/// sides hold an object the two are merged recursively; any other combination
/// resolves to the `overlay` value. Neither input is modified.
pub fn deep_merge(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut result = base.clone();
    for (key, value) in overlay {
        let merged = match (result.get(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                Value::Object(deep_merge(existing, incoming))
            }
            _ => value.clone(),
        };
        result.insert(key.clone(), merged);
    }
    result
}

/// [`deep_merge`] lifted to arbitrary JSON values.
pub fn deep_merge_values(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(a), Value::Object(b)) => Value::Object(deep_merge(a, b)),
        (_, other) => other.clone(),
    }
}

/// Leaf-level differences between a document and its merged successor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Dotted keys that did not exist before.
    pub added: Vec<String>,
    /// Dotted keys whose value was replaced.
    pub changed: Vec<String>,
    /// Dotted keys that no longer exist.
    pub removed: Vec<String>,
}

impl MergeSummary {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.changed.is_empty() && self.removed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.changed.len() + self.removed.len()
    }
}

/// Compare the leaves of `before` and `after`.
///
/// A leaf that turned into a section (or the reverse) counts as changed.
/// Empty sections count as leaves, so creating or dropping one is reported.
pub fn summarize(before: &Map<String, Value>, after: &Map<String, Value>) -> MergeSummary {
    let mut summary = MergeSummary::default();
    collect_differences(Some(before), after, "", &mut summary);
    collect_removed(before, Some(after), "", &mut summary.removed);
    summary
}

fn collect_differences(
    before: Option<&Map<String, Value>>,
    after: &Map<String, Value>,
    prefix: &str,
    summary: &mut MergeSummary,
) {
    for (key, value) in after {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        let previous = before.and_then(|m| m.get(key));

        match (previous, value) {
            (Some(Value::Object(old)), Value::Object(new)) => {
                collect_differences(Some(old), new, &path, summary);
            }
            (None, Value::Object(new)) if new.is_empty() => summary.added.push(path),
            (None, Value::Object(new)) => collect_differences(None, new, &path, summary),
            (Some(_), Value::Object(new)) => {
                summary.changed.push(path.clone());
                collect_differences(None, new, &path, summary);
            }
            (None, _) => summary.added.push(path),
            (Some(old), new) if old != new => summary.changed.push(path),
            _ => {}
        }
    }
}

fn collect_removed(
    before: &Map<String, Value>,
    after: Option<&Map<String, Value>>,
    prefix: &str,
    removed: &mut Vec<String>,
) {
    for (key, value) in before {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        let next = after.and_then(|m| m.get(key));

        match (value, next) {
            (Value::Object(old), Some(Value::Object(new))) => {
                collect_removed(old, Some(new), &path, removed);
            }
            // Section replaced by a leaf: the leaf shows up as changed.
            (Value::Object(old), Some(_)) => collect_removed(old, None, &path, removed),
            (Value::Object(old), None) if !old.is_empty() => {
                collect_removed(old, None, &path, removed);
            }
            (_, None) => removed.push(path),
            _ => {}
        }
    }
}
