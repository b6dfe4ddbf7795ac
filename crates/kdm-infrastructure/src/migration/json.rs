//! Field-level defaulting helpers for raw campaign JSON.
//!
//! Transforms never reject a record: they default what is missing and leave
//! everything else as they found it. "Missing" means absent or `null`.

use serde_json::{Map, Value};

fn is_missing(obj: &Map<String, Value>, key: &str) -> bool {
    matches!(obj.get(key), None | Some(Value::Null))
}

/// Sets `obj[key]` to `value` when the field is missing.
pub fn default_value(obj: &mut Map<String, Value>, key: &str, value: Value) {
    if is_missing(obj, key) {
        obj.insert(key.to_string(), value);
    }
}

/// Sets `obj[key]` to `[]` when the field is missing.
pub fn default_array(obj: &mut Map<String, Value>, key: &str) {
    default_value(obj, key, Value::Array(Vec::new()));
}

/// Sets `obj[key]` to `{}` when the field is missing.
pub fn default_object(obj: &mut Map<String, Value>, key: &str) {
    default_value(obj, key, Value::Object(Map::new()));
}

/// Sets `obj[key]` to `false` when the field is missing.
pub fn default_false(obj: &mut Map<String, Value>, key: &str) {
    default_value(obj, key, Value::Bool(false));
}

/// Returns the object stored at `obj[key]`, if it is one.
pub fn object_mut<'a>(obj: &'a mut Map<String, Value>, key: &str) -> Option<&'a mut Map<String, Value>> {
    obj.get_mut(key).and_then(Value::as_object_mut)
}

/// Iterates the object elements of the array at `obj[key]`.
///
/// Non-object elements and non-array fields are skipped.
pub fn objects_mut<'a>(
    obj: &'a mut Map<String, Value>,
    key: &str,
) -> impl Iterator<Item = &'a mut Map<String, Value>> {
    obj.get_mut(key)
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object_mut)
}

/// Reads `obj[key]` as an integer.
pub fn int_field(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    obj.get(key).and_then(Value::as_i64)
}

/// Reads `obj[key]` as a string.
pub fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}
