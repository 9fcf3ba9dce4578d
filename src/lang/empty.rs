use std::sync::Arc;

use super::Value;

/// Returns `true` if `value` is empty:
///
/// - **array:** `[]`, or only empty elements.
/// - **object:** `{}`, or only properties holding `null`, `undefined` or `""`.
/// - **string:** `""`, or only whitespace.
/// - anything else when it is falsy: `null`, `undefined`, `false`, `0`, `NaN`.
///
/// The strings `"null"` and `"undefined"` are not empty.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().all(is_empty),
        Value::Object(object) => object.values().all(is_blank_prop),
        Value::String(s) => s.trim_matches(is_whitespace).is_empty(),
        other => !other.is_truthy(),
    }
}

/// Like [`is_empty`], but first deletes every property holding `null`,
/// `undefined` or `""` from objects, including objects nested in arrays.
///
/// Shared objects are copied before they are modified, so other clones of
/// `value` are left untouched.
pub fn is_empty_mut(value: &mut Value) -> bool {
    prune(value);
    is_empty(value)
}

fn prune(value: &mut Value) {
    if !has_blank_props(value) {
        return;
    }
    match value {
        Value::Array(items) => Arc::make_mut(items).iter_mut().for_each(prune),
        Value::Object(object) => Arc::make_mut(object).retain(|_, prop| !is_blank_prop(prop)),
        _ => {}
    }
}

fn has_blank_props(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().any(has_blank_props),
        Value::Object(object) => object.values().any(is_blank_prop),
        _ => false,
    }
}

fn is_blank_prop(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn is_whitespace(c: char) -> bool {
    // NEL is not a line terminator to `String.prototype.trim`.
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Object;

    #[test_log::test]
    fn pruning_removes_blank_props_in_place() {
        let mut value = Value::object([
            ("a", Value::Null),
            ("b", Value::from(1)),
            ("c", Value::from("")),
        ]);
        assert!(!is_empty_mut(&mut value));
        let keys: Vec<_> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["b"]);
    }

    #[test_log::test]
    fn pruning_reaches_objects_inside_arrays() {
        let mut value = Value::array([Value::object([("a", Value::Null)])]);
        assert!(is_empty_mut(&mut value));
        let inner = &value.as_array().unwrap()[0];
        assert!(inner.as_object().unwrap().is_empty());
    }

    #[test_log::test]
    fn pruning_copies_shared_objects() {
        let mut value = Value::object([("a", Value::Undefined)]);
        let alias = value.clone();
        assert!(is_empty_mut(&mut value));
        assert_eq!(alias.as_object().map(Object::len), Some(1));
    }

    #[test_log::test]
    fn next_line_is_not_trimmed() {
        assert!(!is_empty(&Value::from("\u{85}")));
        assert!(is_empty(&Value::from("\u{feff}\u{a0}\u{2028} \t")));
    }

    #[test_log::test]
    fn pure_check_leaves_input_alone() {
        let value = Value::object([("a", Value::Null)]);
        assert!(is_empty(&value));
        assert_eq!(value.as_object().map(Object::len), Some(1));
    }
}
