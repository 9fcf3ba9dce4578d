//! Shallow object projections.
//!
//! [`pick`] and [`omit`] copy a subset of an object's own properties into a
//! new plain object. The source is never modified, property order is kept,
//! and nested arrays and objects are shared with the source rather than
//! copied.

use crate::lang::{Object, Value};

/// Creates a new object with only the properties of `obj` whose key appears in
/// `keys`. Keys which `obj` does not have are ignored.
///
/// ```
/// use kitbag::lang::Object;
/// use kitbag::object::pick;
///
/// let obj: Object = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
/// let picked = pick(&obj, &["c", "a", "z"]);
/// assert_eq!(picked.keys().collect::<Vec<_>>(), ["a", "c"]);
/// ```
pub fn pick<K: AsRef<str>>(obj: &Object, keys: &[K]) -> Object {
    project(obj, |key| contains(keys, key))
}

/// Creates a new object with all properties of `obj` except those whose key
/// appears in `keys`.
///
/// ```
/// use kitbag::lang::Object;
/// use kitbag::object::omit;
///
/// let obj: Object = [("a", 1), ("b", 2)].into_iter().collect();
/// assert_eq!(omit(&obj, &["a"]).keys().collect::<Vec<_>>(), ["b"]);
/// ```
pub fn omit<K: AsRef<str>>(obj: &Object, keys: &[K]) -> Object {
    project(obj, |key| !contains(keys, key))
}

fn project(obj: &Object, mut keep: impl FnMut(&str) -> bool) -> Object {
    obj.iter()
        .filter(|(key, _)| keep(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn contains<K: AsRef<str>>(keys: &[K], key: &str) -> bool {
    keys.iter().any(|k| k.as_ref() == key)
}

impl Value {
    /// [`pick`] over any value.
    ///
    /// Arrays are projected over their index keys (`"0"`, `"1"`, ...). Values
    /// without own properties produce an empty object.
    pub fn pick<K: AsRef<str>>(&self, keys: &[K]) -> Value {
        match self {
            Value::Object(object) => pick(object, keys).into(),
            Value::Array(items) => indexed(items)
                .filter(|(key, _)| contains(keys, key))
                .collect::<Object>()
                .into(),
            _ => Object::new().into(),
        }
    }

    /// [`omit`] over any value.
    ///
    /// Arrays are projected over their index keys (`"0"`, `"1"`, ...). Values
    /// without own properties produce an empty object.
    pub fn omit<K: AsRef<str>>(&self, keys: &[K]) -> Value {
        match self {
            Value::Object(object) => omit(object, keys).into(),
            Value::Array(items) => indexed(items)
                .filter(|(key, _)| !contains(keys, key))
                .collect::<Object>()
                .into(),
            _ => Object::new().into(),
        }
    }
}

fn indexed(items: &[Value]) -> impl Iterator<Item = (String, Value)> + '_ {
    items
        .iter()
        .enumerate()
        .map(|(index, value)| (index.to_string(), value.clone()))
}
