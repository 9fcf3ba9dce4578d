//! Dynamic values and runtime type predicates.
//!
//! [`Value`] models the values of a dynamically-typed runtime, and the `is_*`
//! functions classify them by their runtime tag. The absence of a value is
//! [`Value::Undefined`].
//!
//! ```
//! use kitbag::lang::{self, Object, Value};
//!
//! assert!(lang::is_plain_object(&Object::with_null_proto().into()));
//! assert!(!lang::is_plain_object(&Object::instance_of("Date").into()));
//! assert!(lang::is_nil(&Value::Undefined));
//! assert!(lang::is_empty(&Value::from("   ")));
//! ```

mod empty;
mod value;

pub use empty::{is_empty, is_empty_mut};
pub use value::{Function, Object, Proto, Symbol, TypeOf, Value};

/// Returns `true` if `value` is a boolean.
pub fn is_boolean(value: &Value) -> bool {
    value.type_of() == TypeOf::Boolean
}

/// Returns `true` if `value` is a function.
pub fn is_function(value: &Value) -> bool {
    value.type_of() == TypeOf::Function
}

/// Returns `true` if `value` is `null` or `undefined`.
pub fn is_nil(value: &Value) -> bool {
    is_null(value) || is_undefined(value)
}

/// Returns `true` if `value` is `null`.
pub fn is_null(value: &Value) -> bool {
    matches!(value, Value::Null)
}

/// Returns `true` if `value` is a number, `NaN` included.
pub fn is_number(value: &Value) -> bool {
    value.type_of() == TypeOf::Number
}

/// Returns `true` if `value` is an object. Arrays and class instances are
/// objects; `null` is not.
pub fn is_object(value: &Value) -> bool {
    !is_null(value) && value.type_of() == TypeOf::Object
}

/// Returns `true` if `value` is a plain object: one that inherits straight
/// from the bare-object root, or has no prototype at all.
pub fn is_plain_object(value: &Value) -> bool {
    value.as_object().is_some_and(|object| object.proto().is_plain())
}

/// Returns `true` if `value` is a string.
pub fn is_string(value: &Value) -> bool {
    value.type_of() == TypeOf::String
}

/// Returns `true` if `value` is a symbol.
pub fn is_symbol(value: &Value) -> bool {
    value.type_of() == TypeOf::Symbol
}

/// Returns `true` if `value` is `undefined`.
pub fn is_undefined(value: &Value) -> bool {
    value.type_of() == TypeOf::Undefined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn null_is_tagged_object_but_not_an_object() {
        assert_eq!(Value::Null.type_of(), TypeOf::Object);
        assert_eq!(Value::Null.type_of().to_string(), "object");
        assert!(!is_object(&Value::Null));
    }

    #[test_log::test]
    fn boxed_primitives_are_objects() {
        let boxed = Value::from(Object::instance_of("Number"));
        assert!(is_object(&boxed));
        assert!(!is_number(&boxed));
        assert!(!is_plain_object(&boxed));
    }

    #[test_log::test]
    fn functions_are_callable() {
        let double = Function::new("double", |args| match args.first() {
            Some(Value::Number(n)) => Value::Number(n * 2.0),
            _ => Value::Undefined,
        });
        assert_eq!(double.call(&[Value::from(21)]), Value::Number(42.0));
        assert!(is_function(&double.into()));
    }

    #[test_log::test]
    fn symbols_are_unique() {
        let a = Symbol::described("abc");
        let b = Symbol::described("abc");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.description(), Some("abc"));
    }
}
