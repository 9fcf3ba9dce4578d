use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// A dynamically-typed value.
///
/// Arrays and objects are reference-counted, so cloning a `Value` is shallow:
/// the clone shares nested arrays and objects with the original.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Undefined,
    /// The intentional absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double-precision number, including `NaN` and the infinities.
    Number(f64),
    /// A string.
    String(String),
    /// A unique symbol.
    Symbol(Symbol),
    /// A callable.
    Function(Function),
    /// An ordered list of values.
    Array(Arc<Vec<Value>>),
    /// A keyed collection of values.
    Object(Arc<Object>),
}

/// The runtime tag of a [`Value`], as reported by [`Value::type_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeOf {
    /// `undefined`
    Undefined,
    /// `object`, which includes `null` and arrays.
    Object,
    /// `boolean`
    Boolean,
    /// `number`
    Number,
    /// `string`
    String,
    /// `symbol`
    Symbol,
    /// `function`
    Function,
}

impl TypeOf {
    /// The tag's name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeOf::Undefined => "undefined",
            TypeOf::Object => "object",
            TypeOf::Boolean => "boolean",
            TypeOf::Number => "number",
            TypeOf::String => "string",
            TypeOf::Symbol => "symbol",
            TypeOf::Function => "function",
        }
    }
}

impl fmt::Display for TypeOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Create an array value.
    pub fn array<I, V>(items: I) -> Value
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Create a plain object value from key/value pairs.
    pub fn object<I, K, V>(props: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(Arc::new(props.into_iter().collect()))
    }

    /// The runtime tag of this value.
    ///
    /// Like its namesake operator this reports `null` as an object.
    pub fn type_of(&self) -> TypeOf {
        match self {
            Value::Undefined => TypeOf::Undefined,
            Value::Null | Value::Array(_) | Value::Object(_) => TypeOf::Object,
            Value::Bool(_) => TypeOf::Boolean,
            Value::Number(_) => TypeOf::Number,
            Value::String(_) => TypeOf::String,
            Value::Symbol(_) => TypeOf::Symbol,
            Value::Function(_) => TypeOf::Function,
        }
    }

    /// Whether the value counts as `true` in a boolean context.
    ///
    /// `undefined`, `null`, `false`, `0`, `-0`, `NaN` and `""` are falsy,
    /// everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Symbol(_) | Value::Function(_) | Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// The object behind this value, if it is one.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// The elements of this value, if it is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Convert into JSON.
    ///
    /// Non-finite numbers become `null`. `undefined`, functions and symbols
    /// become `null` inside arrays and at the top level, and are left out of
    /// objects.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Undefined | Value::Null | Value::Symbol(_) | Value::Function(_) => {
                serde_json::Value::Null
            }
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => items.iter().map(Value::to_json).collect(),
            Value::Object(object) => serde_json::Value::Object(
                object
                    .iter()
                    .filter(|(_, value)| value.is_serializable_prop())
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    fn is_serializable_prop(&self) -> bool {
        !matches!(
            self,
            Value::Undefined | Value::Symbol(_) | Value::Function(_)
        )
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::array(items),
            serde_json::Value::Object(map) => Value::object(map),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Value::Symbol(symbol)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(items))
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(Arc::new(object))
    }
}

/// `None` maps to `undefined`.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

/// A unique symbol. Two symbols are equal only if one is a clone of the other.
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    description: Option<Arc<str>>,
}

impl Symbol {
    /// Create a new symbol without a description.
    pub fn new() -> Self {
        Self::with(None)
    }

    /// Create a new symbol with a description.
    pub fn described(description: &str) -> Self {
        Self::with(Some(description.into()))
    }

    fn with(description: Option<Arc<str>>) -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            description,
        }
    }

    /// The symbol's description, if it has one.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or_default())
    }
}

type NativeFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A named callable value.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    body: Arc<NativeFn>,
}

impl Function {
    /// Wrap a closure as a function value.
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            body: Arc::new(body),
        }
    }

    /// The function's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call the function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.body)(args)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function: {}]", self.name)
    }
}

/// What an [`Object`] inherits from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Proto {
    /// The bare-object root; what object literals inherit from.
    #[default]
    Object,
    /// No prototype at all.
    Null,
    /// An instance of a named constructor, such as `Date`.
    Instance(Arc<str>),
}

impl Proto {
    /// Whether objects with this prototype are plain objects.
    pub fn is_plain(&self) -> bool {
        matches!(self, Proto::Object | Proto::Null)
    }
}

/// A collection of own enumerable properties, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    proto: Proto,
    props: IndexMap<String, Value>,
}

impl Object {
    /// An empty plain object.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty object without a prototype.
    pub fn with_null_proto() -> Self {
        Self {
            proto: Proto::Null,
            props: IndexMap::new(),
        }
    }

    /// An empty instance of the constructor called `constructor`.
    pub fn instance_of(constructor: &str) -> Self {
        Self {
            proto: Proto::Instance(constructor.into()),
            props: IndexMap::new(),
        }
    }

    /// What this object inherits from.
    pub fn proto(&self) -> &Proto {
        &self.proto
    }

    /// Look up an own property.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// Whether `key` is an own property.
    pub fn contains_key(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    /// Set a property, returning the previous value.
    ///
    /// New keys are appended; existing keys keep their position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.props.insert(key.into(), value.into())
    }

    /// Delete a property, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.props.shift_remove(key)
    }

    /// Keep only the properties for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &Value) -> bool) {
        self.props.retain(|key, value| keep(key, value));
    }

    /// The own property keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.props.keys().map(String::as_str)
    }

    /// The own property values, in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.props.values()
    }

    /// The own properties, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.props.iter()
    }

    /// The number of own properties.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Whether the object has no own properties.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            proto: Proto::Object,
            props: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
