//! Input tree types.
//!
//! An [`InputValue`] is one node of the parameter tree attached to an
//! operation: a literal scalar, a nullable slot, a list, a map of named
//! arguments, a `$variable` reference, or an input object that exposes its own
//! argument map. Every node evaluates into a [`WireValue`].

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Number;

/// Canonical value exchanged at the network boundary, in both directions.
pub type WireValue = serde_json::Value;

/// Object form of [`WireValue`]. Keeps insertion order on the wire.
pub type WireObject = serde_json::Map<String, WireValue>;

// =============================================================================
// InputValue
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Scalar(Scalar),
    Nullable(Option<Box<InputValue>>),
    List(Vec<InputValue>),
    Object(InputMap),
    Variable(Variable),
    Composite(Composite),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Boolean(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    pub fn to_wire(&self) -> WireValue {
        match self {
            Scalar::Boolean(b) => WireValue::Bool(*b),
            Scalar::Number(n) => WireValue::Number(n.clone()),
            Scalar::String(s) => WireValue::String(s.clone()),
        }
    }
}

impl InputValue {
    pub const NULL: InputValue = InputValue::Nullable(None);

    pub fn variable(name: impl Into<String>) -> Self {
        InputValue::Variable(Variable::new(name))
    }

    /// Capture any JSON-encodable value as a literal subtree.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(InputValue::from)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, InputValue::Nullable(None))
    }
}

// =============================================================================
// Variable
// =============================================================================

/// Placeholder resolved from the bindings at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.name)
    }
}

// =============================================================================
// InputMap
// =============================================================================

/// Named arguments of an operation, or the fields of an input object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputMap(IndexMap<String, InputValue>);

impl InputMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    /// Builder form of [`InputMap::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an entry, replacing any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<InputValue>) -> Option<InputValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&InputValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, InputValue> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<InputValue>> FromIterator<(K, V)> for InputMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a InputMap {
    type Item = (&'a String, &'a InputValue);
    type IntoIter = indexmap::map::Iter<'a, String, InputValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build an [`InputMap`] from `key => value` pairs.
///
/// ```
/// use inputwire::{input_map, Variable};
///
/// let args = input_map! {
///     "episode" => Variable::new("episode"),
///     "first" => 10,
/// };
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! input_map {
    () => {
        $crate::InputMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::InputMap::new();
        $(map.insert($key, $value);)+
        map
    }};
}

// =============================================================================
// Input objects
// =============================================================================

/// An input object reduced to its argument map.
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    pub type_name: &'static str,
    pub fields: InputMap,
}

/// A record type passed as an argument, e.g. `ReviewInput`.
pub trait InputObject {
    const TYPE_NAME: &'static str;

    fn input_map(&self) -> InputMap;

    fn to_input_value(&self) -> InputValue {
        InputValue::Composite(Composite {
            type_name: Self::TYPE_NAME,
            fields: self.input_map(),
        })
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        InputValue::Scalar(Scalar::Boolean(value))
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(impl From<$ty> for InputValue {
            fn from(value: $ty) -> Self {
                InputValue::Scalar(Scalar::Number(Number::from(value)))
            }
        })*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

/// NaN and infinities have no wire form and become null.
impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        match Number::from_f64(value) {
            Some(n) => InputValue::Scalar(Scalar::Number(n)),
            None => InputValue::NULL,
        }
    }
}

impl From<f32> for InputValue {
    fn from(value: f32) -> Self {
        InputValue::from(f64::from(value))
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Scalar(Scalar::String(value))
    }
}

impl From<Variable> for InputValue {
    fn from(value: Variable) -> Self {
        InputValue::Variable(value)
    }
}

impl From<InputMap> for InputValue {
    fn from(value: InputMap) -> Self {
        InputValue::Object(value)
    }
}

impl From<Composite> for InputValue {
    fn from(value: Composite) -> Self {
        InputValue::Composite(value)
    }
}

impl<T: Into<InputValue>> From<Option<T>> for InputValue {
    fn from(value: Option<T>) -> Self {
        InputValue::Nullable(value.map(|inner| Box::new(inner.into())))
    }
}

impl<T: Into<InputValue>> From<Vec<T>> for InputValue {
    fn from(value: Vec<T>) -> Self {
        InputValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<InputValue>> From<BTreeMap<String, T>> for InputValue {
    fn from(value: BTreeMap<String, T>) -> Self {
        InputValue::Object(value.into_iter().collect())
    }
}

impl<T: Into<InputValue>> From<IndexMap<String, T>> for InputValue {
    fn from(value: IndexMap<String, T>) -> Self {
        InputValue::Object(value.into_iter().collect())
    }
}

/// Structural conversion. Evaluating the result gives the original value back
/// as long as it holds no null object entries.
impl From<WireValue> for InputValue {
    fn from(value: WireValue) -> Self {
        match value {
            WireValue::Null => InputValue::NULL,
            WireValue::Bool(b) => InputValue::Scalar(Scalar::Boolean(b)),
            WireValue::Number(n) => InputValue::Scalar(Scalar::Number(n)),
            WireValue::String(s) => InputValue::Scalar(Scalar::String(s)),
            WireValue::Array(items) => InputValue::List(items.into_iter().map(InputValue::from).collect()),
            WireValue::Object(entries) => InputValue::Object(entries.into_iter().collect()),
        }
    }
}
