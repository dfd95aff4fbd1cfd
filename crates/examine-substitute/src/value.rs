//! Runtime value model for intercepted calls.
//!
//! Every argument and return value crossing the proxy boundary is
//! carried as a [`Value`]. The set is closed so argument tuples can be
//! compared by deep structural equality and used as map keys: lists
//! compare element-wise, floats compare and hash by bit pattern.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::SubstituteError;

/// A runtime value passing through the dispatch engine.
#[derive(Debug, Clone)]
pub enum Value {
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

/// The runtime type of a [`Value`], also used as the declared parameter
/// and return type in method signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Unit,
    Bool,
    Int,
    Float,
    Str,
    List,
}

impl Value {
    /// The runtime type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Unit => ValueType::Unit,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Str(_) => ValueType::Str,
            Value::List(_) => ValueType::List,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

// Structural equality over the closed value set. Floats compare by bit
// pattern so `Value` can be `Eq + Hash` and key the case-handler map.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Unit, Value::Unit) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Unit => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(n) => n.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
            Value::List(items) => items.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Unit => "Unit",
            ValueType::Bool => "Bool",
            ValueType::Int => "Int",
            ValueType::Float => "Float",
            ValueType::Str => "Str",
            ValueType::List => "List",
        };
        f.write_str(name)
    }
}

/// Render a type list the way it appears in signatures: `Int, Str`.
pub(crate) fn display_types(types: &[ValueType]) -> String {
    types
        .iter()
        .map(ValueType::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// Types usable as parameters and returns of a mocked trait.
///
/// The [`mock_interface!`](crate::mock_interface) macro requires every
/// parameter and return type to implement this trait; it supplies the
/// declared [`ValueType`] for the method catalog and the conversions at
/// the proxy boundary.
pub trait MockValue: Sized {
    /// The signature-level type of this Rust type.
    const VALUE_TYPE: ValueType;

    fn into_value(self) -> Value;

    /// Back-conversion for handler results; `None` on a type mismatch.
    fn from_value(value: Value) -> Option<Self>;
}

impl MockValue for () {
    const VALUE_TYPE: ValueType = ValueType::Unit;

    fn into_value(self) -> Value {
        Value::Unit
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Unit => Some(()),
            _ => None,
        }
    }
}

impl MockValue for bool {
    const VALUE_TYPE: ValueType = ValueType::Bool;

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }
}

impl MockValue for i64 {
    const VALUE_TYPE: ValueType = ValueType::Int;

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_int()
    }
}

impl MockValue for f64 {
    const VALUE_TYPE: ValueType = ValueType::Float;

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_float()
    }
}

impl MockValue for String {
    const VALUE_TYPE: ValueType = ValueType::Str;

    fn into_value(self) -> Value {
        Value::Str(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl<T: MockValue> MockValue for Vec<T> {
    const VALUE_TYPE: ValueType = ValueType::List;

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(MockValue::into_value).collect())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

/// Build an argument tuple from anything convertible to [`Value`].
///
/// ```
/// use examine_substitute::{values, Value};
///
/// assert_eq!(values![5, "x"], vec![Value::Int(5), Value::Str("x".into())]);
/// ```
#[macro_export]
macro_rules! values {
    ( $( $value:expr ),* $(,)? ) => {
        ::std::vec![ $( $crate::Value::from($value) ),* ]
    };
}

/// Parse an argument tuple from a JSON array, e.g. `"[5, \"x\", [1, 2]]"`.
///
/// Numbers with a fractional part become [`Value::Float`], integral
/// numbers become [`Value::Int`], and `null` becomes [`Value::Unit`].
/// JSON objects have no counterpart in the value model and are
/// rejected.
pub fn values_from_json(raw: &str) -> crate::Result<Vec<Value>> {
    let parsed: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| SubstituteError::InvalidArguments(e.to_string()))?;
    match parsed {
        serde_json::Value::Array(items) => items.into_iter().map(value_from_json).collect(),
        other => Err(SubstituteError::InvalidArguments(format!(
            "expected a JSON array of arguments, got {other}"
        ))),
    }
}

fn value_from_json(json: serde_json::Value) -> crate::Result<Value> {
    match json {
        serde_json::Value::Null => Ok(Value::Unit),
        serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(SubstituteError::InvalidArguments(format!(
                    "number {n} does not fit the value model"
                )))
            }
        }
        serde_json::Value::String(s) => Ok(Value::Str(s)),
        serde_json::Value::Array(items) => Ok(Value::List(
            items
                .into_iter()
                .map(value_from_json)
                .collect::<crate::Result<Vec<_>>>()?,
        )),
        serde_json::Value::Object(_) => Err(SubstituteError::InvalidArguments(
            "JSON objects are not supported as argument values".to_string(),
        )),
    }
}
