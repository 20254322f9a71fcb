//! Variable values and their kinds.
//!
//! [`Value`] is the closed variant every simulation variable is stored
//! as. Its [`ValueKind`] is fixed by the schema declaration; writes are
//! checked against it exactly, with no coercion between kinds.

use std::fmt;

/// The declared kind of a simulation variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit floating point.
    Real,
    /// `true` / `false`.
    Boolean,
    /// UTF-8 string.
    Text,
}

impl ValueKind {
    /// Whether values of this kind take part in numeric reductions.
    ///
    /// Booleans count as numeric and are read as `0.0` / `1.0`.
    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::Text)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Boolean => "boolean",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// A single variable value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// An [`ValueKind::Integer`] value.
    Integer(i64),
    /// A [`ValueKind::Real`] value.
    Real(f64),
    /// A [`ValueKind::Boolean`] value.
    Boolean(bool),
    /// A [`ValueKind::Text`] value.
    Text(String),
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Real(_) => ValueKind::Real,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Text(_) => ValueKind::Text,
        }
    }

    /// Numeric reading of this value for statistics.
    ///
    /// Returns `None` for text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Real(v) => Some(*v),
            Self::Boolean(v) => Some(if *v { 1.0 } else { 0.0 }),
            Self::Text(_) => None,
        }
    }

    /// Extract a typed value, or `None` if the kinds differ.
    pub fn get<T: FromValue>(&self) -> Option<T> {
        T::from_value(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

/// Rust types that map one-to-one onto a [`ValueKind`].
///
/// Used by the typed accessors on contexts and snapshots; extraction
/// fails unless the stored kind equals [`FromValue::KIND`].
pub trait FromValue: Sized {
    /// The kind this type reads.
    const KIND: ValueKind;

    /// Extract from a value of kind [`FromValue::KIND`].
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for i64 {
    const KIND: ValueKind = ValueKind::Integer;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const KIND: ValueKind = ValueKind::Real;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Real(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}
