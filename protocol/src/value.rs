//! Argument values observed at a hooked call and the substitute results a
//! rule can return in their place.

use std::borrow::Cow;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single invocation argument, tagged by its runtime shape.
///
/// Hosts hand arguments over as untyped lists; adapters convert each one into
/// a `Value` so predicates can match on it exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Absent reference.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// A string-typed argument.
    Text(String),
    /// Any other host object.
    Object(Opaque),
}

/// A host object the engine cannot inspect structurally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opaque {
    /// Host type name, for diagnostics only.
    pub type_name: String,
    /// Textual representation, if the host could produce one.
    /// `None` models an object whose rendering failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// An object with a textual representation.
    pub fn object(type_name: impl Into<String>, display: impl Into<String>) -> Self {
        Value::Object(Opaque {
            type_name: type_name.into(),
            display: Some(display.into()),
        })
    }

    /// An object whose textual representation is unavailable.
    pub fn opaque(type_name: impl Into<String>) -> Self {
        Value::Object(Opaque {
            type_name: type_name.into(),
            display: None,
        })
    }

    /// The string payload, only for string-typed arguments.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Textual representation of the argument.
    ///
    /// Returns `None` for absent arguments and for objects that cannot be
    /// rendered.
    pub fn render(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Int(n) => Some(Cow::Owned(n.to_string())),
            Value::Float(f) => Some(Cow::Owned(float_text(*f))),
            Value::Text(s) => Some(Cow::Borrowed(s)),
            Value::Object(o) => o.display.as_deref().map(Cow::Borrowed),
        }
    }
}

/// Host text form of a float: whole numbers keep their `.0`.
fn float_text(f: f64) -> String {
    if f.is_infinite() {
        if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{:?}", f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => f.write_str(&float_text(*x)),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Object(o) => match &o.display {
                Some(d) => write!(f, "{}({})", o.type_name, d),
                None => write!(f, "<{}>", o.type_name),
            },
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// The fixed result returned in place of a matched call.
///
/// Serializes as a bare `true`, `false` or `null` so rule files read the way
/// the overridden method would return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Substitution {
    ReturnTrue,
    ReturnFalse,
    ReturnNull,
}

impl Substitution {
    pub fn value(self) -> Value {
        match self {
            Substitution::ReturnTrue => Value::Bool(true),
            Substitution::ReturnFalse => Value::Bool(false),
            Substitution::ReturnNull => Value::Null,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Substitution::ReturnTrue => "true",
            Substitution::ReturnFalse => "false",
            Substitution::ReturnNull => "null",
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Substitution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Substitution::ReturnTrue => serializer.serialize_bool(true),
            Substitution::ReturnFalse => serializer.serialize_bool(false),
            Substitution::ReturnNull => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for Substitution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SubstitutionVisitor)
    }
}

struct SubstitutionVisitor;

impl<'de> Visitor<'de> for SubstitutionVisitor {
    type Value = Substitution;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("true, false or null")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Substitution, E> {
        Ok(if v {
            Substitution::ReturnTrue
        } else {
            Substitution::ReturnFalse
        })
    }

    fn visit_unit<E: de::Error>(self) -> Result<Substitution, E> {
        Ok(Substitution::ReturnNull)
    }

    fn visit_none<E: de::Error>(self) -> Result<Substitution, E> {
        Ok(Substitution::ReturnNull)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Substitution, E> {
        match v {
            "true" => Ok(Substitution::ReturnTrue),
            "false" => Ok(Substitution::ReturnFalse),
            "null" | "~" => Ok(Substitution::ReturnNull),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }
}
