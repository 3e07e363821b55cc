use serde::{Deserialize, Serialize};

use carveout_protocol::Value;

/// Matching policy named in a rule file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The first string-typed argument equals the value.
    FirstTextEquals,
    /// Some string-typed argument equals the value.
    AnyTextEquals,
    /// Some argument's textual representation contains the value.
    AnyContains,
}

impl MatchKind {
    pub fn with_value(self, value: impl Into<String>) -> ArgumentPredicate {
        let value = value.into();
        match self {
            MatchKind::FirstTextEquals => ArgumentPredicate::FirstTextEquals(value),
            MatchKind::AnyTextEquals => ArgumentPredicate::AnyTextEquals(value),
            MatchKind::AnyContains => ArgumentPredicate::AnyContains(value),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchKind::FirstTextEquals => "first_text_equals",
            MatchKind::AnyTextEquals => "any_text_equals",
            MatchKind::AnyContains => "any_contains",
        }
    }
}

/// A total predicate over an invocation's argument list.
///
/// Arguments of an unexpected shape never fail a predicate; they simply do
/// not match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgumentPredicate {
    /// Only the first string-typed argument is compared; later strings are
    /// ignored even if they would match.
    FirstTextEquals(String),
    AnyTextEquals(String),
    /// Absent arguments and objects without a textual form are skipped.
    AnyContains(String),
}

impl ArgumentPredicate {
    pub fn matches(&self, args: &[Value]) -> bool {
        match self {
            ArgumentPredicate::FirstTextEquals(subject) => args
                .iter()
                .find_map(Value::as_text)
                .is_some_and(|s| s == subject),
            ArgumentPredicate::AnyTextEquals(subject) => args
                .iter()
                .filter_map(Value::as_text)
                .any(|s| s == subject),
            ArgumentPredicate::AnyContains(needle) => args
                .iter()
                .filter_map(Value::render)
                .any(|s| s.contains(needle.as_str())),
        }
    }

    pub fn kind(&self) -> MatchKind {
        match self {
            ArgumentPredicate::FirstTextEquals(_) => MatchKind::FirstTextEquals,
            ArgumentPredicate::AnyTextEquals(_) => MatchKind::AnyTextEquals,
            ArgumentPredicate::AnyContains(_) => MatchKind::AnyContains,
        }
    }

    /// The subject or substring this predicate tests for.
    pub fn value(&self) -> &str {
        match self {
            ArgumentPredicate::FirstTextEquals(v)
            | ArgumentPredicate::AnyTextEquals(v)
            | ArgumentPredicate::AnyContains(v) => v,
        }
    }
}
