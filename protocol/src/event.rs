//! Hook targets and per-installation outcome records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A (class, method) reference inside the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Target {
    /// Fully qualified class name.
    pub class: String,
    /// Method name; every overload is covered.
    pub method: String,
}

impl Target {
    pub fn new(class: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            method: method.into(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.class, self.method)
    }
}

/// Final state of one rule's installation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum HookStatus {
    /// An interception point now covers the method.
    Attached,
    /// The class or method does not exist in this host build.
    TargetMissing,
    /// The host's attach mechanism refused or failed.
    AttachFailed(String),
}

impl HookStatus {
    pub fn is_attached(&self) -> bool {
        matches!(self, HookStatus::Attached)
    }
}

impl fmt::Display for HookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookStatus::Attached => f.write_str("attached"),
            HookStatus::TargetMissing => f.write_str("target missing"),
            HookStatus::AttachFailed(reason) => write!(f, "attach failed: {}", reason),
        }
    }
}

/// Diagnostic record for one installation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptionOutcome {
    pub target: Target,
    pub status: HookStatus,
    /// Number of overloads covered; zero unless attached.
    #[serde(default)]
    pub overloads: usize,
}

impl InterceptionOutcome {
    pub fn attached(target: Target, overloads: usize) -> Self {
        Self {
            target,
            status: HookStatus::Attached,
            overloads,
        }
    }

    pub fn missing(target: Target) -> Self {
        Self {
            target,
            status: HookStatus::TargetMissing,
            overloads: 0,
        }
    }

    pub fn failed(target: Target, reason: impl Into<String>) -> Self {
        Self {
            target,
            status: HookStatus::AttachFailed(reason.into()),
            overloads: 0,
        }
    }
}
