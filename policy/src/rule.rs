use carveout_protocol::{Substitution, Target, Value};

use crate::compiler::compile_rules_yaml;
use crate::error::Result;
use crate::predicate::ArgumentPredicate;

/// One hook: where to attach, when to fire, what to return.
///
/// Immutable once built, so a single rule can be shared read-only by every
/// thread that enters the hooked method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookRule {
    target: Target,
    predicate: ArgumentPredicate,
    action: Substitution,
    note: Option<String>,
}

impl HookRule {
    pub fn new(target: Target, predicate: ArgumentPredicate, action: Substitution) -> Self {
        Self {
            target,
            predicate,
            action,
            note: None,
        }
    }

    /// Attach a message that is logged whenever this rule overrides a call.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn predicate(&self) -> &ArgumentPredicate {
        &self.predicate
    }

    pub fn action(&self) -> Substitution {
        self.action
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// The substitution to apply for these arguments, if the rule fires.
    #[inline]
    pub fn evaluate(&self, args: &[Value]) -> Option<Substitution> {
        self.predicate.matches(args).then_some(self.action)
    }
}

/// A compiled rule table ready for installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    host_process: String,
    subject: String,
    rules: Vec<HookRule>,
}

impl RuleTable {
    pub fn new(
        host_process: impl Into<String>,
        subject: impl Into<String>,
        rules: Vec<HookRule>,
    ) -> Self {
        Self {
            host_process: host_process.into(),
            subject: subject.into(),
            rules,
        }
    }

    /// Parse, validate and compile a YAML rule table.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        compile_rules_yaml(yaml)
    }

    /// Process name the table applies to; loads of any other process are ignored.
    pub fn host_process(&self) -> &str {
        &self.host_process
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[HookRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
