//! Hook rule tables for the carveout interception engine.
//!
//! This crate parses, validates and compiles the rule table that tells the
//! engine which host methods to intercept, how to match their arguments and
//! what to return when a call matches.
//!
//! # Example
//!
//! ```
//! use carveout_policy::RuleTable;
//! use carveout_protocol::{Substitution, Value};
//!
//! let yaml = r#"
//! version: 1
//! host_process: android
//! subject: com.example.app
//! hooks:
//!   - class: com.android.server.clipboard.ClipboardService
//!     method: clipboardAccessAllowed
//!     match: first_text_equals
//!     result: true
//! "#;
//!
//! let table = RuleTable::from_yaml(yaml).unwrap();
//! let rule = &table.rules()[0];
//!
//! let args = [Value::Int(29), Value::text("com.example.app")];
//! assert_eq!(rule.evaluate(&args), Some(Substitution::ReturnTrue));
//!
//! let args = [Value::text("com.other.app")];
//! assert_eq!(rule.evaluate(&args), None);
//! ```

mod compiler;
mod error;
mod parser;
mod predicate;
mod rule;
mod validate;

#[cfg(test)]
mod tests;

pub use compiler::{compile_rules, compile_rules_yaml};
pub use error::{Result, RuleError, ValidationError};
pub use parser::{parse_rules, HookEntry, RuleFile};
pub use predicate::{ArgumentPredicate, MatchKind};
pub use rule::{HookRule, RuleTable};
pub use validate::validate_rules;
