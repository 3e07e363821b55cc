//! Embedded default rule table.

use anyhow::Result;
use carveout_policy::RuleTable;

pub const DEFAULT_RULES_YAML: &str = include_str!("rules/default.yaml");

/// Compile the built-in rule table.
pub fn default_rules() -> Result<RuleTable> {
    Ok(RuleTable::from_yaml(DEFAULT_RULES_YAML)?)
}
