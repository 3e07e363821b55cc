use serde::{Deserialize, Serialize};

use carveout_protocol::Substitution;

use crate::error::Result;
use crate::predicate::MatchKind;

/// Raw rule file as written in YAML, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
    #[serde(default)]
    pub version: Option<u32>,
    /// Process whose load triggers installation.
    #[serde(default)]
    pub host_process: String,
    /// Default value every hook's matcher tests for.
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub hooks: Vec<HookEntry>,
}

/// A single `hooks:` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HookEntry {
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub method: String,
    #[serde(rename = "match")]
    pub matcher: MatchKind,
    pub result: Substitution,
    /// Overrides the file-level `subject` for this hook only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Parse a YAML string into a RuleFile.
pub fn parse_rules(yaml_str: &str) -> Result<RuleFile> {
    Ok(serde_yaml::from_str(yaml_str)?)
}
