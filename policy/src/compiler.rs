use carveout_protocol::Target;

use crate::error::Result;
use crate::parser::{parse_rules, RuleFile};
use crate::rule::{HookRule, RuleTable};
use crate::validate::validate_rules;

/// Validate a parsed rule file and turn it into installable rules.
///
/// Declaration order is preserved; the installer attempts rules in the same
/// order they appear in the file.
pub fn compile_rules(file: &RuleFile) -> Result<RuleTable> {
    validate_rules(file)?;

    let rules = file
        .hooks
        .iter()
        .map(|hook| {
            let value = hook.value.as_deref().unwrap_or(&file.subject);
            let rule = HookRule::new(
                Target::new(&hook.class, &hook.method),
                hook.matcher.with_value(value),
                hook.result,
            );
            match &hook.note {
                Some(note) => rule.with_note(note),
                None => rule,
            }
        })
        .collect();

    Ok(RuleTable::new(&file.host_process, &file.subject, rules))
}

/// Parse and compile a YAML rule table in one step.
pub fn compile_rules_yaml(yaml: &str) -> Result<RuleTable> {
    let file = parse_rules(yaml)?;
    compile_rules(&file)
}
