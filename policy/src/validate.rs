use std::collections::HashSet;

use crate::error::ValidationError;
use crate::parser::RuleFile;

/// Supported rule table versions.
const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Validate a parsed rule file.
pub fn validate_rules(file: &RuleFile) -> Result<(), ValidationError> {
    let version = file.version.ok_or(ValidationError::MissingVersion)?;
    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(ValidationError::UnsupportedVersion(version));
    }

    if file.host_process.trim().is_empty() {
        return Err(ValidationError::MissingHostProcess);
    }
    if file.subject.trim().is_empty() {
        return Err(ValidationError::MissingSubject);
    }

    let mut seen = HashSet::new();
    for (index, hook) in file.hooks.iter().enumerate() {
        if hook.class.trim().is_empty() {
            return Err(ValidationError::EmptyClass(index));
        }
        if hook.method.trim().is_empty() {
            return Err(ValidationError::EmptyMethod(index));
        }

        let name = format!("{}#{}", hook.class, hook.method);
        if hook.value.as_deref().is_some_and(str::is_empty) {
            return Err(ValidationError::EmptyMatchValue(name));
        }
        if !seen.insert((hook.class.as_str(), hook.method.as_str())) {
            return Err(ValidationError::DuplicateTarget(name));
        }
    }

    Ok(())
}
