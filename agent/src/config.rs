//! Rule table discovery: explicit path, environment, config dir, built-in.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use carveout_policy::RuleTable;
use log::debug;

use crate::rules::default_rules;

/// Environment variable naming a rule file to load instead of the default.
pub const RULES_ENV: &str = "CARVEOUT_RULES";

/// Get the XDG config base directory (~/.config or $XDG_CONFIG_HOME).
fn config_base_dir() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        Ok(PathBuf::from(xdg))
    } else {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
        Ok(home.join(".config"))
    }
}

/// Get the user rule file path: ~/.config/carveout/rules.yaml
pub fn user_rules_path() -> Result<PathBuf> {
    Ok(config_base_dir()?.join("carveout").join("rules.yaml"))
}

/// Load and compile a rule file.
pub fn load_rules_file(path: &Path) -> Result<RuleTable> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule file {}", path.display()))?;
    RuleTable::from_yaml(&contents)
        .with_context(|| format!("Invalid rule file {}", path.display()))
}

/// Resolve the effective rule table.
///
/// An explicit path wins, then `$CARVEOUT_RULES`, then the user rule file if
/// it exists, then the built-in table. A named file that is missing or
/// invalid is an error rather than a silent fallback.
pub fn load_rules(explicit: Option<&Path>) -> Result<RuleTable> {
    if let Some(path) = explicit {
        return load_rules_file(path);
    }
    if let Some(path) = std::env::var_os(RULES_ENV) {
        return load_rules_file(Path::new(&path));
    }
    if let Ok(path) = user_rules_path() {
        if path.exists() {
            debug!("Using rule file {}", path.display());
            return load_rules_file(&path);
        }
    }
    debug!("Using built-in rule table");
    default_rules()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "carveout-config-{}-{}.yaml",
            std::process::id(),
            name
        ));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_explicit_path_loads() {
        let path = write_temp(
            "explicit",
            "version: 1\nhost_process: com.example.host\nsubject: com.example.app\n",
        );
        let table = load_rules(Some(&path)).unwrap();
        assert_eq!(table.host_process(), "com.example.host");
        assert!(table.is_empty());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let path = std::env::temp_dir().join("carveout-definitely-missing.yaml");
        let err = load_rules(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to read rule file"));
    }

    #[test]
    fn test_explicit_invalid_file_is_error() {
        let path = write_temp("invalid", "version: 7\nhost_process: a\nsubject: b\n");
        let err = load_rules(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Invalid rule file"));
        assert!(format!("{:#}", err).contains("unsupported rule table version: 7"));
        std::fs::remove_file(&path).ok();
    }
}
