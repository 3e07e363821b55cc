//! Tests for rule file parsing.

use carveout_protocol::Substitution;

use crate::error::RuleError;
use crate::parser::parse_rules;
use crate::predicate::MatchKind;

#[test]
fn test_parse_full_entry() {
    let yaml = r#"
version: 1
host_process: android
subject: com.example.app
hooks:
  - class: com.android.server.am.ProcessList
    method: killPackageProcessesLocked
    match: any_text_equals
    result: false
    note: Preventing kill
    value: com.example.other
"#;
    let file = parse_rules(yaml).unwrap();
    assert_eq!(file.version, Some(1));
    assert_eq!(file.host_process, "android");
    assert_eq!(file.subject, "com.example.app");
    assert_eq!(file.hooks.len(), 1);

    let hook = &file.hooks[0];
    assert_eq!(hook.class, "com.android.server.am.ProcessList");
    assert_eq!(hook.method, "killPackageProcessesLocked");
    assert_eq!(hook.matcher, MatchKind::AnyTextEquals);
    assert_eq!(hook.result, Substitution::ReturnFalse);
    assert_eq!(hook.note.as_deref(), Some("Preventing kill"));
    assert_eq!(hook.value.as_deref(), Some("com.example.other"));
}

#[test]
fn test_parse_result_literals() {
    let yaml = r#"
version: 1
host_process: android
subject: s
hooks:
  - { class: A, method: a, match: first_text_equals, result: true }
  - { class: A, method: b, match: any_text_equals, result: false }
  - { class: A, method: c, match: any_contains, result: null }
  - { class: A, method: d, match: any_contains, result: ~ }
"#;
    let file = parse_rules(yaml).unwrap();
    let results: Vec<_> = file.hooks.iter().map(|h| h.result).collect();
    assert_eq!(
        results,
        vec![
            Substitution::ReturnTrue,
            Substitution::ReturnFalse,
            Substitution::ReturnNull,
            Substitution::ReturnNull,
        ]
    );
}

#[test]
fn test_parse_missing_hooks_is_empty() {
    let file = parse_rules("version: 1\nhost_process: android\nsubject: s\n").unwrap();
    assert!(file.hooks.is_empty());
}

#[test]
fn test_parse_unknown_match_kind() {
    let yaml = r#"
version: 1
host_process: android
subject: s
hooks:
  - { class: A, method: a, match: regex, result: true }
"#;
    assert!(matches!(parse_rules(yaml), Err(RuleError::YamlParse(_))));
}

#[test]
fn test_parse_missing_result() {
    let yaml = r#"
version: 1
host_process: android
subject: s
hooks:
  - { class: A, method: a, match: any_contains }
"#;
    assert!(matches!(parse_rules(yaml), Err(RuleError::YamlParse(_))));
}

#[test]
fn test_parse_rejects_unknown_keys() {
    let yaml = r#"
version: 1
host_process: android
subject: s
hooks:
  - { class: A, method: a, match: any_contains, result: null, retries: 3 }
"#;
    assert!(matches!(parse_rules(yaml), Err(RuleError::YamlParse(_))));
}

#[test]
fn test_parse_not_a_mapping() {
    assert!(parse_rules("- just\n- a list\n").is_err());
}
