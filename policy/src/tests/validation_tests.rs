//! Tests for rule file validation.

use crate::error::ValidationError;
use crate::parser::parse_rules;
use crate::validate::validate_rules;

fn parse_and_validate(yaml: &str) -> Result<(), ValidationError> {
    let file = parse_rules(yaml).map_err(|_| ValidationError::MissingVersion)?;
    validate_rules(&file)
}

#[test]
fn test_validate_valid_minimal() {
    assert!(parse_and_validate("version: 1\nhost_process: android\nsubject: s\n").is_ok());
}

#[test]
fn test_validate_missing_version() {
    assert_eq!(
        parse_and_validate("host_process: android\nsubject: s\n"),
        Err(ValidationError::MissingVersion)
    );
}

#[test]
fn test_validate_unsupported_version() {
    assert_eq!(
        parse_and_validate("version: 99\nhost_process: android\nsubject: s\n"),
        Err(ValidationError::UnsupportedVersion(99))
    );
}

#[test]
fn test_validate_missing_host_process() {
    assert_eq!(
        parse_and_validate("version: 1\nsubject: s\n"),
        Err(ValidationError::MissingHostProcess)
    );
}

#[test]
fn test_validate_blank_subject() {
    assert_eq!(
        parse_and_validate("version: 1\nhost_process: android\nsubject: '  '\n"),
        Err(ValidationError::MissingSubject)
    );
}

#[test]
fn test_validate_empty_class_and_method() {
    let yaml = r#"
version: 1
host_process: android
subject: s
hooks:
  - { class: A, method: a, match: any_contains, result: null }
  - { method: b, match: any_contains, result: null }
"#;
    assert_eq!(parse_and_validate(yaml), Err(ValidationError::EmptyClass(1)));

    let yaml = r#"
version: 1
host_process: android
subject: s
hooks:
  - { class: A, method: "", match: any_contains, result: null }
"#;
    assert_eq!(parse_and_validate(yaml), Err(ValidationError::EmptyMethod(0)));
}

#[test]
fn test_validate_empty_value_override() {
    let yaml = r#"
version: 1
host_process: android
subject: s
hooks:
  - { class: A, method: a, match: any_contains, result: null, value: "" }
"#;
    assert_eq!(
        parse_and_validate(yaml),
        Err(ValidationError::EmptyMatchValue("A#a".to_string()))
    );
}

#[test]
fn test_validate_duplicate_target() {
    let yaml = r#"
version: 1
host_process: android
subject: s
hooks:
  - { class: A, method: a, match: any_contains, result: null }
  - { class: A, method: b, match: any_contains, result: null }
  - { class: A, method: a, match: first_text_equals, result: true }
"#;
    assert_eq!(
        parse_and_validate(yaml),
        Err(ValidationError::DuplicateTarget("A#a".to_string()))
    );
}

#[test]
fn test_validate_same_method_on_different_classes() {
    let yaml = r#"
version: 1
host_process: android
subject: s
hooks:
  - { class: A, method: kill, match: any_text_equals, result: null }
  - { class: B, method: kill, match: any_text_equals, result: null }
"#;
    assert!(parse_and_validate(yaml).is_ok());
}
