//! `carveout rules` and `carveout check`.

use crate::common::*;

#[test]
fn test_rules_prints_builtin_table() {
    let output = run_carveout(&["rules"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("host_process: android"));
    assert!(out.contains("subject: com.clipboardsync"));
    assert!(out.contains(
        "com.android.server.clipboard.ClipboardService#clipboardAccessAllowed  first_text_equals(\"com.clipboardsync\") -> true"
    ));
    assert!(out.contains(
        "killPackageProcessesLocked  any_text_equals(\"com.clipboardsync\") -> false"
    ));
    assert_eq!(out.lines().filter(|l| l.contains("#")).count(), 7);
}

#[test]
fn test_rules_from_explicit_file() {
    let path = write_temp_rules(
        r#"
version: 1
host_process: com.example.host
subject: com.example.app
hooks:
  - { class: com.example.Service, method: check, match: any_contains, result: null }
"#,
    );
    let output = run_carveout(&["rules", "-r", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("host_process: com.example.host"));
    assert!(out.contains("com.example.Service#check  any_contains(\"com.example.app\") -> null"));
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_check_accepts_valid_file() {
    let path = write_temp_rules(
        "version: 1\nhost_process: android\nsubject: com.example.app\nhooks:\n  - { class: A, method: a, match: first_text_equals, result: true }\n",
    );
    let output = run_carveout(&["check", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("ok: 1 hook(s) for com.example.app in android"));
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_check_rejects_duplicate_targets() {
    let path = write_temp_rules(
        r#"
version: 1
host_process: android
subject: s
hooks:
  - { class: A, method: a, match: any_contains, result: null }
  - { class: A, method: a, match: any_text_equals, result: false }
"#,
    );
    let output = run_carveout(&["check", path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("'A#a' is hooked more than once"));
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_check_missing_file() {
    let output = run_carveout(&["check", "/nonexistent/carveout/rules.yaml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to read rule file"));
}
