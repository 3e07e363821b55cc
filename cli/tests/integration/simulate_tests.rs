//! `carveout simulate` against the simulated platform.

use crate::common::*;

#[test]
fn test_simulate_current_platform_attaches_everything() {
    let output = run_carveout(&["simulate"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("7 attached, 0 missing, 0 failed"), "stdout: {}", out);
    assert!(out.contains(
        "probe com.android.server.clipboard.ClipboardService#clipboardAccessAllowed"
    ));
    assert!(out.contains("com.clipboardsync -> true (overridden)"));
    assert!(out.contains("com.example.unrelated -> false (original)"));
}

#[test]
fn test_simulate_old_platform_skips_freezer() {
    let output = run_carveout(&["simulate", "--api-level", "29"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("5 attached, 2 missing, 0 failed"), "stdout: {}", out);
    assert!(out.contains(
        "target missing  com.android.server.am.CachedAppOptimizer#freezeAppAsyncLSP"
    ));
    // Later rules still installed and fire.
    assert!(out.contains("probe com.android.server.am.ProcessList#killPackageProcessesLocked"));
}

#[test]
fn test_simulate_other_package_is_a_no_op() {
    let output = run_carveout(&["simulate", "--package", "com.android.systemui"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains(
        "com.android.systemui is not the host process (android); nothing installed"
    ));
}

#[test]
fn test_simulate_json_outcomes() {
    let output = run_carveout(&["simulate", "--api-level", "29", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let outcomes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let outcomes = outcomes.as_array().unwrap();
    assert_eq!(outcomes.len(), 7);
    assert_eq!(outcomes[0]["target"]["method"], "clipboardAccessAllowed");
    assert_eq!(outcomes[0]["status"]["status"], "attached");
    assert_eq!(outcomes[5]["status"]["status"], "target_missing");
}

#[test]
fn test_simulate_rule_for_unknown_class() {
    let path = write_temp_rules(
        r#"
version: 1
host_process: android
subject: com.clipboardsync
hooks:
  - { class: com.android.server.am.ActivityManagerService, method: forceStopPackage, match: any_text_equals, result: null }
  - { class: com.vendor.server.PowerKeeper, method: killApp, match: any_text_equals, result: null }
  - { class: com.android.server.am.ActivityManagerService, method: killBackgroundProcesses, match: any_text_equals, result: null }
"#,
    );
    let output = run_carveout(&["simulate", "-r", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("2 attached, 1 missing, 0 failed"), "stdout: {}", out);
    assert!(out.contains("com.clipboardsync -> null (overridden)"));
    std::fs::remove_file(&path).ok();
}
