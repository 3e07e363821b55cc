//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

static FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn carveout_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_carveout"))
}

/// Run the CLI with user configuration hidden, so only built-in or explicit
/// rule tables are used.
pub fn run_carveout(args: &[&str]) -> Output {
    let isolated_config =
        std::env::temp_dir().join(format!("carveout-test-xdg-{}", std::process::id()));
    Command::new(carveout_bin())
        .args(args)
        .env_remove("CARVEOUT_RULES")
        .env("XDG_CONFIG_HOME", isolated_config)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run carveout")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Write a temporary rule YAML file and return its path.
/// Uses a unique name per call to avoid conflicts when tests run in parallel.
pub fn write_temp_rules(content: &str) -> PathBuf {
    let id = FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!(
        "carveout-test-rules-{}-{}.yaml",
        std::process::id(),
        id
    ));
    let mut f = std::fs::File::create(&path).expect("failed to create temp rule file");
    f.write_all(content.as_bytes()).expect("failed to write rules");
    path
}
