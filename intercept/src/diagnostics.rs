//! Where installation outcomes are reported.

use std::sync::Mutex;

use carveout_protocol::{HookStatus, InterceptionOutcome};
use log::{info, warn};

/// Fire-and-forget receiver for installation outcomes.
///
/// Implementations should not block for long. A sink that panics is
/// contained by the installer and never changes what gets installed.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, outcome: &InterceptionOutcome);
}

/// Forwards outcomes to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, outcome: &InterceptionOutcome) {
        match &outcome.status {
            HookStatus::Attached => info!(
                "Hooked {} ({} overload(s))",
                outcome.target, outcome.overloads
            ),
            HookStatus::TargetMissing => info!("Skipping {}: not present", outcome.target),
            HookStatus::AttachFailed(reason) => {
                warn!("Error hooking {}: {}", outcome.target, reason)
            }
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _outcome: &InterceptionOutcome) {}
}

/// Keeps every outcome in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    outcomes: Mutex<Vec<InterceptionOutcome>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> Vec<InterceptionOutcome> {
        self.outcomes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, outcome: &InterceptionOutcome) {
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(outcome.clone());
    }
}
