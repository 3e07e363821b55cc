//! Installs a rule list into a host, one isolated attempt per rule.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use carveout_policy::HookRule;
use carveout_protocol::{HookStatus, InterceptionOutcome, Target};
use log::{debug, info};

use crate::diagnostics::DiagnosticSink;
use crate::interceptor::{attach, InterceptionPoint};
use crate::locator::locate;
use crate::runtime::HostRuntime;
use crate::types::{panic_message, HookError};

/// Walks rules in declaration order and attaches each one independently.
///
/// Whatever happens to one rule (missing class, refused attach, a panicking
/// host capability) is recorded as that rule's outcome and the next rule is
/// attempted regardless. Rules are never retried or detached.
pub struct Installer<'a, H: HostRuntime + ?Sized> {
    runtime: &'a H,
    sink: &'a dyn DiagnosticSink,
    points: HashMap<Target, Arc<InterceptionPoint>>,
}

impl<'a, H: HostRuntime + ?Sized> Installer<'a, H> {
    pub fn new(runtime: &'a H, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            runtime,
            sink,
            points: HashMap::new(),
        }
    }

    /// Attempt every rule, returning one outcome per rule in the same order.
    pub fn install_all(&mut self, rules: &[HookRule], loader: &H::Loader) -> InstallReport {
        let outcomes: Vec<_> = rules
            .iter()
            .map(|rule| {
                let outcome = self.install(rule, loader);
                self.report(&outcome);
                outcome
            })
            .collect();

        let report = InstallReport::new(outcomes);
        info!(
            "Installed {}/{} hook(s): {} missing, {} failed",
            report.attached(),
            report.len(),
            report.missing(),
            report.failed()
        );
        report
    }

    /// Attempt a single rule.
    pub fn install(&mut self, rule: &HookRule, loader: &H::Loader) -> InterceptionOutcome {
        let target = rule.target().clone();
        if self.points.contains_key(&target) {
            return InterceptionOutcome::failed(target, HookError::AlreadyAttached.to_string());
        }

        let runtime = self.runtime;
        let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
            let class = locate(runtime, &target.class, loader)?;
            Some(attach(runtime, &class, rule))
        }));

        match attempt {
            Ok(None) | Ok(Some(Err(HookError::NoSuchMethod(_)))) => {
                InterceptionOutcome::missing(target)
            }
            Ok(Some(Ok(attachment))) => {
                debug!("Attached {} to {} overload(s)", target, attachment.overloads);
                self.points.insert(target.clone(), attachment.point);
                InterceptionOutcome::attached(target, attachment.overloads)
            }
            Ok(Some(Err(err))) => InterceptionOutcome::failed(target, err.to_string()),
            Err(payload) => {
                let err = HookError::Panicked(panic_message(payload.as_ref()));
                InterceptionOutcome::failed(target, err.to_string())
            }
        }
    }

    // A failing sink is dropped on the floor; installation carries on.
    fn report(&self, outcome: &InterceptionOutcome) {
        let sink = self.sink;
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| sink.record(outcome))) {
            debug!(
                "Diagnostic sink failed on {}: {}",
                outcome.target,
                panic_message(payload.as_ref())
            );
        }
    }

    /// Interception points attached so far.
    pub fn points(&self) -> impl Iterator<Item = &Arc<InterceptionPoint>> {
        self.points.values()
    }

    pub fn is_attached(&self, target: &Target) -> bool {
        self.points.contains_key(target)
    }
}

/// Outcomes of one `install_all` pass, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstallReport {
    outcomes: Vec<InterceptionOutcome>,
}

impl InstallReport {
    pub fn new(outcomes: Vec<InterceptionOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[InterceptionOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<InterceptionOutcome> {
        self.outcomes
    }

    pub fn statuses(&self) -> Vec<HookStatus> {
        self.outcomes.iter().map(|o| o.status.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn attached(&self) -> usize {
        self.count(|s| matches!(s, HookStatus::Attached))
    }

    pub fn missing(&self) -> usize {
        self.count(|s| matches!(s, HookStatus::TargetMissing))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, HookStatus::AttachFailed(_)))
    }

    fn count(&self, f: impl Fn(&HookStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| f(&o.status)).count()
    }
}
