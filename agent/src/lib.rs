//! carveout agent: the entry point a host's plugin loader calls when a
//! process starts.
//!
//! The agent owns a compiled rule table and installs it exactly once, and only
//! into the process the table names as its host. Loads of every other process
//! are ignored.

pub mod config;
pub mod rules;

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use carveout_intercept::{DiagnosticSink, HostRuntime, InstallReport, Installer, LogSink};
use carveout_policy::RuleTable;
use log::{debug, info};

/// What the host passes to the agent when a process loads.
#[derive(Debug)]
pub struct LoadPackageParam<'a, L: ?Sized> {
    /// Identifier of the process or package being loaded.
    pub package_name: &'a str,
    /// Class loading context of that process.
    pub loader: &'a L,
}

/// The agent installing one rule table.
pub struct Agent {
    table: RuleTable,
    sink: Box<dyn DiagnosticSink>,
    installed: AtomicBool,
}

impl Agent {
    /// Create an agent that reports outcomes through `log`.
    pub fn new(table: RuleTable) -> Self {
        Self::with_sink(table, Box::new(LogSink))
    }

    pub fn with_sink(table: RuleTable, sink: Box<dyn DiagnosticSink>) -> Self {
        Self {
            table,
            sink,
            installed: AtomicBool::new(false),
        }
    }

    /// Create an agent from the built-in rule table.
    pub fn with_default_rules() -> Result<Self> {
        Ok(Self::new(rules::default_rules()?))
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Install the rule table if `param` names the host process.
    ///
    /// Returns `None` when the load is for another process or the table has
    /// already been installed.
    pub fn handle_load_package<H: HostRuntime + ?Sized>(
        &self,
        runtime: &H,
        param: &LoadPackageParam<'_, H::Loader>,
    ) -> Option<InstallReport> {
        if param.package_name != self.table.host_process() {
            debug!("Ignoring load of {}", param.package_name);
            return None;
        }
        if self.installed.swap(true, Ordering::SeqCst) {
            debug!("Rules already installed into {}", param.package_name);
            return None;
        }

        info!(
            "Hooking {} service(s) in {} for {}",
            self.table.len(),
            param.package_name,
            self.table.subject()
        );
        let mut installer = Installer::new(runtime, self.sink.as_ref());
        Some(installer.install_all(self.table.rules(), param.loader))
    }
}
