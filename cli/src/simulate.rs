//! A simulated platform service process to install rule tables into.
//!
//! Method shapes follow the platform services the default table targets;
//! bodies are stand-ins that count how often the original code really ran.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use carveout_intercept::{ClassBuilder, MemoryRuntime};
use carveout_protocol::{InterceptionOutcome, Target, Value};

/// Loader name the simulated services are defined in.
pub const SYSTEM_LOADER: &str = "system_server";

/// First API level that ships the cached app freezer.
const FREEZER_API_LEVEL: u32 = 30;

type ArgsFn = fn(&str) -> Vec<Value>;

struct ServiceMethod {
    class: &'static str,
    method: &'static str,
    min_api: u32,
    /// Builds a realistic argument list naming `package`.
    args: ArgsFn,
    result: fn() -> Value,
}

fn process_record(package: &str) -> Value {
    Value::object("ProcessRecord", format!("4711:{}/u0a77", package))
}

const SERVICES: &[ServiceMethod] = &[
    ServiceMethod {
        class: "com.android.server.clipboard.ClipboardService",
        method: "clipboardAccessAllowed",
        min_api: 0,
        args: |pkg| {
            vec![
                Value::Int(29),
                Value::text(pkg),
                Value::Null,
                Value::Int(10077),
                Value::Int(0),
            ]
        },
        result: || Value::Bool(false),
    },
    ServiceMethod {
        class: "com.android.server.clipboard.ClipboardService",
        method: "showAccessNotificationLocked",
        min_api: 0,
        args: |pkg| {
            vec![
                Value::text(pkg),
                Value::Int(10077),
                Value::Int(0),
                Value::opaque("PerUserClipboard"),
            ]
        },
        result: || Value::Null,
    },
    ServiceMethod {
        class: "com.android.server.am.ActivityManagerService",
        method: "forceStopPackage",
        min_api: 0,
        args: |pkg| vec![Value::text(pkg), Value::Int(0)],
        result: || Value::Null,
    },
    ServiceMethod {
        class: "com.android.server.am.ActivityManagerService",
        method: "killBackgroundProcesses",
        min_api: 0,
        args: |pkg| vec![Value::text(pkg), Value::Int(0)],
        result: || Value::Null,
    },
    ServiceMethod {
        class: "com.android.server.am.ProcessList",
        method: "killPackageProcessesLocked",
        min_api: 0,
        args: |pkg| {
            vec![
                Value::text(pkg),
                Value::Int(-1),
                Value::Int(0),
                Value::Int(900),
                Value::text("stop user"),
            ]
        },
        result: || Value::Bool(true),
    },
    ServiceMethod {
        class: "com.android.server.am.CachedAppOptimizer",
        method: "freezeAppAsyncLSP",
        min_api: FREEZER_API_LEVEL,
        args: |pkg| vec![process_record(pkg)],
        result: || Value::Null,
    },
    ServiceMethod {
        class: "com.android.server.am.CachedAppOptimizer",
        method: "freezeAppAsyncInternalLSP",
        min_api: FREEZER_API_LEVEL,
        args: |pkg| vec![process_record(pkg), Value::Int(0), Value::Bool(false)],
        result: || Value::Null,
    },
    ServiceMethod {
        class: "com.android.server.am.OomAdjuster",
        method: "shouldKillExcessiveProcesses",
        min_api: 0,
        args: |_| vec![Value::Int(123_456)],
        result: || Value::Bool(true),
    },
];

/// Simulated service process for one platform API level.
pub struct Platform {
    pub runtime: MemoryRuntime,
    body_calls: Arc<AtomicUsize>,
}

/// Result of calling one hooked method on behalf of one package.
#[derive(Debug)]
pub struct Probe {
    pub package: String,
    pub result: Value,
    /// Whether the original body was skipped.
    pub overridden: bool,
}

impl Platform {
    pub fn new(api_level: u32) -> Self {
        let runtime = MemoryRuntime::new();
        let body_calls = Arc::new(AtomicUsize::new(0));

        let mut classes: Vec<(&str, ClassBuilder)> = Vec::new();
        for svc in SERVICES.iter().filter(|s| api_level >= s.min_api) {
            let calls = body_calls.clone();
            let result = svc.result;
            let body = move |_: &[Value]| {
                calls.fetch_add(1, Ordering::SeqCst);
                result()
            };
            let arity = (svc.args)("").len();

            match classes.iter().position(|(name, _)| *name == svc.class) {
                Some(i) => {
                    let (name, builder) = classes.remove(i);
                    classes.insert(i, (name, builder.method(svc.method, arity, body)));
                }
                None => classes.push((
                    svc.class,
                    ClassBuilder::new(svc.class).method(svc.method, arity, body),
                )),
            }
        }
        for (_, builder) in classes {
            runtime.define_class(SYSTEM_LOADER, builder);
        }

        Self {
            runtime,
            body_calls,
        }
    }

    /// Call `target` as if `package` were the subject of the call.
    ///
    /// Returns `None` for methods this platform does not model.
    pub fn probe(&self, target: &Target, package: &str) -> Result<Option<Probe>> {
        let Some(svc) = SERVICES
            .iter()
            .find(|s| s.class == target.class && s.method == target.method)
        else {
            return Ok(None);
        };

        let before = self.body_calls.load(Ordering::SeqCst);
        let result = self.runtime.invoke(
            SYSTEM_LOADER,
            &target.class,
            &target.method,
            &(svc.args)(package),
        )?;
        let overridden = self.body_calls.load(Ordering::SeqCst) == before;

        Ok(Some(Probe {
            package: package.to_string(),
            result,
            overridden,
        }))
    }
}

/// Probe every attached outcome with the subject and with an unrelated package.
pub fn probe_all(
    platform: &Platform,
    outcomes: &[InterceptionOutcome],
    subject: &str,
    other: &str,
) -> Result<Vec<(Target, Probe, Probe)>> {
    let mut probes = Vec::new();
    for outcome in outcomes.iter().filter(|o| o.status.is_attached()) {
        let hit = platform.probe(&outcome.target, subject)?;
        let miss = platform.probe(&outcome.target, other)?;
        if let (Some(hit), Some(miss)) = (hit, miss) {
            probes.push((outcome.target.clone(), hit, miss));
        }
    }
    Ok(probes)
}
