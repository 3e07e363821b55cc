//! carveout-intercept: conditional call interception.
//!
//! The engine locates named methods inside a host runtime, attaches an
//! [`InterceptionPoint`] to every overload, and on each call either
//! short-circuits the original body with a rule's fixed result or lets the
//! call through untouched.

pub mod diagnostics;
pub mod installer;
pub mod interceptor;
pub mod locator;
pub mod runtime;
pub mod types;

// Re-exports for convenience (flattened imports)
pub use diagnostics::{DiagnosticSink, LogSink, MemorySink, NullSink};
pub use installer::{InstallReport, Installer};
pub use interceptor::invocation::InvocationContext;
pub use interceptor::listener::CallListener;
pub use interceptor::{attach, Attachment, InterceptionPoint};
pub use locator::locate;
pub use runtime::memory::{ClassBuilder, MemoryClass, MemoryRuntime};
pub use runtime::HostRuntime;
pub use types::{HookError, InvokeError};
