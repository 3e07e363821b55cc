use thiserror::Error;

/// Why a rule could not be attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    /// The class exists but has no method of this name.
    #[error("no method named '{0}'")]
    NoSuchMethod(String),

    #[error("already attached")]
    AlreadyAttached,

    #[error("'{0}' is a native method")]
    NativeMethod(String),

    /// A host capability panicked while locating or attaching.
    #[error("host panicked: {0}")]
    Panicked(String),
}

/// Errors raised by [`MemoryRuntime::invoke`](crate::MemoryRuntime::invoke).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    #[error("class not found: {0}")]
    NoSuchClass(String),

    #[error("method not found: {0}")]
    NoSuchMethod(String),

    #[error("no overload of '{method}' takes {arity} argument(s)")]
    NoMatchingOverload { method: String, arity: usize },
}

/// Best-effort text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
