//! The boundary between the engine and the host's reflection facility.

use std::sync::Arc;

use crate::interceptor::listener::CallListener;
use crate::types::HookError;

pub mod memory;

/// Capabilities the host process provides to the engine.
pub trait HostRuntime {
    /// Handle to a resolved class.
    type Class: Clone;
    /// Class loading context that names are resolved in.
    type Loader: ?Sized;

    /// Resolve a class by fully qualified name.
    ///
    /// A host build that lacks the class returns `None`; that is an expected
    /// outcome, not an error.
    fn find_class(&self, name: &str, loader: &Self::Loader) -> Option<Self::Class>;

    /// Register `listener` to run before every overload of `method` on
    /// `class`, returning how many overloads were hooked.
    ///
    /// Registration is all or nothing: an implementation that returns an
    /// error or panics must not leave the listener on any overload. The
    /// installer cannot detach a listener it has no record of.
    fn hook_all_methods(
        &self,
        class: &Self::Class,
        method: &str,
        listener: Arc<dyn CallListener>,
    ) -> Result<usize, HookError>;
}
