use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::debug;

use carveout_policy::HookRule;
use carveout_protocol::{Substitution, Target};

use crate::interceptor::invocation::InvocationContext;
use crate::interceptor::listener::CallListener;
use crate::runtime::HostRuntime;
use crate::types::HookError;

pub mod invocation;
pub mod listener;

/// Live attachment of one rule to a resolved method.
///
/// Holds nothing but the immutable rule, so the decision below is reentrant
/// and needs no locking. Points are never detached; the host keeps them
/// alive for the rest of the process.
#[derive(Debug)]
pub struct InterceptionPoint {
    rule: HookRule,
}

impl InterceptionPoint {
    pub fn new(rule: HookRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &HookRule {
        &self.rule
    }
}

impl CallListener for InterceptionPoint {
    fn on_enter(&self, context: &mut InvocationContext<'_>) {
        let args = context.arguments();
        if let Some(substitution) = guarded(self.rule.target(), || self.rule.evaluate(args)) {
            match self.rule.note() {
                Some(note) => debug!("{} ({} -> {})", note, self.rule.target(), substitution),
                None => debug!("Overriding {} -> {}", self.rule.target(), substitution),
            }
            context.replace_return_value(substitution.value());
        }
    }
}

/// Run a call-time decision. A fault counts as no match; nothing may unwind
/// into the host.
fn guarded<F>(target: &Target, decide: F) -> Option<Substitution>
where
    F: FnOnce() -> Option<Substitution>,
{
    match panic::catch_unwind(AssertUnwindSafe(decide)) {
        Ok(decision) => decision,
        Err(_) => {
            debug!("Predicate fault in {}, passing call through", target);
            None
        }
    }
}

/// A successful [`attach`].
#[derive(Debug, Clone)]
pub struct Attachment {
    pub point: Arc<InterceptionPoint>,
    /// Number of overloads the point now covers.
    pub overloads: usize,
}

/// Attach `rule` to every overload of its method on `class`.
///
/// A class without any method of that name yields
/// [`HookError::NoSuchMethod`]; nothing is registered in that case.
pub fn attach<H: HostRuntime + ?Sized>(
    runtime: &H,
    class: &H::Class,
    rule: &HookRule,
) -> Result<Attachment, HookError> {
    let method = &rule.target().method;
    let point = Arc::new(InterceptionPoint::new(rule.clone()));
    let listener: Arc<dyn CallListener> = point.clone();

    let overloads = runtime.hook_all_methods(class, method, listener)?;
    if overloads == 0 {
        return Err(HookError::NoSuchMethod(method.clone()));
    }

    Ok(Attachment { point, overloads })
}
