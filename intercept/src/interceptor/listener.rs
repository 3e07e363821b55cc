use crate::interceptor::invocation::InvocationContext;

/// Callback run by the host before the body of a hooked method.
///
/// Implementations are shared by every thread that enters the method, so
/// `on_enter` must not block, must not take locks the host may already hold,
/// and must not unwind into the caller.
pub trait CallListener: Send + Sync {
    fn on_enter(&self, context: &mut InvocationContext<'_>);
}
