use carveout_protocol::Value;

/// One in-flight call of a hooked method, as seen by its listeners.
///
/// Arguments are read-only: a listener can only decide whether the original
/// body runs, never alter what it runs with.
#[derive(Debug)]
pub struct InvocationContext<'a> {
    pub class: &'a str,
    pub method: &'a str,
    args: &'a [Value],
    return_value: Option<Value>,
    /// When set during `on_enter`, the original body is skipped and the
    /// value from `replace_return_value` is returned directly.
    skip_original: bool,
}

impl<'a> InvocationContext<'a> {
    pub fn new(class: &'a str, method: &'a str, args: &'a [Value]) -> Self {
        Self {
            class,
            method,
            args,
            return_value: None,
            skip_original: false,
        }
    }

    pub fn arguments(&self) -> &'a [Value] {
        self.args
    }

    pub fn get_nth_argument(&self, n: usize) -> Option<&'a Value> {
        self.args.get(n)
    }

    /// Set the call's result and mark it handled.
    pub fn replace_return_value(&mut self, value: Value) {
        self.return_value = Some(value);
        self.skip_original = true;
    }

    pub fn is_handled(&self) -> bool {
        self.skip_original
    }

    /// The substitute result, if the call was handled.
    pub fn into_return_value(self) -> Option<Value> {
        if self.skip_original {
            self.return_value
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unhandled_has_no_return_value() {
        let args = [Value::text("a")];
        let ctx = InvocationContext::new("C", "m", &args);
        assert!(!ctx.is_handled());
        assert_eq!(ctx.get_nth_argument(0), Some(&Value::text("a")));
        assert_eq!(ctx.get_nth_argument(1), None);
        assert_eq!(ctx.into_return_value(), None);
    }

    #[test]
    fn test_replace_marks_handled() {
        let mut ctx = InvocationContext::new("C", "m", &[]);
        ctx.replace_return_value(Value::Null);
        assert!(ctx.is_handled());
        assert_eq!(ctx.into_return_value(), Some(Value::Null));
    }
}
