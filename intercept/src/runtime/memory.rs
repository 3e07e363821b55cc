//! In-process host with plain Rust method bodies.
//!
//! Classes are registered per loader name; each method may have several
//! overloads, selected at call time by arity. Hooks run exactly like a real
//! host's before-call callbacks: in attachment order, with the first handled
//! call short-circuiting the body.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use carveout_protocol::Value;
use log::debug;

use crate::interceptor::invocation::InvocationContext;
use crate::interceptor::listener::CallListener;
use crate::runtime::HostRuntime;
use crate::types::{HookError, InvokeError};

pub type MethodBody = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

struct Overload {
    arity: usize,
    native: bool,
    body: MethodBody,
    listeners: RwLock<Vec<Arc<dyn CallListener>>>,
}

struct ClassDef {
    name: String,
    methods: HashMap<String, Vec<Overload>>,
}

/// Handle to a class defined in a [`MemoryRuntime`].
#[derive(Clone)]
pub struct MemoryClass(Arc<ClassDef>);

impl MemoryClass {
    pub fn name(&self) -> &str {
        &self.0.name
    }
}

impl fmt::Debug for MemoryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MemoryClass").field(&self.0.name).finish()
    }
}

/// Builder for a class definition.
pub struct ClassBuilder {
    name: String,
    methods: HashMap<String, Vec<Overload>>,
}

impl ClassBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: HashMap::new(),
        }
    }

    /// Add an overload of `name` taking `arity` arguments.
    pub fn method<F>(self, name: &str, arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.overload(name, arity, false, Arc::new(body))
    }

    /// Add an overload implemented outside the managed runtime; it can be
    /// called but not hooked.
    pub fn native_method<F>(self, name: &str, arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.overload(name, arity, true, Arc::new(body))
    }

    fn overload(mut self, name: &str, arity: usize, native: bool, body: MethodBody) -> Self {
        self.methods.entry(name.to_string()).or_default().push(Overload {
            arity,
            native,
            body,
            listeners: RwLock::new(Vec::new()),
        });
        self
    }
}

/// A simulated host process.
#[derive(Default)]
pub struct MemoryRuntime {
    loaders: RwLock<HashMap<String, HashMap<String, MemoryClass>>>,
}

impl MemoryRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a class visible to `loader`, replacing any previous definition.
    pub fn define_class(&self, loader: &str, class: ClassBuilder) -> MemoryClass {
        let handle = MemoryClass(Arc::new(ClassDef {
            name: class.name,
            methods: class.methods,
        }));
        let mut loaders = self.loaders.write().unwrap_or_else(|e| e.into_inner());
        loaders
            .entry(loader.to_string())
            .or_default()
            .insert(handle.0.name.clone(), handle.clone());
        handle
    }

    fn lookup(&self, loader: &str, class: &str) -> Option<MemoryClass> {
        let loaders = self.loaders.read().unwrap_or_else(|e| e.into_inner());
        loaders.get(loader)?.get(class).cloned()
    }

    /// Number of listeners attached to each overload of `method`.
    pub fn listener_counts(&self, loader: &str, class: &str, method: &str) -> Vec<usize> {
        let Some(class) = self.lookup(loader, class) else {
            return Vec::new();
        };
        class
            .0
            .methods
            .get(method)
            .map(|overloads| {
                overloads
                    .iter()
                    .map(|o| o.listeners.read().unwrap_or_else(|e| e.into_inner()).len())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Call `class.method(args)` the way the host would, running hooks first.
    pub fn invoke(
        &self,
        loader: &str,
        class: &str,
        method: &str,
        args: &[Value],
    ) -> Result<Value, InvokeError> {
        let handle = self
            .lookup(loader, class)
            .ok_or_else(|| InvokeError::NoSuchClass(class.to_string()))?;
        let overloads = handle
            .0
            .methods
            .get(method)
            .ok_or_else(|| InvokeError::NoSuchMethod(format!("{}#{}", class, method)))?;
        let overload = overloads
            .iter()
            .find(|o| o.arity == args.len())
            .ok_or_else(|| InvokeError::NoMatchingOverload {
                method: method.to_string(),
                arity: args.len(),
            })?;

        // Snapshot so no runtime lock is held while listeners run.
        let listeners = overload
            .listeners
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        let mut context = InvocationContext::new(class, method, args);
        for listener in &listeners {
            listener.on_enter(&mut context);
            if context.is_handled() {
                break;
            }
        }

        match context.into_return_value() {
            Some(value) => Ok(value),
            None => Ok((overload.body)(args)),
        }
    }
}

impl HostRuntime for MemoryRuntime {
    type Class = MemoryClass;
    type Loader = str;

    fn find_class(&self, name: &str, loader: &str) -> Option<MemoryClass> {
        self.lookup(loader, name)
    }

    fn hook_all_methods(
        &self,
        class: &MemoryClass,
        method: &str,
        listener: Arc<dyn CallListener>,
    ) -> Result<usize, HookError> {
        let Some(overloads) = class.0.methods.get(method) else {
            return Ok(0);
        };
        if overloads.iter().any(|o| o.native) {
            return Err(HookError::NativeMethod(format!("{}#{}", class.name(), method)));
        }

        for overload in overloads {
            overload
                .listeners
                .write()
                .unwrap_or_else(|e| e.into_inner())
                .push(listener.clone());
        }
        debug!(
            "Registered listener on {} overload(s) of {}#{}",
            overloads.len(),
            class.name(),
            method
        );
        Ok(overloads.len())
    }
}
