//! Custom-function registry
//!
//! A concurrency-safe mapping from predicate name to a callable, consulted
//! for `CUSTOM_FUNC` leaf nodes. The registry is scoped to an [`Engine`]
//! instance rather than the process, so tests and embedders can hold
//! isolated registries.
//!
//! [`Engine`]: crate::Engine

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use verdict_core::{error::Result, Value};

/// A registered custom predicate. Invoked with the resolved actual value
/// prepended to the extra arguments from the rule's operand list.
pub type CustomFn = Arc<dyn Fn(&[Value]) -> Result<bool> + Send + Sync>;

/// Name-to-callable map with reader/writer locking. Registration is rare
/// and evaluation reads are frequent; the write critical section covers a
/// single map insert.
#[derive(Default)]
pub struct FunctionRegistry {
    funcs: RwLock<HashMap<String, CustomFn>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under a name. The last registration for a given
    /// name wins.
    pub fn register<F>(&self, name: impl Into<String>, func: F)
    where
        F: Fn(&[Value]) -> Result<bool> + Send + Sync + 'static,
    {
        self.funcs.write().insert(name.into(), Arc::new(func));
    }

    /// Look up a function by name.
    pub fn get(&self, name: &str) -> Option<CustomFn> {
        self.funcs.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.funcs.read().contains_key(name)
    }
}
