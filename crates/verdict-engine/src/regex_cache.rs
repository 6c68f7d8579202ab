//! Memoized regex compilation for `MATCHES`
//!
//! Compilation is keyed by pattern text and happens at most once per
//! distinct pattern per cache. The cache is scoped to an engine instance,
//! so concurrent engines never contend on each other's patterns.

use parking_lot::RwLock;
use regex::Regex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use verdict_core::EvalError;

#[derive(Default)]
pub struct RegexCache {
    compiled: RwLock<HashMap<String, Regex>>,
    compiles: AtomicUsize,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the compiled regex for `pattern`, compiling and caching it on
    /// first use. An invalid pattern is an evaluation error, not a panic.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Regex, EvalError> {
        if let Some(re) = self.compiled.read().get(pattern) {
            return Ok(re.clone());
        }

        let mut compiled = self.compiled.write();
        // Racing writer may have compiled it while we waited for the lock.
        if let Some(re) = compiled.get(pattern) {
            return Ok(re.clone());
        }
        let re = Regex::new(pattern)
            .map_err(|err| EvalError::invalid_type(format!("{pattern}: {err}")))?;
        self.compiles.fetch_add(1, Ordering::Relaxed);
        compiled.insert(pattern.to_string(), re.clone());
        Ok(re)
    }

    /// Number of distinct patterns compiled so far.
    pub fn compile_count(&self) -> usize {
        self.compiles.load(Ordering::Relaxed)
    }
}
