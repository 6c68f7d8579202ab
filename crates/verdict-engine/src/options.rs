//! Evaluation options
//!
//! A pure configuration bag, immutable once passed to `evaluate`. The
//! logger is a caller-supplied hook invoked once per leaf comparison with
//! the field path, operator, resolved actual and expected operand; it has
//! no influence on the result.

use std::fmt;
use std::sync::Arc;
use verdict_core::{Operand, Operator, Value};

/// Per-leaf observation callback.
pub type Logger = dyn Fn(&str, Operator, Option<&Value>, Option<&Operand>) + Send + Sync;

/// Options controlling one evaluation call.
#[derive(Clone, Default)]
pub struct EvalOptions {
    /// Capture wall-clock duration per node, including recursive descent.
    pub timing: bool,
    /// Observation callback invoked for every leaf comparison.
    pub logger: Option<Arc<Logger>>,
}

impl EvalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable timing capture.
    pub fn with_timing(mut self) -> Self {
        self.timing = true;
        self
    }

    /// Install a per-leaf logger.
    pub fn with_logger<F>(mut self, logger: F) -> Self
    where
        F: Fn(&str, Operator, Option<&Value>, Option<&Operand>) + Send + Sync + 'static,
    {
        self.logger = Some(Arc::new(logger));
        self
    }
}

impl fmt::Debug for EvalOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalOptions")
            .field("timing", &self.timing)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_style() {
        let opts = EvalOptions::new();
        assert!(!opts.timing);
        assert!(opts.logger.is_none());

        let opts = EvalOptions::new()
            .with_timing()
            .with_logger(|_, _, _, _| {});
        assert!(opts.timing);
        assert!(opts.logger.is_some());
    }
}
