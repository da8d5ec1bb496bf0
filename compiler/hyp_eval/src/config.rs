//! Evaluator limits.

/// Default for [`EvalConfig::max_call_depth`].
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Nested user-function calls allowed before `StackOverflow`.
    pub max_call_depth: usize,
}

impl EvalConfig {
    #[must_use]
    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}
