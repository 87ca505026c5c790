//! Interpreter limits.

/// Evaluator configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Nested interpreted calls allowed before `StackOverflow`.
    pub max_call_depth: usize,
}

impl EvalConfig {
    pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_call_depth: Self::DEFAULT_MAX_CALL_DEPTH,
        }
    }
}
