//! Execution settings.

use hyp_eval::{EvalConfig, DEFAULT_MAX_CALL_DEPTH};

/// Environment variable overriding [`Config::max_call_depth`].
pub const MAX_CALL_DEPTH_VAR: &str = "HYP_MAX_CALL_DEPTH";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub max_call_depth: usize,
}

impl Config {
    /// Defaults overridden by `HYP_MAX_CALL_DEPTH`.
    ///
    /// Values that are not a positive integer are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        if let Some(raw) = lookup(MAX_CALL_DEPTH_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => config.max_call_depth = depth,
                _ => tracing::warn!(
                    value = %raw,
                    default = config.max_call_depth,
                    "ignoring invalid {MAX_CALL_DEPTH_VAR}"
                ),
            }
        }
        config
    }

    pub fn eval_config(&self) -> EvalConfig {
        EvalConfig::default().with_max_call_depth(self.max_call_depth)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}
