//! Debugger core configuration

use crate::interpreter::constants::{MAX_TOKENS, NR_WP};

/// Capacity limits for the expression engine and watchpoint pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdbConfig {
    /// Number of watchpoint slots
    pub pool_capacity: usize,
    /// Token bound for a single expression
    pub max_tokens: usize,
}

impl SdbConfig {
    pub fn with_pool_capacity(mut self, pool_capacity: usize) -> Self {
        self.pool_capacity = pool_capacity;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl Default for SdbConfig {
    fn default() -> Self {
        SdbConfig {
            pool_capacity: NR_WP,
            max_tokens: MAX_TOKENS,
        }
    }
}
