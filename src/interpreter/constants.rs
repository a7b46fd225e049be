// Limits for the expression engine and watchpoint pool

/// Number of watchpoint slots in the pool
pub const NR_WP: usize = 32;

/// Maximum number of tokens a single expression may produce
pub const MAX_TOKENS: usize = 32;

/// Maximum nesting of subexpressions the evaluator descends into
pub const MAX_DEPTH: usize = 128;
