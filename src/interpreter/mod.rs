//! Expression evaluation
//!
//! - [`engine`]: the span evaluator and the parsed [`engine::Expression`]
//! - [`ops`]: operator semantics (binary arithmetic/comparison/logic, prefix ops)
//! - [`errors`]: the [`errors::ExprError`] taxonomy
//! - [`constants`]: default limits
//!
//! # Evaluation Model
//!
//! A span of length one is an atom. A span wrapped in one matching pair of
//! parentheses evaluates to its interior. Any other span is split at its main
//! operator (see [`crate::parser::precedence`]) and both sides are evaluated
//! before the operator is applied. `&&` and `||` do not short-circuit: a
//! faulting dereference on either side always surfaces.

pub mod constants;
pub mod engine;
pub mod errors;
pub mod ops;
