// Operator implementations for the evaluator

pub mod binary;
pub mod unary;
