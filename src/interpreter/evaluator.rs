/// Core evaluation logic.
///
/// Contains the evaluator state and the recursive `eval` dispatch over
/// every node variant, including arithmetic, comparisons and control flow.
pub mod core;

/// Builtin function evaluation.
///
/// Implements `sqrt`, `exp`, `log` and `print`.
pub mod builtin;

/// User-defined function calls.
///
/// Handles argument evaluation, parameter binding and restoration, and the
/// recursion guard.
pub mod function;
