/// Parsing errors.
///
/// Defines all error types that can occur while lexing and parsing source
/// code: unexpected or missing tokens, malformed function definitions, and
/// misuse of reserved builtin names.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the error types that can be raised while evaluating a tree.
/// Arithmetic never fails (IEEE-754 semantics apply throughout), so the
/// runtime errors are limited to call-related conditions.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
