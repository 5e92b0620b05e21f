#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
///
/// Arithmetic follows IEEE-754 semantics and never raises an error here:
/// dividing by zero yields an infinity or NaN, and `sqrt`/`log` of values
/// outside their domain yield NaN. The remaining failure modes are all about
/// function calls.
pub enum RuntimeError {
    /// Called a symbol that has no function body attached.
    UndefinedFunction {
        /// The name of the symbol that was called.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// User-function calls nested deeper than the evaluator allows.
    RecursionLimitExceeded {
        /// The source line of the call that exceeded the limit.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedFunction { name, line } => write!(f,
                                                             "Error on line {line}: Call to undefined function '{name}'."),

            Self::RecursionLimitExceeded { line } => {
                write!(f, "Error on line {line}: Recursion limit exceeded.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
