#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing `|` was expected to end an absolute-value expression.
    ExpectedClosingPipe {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The function definition syntax was invalid.
    InvalidFunctionDefinition {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found extra tokens after a statement should have ended.
    UnexpectedTrailingTokens {
        /// The extra/unexpected token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Tried to redefine or assign to a reserved builtin name.
    IdentifierReserved {
        /// The reserved identifier name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A builtin function was called with the wrong number of arguments.
    BuiltinArgumentCount {
        /// The name of the builtin.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },

            Self::ExpectedClosingParen { line } => write!(f,
                                                          "Error on line {line}: Expected closing parenthesis ')' but none found."),

            Self::ExpectedClosingPipe { line } => write!(f,
                                                         "Error on line {line}: Expected closing pipe '|' but none found."),

            Self::InvalidFunctionDefinition { line } => write!(f,
                                                               "Error on line {line}: Invalid function definition syntax. Example: let f(x) = x * x"),

            Self::UnexpectedTrailingTokens { token, line } => write!(f,
                                                                     "Error on line {line}: Extra tokens after statement. Check your input: {token}"),

            Self::IdentifierReserved { name, line } => {
                write!(f, "Error on line {line}: Identifier {name} is reserved.")
            },

            Self::BuiltinArgumentCount { name, line } => write!(f,
                                                                "Error on line {line}: Builtin function '{name}' takes exactly one argument."),
        }
    }
}

impl std::error::Error for ParseError {}
