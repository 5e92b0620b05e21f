//! # numera
//!
//! numera is a small calculator language interpreter written in Rust.
//! It parses statements into abstract syntax trees and evaluates them
//! immediately against a symbol table, with support for variables,
//! `if`/`while` control flow, builtin math functions, and user-defined
//! functions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use logos::Logos;

use crate::{
    error::ParseError,
    interpreter::{
        evaluator::core::Evaluator,
        lexer::{LexerExtras, Token},
        parser::statement::parse_toplevel_item,
        symbol::SymbolTable,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and related types that represent
/// the syntactic structure of source code as a tree, along with the
/// constructors the parser builds trees with. The tree is owned top-down,
/// so releasing a tree is ordinary drop.
///
/// # Responsibilities
/// - Defines one variant per language construct, with owned children.
/// - Provides a constructor per variant; construction never validates
///   semantics.
/// - Attaches source lines to nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// or evaluating code. Each error carries the source line it refers to;
/// rendering the message is left entirely to the caller.
///
/// # Responsibilities
/// - Defines error enums for parse-time and run-time failures.
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, symbol management and
/// evaluation to provide a complete runtime for source code execution.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, symbol table,
///   evaluator.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Runs a script and returns the value of its last statement.
///
/// The source is tokenized up front, then parsed and evaluated one
/// top-level item at a time against a fresh symbol table: definitions are
/// applied to the table, statement lists are evaluated immediately, and
/// each tree is released once its value has been computed. Execution stops
/// at the first error.
///
/// `Ok(None)` means the script contained no statement that produces a value
/// (for example, only definitions). When `print_last` is set, the final
/// value (if any) is also written to standard output, which makes the
/// binary usable in pipes.
///
/// # Errors
/// Returns an error if tokenizing, parsing, or evaluation fails.
///
/// # Examples
/// ```
/// use numera::run_source;
///
/// // Statements evaluate in order; the last value is returned.
/// let value = run_source("x = 3; x = x + 1; x", false).unwrap();
/// assert_eq!(value, Some(4.0));
///
/// // Calling a name with no function attached is an error.
/// assert!(run_source("missing(1)", false).is_err());
/// ```
pub fn run_source(source: &str, print_last: bool) -> Result<Option<f64>, Box<dyn std::error::Error>> {
    let mut table = SymbolTable::new();
    let mut evaluator = Evaluator::new();

    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            let slice = lexer.slice();
            return Err(Box::new(ParseError::UnexpectedToken { token: slice.to_string(),
                                                              line:  lexer.extras.line, }));
        }
    }

    let mut iter = tokens.iter().peekable();

    let mut result = None;

    while iter.peek().is_some() {
        while let Some((Token::NewLine, _)) = iter.peek() {
            iter.next();
        }
        if iter.peek().is_none() {
            break;
        }
        match parse_toplevel_item(&mut iter, &mut table) {
            Ok(Some(node)) => match evaluator.eval(&node) {
                Ok(value) => result = Some(value),
                Err(e) => return Err(Box::new(e)),
            },
            Ok(None) => {},
            Err(e) => return Err(Box::new(e)),
        }
    }

    if print_last && let Some(value) = result {
        println!("{value}");
    }

    Ok(result)
}
