use std::iter::Peekable;

use crate::{
    ast::{Builtin, Node},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_comparison, utils::parse_comma_separated},
        symbol::SymbolTable,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. Assignment is the
/// lowest-precedence form; everything else descends through the comparison
/// and arithmetic levels.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `table`: Symbol table used to resolve names while building the tree.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>,
                               table: &mut SymbolTable)
                               -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_assignment(tokens, table)
}

/// Parses an assignment expression.
///
/// An assignment has the form `<identifier> = <expression>` and is
/// right-associative, so `a = b = 3` assigns both names. The identifier is
/// resolved through the symbol table, creating the symbol on first use.
/// Builtin names cannot be assigned to.
///
/// The function performs a limited lookahead: only an identifier directly
/// followed by `=` starts an assignment. Anything else falls through to the
/// comparison level.
///
/// Grammar: `assignment := identifier "=" assignment | comparison`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a potential identifier.
/// - `table`: Symbol table used for name resolution.
///
/// # Returns
/// A [`Node::Assign`] tree, or the comparison-level expression.
///
/// # Errors
/// Returns a `ParseError` if the identifier is reserved or the assigned
/// expression fails to parse.
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>,
                               table: &mut SymbolTable)
                               -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();

        if let Some((Token::Equals, _)) = lookahead.peek() {
            let (name, line) = match tokens.next() {
                Some((Token::Identifier(n), line)) => (n.clone(), *line),
                _ => unreachable!(),
            };

            if Builtin::from_name(&name).is_some() {
                return Err(ParseError::IdentifierReserved { name, line });
            }
            tokens.next();

            let value = parse_assignment(tokens, table)?;
            return Ok(Node::assign(table.lookup(&name), value, line));
        }
    }

    parse_comparison(tokens, table)
}

/// Parses a unary expression.
///
/// Handles prefix arithmetic negation; `-x` parses as a [`Node::Negate`]
/// around the operand. Repeated negation (`--x`) nests.
///
/// Grammar: `unary := "-" unary | primary`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
/// - `table`: Symbol table used for name resolution.
///
/// # Returns
/// The parsed unary or primary expression.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>, table: &mut SymbolTable) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let operand = parse_unary(tokens, table)?;
        return Ok(Node::negate(operand, line));
    }

    parse_primary(tokens, table)
}

/// Parses a primary expression.
///
/// A primary is one of:
/// - a numeric literal,
/// - a parenthesized expression,
/// - an absolute value `|expression|`,
/// - a builtin call,
/// - a user function call,
/// - a variable reference.
///
/// # Parameters
/// - `tokens`: Token stream with line information.
/// - `table`: Symbol table used for name resolution.
///
/// # Returns
/// The parsed primary expression.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the grouping `)` or closing `|` is missing,
/// - an unexpected token is found,
/// - the input ends unexpectedly.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>, table: &mut SymbolTable) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Number(value), line)) => Ok(Node::number(*value, *line)),

        Some((Token::LParen, line)) => {
            let expr = parse_expression(tokens, table)?;
            match tokens.next() {
                Some((Token::RParen, _)) => Ok(expr),
                _ => Err(ParseError::ExpectedClosingParen { line: *line }),
            }
        },

        Some((Token::Pipe, line)) => {
            let expr = parse_expression(tokens, table)?;
            match tokens.next() {
                Some((Token::Pipe, _)) => Ok(Node::abs(expr, *line)),
                _ => Err(ParseError::ExpectedClosingPipe { line: *line }),
            }
        },

        Some((Token::Identifier(name), line)) => parse_name(name, *line, tokens, table),

        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                              line:  *line, })
        },

        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses the expression forms that begin with a name.
///
/// Builtin names are reserved: they must be followed by a parenthesized
/// argument list of exactly one expression and become a
/// [`Node::BuiltinCall`]. Any other name followed by `(` is a user call;
/// a bare name is a variable reference. Both resolve the name through the
/// symbol table, creating the symbol on first use.
///
/// # Parameters
/// - `name`: The identifier that was just consumed.
/// - `line`: Line number of the identifier.
/// - `tokens`: Token stream positioned after the identifier.
/// - `table`: Symbol table used for name resolution.
///
/// # Returns
/// A call or variable node.
///
/// # Errors
/// Returns a `ParseError` if a builtin name is used as a variable or called
/// with an argument count other than one, or if the argument list is
/// malformed.
fn parse_name<'a, I>(name: &str,
                     line: usize,
                     tokens: &mut Peekable<I>,
                     table: &mut SymbolTable)
                     -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some(builtin) = Builtin::from_name(name) {
        match tokens.peek() {
            Some((Token::LParen, _)) => {
                tokens.next();
            },
            _ => {
                return Err(ParseError::IdentifierReserved { name: name.to_string(),
                                                            line });
            },
        }

        let arguments =
            parse_comma_separated(tokens, table, parse_expression, &Token::RParen)?;

        return match <[Node; 1]>::try_from(arguments) {
                   Ok([argument]) => Ok(Node::builtin_call(builtin, argument, line)),
                   Err(_) => {
                       Err(ParseError::BuiltinArgumentCount { name: name.to_string(),
                                                              line })
                   },
               };
    }

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();

        let arguments =
            parse_comma_separated(tokens, table, parse_expression, &Token::RParen)?;

        return Ok(Node::user_call(table.lookup(name), arguments, line));
    }

    Ok(Node::variable(table.lookup(name), line))
}
