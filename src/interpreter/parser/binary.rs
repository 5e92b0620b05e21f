use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, ComparisonOperator, Node},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, parse_unary},
        symbol::SymbolTable,
    },
};

/// Parses a comparison expression.
///
/// Comparisons are non-associative: at most one comparison operator may
/// appear at this level, so `a < b < c` is rejected downstream as trailing
/// input rather than silently chaining.
///
/// Grammar: `comparison := additive (("<" | ">" | "<=" | ">=" | "==" | "<>") additive)?`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
/// - `table`: Symbol table used for name resolution.
///
/// # Returns
/// A [`Node::Compare`] node, or the plain additive expression.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>,
                               table: &mut SymbolTable)
                               -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_additive(tokens, table)?;

    if let Some((token, line)) = tokens.peek()
       && let Some(op) = token_to_comparison_operator(token)
    {
        let line = *line;
        tokens.next();

        let right = parse_additive(tokens, table)?;
        return Ok(Node::compare(op, left, right, line));
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// Grammar: `additive := term (("+" | "-") term)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
/// - `table`: Symbol table used for name resolution.
///
/// # Returns
/// A [`Node::Binary`] tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>,
                             table: &mut SymbolTable)
                             -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_term(tokens, table)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            let line = *line;
            tokens.next();

            let right = parse_term(tokens, table)?;
            left = Node::binary(op, left, right, line);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication and division expressions.
///
/// Handles left-associative binary operators: `*` and `/`.
///
/// Grammar: `term := unary (("*" | "/") unary)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
/// - `table`: Symbol table used for name resolution.
///
/// # Returns
/// A binary expression tree combining unary-level nodes.
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>, table: &mut SymbolTable) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens, table)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            let line = *line;
            tokens.next();

            let right = parse_unary(tokens, table)?;
            left = Node::binary(op, left, right, line);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token to its corresponding arithmetic operator.
///
/// Returns `Some(BinaryOperator)` when the token represents one of
/// `+ - * /`, otherwise `None`.
///
/// # Example
/// ```
/// use numera::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        _ => None,
    }
}

/// Maps a token to its corresponding comparison operator.
///
/// Returns `Some(ComparisonOperator)` for the six comparison tokens,
/// otherwise `None`.
#[must_use]
pub const fn token_to_comparison_operator(token: &Token) -> Option<ComparisonOperator> {
    match token {
        Token::Greater => Some(ComparisonOperator::Greater),
        Token::Less => Some(ComparisonOperator::Less),
        Token::NotEqual => Some(ComparisonOperator::NotEqual),
        Token::EqualEqual => Some(ComparisonOperator::Equal),
        Token::GreaterEqual => Some(ComparisonOperator::GreaterEqual),
        Token::LessEqual => Some(ComparisonOperator::LessEqual),
        _ => None,
    }
}
