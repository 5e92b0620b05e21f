use std::iter::Peekable;

use crate::{
    ast::{Builtin, Node},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{parse_comma_separated, parse_identifier},
        },
        symbol::SymbolTable,
    },
};

/// Parses one top-level item: a `let` function definition or a statement
/// list.
///
/// Definitions are applied to the symbol table immediately and produce no
/// evaluatable node, so the result is `None` for them (and for blank
/// lists). After the item, the line must be over; leftover tokens are an
/// error.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first token of the item.
/// - `table`: Symbol table receiving definitions and name lookups.
///
/// # Returns
/// - `Ok(Some(node))` for a statement list to evaluate,
/// - `Ok(None)` for a definition or an empty list.
///
/// # Errors
/// Returns a `ParseError` if the item is malformed or followed by trailing
/// tokens on the same line.
pub fn parse_toplevel_item<'a, I>(tokens: &mut Peekable<I>,
                                  table: &mut SymbolTable)
                                  -> ParseResult<Option<Node>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let item = if let Some((Token::Let, _)) = tokens.peek() {
        parse_definition(tokens, table)?;
        None
    } else {
        parse_list(tokens, table)?
    };

    match tokens.peek() {
        None | Some((Token::NewLine, _)) => Ok(item),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedTrailingTokens { token: format!("{tok:?}"),
                                                       line:  *line, })
        },
    }
}

/// Parses a statement list.
///
/// A list is zero or more statements separated by `;`, with an optional
/// trailing `;`. It ends at a newline, at `else`, or at the end of input.
/// Multiple statements fold right into [`Node::Sequence`] nodes, so the
/// list's value is the value of its last statement.
///
/// Grammar: `list := (statement (";" statement)* ";"?)?`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of the list.
/// - `table`: Symbol table used for name resolution.
///
/// # Returns
/// - `Ok(Some(node))` for a non-empty list,
/// - `Ok(None)` for an empty one.
pub fn parse_list<'a, I>(tokens: &mut Peekable<I>,
                         table: &mut SymbolTable)
                         -> ParseResult<Option<Node>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            None | Some((Token::NewLine | Token::Else, _)) => break,
            _ => {},
        }

        statements.push(parse_statement(tokens, table)?);

        match tokens.peek() {
            Some((Token::Semicolon, _)) => {
                tokens.next();
            },
            _ => break,
        }
    }

    let mut list = None;
    while let Some(first) = statements.pop() {
        list = Some(match list {
                        Some(second) => {
                            let line = first.line_number();
                            Node::sequence(first, second, line)
                        },
                        None => first,
                    });
    }

    Ok(list)
}

/// Parses a single statement.
///
/// A statement may be one of:
/// - an `if` flow statement,
/// - a `while` flow statement,
/// - an expression used as a statement.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
/// - `table`: Symbol table used for name resolution.
///
/// # Returns
/// The parsed statement node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>,
                              table: &mut SymbolTable)
                              -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::If, line)) => {
            let line = *line;
            tokens.next();
            parse_if(tokens, table, line)
        },
        Some((Token::While, line)) => {
            let line = *line;
            tokens.next();
            parse_while(tokens, table, line)
        },
        _ => parse_expression(tokens, table),
    }
}

/// Parses an `if` statement after the `if` keyword has been consumed.
///
/// Syntax:
/// ```text
///     if <condition> then <list>
///     if <condition> then <list> else <list>
/// ```
/// Both branch lists may be empty; an empty or untaken branch yields `0.0`
/// at evaluation time. A dangling `else` binds to the nearest `if`.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `table`: Symbol table used for name resolution.
/// - `line`: Line number of the `if` token.
///
/// # Returns
/// A [`Node::If`] node representing the full statement.
///
/// # Errors
/// - `UnexpectedToken` if `then` is missing.
/// - Propagates any errors from sub-expression parsing.
fn parse_if<'a, I>(tokens: &mut Peekable<I>,
                   table: &mut SymbolTable,
                   line: usize)
                   -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_expression(tokens, table)?;

    match tokens.next() {
        Some((Token::Then, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected 'then', found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let then_branch = parse_list(tokens, table)?;

    let else_branch = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        parse_list(tokens, table)?
    } else {
        None
    };

    Ok(Node::if_else(condition, then_branch, else_branch, line))
}

/// Parses a `while` statement after the `while` keyword has been consumed.
///
/// Syntax:
/// ```text
///     while <condition> do <list>
/// ```
/// The body list may be empty, which makes the loop a no-op that does not
/// even evaluate its condition.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `while` keyword.
/// - `table`: Symbol table used for name resolution.
/// - `line`: Line number of the `while` token.
///
/// # Returns
/// A [`Node::While`] node.
///
/// # Errors
/// - `UnexpectedToken` if `do` is missing.
/// - Propagates any errors from sub-expression parsing.
fn parse_while<'a, I>(tokens: &mut Peekable<I>,
                      table: &mut SymbolTable,
                      line: usize)
                      -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_expression(tokens, table)?;

    match tokens.next() {
        Some((Token::Do, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected 'do', found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let body = parse_list(tokens, table)?;

    Ok(Node::while_do(condition, body, line))
}

/// Parses a function definition statement.
///
/// A definition has the form `let <name>(<param>, ...) = <list>` and is
/// only valid at the top level. The name and the parameters are resolved
/// through the symbol table; the definition is applied immediately via
/// [`SymbolTable::define_function`], replacing any previous body.
///
/// Builtin names cannot be redefined, and the body list must not be empty.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the `let` keyword.
/// - `table`: Symbol table receiving the definition.
///
/// # Returns
/// `Ok(())` once the definition has been applied.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the name is reserved,
/// - the parameter list or `=` is malformed,
/// - the body is empty or fails to parse.
pub fn parse_definition<'a, I>(tokens: &mut Peekable<I>,
                               table: &mut SymbolTable)
                               -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = match tokens.next() {
        Some((Token::Let, line)) => *line,
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected 'let', found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    let name = parse_identifier(tokens)?;
    if Builtin::from_name(&name).is_some() {
        return Err(ParseError::IdentifierReserved { name, line });
    }

    match tokens.next() {
        Some((Token::LParen, _)) => {},
        _ => return Err(ParseError::InvalidFunctionDefinition { line }),
    }

    let param_names =
        parse_comma_separated(tokens, table, |toks, _| parse_identifier(toks), &Token::RParen)?;
    let params = param_names.iter().map(|n| table.lookup(n)).collect();

    match tokens.next() {
        Some((Token::Equals, _)) => {},
        _ => return Err(ParseError::InvalidFunctionDefinition { line }),
    }

    let Some(body) = parse_list(tokens, table)? else {
        return Err(ParseError::InvalidFunctionDefinition { line });
    };

    table.define_function(&name, params, body);
    Ok(())
}
