use crate::{
    ast::{BinaryOperator, ComparisonOperator, Node},
    error::RuntimeError,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Maximum nesting of user-function calls before evaluation is aborted.
///
/// Tree walking recurses on the host stack, so unbounded recursion in the
/// interpreted program would otherwise crash the process instead of
/// reporting an error.
pub const MAX_CALL_DEPTH: usize = 256;

/// The tree-walking evaluator.
///
/// An `Evaluator` computes a `f64` for any [`Node`] by recursive descent.
/// It carries no symbol table of its own: every variable access goes through
/// the shared symbol cells embedded in the tree, so a tree and the table it
/// was parsed against can be evaluated by any `Evaluator`.
///
/// The state held here is the injected `print` sink and the user-call depth
/// used by the recursion guard. Evaluation is synchronous and
/// single-threaded; the shared cells are `Rc`-based, so the compiler rejects
/// any attempt to evaluate from a second thread.
pub struct Evaluator {
    pub(in crate::interpreter::evaluator) print: Box<dyn FnMut(f64)>,
    pub(in crate::interpreter::evaluator) depth: usize,
}

#[allow(clippy::new_without_default)]
impl Evaluator {
    /// Creates an evaluator whose `print` builtin writes `= value` lines to
    /// standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_print(|value| println!("= {value}"))
    }

    /// Creates an evaluator with a custom sink for the `print` builtin.
    ///
    /// The sink receives every printed value; embedders use this to route
    /// output somewhere other than stdout, and tests use it to capture it.
    ///
    /// ## Example
    /// ```
    /// use std::{cell::RefCell, rc::Rc};
    ///
    /// use numera::{
    ///     ast::{Builtin, Node},
    ///     interpreter::evaluator::core::Evaluator,
    /// };
    ///
    /// let printed = Rc::new(RefCell::new(Vec::new()));
    /// let sink = Rc::clone(&printed);
    ///
    /// let mut evaluator = Evaluator::with_print(move |v| sink.borrow_mut().push(v));
    /// let tree = Node::builtin_call(Builtin::Print, Node::number(42.0, 1), 1);
    ///
    /// assert_eq!(evaluator.eval(&tree).unwrap(), 42.0);
    /// assert_eq!(*printed.borrow(), vec![42.0]);
    /// ```
    #[must_use]
    pub fn with_print(print: impl FnMut(f64) + 'static) -> Self {
        Self { print: Box::new(print),
               depth: 0, }
    }

    /// Evaluates a tree and returns its value.
    ///
    /// This is the single entry point for evaluation; it dispatches on the
    /// node variant:
    /// - constants yield their stored value,
    /// - variable reads yield the symbol's current value,
    /// - assignment stores the evaluated value and yields it,
    /// - arithmetic follows IEEE-754 semantics (left operand first; dividing
    ///   by zero yields an infinity or NaN, never an error),
    /// - comparisons yield `1.0` or `0.0`,
    /// - sequences yield their second statement's value,
    /// - `if`/`while` yield `0.0` for untaken or empty branches,
    /// - calls dispatch to the builtin or user-function logic.
    ///
    /// # Parameters
    /// - `node`: Root of the tree to evaluate.
    ///
    /// # Returns
    /// The computed value.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] when a call names a symbol with no
    /// function body or user calls nest deeper than [`MAX_CALL_DEPTH`].
    ///
    /// ## Example
    /// ```
    /// use numera::{
    ///     ast::{BinaryOperator, Node},
    ///     interpreter::evaluator::core::Evaluator,
    /// };
    ///
    /// // 2 + 3
    /// let tree = Node::binary(BinaryOperator::Add,
    ///                         Node::number(2.0, 1),
    ///                         Node::number(3.0, 1),
    ///                         1);
    ///
    /// let mut evaluator = Evaluator::new();
    /// assert_eq!(evaluator.eval(&tree).unwrap(), 5.0);
    /// ```
    pub fn eval(&mut self, node: &Node) -> EvalResult<f64> {
        match node {
            Node::Number { value, .. } => Ok(*value),

            Node::Variable { symbol, .. } => Ok(symbol.borrow().value),

            Node::Assign { symbol, value, .. } => {
                let value = self.eval(value)?;
                symbol.borrow_mut().value = value;
                Ok(value)
            },

            Node::Binary { op, left, right, .. } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Ok(Self::eval_binary(*op, left, right))
            },

            Node::Compare { op, left, right, .. } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Ok(Self::eval_comparison(*op, left, right))
            },

            Node::Abs { expr, .. } => Ok(self.eval(expr)?.abs()),

            Node::Negate { expr, .. } => Ok(-self.eval(expr)?),

            Node::Sequence { first, second, .. } => {
                self.eval(first)?;
                self.eval(second)
            },

            Node::If { condition,
                       then_branch,
                       else_branch,
                       .. } => {
                self.eval_if(condition, then_branch.as_deref(), else_branch.as_deref())
            },

            Node::While { condition, body, .. } => self.eval_while(condition, body.as_deref()),

            Node::BuiltinCall { builtin, argument, .. } => self.eval_builtin(*builtin, argument),

            Node::UserCall { symbol,
                             arguments,
                             line, } => self.eval_user_call(symbol, arguments, *line),
        }
    }

    /// Applies an arithmetic operator to two evaluated operands.
    ///
    /// Division is plain IEEE-754 `f64` division: `1 / 0` is positive
    /// infinity and `0 / 0` is NaN.
    pub(in crate::interpreter::evaluator) fn eval_binary(op: BinaryOperator,
                                                         left: f64,
                                                         right: f64)
                                                         -> f64 {
        match op {
            BinaryOperator::Add => left + right,
            BinaryOperator::Sub => left - right,
            BinaryOperator::Mul => left * right,
            BinaryOperator::Div => left / right,
        }
    }

    /// Applies a comparison predicate to two evaluated operands, yielding
    /// `1.0` when it holds and `0.0` otherwise.
    ///
    /// NaN operands make every predicate except `<>` false, following the
    /// host float comparison rules.
    pub(in crate::interpreter::evaluator) fn eval_comparison(op: ComparisonOperator,
                                                             left: f64,
                                                             right: f64)
                                                             -> f64 {
        let holds = match op {
            ComparisonOperator::Greater => left > right,
            ComparisonOperator::Less => left < right,
            ComparisonOperator::NotEqual => left != right,
            ComparisonOperator::Equal => left == right,
            ComparisonOperator::GreaterEqual => left >= right,
            ComparisonOperator::LessEqual => left <= right,
        };

        if holds { 1.0 } else { 0.0 }
    }

    /// Evaluates an `if` statement.
    ///
    /// The condition is evaluated first; any non-zero value (including NaN)
    /// selects the then branch. The selected branch's value is the
    /// statement's value; an absent branch yields `0.0`.
    fn eval_if(&mut self,
               condition: &Node,
               then_branch: Option<&Node>,
               else_branch: Option<&Node>)
               -> EvalResult<f64> {
        let branch = if self.eval(condition)? != 0.0 {
            then_branch
        } else {
            else_branch
        };

        match branch {
            Some(branch) => self.eval(branch),
            None => Ok(0.0),
        }
    }

    /// Evaluates a `while` loop.
    ///
    /// An absent body makes the loop yield `0.0` without evaluating the
    /// condition at all. Otherwise the condition is re-evaluated before
    /// every iteration and the loop's value is the last value the body
    /// produced (`0.0` when the body never ran).
    fn eval_while(&mut self, condition: &Node, body: Option<&Node>) -> EvalResult<f64> {
        let Some(body) = body else {
            return Ok(0.0);
        };

        let mut last = 0.0;
        while self.eval(condition)? != 0.0 {
            last = self.eval(body)?;
        }

        Ok(last)
    }
}
