use std::rc::Rc;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator, MAX_CALL_DEPTH},
        symbol::SymbolRef,
    },
};

impl Evaluator {
    /// Evaluates a call to a user-defined function.
    ///
    /// The call proceeds in the order the language guarantees:
    /// 1. Every supplied argument expression is evaluated left to right,
    ///    before any parameter changes, so arguments see the caller's
    ///    values.
    /// 2. Each bound parameter's current value is saved and the new value
    ///    assigned. A call with fewer arguments than parameters leaves the
    ///    remaining parameters at their current value; excess arguments are
    ///    ignored and not evaluated.
    /// 3. The body is evaluated against the updated symbol cells.
    /// 4. The saved parameter values are put back, so recursive calls and
    ///    the caller's bindings survive the call.
    ///
    /// # Parameters
    /// - `symbol`: The symbol being called.
    /// - `arguments`: Argument expressions from the call site.
    /// - `line`: Line number of the call, for error reporting.
    ///
    /// # Returns
    /// The value of the function body.
    ///
    /// # Errors
    /// - [`RuntimeError::UndefinedFunction`] when the symbol has no body.
    /// - [`RuntimeError::RecursionLimitExceeded`] when calls nest deeper
    ///   than [`MAX_CALL_DEPTH`].
    pub(in crate::interpreter::evaluator) fn eval_user_call(&mut self,
                                                            symbol: &SymbolRef,
                                                            arguments: &[Node],
                                                            line: usize)
                                                            -> EvalResult<f64> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::RecursionLimitExceeded { line });
        }

        // Clone the definition out of the cell so the borrow is released
        // before the body (which may call the same function) is evaluated.
        let (params, body) = {
            let cell = symbol.borrow();
            match &cell.func {
                Some(body) => (cell.params.clone(), body.clone()),
                None => {
                    return Err(RuntimeError::UndefinedFunction { name: cell.name.clone(),
                                                                 line });
                },
            }
        };

        let bound = params.len().min(arguments.len());
        let mut new_values = Vec::with_capacity(bound);
        for argument in &arguments[..bound] {
            new_values.push(self.eval(argument)?);
        }

        let mut saved = Vec::with_capacity(bound);
        for (param, value) in params.iter().zip(new_values) {
            let mut cell = param.borrow_mut();
            saved.push((Rc::clone(param), cell.value));
            cell.value = value;
        }

        self.depth += 1;
        let result = self.eval(&body);
        self.depth -= 1;

        // Reverse order restores the first-saved value last when a
        // parameter name is repeated.
        for (param, old) in saved.into_iter().rev() {
            param.borrow_mut().value = old;
        }

        result
    }
}
