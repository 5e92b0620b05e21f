use crate::{
    ast::{Builtin, Node},
    interpreter::evaluator::core::{EvalResult, Evaluator},
};

impl Evaluator {
    /// Evaluates a builtin function call.
    ///
    /// The argument is evaluated first, then the builtin is applied:
    /// - `sqrt`, `exp` and `log` map directly onto the host float
    ///   operations, so out-of-domain inputs follow IEEE-754 semantics
    ///   (`sqrt(-1)` is NaN, `log(0)` is negative infinity) rather than
    ///   raising an error;
    /// - `print` emits the value through the configured sink and returns it
    ///   unchanged, so printing can be spliced into a larger expression.
    ///
    /// # Parameters
    /// - `builtin`: Which builtin to apply.
    /// - `argument`: The argument expression.
    ///
    /// # Returns
    /// The computed value.
    pub(in crate::interpreter::evaluator) fn eval_builtin(&mut self,
                                                          builtin: Builtin,
                                                          argument: &Node)
                                                          -> EvalResult<f64> {
        let value = self.eval(argument)?;

        Ok(match builtin {
               Builtin::Sqrt => value.sqrt(),
               Builtin::Exp => value.exp(),
               Builtin::Log => value.ln(),
               Builtin::Print => {
                   (self.print)(value);
                   value
               },
           })
    }
}
