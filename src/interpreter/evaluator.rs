use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

use crate::{
    error::{ExprError, ExprResult, IncorrectExpression},
    interpreter::{
        registry::{Evaluation, Registry},
        token::Token,
        value::Value,
    },
};

/// A source of variable values for evaluation.
///
/// The environment is owned by the caller and only read during evaluation.
pub trait Environment {
    /// Returns the value bound to `name`, if any.
    fn lookup(&self, name: &str) -> Option<f64>;
}

impl<S: BuildHasher> Environment for HashMap<String, f64, S> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl Environment for BTreeMap<String, f64> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn lookup(&self, name: &str) -> Option<f64> {
        (**self).lookup(name)
    }
}

/// Evaluates a postfix token sequence.
///
/// The sequence is scanned once from left to right. Literals are pushed onto
/// a stack, variables are resolved in `vars`, and each operator or function
/// pops its operands and pushes its result. Exactly one number must remain
/// at the end.
///
/// # Errors
/// - [`ExprError::UnknownVariable`] for a variable missing from `vars`.
/// - [`ExprError::UnknownToken`] for an operator or function no longer in
///   `registry`.
/// - [`ExprError::DivisionByZero`] for a zero divisor under
///   [`DivisionPolicy::Raise`](crate::interpreter::registry::DivisionPolicy::Raise).
/// - [`ExprError::IncorrectExpression`] when an operator lacks operands, an
///   operator receives a string, a structural token is present, or the stack
///   does not end with exactly one number.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use rpncalc::interpreter::{evaluator::evaluate, registry::Registry, token::Token};
///
/// let postfix = [Token::Variable("x".into()), Token::Number(1.0), Token::infix("+")];
/// let vars = HashMap::from([("x".to_string(), 41.0)]);
///
/// assert_eq!(evaluate(&postfix, &vars, &Registry::new()).unwrap(), 42.0);
/// ```
pub fn evaluate(postfix: &[Token], vars: &impl Environment, registry: &Registry) -> ExprResult<f64> {
    let mut stack: Vec<Value> = Vec::with_capacity(postfix.len());

    for token in postfix {
        match token {
            Token::Number(n) => stack.push(Value::Number(*n)),
            Token::StringLiteral { text, quote } => stack.push(Value::Str { text:  text.clone(),
                                                                            quote: *quote, }),
            Token::Variable(name) => {
                let value = vars.lookup(name)
                                .ok_or_else(|| ExprError::UnknownVariable { name: name.clone() })?;
                stack.push(Value::Number(value));
            },
            Token::Operator(key) => {
                let def = registry.resolve_operator(key)?;
                let operands = pop_operands(&mut stack, def.operand_count(), &key.symbol)?;
                let result = match &def.evaluation {
                    Evaluation::Unary(f) => f(operands[0].as_number(&key.symbol)?),
                    Evaluation::Binary(f) => {
                        f(operands[0].as_number(&key.symbol)?,
                          operands[1].as_number(&key.symbol)?)
                    },
                    Evaluation::Division(f) => {
                        let dividend = operands[0].as_number(&key.symbol)?;
                        let divisor = operands[1].as_number(&key.symbol)?;
                        if divisor == 0.0 {
                            registry.division_policy().divide_by_zero(dividend)?
                        } else {
                            f(dividend, divisor)
                        }
                    },
                };
                stack.push(Value::Number(result));
            },
            Token::Function(name) => {
                let def = registry.resolve_function(name)?;
                let args = pop_operands(&mut stack, def.arity, name)?;
                stack.push(Value::Number(def.call(&args)?));
            },
            Token::OpenParen | Token::CloseParen | Token::ArgSeparator => {
                return Err(IncorrectExpression::UnexpectedToken { token: token.to_string() }.into());
            },
        }
    }

    match stack.len() {
        0 => Err(IncorrectExpression::Empty.into()),
        1 => match stack.pop() {
            Some(Value::Number(n)) => Ok(n),
            _ => Err(IncorrectExpression::StringResult.into()),
        },
        count => Err(IncorrectExpression::TrailingOperands { count }.into()),
    }
}

/// Pops the top `count` values, returned in the order they were pushed.
fn pop_operands(stack: &mut Vec<Value>, count: usize, symbol: &str) -> ExprResult<Vec<Value>> {
    if stack.len() < count {
        return Err(IncorrectExpression::MissingOperand { symbol: symbol.to_string() }.into());
    }
    Ok(stack.split_off(stack.len() - count))
}
