use std::{fmt, sync::Arc};

use crate::{error::ExprResult, interpreter::value::Value};

/// Evaluation callable of a registered function.
///
/// Receives exactly `arity` arguments in source order.
pub type FunctionFn = Arc<dyn Fn(&[Value]) -> ExprResult<f64> + Send + Sync>;

/// Describes a registered function.
#[derive(Clone)]
pub struct FunctionDefinition {
    /// The name used to call the function.
    pub name:     String,
    /// The exact number of arguments the function takes.
    pub arity:    usize,
    /// The function body.
    pub function: FunctionFn,
}

impl FunctionDefinition {
    /// Defines a function that receives its raw argument values, including
    /// string literals.
    ///
    /// # Example
    /// ```
    /// use rpncalc::interpreter::{registry::FunctionDefinition, value::Value};
    ///
    /// let len = FunctionDefinition::new("len", 1, |args: &[Value]| {
    ///     Ok(args[0].as_str().map_or(0.0, |s| s.chars().count() as f64))
    /// });
    /// assert_eq!(len.arity, 1);
    /// ```
    pub fn new(name: impl Into<String>,
               arity: usize,
               f: impl Fn(&[Value]) -> ExprResult<f64> + Send + Sync + 'static)
               -> Self {
        Self { name: name.into(),
               arity,
               function: Arc::new(f) }
    }

    /// Defines a function over numbers only. A string argument fails with
    /// [`IncorrectExpression`](crate::error::ExprError::IncorrectExpression).
    ///
    /// # Example
    /// ```
    /// use rpncalc::interpreter::{registry::FunctionDefinition, value::Value};
    ///
    /// let double = FunctionDefinition::numeric("double", 1, |args| args[0] * 2.0);
    /// assert_eq!(double.call(&[Value::Number(4.0)]).unwrap(), 8.0);
    /// ```
    pub fn numeric(name: impl Into<String>,
                   arity: usize,
                   f: impl Fn(&[f64]) -> f64 + Send + Sync + 'static)
                   -> Self {
        let name = name.into();
        let label = name.clone();
        Self::new(name, arity, move |args| {
            let numbers = args.iter()
                              .map(|v| v.as_number(&label))
                              .collect::<ExprResult<Vec<_>>>()?;
            Ok(f(&numbers))
        })
    }

    /// Invokes the function body.
    pub fn call(&self, args: &[Value]) -> ExprResult<f64> {
        (self.function)(args)
    }
}

impl fmt::Debug for FunctionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDefinition")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}
