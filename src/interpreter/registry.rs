use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::{ExprError, ExprResult},
    interpreter::token::{Fixity, OperatorKey},
};

/// Default operators and functions.
///
/// Declares the builtin function table and the default operator set along
/// with their precedence levels.
pub mod builtin;
/// Function definitions.
///
/// Holds a function's name, fixed arity and evaluation callable.
pub mod function;
/// Operator definitions.
///
/// Holds an operator's symbol, precedence, associativity and evaluation
/// behavior, and the rules for which characters a symbol may contain.
pub mod operator;

pub use function::{FunctionDefinition, FunctionFn};
pub use operator::{Associativity, BinaryFn, Evaluation, OperatorDefinition, UnaryFn};

/// What a division operator does when its divisor is exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivisionPolicy {
    /// Fail with [`ExprError::DivisionByZero`].
    #[default]
    Raise,
    /// Return positive or negative infinity following the sign of the
    /// dividend, or `NaN` when the dividend is zero too. The sign of a zero
    /// divisor is ignored, so `1 / -0.0` is positive infinity.
    Infinity,
}

impl DivisionPolicy {
    /// Applies the policy to a division by an exactly zero divisor.
    ///
    /// # Example
    /// ```
    /// use rpncalc::interpreter::registry::DivisionPolicy;
    ///
    /// assert_eq!(DivisionPolicy::Infinity.divide_by_zero(-3.0).unwrap(), f64::NEG_INFINITY);
    /// assert!(DivisionPolicy::Infinity.divide_by_zero(0.0).unwrap().is_nan());
    /// assert!(DivisionPolicy::Raise.divide_by_zero(1.0).is_err());
    /// ```
    pub fn divide_by_zero(self, dividend: f64) -> ExprResult<f64> {
        match self {
            Self::Raise => Err(ExprError::DivisionByZero),
            Self::Infinity if dividend == 0.0 || dividend.is_nan() => Ok(f64::NAN),
            Self::Infinity => Ok(f64::INFINITY.copysign(dividend)),
        }
    }
}

/// Resolves operator symbols and function names to their definitions.
///
/// A registry is populated at configuration time and then consulted by the
/// lexer (which symbols exist), the converter (precedence, associativity and
/// arity) and the evaluator (behavior and division policy). Registering a
/// symbol or name again replaces the previous definition.
#[derive(Debug, Clone)]
pub struct Registry {
    prefix:    HashMap<String, OperatorDefinition>,
    infix:     HashMap<String, OperatorDefinition>,
    functions: HashMap<String, FunctionDefinition>,
    division:  DivisionPolicy,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry holding the default operators and functions.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for def in builtin::default_operators() {
            registry.register_operator(def);
        }
        for def in builtin::default_functions() {
            registry.register_function(def);
        }
        registry
    }

    /// Creates a registry with no operators or functions at all.
    #[must_use]
    pub fn empty() -> Self {
        Self { prefix:    HashMap::new(),
               infix:     HashMap::new(),
               functions: HashMap::new(),
               division:  DivisionPolicy::default(), }
    }

    /// Registers an operator, replacing any operator with the same symbol and
    /// fixity.
    ///
    /// A symbol containing characters outside [`operator::is_symbol_char`] is
    /// stored but can never be written in an expression.
    pub fn register_operator(&mut self, def: OperatorDefinition) {
        if def.symbol.is_empty() || !def.symbol.chars().all(operator::is_symbol_char) {
            warn!(symbol = %def.symbol, "operator symbol cannot be lexed");
        }
        debug!(symbol = %def.symbol, precedence = def.precedence, fixity = ?def.fixity(), "registering operator");
        self.table(def.fixity()).insert(def.symbol.clone(), def);
    }

    /// Registers a function, replacing any function with the same name.
    pub fn register_function(&mut self, def: FunctionDefinition) {
        debug!(name = %def.name, arity = def.arity, "registering function");
        self.functions.insert(def.name.clone(), def);
    }

    /// Removes an operator, returning its definition if it was registered.
    pub fn remove_operator(&mut self, key: &OperatorKey) -> Option<OperatorDefinition> {
        self.table(key.fixity).remove(&key.symbol)
    }

    /// Removes a function, returning its definition if it was registered.
    pub fn remove_function(&mut self, name: &str) -> Option<FunctionDefinition> {
        self.functions.remove(name)
    }

    /// Looks up an operator by symbol and fixity.
    ///
    /// # Example
    /// ```
    /// use rpncalc::interpreter::{registry::Registry, token::OperatorKey};
    ///
    /// let registry = Registry::new();
    /// assert_eq!(registry.resolve_operator(&OperatorKey::infix("^")).unwrap().precedence, 30);
    /// assert!(registry.resolve_operator(&OperatorKey::infix("%")).is_err());
    /// ```
    pub fn resolve_operator(&self, key: &OperatorKey) -> ExprResult<&OperatorDefinition> {
        let table = match key.fixity {
            Fixity::Prefix => &self.prefix,
            Fixity::Infix => &self.infix,
        };
        table.get(&key.symbol)
             .ok_or_else(|| ExprError::UnknownToken { name: key.symbol.clone() })
    }

    /// Looks up a function by name.
    pub fn resolve_function(&self, name: &str) -> ExprResult<&FunctionDefinition> {
        self.functions
            .get(name)
            .ok_or_else(|| ExprError::UnknownToken { name: name.to_string() })
    }

    /// Returns `true` if `symbol` is registered with any fixity.
    #[must_use]
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.prefix.contains_key(symbol) || self.infix.contains_key(symbol)
    }

    /// Returns `true` if `symbol` is registered with the given fixity.
    #[must_use]
    pub fn has_operator(&self, symbol: &str, fixity: Fixity) -> bool {
        match fixity {
            Fixity::Prefix => self.prefix.contains_key(symbol),
            Fixity::Infix => self.infix.contains_key(symbol),
        }
    }

    /// Length in bytes of the longest registered symbol.
    #[must_use]
    pub fn longest_symbol(&self) -> usize {
        self.prefix
            .keys()
            .chain(self.infix.keys())
            .map(String::len)
            .max()
            .unwrap_or(0)
    }

    /// The current division-by-zero policy.
    #[must_use]
    pub const fn division_policy(&self) -> DivisionPolicy {
        self.division
    }

    /// Replaces the division-by-zero policy.
    pub fn set_division_policy(&mut self, policy: DivisionPolicy) {
        self.division = policy;
    }

    /// Iterates over the registered function names.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    fn table(&mut self, fixity: Fixity) -> &mut HashMap<String, OperatorDefinition> {
        match fixity {
            Fixity::Prefix => &mut self.prefix,
            Fixity::Infix => &mut self.infix,
        }
    }
}
