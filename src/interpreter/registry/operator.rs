use std::{fmt, sync::Arc};

use crate::interpreter::token::{Fixity, OperatorKey};

/// Evaluation function of a unary operator.
pub type UnaryFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;
/// Evaluation function of a binary operator.
pub type BinaryFn = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// Grouping direction for operators of equal precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    /// `a - b - c` groups as `(a - b) - c`.
    Left,
    /// `a ^ b ^ c` groups as `a ^ (b ^ c)`.
    Right,
}

/// How an operator computes its result.
#[derive(Clone)]
pub enum Evaluation {
    /// One operand, written after the symbol.
    Unary(UnaryFn),
    /// Two operands, written around the symbol.
    Binary(BinaryFn),
    /// Like [`Evaluation::Binary`], but an exactly zero right operand is
    /// handled by the registry's [`DivisionPolicy`](super::DivisionPolicy)
    /// instead of reaching the function.
    Division(BinaryFn),
}

/// Describes a registered operator.
///
/// Precedence is an integer where higher binds tighter. Every operator known
/// to a registry is ordered by it.
#[derive(Clone)]
pub struct OperatorDefinition {
    /// The symbol as written in source. Must consist of punctuation
    /// characters only.
    pub symbol:        String,
    /// Binding strength; higher binds tighter.
    pub precedence:    i32,
    /// Grouping direction among operators of equal precedence.
    pub associativity: Associativity,
    /// Evaluation behavior.
    pub evaluation:    Evaluation,
}

impl OperatorDefinition {
    /// Defines a binary operator.
    ///
    /// # Example
    /// ```
    /// use rpncalc::interpreter::registry::{Associativity, OperatorDefinition};
    ///
    /// let modulo = OperatorDefinition::binary("%", 20, Associativity::Left, |a, b| a % b);
    /// assert_eq!(modulo.symbol, "%");
    /// ```
    pub fn binary(symbol: impl Into<String>,
                  precedence: i32,
                  associativity: Associativity,
                  f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static)
                  -> Self {
        Self { symbol: symbol.into(),
               precedence,
               associativity,
               evaluation: Evaluation::Binary(Arc::new(f)) }
    }

    /// Defines a binary operator whose right operand is a divisor.
    pub fn division(symbol: impl Into<String>,
                    precedence: i32,
                    associativity: Associativity,
                    f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static)
                    -> Self {
        Self { symbol: symbol.into(),
               precedence,
               associativity,
               evaluation: Evaluation::Division(Arc::new(f)) }
    }

    /// Defines a unary prefix operator. Prefix operators are always
    /// right-associative.
    pub fn prefix(symbol: impl Into<String>,
                  precedence: i32,
                  f: impl Fn(f64) -> f64 + Send + Sync + 'static)
                  -> Self {
        Self { symbol: symbol.into(),
               precedence,
               associativity: Associativity::Right,
               evaluation: Evaluation::Unary(Arc::new(f)) }
    }

    /// The role this operator plays, derived from its evaluation behavior.
    #[must_use]
    pub const fn fixity(&self) -> Fixity {
        match self.evaluation {
            Evaluation::Unary(_) => Fixity::Prefix,
            Evaluation::Binary(_) | Evaluation::Division(_) => Fixity::Infix,
        }
    }

    /// The key this operator is registered under.
    #[must_use]
    pub fn key(&self) -> OperatorKey {
        OperatorKey { symbol: self.symbol.clone(),
                      fixity: self.fixity(), }
    }

    /// Number of operands the operator consumes.
    #[must_use]
    pub const fn operand_count(&self) -> usize {
        match self.fixity() {
            Fixity::Prefix => 1,
            Fixity::Infix => 2,
        }
    }
}

impl fmt::Debug for OperatorDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.evaluation {
            Evaluation::Unary(_) => "unary",
            Evaluation::Binary(_) => "binary",
            Evaluation::Division(_) => "division",
        };
        f.debug_struct("OperatorDefinition")
         .field("symbol", &self.symbol)
         .field("precedence", &self.precedence)
         .field("associativity", &self.associativity)
         .field("evaluation", &kind)
         .finish()
    }
}

/// Returns `true` for characters an operator symbol may contain.
///
/// Letters, digits, `_`, whitespace, quotes, parentheses, `,` and `.` all
/// start other tokens and cannot appear in a symbol.
#[must_use]
pub fn is_symbol_char(c: char) -> bool {
    !(c.is_whitespace()
      || c.is_ascii_alphanumeric()
      || matches!(c, '_' | '(' | ')' | ',' | '.' | '\'' | '"'))
}
