use std::fmt;

use crate::{
    error::{ExprResult, IncorrectExpression},
    interpreter::token::QuoteKind,
};

/// Represents an operand on the evaluation stack.
///
/// Numbers are the only values arithmetic operators accept. String literals
/// travel through the stack unchanged so that registered functions can
/// consume them as arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A double precision floating-point number.
    Number(f64),
    /// A string literal, with its original quote kind.
    Str {
        /// The literal contents.
        text:  String,
        /// Which quote delimited the literal.
        quote: QuoteKind,
    },
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl Value {
    /// Returns the numeric value, or an error naming `symbol` as the operator
    /// or function that received a string.
    ///
    /// # Example
    /// ```
    /// use rpncalc::interpreter::{token::QuoteKind, value::Value};
    ///
    /// assert_eq!(Value::Number(2.5).as_number("+").unwrap(), 2.5);
    ///
    /// let s = Value::Str { text:  "abc".into(),
    ///                      quote: QuoteKind::Single, };
    /// assert!(s.as_number("+").is_err());
    /// ```
    pub fn as_number(&self, symbol: &str) -> ExprResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Str { .. } => {
                Err(IncorrectExpression::StringOperand { symbol: symbol.to_string() }.into())
            },
        }
    }

    /// Returns the string contents, if this is a string literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Str { text, .. } => Some(text),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str { text, quote } => {
                let q = quote.as_char();
                write!(f, "{q}{text}{q}")
            },
        }
    }
}
