use thiserror::Error;

use crate::error::LexError;

/// Result type used throughout the interpreter.
///
/// All lexing, conversion and evaluation functions return either a value of
/// type `T` or an [`ExprError`] describing the failure.
pub type ExprResult<T> = Result<T, ExprError>;

/// Represents every error the interpreter can report.
///
/// Errors surface from the call that detects them; nothing is retried or
/// swallowed, and a failed call never yields a partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// The source text could not be scanned into tokens.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// An operator symbol or function name has no registry entry.
    #[error("Unknown operator or function '{name}'.")]
    UnknownToken {
        /// The unresolved symbol or name.
        name: String,
    },
    /// A variable is absent from the evaluation environment.
    #[error("Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
    },
    /// The expression is structurally malformed.
    #[error("Incorrect expression: {0}.")]
    IncorrectExpression(IncorrectExpression),
    /// A division operator received an exactly zero divisor while the
    /// registry is configured to raise.
    #[error("Division by zero.")]
    DivisionByZero,
}

impl From<IncorrectExpression> for ExprError {
    fn from(reason: IncorrectExpression) -> Self {
        Self::IncorrectExpression(reason)
    }
}

/// Describes why an expression was rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncorrectExpression {
    /// A `(` was never closed.
    #[error("unmatched '('")]
    UnmatchedOpenParen,
    /// A `)` has no matching `(`.
    #[error("unmatched ')'")]
    UnmatchedCloseParen,
    /// A `,` appeared outside the argument list of a function call.
    #[error("argument separator outside of a function call")]
    MisplacedSeparator,
    /// A function argument or a parenthesized group contains nothing.
    #[error("empty argument or group")]
    EmptyGroup,
    /// A function was called with the wrong number of arguments.
    #[error("function '{name}' expects {expected} argument(s) but got {found}")]
    ArgumentCount {
        /// The function name.
        name:     String,
        /// The declared arity.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
    },
    /// An operand, call or `(` directly follows another operand, as in `2 3`
    /// or `(2)(3)`.
    #[error("missing operator before '{token}'")]
    MissingOperator {
        /// The token that arrived where an operator was expected.
        token: String,
    },
    /// A function name is not immediately followed by `(`.
    #[error("function '{name}' is not followed by '('")]
    UncalledFunction {
        /// The function name.
        name: String,
    },
    /// An operator is missing one of its operands, or found fewer operands
    /// on the stack than it consumes.
    #[error("missing operand for '{symbol}'")]
    MissingOperand {
        /// The operator symbol or function name.
        symbol: String,
    },
    /// An arithmetic operator was applied to a string literal.
    #[error("string operand for '{symbol}'")]
    StringOperand {
        /// The operator symbol or function name.
        symbol: String,
    },
    /// A structural token reached the evaluator.
    #[error("unexpected '{token}' in postfix sequence")]
    UnexpectedToken {
        /// The offending token as written.
        token: String,
    },
    /// Nothing was left on the stack after evaluation.
    #[error("empty expression")]
    Empty,
    /// More than one value was left on the stack after evaluation.
    #[error("{count} values left without an operator")]
    TrailingOperands {
        /// Number of values left on the stack.
        count: usize,
    },
    /// The expression evaluated to a string instead of a number.
    #[error("result is a string, not a number")]
    StringResult,
}
