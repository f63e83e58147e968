/// Lexical errors.
///
/// Defines the failures the lexer reports while scanning source text:
/// characters that start no token, quoted literals missing their closing
/// quote, and numeric literals that cannot be read as a single number.
pub mod lex_error;
/// Expression errors.
///
/// Contains the top-level error type returned by every stage of the
/// interpreter, including the structured reasons an expression is rejected as
/// malformed.
pub mod expression_error;

pub use expression_error::{ExprError, ExprResult, IncorrectExpression};
pub use lex_error::LexError;
