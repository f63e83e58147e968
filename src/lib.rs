//! # rpncalc
//!
//! rpncalc is an embeddable arithmetic expression interpreter written in Rust.
//! It scans a formula into tokens, reorders them into postfix notation with
//! the shunting-yard algorithm, and evaluates the result against a variable
//! environment and a registry of operators and functions. Expressions can
//! never run host code.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

/// Provides unified error types for lexing, conversion and evaluation.
///
/// This module defines every error the interpreter can raise. Each stage
/// reports failures synchronously with enough detail (positions, names,
/// expected and found counts) to explain what went wrong.
///
/// # Responsibilities
/// - Defines the lexical error kinds and the top-level error enum.
/// - Describes the structural reasons an expression is malformed.
/// - Integrates with `std::error::Error` through `thiserror`.
pub mod error;
/// Runs expressions repeatedly against mutable state.
///
/// This module ties the interpreter stages together behind a facade that owns
/// variables, forwards registrations and caches compiled postfix sequences by
/// their literal text.
///
/// # Responsibilities
/// - Manages the variable environment, including the `pi` and `e` constants.
/// - Caches postfix sequences, optionally with a bounded capacity.
/// - Exposes the division-by-zero toggle and configuration loading.
pub mod executor;
/// Implements the interpreter stages.
///
/// This module contains the token model, the operator and function registry,
/// the lexer, the shunting-yard converter and the stack evaluator.
///
/// # Responsibilities
/// - Converts text to infix tokens, infix to postfix, postfix to a number.
/// - Resolves operators and functions through the registry.
/// - Keeps every stage free of I/O and bounded in time and memory.
pub mod interpreter;

pub use error::{ExprError, ExprResult, IncorrectExpression, LexError};
pub use executor::{Executor, ExecutorConfig};

/// Evaluates a single expression with a fresh [`Executor`].
///
/// Only the constants `pi` and `e` are defined. Use an [`Executor`] directly
/// to bind variables, register operators or evaluate many expressions.
///
/// # Errors
/// Returns an error if lexing, conversion or evaluation fails.
///
/// # Examples
/// ```
/// use rpncalc::calculate;
///
/// assert_eq!(calculate("2 + 3 * 4").unwrap(), 14.0);
/// assert_eq!(calculate("(2 + 3) * 4").unwrap(), 20.0);
///
/// // Example with an intentional error (unknown variable).
/// assert!(calculate("x + 1").is_err());
/// ```
pub fn calculate(source: &str) -> ExprResult<f64> {
    Executor::new().execute(source)
}
