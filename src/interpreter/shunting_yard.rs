use tracing::trace;

use crate::{
    error::{ExprResult, IncorrectExpression},
    interpreter::{
        registry::{Associativity, Registry},
        token::{Fixity, OperatorKey, Token, render},
    },
};

/// An entry on the operator stack.
enum Pending {
    /// An operator waiting for its right operand, with the precedence it was
    /// registered with when it was pushed.
    Operator { key: OperatorKey, precedence: i32 },
    /// An open parenthesis. Its bookkeeping lives in the parallel group stack.
    Paren,
}

/// Bookkeeping for an open parenthesis.
struct Group {
    /// The function called by this group, with its declared arity.
    function:  Option<(String, usize)>,
    /// Arguments completed by a `,` so far.
    completed: usize,
    /// Whether the argument currently being read has no tokens yet.
    empty:     bool,
}

/// Converts an infix token sequence into postfix order.
///
/// This is the shunting-yard algorithm: operands go straight to the output,
/// operators wait on a stack until an operator that binds less tightly (or a
/// closing parenthesis) releases them. Function calls are checked against the
/// arity declared in `registry` when their closing parenthesis is reached.
///
/// The result depends only on the text and the registry, never on variable
/// values, so it can be cached and evaluated repeatedly.
///
/// # Errors
/// - [`ExprError::UnknownToken`](crate::error::ExprError::UnknownToken) for an
///   unregistered function or operator.
/// - [`ExprError::IncorrectExpression`](crate::error::ExprError::IncorrectExpression)
///   for unmatched parentheses, a misplaced `,`, an empty argument or group,
///   a call with the wrong number of arguments, a function name without its
///   `(`, an operator missing an operand, or two operands with no operator
///   between them.
///
/// # Example
/// ```
/// use rpncalc::interpreter::{
///     lexer::tokenize,
///     registry::Registry,
///     shunting_yard::to_postfix,
///     token::render,
/// };
///
/// let registry = Registry::new();
/// let infix = tokenize("2 ^ 3 ^ 2 - min(1, x)", &registry).unwrap();
/// let postfix = to_postfix(infix, &registry).unwrap();
/// assert_eq!(render(&postfix), "2 3 2 ^ ^ 1 x min -");
/// ```
pub fn to_postfix(infix: Vec<Token>, registry: &Registry) -> ExprResult<Vec<Token>> {
    let mut output = Vec::with_capacity(infix.len());
    let mut stack: Vec<Pending> = Vec::new();
    let mut groups: Vec<Group> = Vec::new();
    let mut function: Option<(String, usize)> = None;
    let mut expect_operand = true;
    let mut last_operator: Option<String> = None;

    for token in infix {
        if let Some((name, _)) = &function
           && !matches!(token, Token::OpenParen)
        {
            return Err(IncorrectExpression::UncalledFunction { name: name.clone() }.into());
        }

        if !matches!(token, Token::ArgSeparator | Token::CloseParen)
           && let Some(group) = groups.last_mut()
        {
            group.empty = false;
        }

        let starts_operand = matches!(token,
                                      Token::Number(_)
                                      | Token::StringLiteral { .. }
                                      | Token::Variable(_)
                                      | Token::Function(_)
                                      | Token::OpenParen
                                      | Token::Operator(OperatorKey { fixity: Fixity::Prefix,
                                                                      .. }));
        if starts_operand && !expect_operand {
            return Err(IncorrectExpression::MissingOperator { token: token.to_string() }.into());
        }

        let operator = match &token {
            Token::Operator(key) => Some(key.symbol.clone()),
            _ => None,
        };

        match token {
            Token::Number(_) | Token::StringLiteral { .. } | Token::Variable(_) => {
                output.push(token);
                expect_operand = false;
            },
            Token::Function(name) => {
                let arity = registry.resolve_function(&name)?.arity;
                function = Some((name, arity));
            },
            Token::OpenParen => {
                stack.push(Pending::Paren);
                groups.push(Group { function:  function.take(),
                                    completed: 0,
                                    empty:     true, });
            },
            Token::ArgSeparator => {
                if let Some(symbol) = last_operator {
                    return Err(IncorrectExpression::MissingOperand { symbol }.into());
                }
                pop_until_paren(&mut stack, &mut output);
                let group = groups.last_mut()
                                  .filter(|g| g.function.is_some())
                                  .ok_or(IncorrectExpression::MisplacedSeparator)?;
                if group.empty {
                    return Err(IncorrectExpression::EmptyGroup.into());
                }
                group.completed += 1;
                group.empty = true;
                expect_operand = true;
            },
            Token::CloseParen => {
                if let Some(symbol) = last_operator {
                    return Err(IncorrectExpression::MissingOperand { symbol }.into());
                }
                pop_until_paren(&mut stack, &mut output);
                if stack.pop().is_none() {
                    return Err(IncorrectExpression::UnmatchedCloseParen.into());
                }
                let group = groups.pop()
                                  .ok_or(IncorrectExpression::UnmatchedCloseParen)?;
                close_group(group, &mut output)?;
                expect_operand = false;
            },
            Token::Operator(key) => {
                if key.fixity == Fixity::Infix && expect_operand {
                    return Err(IncorrectExpression::MissingOperand { symbol: key.symbol }.into());
                }
                push_operator(key, registry, &mut stack, &mut output)?;
                expect_operand = true;
            },
        }

        last_operator = operator;
    }

    if let Some((name, _)) = function {
        return Err(IncorrectExpression::UncalledFunction { name }.into());
    }
    if let Some(symbol) = last_operator {
        return Err(IncorrectExpression::MissingOperand { symbol }.into());
    }

    while let Some(top) = stack.pop() {
        match top {
            Pending::Operator { key, .. } => output.push(Token::Operator(key)),
            Pending::Paren => return Err(IncorrectExpression::UnmatchedOpenParen.into()),
        }
    }

    trace!(postfix = %render(&output), "converted to postfix");
    Ok(output)
}

/// Moves operators from the stack to the output until a `(` is on top or
/// the stack is empty. The `(` itself stays.
fn pop_until_paren(stack: &mut Vec<Pending>, output: &mut Vec<Token>) {
    while let Some(Pending::Operator { .. }) = stack.last() {
        if let Some(Pending::Operator { key, .. }) = stack.pop() {
            output.push(Token::Operator(key));
        }
    }
}

/// Finishes a parenthesized group, emitting its function and checking the
/// number of arguments.
fn close_group(group: Group, output: &mut Vec<Token>) -> ExprResult<()> {
    let Some((name, arity)) = group.function else {
        if group.empty {
            return Err(IncorrectExpression::EmptyGroup.into());
        }
        return Ok(());
    };

    let found = match (group.completed, group.empty) {
        (0, true) => 0,
        (_, true) => return Err(IncorrectExpression::EmptyGroup.into()),
        (n, false) => n + 1,
    };

    if found != arity {
        return Err(IncorrectExpression::ArgumentCount { name,
                                                        expected: arity,
                                                        found }.into());
    }

    output.push(Token::Function(name));
    Ok(())
}

/// Pushes an operator, first releasing the operators it must follow.
///
/// A prefix operator has no left operand and releases nothing. An infix
/// operator releases every stacked operator that binds more tightly, and
/// those that bind equally when it is itself left-associative.
fn push_operator(key: OperatorKey,
                 registry: &Registry,
                 stack: &mut Vec<Pending>,
                 output: &mut Vec<Token>)
                 -> ExprResult<()> {
    let def = registry.resolve_operator(&key)?;
    let precedence = def.precedence;

    if key.fixity == Fixity::Infix {
        let left = def.associativity == Associativity::Left;
        while let Some(Pending::Operator { precedence: top, .. }) = stack.last() {
            if *top > precedence || (*top == precedence && left) {
                if let Some(Pending::Operator { key, .. }) = stack.pop() {
                    output.push(Token::Operator(key));
                }
            } else {
                break;
            }
        }
    }

    stack.push(Pending::Operator { key, precedence });
    Ok(())
}
