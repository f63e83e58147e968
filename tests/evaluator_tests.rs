use std::collections::{BTreeMap, HashMap};

use rpncalc::{
    ExprError, IncorrectExpression,
    interpreter::{
        evaluator::evaluate,
        registry::{Associativity, DivisionPolicy, FunctionDefinition, OperatorDefinition, Registry},
        token::{QuoteKind, Token},
        value::Value,
    },
};

fn no_vars() -> HashMap<String, f64> {
    HashMap::new()
}

fn num(n: f64) -> Token {
    Token::Number(n)
}

fn string(text: &str) -> Token {
    Token::StringLiteral { text:  text.into(),
                           quote: QuoteKind::Double, }
}

#[test]
fn binary_operators_take_operands_in_order() {
    let registry = Registry::new();
    assert_eq!(evaluate(&[num(7.0), num(2.0), Token::infix("-")], &no_vars(), &registry).unwrap(),
               5.0);
    assert_eq!(evaluate(&[num(2.0), num(10.0), Token::infix("^")], &no_vars(), &registry).unwrap(),
               1024.0);
    assert_eq!(evaluate(&[num(9.0), num(3.0), Token::infix("/")], &no_vars(), &registry).unwrap(),
               3.0);
}

#[test]
fn prefix_operators_take_one_operand() {
    let registry = Registry::new();
    let postfix = [num(2.0), Token::prefix("-"), num(3.0), Token::infix("+")];
    assert_eq!(evaluate(&postfix, &no_vars(), &registry).unwrap(), 1.0);
}

#[test]
fn variables_resolve_from_any_environment() {
    let registry = Registry::new();
    let postfix = [Token::Variable("x".into()),
                   Token::Variable("y".into()),
                   Token::infix("*")];

    let hash = HashMap::from([("x".to_string(), 3.0), ("y".to_string(), 4.0)]);
    let tree = BTreeMap::from([("x".to_string(), 5.0), ("y".to_string(), 6.0)]);

    assert_eq!(evaluate(&postfix, &hash, &registry).unwrap(), 12.0);
    assert_eq!(evaluate(&postfix, &tree, &registry).unwrap(), 30.0);
}

#[test]
fn unknown_variable() {
    let postfix = [Token::Variable("x".into()), num(1.0), Token::infix("+")];
    assert_eq!(evaluate(&postfix, &no_vars(), &Registry::new()),
               Err(ExprError::UnknownVariable { name: "x".into() }));
}

#[test]
fn functions_receive_arguments_in_source_order() {
    let mut registry = Registry::new();
    registry.register_function(FunctionDefinition::numeric("sub", 2, |a| a[0] - a[1]));
    let postfix = [num(10.0), num(4.0), Token::Function("sub".into())];
    assert_eq!(evaluate(&postfix, &no_vars(), &registry).unwrap(), 6.0);
}

#[test]
fn functions_can_consume_strings() {
    let mut registry = Registry::new();
    registry.register_function(FunctionDefinition::new("len", 1, |args: &[Value]| {
                                   Ok(args[0].as_str().map_or(0.0, |s| s.len() as f64))
                               }));
    let postfix = [string("hello"), Token::Function("len".into()), num(1.0), Token::infix("+")];
    assert_eq!(evaluate(&postfix, &no_vars(), &registry).unwrap(), 6.0);
}

#[test]
fn strings_are_rejected_by_operators_and_numeric_functions() {
    let registry = Registry::new();
    assert_eq!(evaluate(&[string("a"), num(1.0), Token::infix("+")], &no_vars(), &registry),
               Err(IncorrectExpression::StringOperand { symbol: "+".into() }.into()));
    assert_eq!(evaluate(&[string("a"), Token::prefix("-")], &no_vars(), &registry),
               Err(IncorrectExpression::StringOperand { symbol: "-".into() }.into()));
    assert_eq!(evaluate(&[string("a"), Token::Function("sin".into())], &no_vars(), &registry),
               Err(IncorrectExpression::StringOperand { symbol: "sin".into() }.into()));
    assert_eq!(evaluate(&[string("a")], &no_vars(), &registry),
               Err(IncorrectExpression::StringResult.into()));
}

#[test]
fn missing_operands() {
    let registry = Registry::new();
    assert_eq!(evaluate(&[num(1.0), Token::infix("+")], &no_vars(), &registry),
               Err(IncorrectExpression::MissingOperand { symbol: "+".into() }.into()));
    assert_eq!(evaluate(&[num(1.0), Token::Function("max".into())], &no_vars(), &registry),
               Err(IncorrectExpression::MissingOperand { symbol: "max".into() }.into()));
}

#[test]
fn stack_must_end_with_one_value() {
    let registry = Registry::new();
    assert_eq!(evaluate(&[], &no_vars(), &registry),
               Err(IncorrectExpression::Empty.into()));
    assert_eq!(evaluate(&[num(1.0), num(2.0)], &no_vars(), &registry),
               Err(IncorrectExpression::TrailingOperands { count: 2 }.into()));
}

#[test]
fn structural_tokens_are_rejected() {
    let registry = Registry::new();
    for token in [Token::OpenParen, Token::CloseParen, Token::ArgSeparator] {
        assert!(matches!(evaluate(&[num(1.0), token], &no_vars(), &registry),
                         Err(ExprError::IncorrectExpression(IncorrectExpression::UnexpectedToken { .. }))));
    }
}

#[test]
fn unregistered_operator_in_postfix() {
    let postfix = [num(1.0), num(2.0), Token::infix("%")];
    assert_eq!(evaluate(&postfix, &no_vars(), &Registry::new()),
               Err(ExprError::UnknownToken { name: "%".into() }));
}

#[test]
fn division_policy_applies_to_exact_zero_only() {
    let mut registry = Registry::new();
    let by_zero = [num(1.0), num(0.0), Token::infix("/")];
    let by_negative_zero = [num(1.0), num(-0.0), Token::infix("/")];

    assert_eq!(evaluate(&by_zero, &no_vars(), &registry), Err(ExprError::DivisionByZero));
    assert_eq!(evaluate(&by_negative_zero, &no_vars(), &registry),
               Err(ExprError::DivisionByZero));
    assert_eq!(evaluate(&[num(1.0), num(1e-300), Token::infix("/")], &no_vars(), &registry).unwrap(),
               1e300);

    registry.set_division_policy(DivisionPolicy::Infinity);
    assert_eq!(evaluate(&by_zero, &no_vars(), &registry).unwrap(), f64::INFINITY);
    assert_eq!(evaluate(&by_negative_zero, &no_vars(), &registry).unwrap(), f64::INFINITY);
}

#[test]
fn custom_division_operators_follow_the_policy() {
    let mut registry = Registry::new();
    registry.register_operator(OperatorDefinition::division("%", 20, Associativity::Left, |a, b| a % b));
    let postfix = [num(7.0), num(0.0), Token::infix("%")];

    assert_eq!(evaluate(&postfix, &no_vars(), &registry), Err(ExprError::DivisionByZero));
    registry.set_division_policy(DivisionPolicy::Infinity);
    assert_eq!(evaluate(&postfix, &no_vars(), &registry).unwrap(), f64::INFINITY);
}

#[test]
fn function_errors_propagate() {
    let mut registry = Registry::new();
    registry.register_function(FunctionDefinition::new("fail", 0, |_| Err(ExprError::DivisionByZero)));
    assert_eq!(evaluate(&[Token::Function("fail".into())], &no_vars(), &registry),
               Err(ExprError::DivisionByZero));
}
