use rpncalc::{
    ExprError, LexError,
    interpreter::{
        lexer::tokenize,
        registry::{Associativity, OperatorDefinition, Registry},
        token::{QuoteKind, Token},
    },
};

fn lex(src: &str) -> Vec<Token> {
    tokenize(src, &Registry::new()).unwrap_or_else(|e| panic!("'{src}' failed to lex: {e}"))
}

fn lex_err(src: &str) -> ExprError {
    match tokenize(src, &Registry::new()) {
        Ok(tokens) => panic!("'{src}' lexed to {tokens:?} but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn numbers() {
    assert_eq!(lex("42 3.5 .25 7. 1e3 2.5E-2"),
               vec![Token::Number(42.0),
                    Token::Number(3.5),
                    Token::Number(0.25),
                    Token::Number(7.0),
                    Token::Number(1000.0),
                    Token::Number(0.025)]);
}

#[test]
fn whitespace_is_skipped() {
    assert_eq!(lex(" \t1\n+\r\n2 "), lex("1+2"));
}

#[test]
fn identifiers_become_variables_or_functions() {
    assert_eq!(lex("foo_1 sin(x)"),
               vec![Token::Variable("foo_1".into()),
                    Token::Function("sin".into()),
                    Token::OpenParen,
                    Token::Variable("x".into()),
                    Token::CloseParen]);
}

#[test]
fn name_followed_by_space_then_paren_is_a_variable() {
    assert_eq!(lex("sin (x)")[0], Token::Variable("sin".into()));
}

#[test]
fn structural_tokens() {
    assert_eq!(lex("max(1,2)"),
               vec![Token::Function("max".into()),
                    Token::OpenParen,
                    Token::Number(1.0),
                    Token::ArgSeparator,
                    Token::Number(2.0),
                    Token::CloseParen]);
}

#[test]
fn string_literals_keep_quote_kind() {
    assert_eq!(lex(r#"'a b' "c""#),
               vec![Token::StringLiteral { text:  "a b".into(),
                                           quote: QuoteKind::Single, },
                    Token::StringLiteral { text:  "c".into(),
                                           quote: QuoteKind::Double, }]);
}

#[test]
fn string_escapes() {
    assert_eq!(lex(r#""say \"hi\"\n""#),
               vec![Token::StringLiteral { text:  "say \"hi\"\n".into(),
                                           quote: QuoteKind::Double, }]);
    assert_eq!(lex(r"'it\'s \\ ok'"),
               vec![Token::StringLiteral { text:  "it's \\ ok".into(),
                                           quote: QuoteKind::Single, }]);
}

#[test]
fn unary_and_binary_minus() {
    assert_eq!(lex("-1 - -2"),
               vec![Token::prefix("-"),
                    Token::Number(1.0),
                    Token::infix("-"),
                    Token::prefix("-"),
                    Token::Number(2.0)]);
    assert_eq!(lex("(-x)")[1], Token::prefix("-"));
    assert_eq!(lex("f(1,-x)")[4], Token::prefix("-"));
}

#[test]
fn adjacent_symbols_are_split() {
    assert_eq!(lex("3*-2"),
               vec![Token::Number(3.0),
                    Token::infix("*"),
                    Token::prefix("-"),
                    Token::Number(2.0)]);
}

#[test]
fn multi_character_operators_match_longest_first() {
    let mut registry = Registry::new();
    registry.register_operator(OperatorDefinition::binary("**", 30, Associativity::Right, f64::powf));
    registry.register_operator(OperatorDefinition::binary("<=", 5, Associativity::Left, |a, b| {
                                   f64::from(u8::from(a <= b))
                               }));

    let tokens = tokenize("2**3 <= 2*-4", &registry).unwrap();
    assert_eq!(tokens,
               vec![Token::Number(2.0),
                    Token::infix("**"),
                    Token::Number(3.0),
                    Token::infix("<="),
                    Token::Number(2.0),
                    Token::infix("*"),
                    Token::prefix("-"),
                    Token::Number(4.0)]);
}

#[test]
fn unexpected_character() {
    assert_eq!(lex_err("1 $ 2"),
               ExprError::Lex(LexError::UnexpectedCharacter { character: '$',
                                                              position:  2, }));
    assert!(matches!(lex_err("1 . 2"), ExprError::Lex(LexError::UnexpectedCharacter { .. })));
}

#[test]
fn unterminated_strings() {
    assert_eq!(lex_err("1 + 'abc"),
               ExprError::Lex(LexError::UnterminatedString { position: 4 }));
    assert!(matches!(lex_err("\"abc\\\""), ExprError::Lex(LexError::UnterminatedString { .. })));
}

#[test]
fn malformed_numbers() {
    assert_eq!(lex_err("1.2.3"),
               ExprError::Lex(LexError::MalformedNumber { literal:  "1.2.3".into(),
                                                          position: 0, }));
    assert!(matches!(lex_err("2 * 1e"), ExprError::Lex(LexError::MalformedNumber { .. })));
    assert_eq!(lex_err("1.5e3.2"),
               ExprError::Lex(LexError::MalformedNumber { literal:  "1.5e3.2".into(),
                                                          position: 0, }));
    assert_eq!(lex_err("2 + 1e5.5"),
               ExprError::Lex(LexError::MalformedNumber { literal:  "1e5.5".into(),
                                                          position: 4, }));
    assert!(matches!(lex_err(".5e1.0"), ExprError::Lex(LexError::MalformedNumber { .. })));
}

#[test]
fn operator_without_needed_fixity_is_unknown() {
    assert_eq!(lex_err("*2"), ExprError::UnknownToken { name: "*".into() });
    assert_eq!(lex_err("2 + / 3"), ExprError::UnknownToken { name: "/".into() });
}
