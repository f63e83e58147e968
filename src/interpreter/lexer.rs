use logos::Logos;
use tracing::trace;

use crate::{
    error::{ExprError, ExprResult, LexError},
    interpreter::{
        registry::Registry,
        token::{Fixity, OperatorKey, QuoteKind, Token},
    },
};

/// Raw lexemes recognized before operator symbols are resolved.
///
/// Runs of punctuation are matched as a whole by [`Lexeme::Symbol`] and split
/// into registered operators afterwards, since the operator set is only known
/// at runtime.
#[derive(Logos, Debug, PartialEq, Clone)]
enum Lexeme {
    /// Numeric literals, such as `3.14`, `.5`, `5.` or `2.1e-10`.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// Numeric literals with more than one decimal point, such as `1.2.3` or
    /// `1.5e3.2`, or with an exponent marker but no exponent, such as `1e`.
    #[regex(r"[0-9]*\.[0-9]*\.[0-9.]*")]
    #[regex(r"[0-9]+(\.[0-9]*)?[eE][+-]?")]
    #[regex(r"[0-9]+(\.[0-9]*)?[eE][+-]?[0-9]+\.[0-9.]*")]
    #[regex(r"\.[0-9]+[eE][+-]?[0-9]+\.[0-9.]*")]
    MalformedNumber,
    /// `"..."`
    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()), allow_greedy = true)]
    DoubleQuoted(String),
    /// `'...'`
    #[regex(r"'([^'\\]|\\.)*'", |lex| unescape(lex.slice()), allow_greedy = true)]
    SingleQuoted(String),
    /// A quoted literal running into the end of input.
    #[regex(r#""([^"\\]|\\.)*\\?"#, allow_greedy = true)]
    #[regex(r"'([^'\\]|\\.)*\\?", allow_greedy = true)]
    UnterminatedString,
    /// Variable or function names such as `x` or `sin`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `(`
    #[token("(")]
    OpenParen,
    /// `)`
    #[token(")")]
    CloseParen,
    /// `,`
    #[token(",")]
    Comma,
    /// A run of operator characters such as `*-` or `**`.
    #[regex(r#"[^\sa-zA-Z0-9_().,'"]+"#, |lex| lex.slice().to_string(), allow_greedy = true)]
    Symbol(String),
    /// Whitespace.
    #[regex(r"\s+", logos::skip)]
    Ignored,
}

/// Parses a numeric literal from the current token slice.
fn parse_number(lex: &logos::Lexer<Lexeme>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Strips the surrounding quotes from a literal and resolves its escapes.
///
/// `\n`, `\t` and `\r` map to their control characters; any other escaped
/// character, including quotes and backslashes, is taken literally.
fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {},
        }
    }

    out
}

/// Returns `true` if an operator at this point would have no left operand.
fn is_unary_position(previous: Option<&Token>) -> bool {
    matches!(previous,
             None | Some(Token::Operator(_) | Token::OpenParen | Token::ArgSeparator))
}

/// Scans `expression` into a sequence of tokens in infix order.
///
/// Operator symbols are recognized against the operators in `registry`,
/// longest symbol first, so that a registered `**` wins over `*`. A symbol
/// is read as unary when it starts the expression or follows another
/// operator, `(` or `,`, and as binary everywhere else.
///
/// # Errors
/// - [`LexError`] on an unrecognized character, an unterminated string or a
///   malformed number.
/// - [`ExprError::UnknownToken`] when a symbol has no definition for the
///   role it plays, such as a leading `*`.
///
/// # Example
/// ```
/// use rpncalc::interpreter::{lexer::tokenize, registry::Registry, token::Token};
///
/// let tokens = tokenize("3*-x", &Registry::new()).unwrap();
/// assert_eq!(tokens,
///            vec![Token::Number(3.0),
///                 Token::infix("*"),
///                 Token::prefix("-"),
///                 Token::Variable("x".into())]);
/// ```
pub fn tokenize(expression: &str, registry: &Registry) -> ExprResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut lexer = Lexeme::lexer(expression);

    while let Some(lexeme) = lexer.next() {
        let position = lexer.span().start;
        let Ok(lexeme) = lexeme else {
            let character = lexer.slice().chars().next().unwrap_or_default();
            return Err(LexError::UnexpectedCharacter { character, position }.into());
        };

        match lexeme {
            Lexeme::Number(n) => tokens.push(Token::Number(n)),
            Lexeme::MalformedNumber => {
                return Err(LexError::MalformedNumber { literal: lexer.slice().to_string(),
                                                       position }.into());
            },
            Lexeme::DoubleQuoted(text) => tokens.push(Token::StringLiteral { text,
                                                                             quote: QuoteKind::Double }),
            Lexeme::SingleQuoted(text) => tokens.push(Token::StringLiteral { text,
                                                                             quote: QuoteKind::Single }),
            Lexeme::UnterminatedString => {
                return Err(LexError::UnterminatedString { position }.into());
            },
            Lexeme::Identifier(name) => {
                if lexer.remainder().starts_with('(') {
                    tokens.push(Token::Function(name));
                } else {
                    tokens.push(Token::Variable(name));
                }
            },
            Lexeme::OpenParen => tokens.push(Token::OpenParen),
            Lexeme::CloseParen => tokens.push(Token::CloseParen),
            Lexeme::Comma => tokens.push(Token::ArgSeparator),
            Lexeme::Symbol(run) => split_symbols(&run, position, registry, &mut tokens)?,
            Lexeme::Ignored => {},
        }
    }

    trace!(expression, tokens = tokens.len(), "tokenized");
    Ok(tokens)
}

/// Splits a run of operator characters into registered symbols, matching the
/// longest symbol at each step.
fn split_symbols(run: &str,
                 start: usize,
                 registry: &Registry,
                 tokens: &mut Vec<Token>)
                 -> ExprResult<()> {
    let longest = registry.longest_symbol();
    let mut offset = 0;

    while offset < run.len() {
        let rest = &run[offset..];
        let symbol = rest.char_indices()
                         .map(|(i, c)| i + c.len_utf8())
                         .take_while(|&end| end <= longest)
                         .filter(|&end| registry.is_symbol(&rest[..end]))
                         .last()
                         .map(|end| &rest[..end]);

        let Some(symbol) = symbol else {
            let character = rest.chars().next().unwrap_or_default();
            return Err(LexError::UnexpectedCharacter { character,
                                                       position: start + offset }.into());
        };

        let fixity = if is_unary_position(tokens.last()) {
            Fixity::Prefix
        } else {
            Fixity::Infix
        };

        if !registry.has_operator(symbol, fixity) {
            return Err(ExprError::UnknownToken { name: symbol.to_string() });
        }

        tokens.push(Token::Operator(OperatorKey { symbol: symbol.to_string(),
                                                  fixity }));
        offset += symbol.len();
    }

    Ok(())
}
