use std::fmt;

/// Represents a lexical or semantic unit of an expression.
///
/// The lexer produces tokens in infix order and the shunting-yard converter
/// reorders them into postfix order. Both sequences use this one type, so
/// every consumer matches over all variants.
///
/// Operator and function tokens carry only the key they are registered
/// under; their precedence, arity and behavior are looked up in the
/// [`Registry`](crate::interpreter::registry::Registry) when needed.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `.5` or `2.1e-10`.
    Number(f64),
    /// Quoted literal tokens, such as `'abc'` or `"abc"`, with escapes
    /// already resolved.
    StringLiteral {
        /// The literal contents without quotes.
        text:  String,
        /// Which quote delimited the literal.
        quote: QuoteKind,
    },
    /// Identifier tokens that are not immediately followed by `(`.
    Variable(String),
    /// An operator symbol together with the role it plays at its position.
    Operator(OperatorKey),
    /// Identifier tokens immediately followed by `(`.
    Function(String),
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `,`
    ArgSeparator,
}

/// The delimiter used by a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteKind {
    /// `'...'`
    Single,
    /// `"..."`
    Double,
}

impl QuoteKind {
    /// Returns the quote character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }
}

/// Whether an operator is applied to one operand before it or to two
/// operands around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    /// Unary, written before its operand (`-x`).
    Prefix,
    /// Binary, written between its operands (`a - b`).
    Infix,
}

/// The key an operator is registered under.
///
/// The same symbol may be registered once per fixity; `-` is both the
/// binary subtraction and the unary negation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperatorKey {
    /// The operator's symbol as written in source.
    pub symbol: String,
    /// The role the symbol plays.
    pub fixity: Fixity,
}

impl OperatorKey {
    /// Creates a key for a unary operator.
    pub fn prefix(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into(),
               fixity: Fixity::Prefix, }
    }

    /// Creates a key for a binary operator.
    pub fn infix(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into(),
               fixity: Fixity::Infix, }
    }
}

impl Token {
    /// Convenience constructor for a binary operator token.
    pub fn infix(symbol: impl Into<String>) -> Self {
        Self::Operator(OperatorKey::infix(symbol))
    }

    /// Convenience constructor for a unary operator token.
    pub fn prefix(symbol: impl Into<String>) -> Self {
        Self::Operator(OperatorKey::prefix(symbol))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::StringLiteral { text, quote } => {
                let q = quote.as_char();
                write!(f, "{q}{text}{q}")
            },
            Self::Variable(name) | Self::Function(name) => f.write_str(name),
            Self::Operator(key) => match key.fixity {
                Fixity::Prefix => write!(f, "{}u", key.symbol),
                Fixity::Infix => f.write_str(&key.symbol),
            },
            Self::OpenParen => f.write_str("("),
            Self::CloseParen => f.write_str(")"),
            Self::ArgSeparator => f.write_str(","),
        }
    }
}

/// Renders a token sequence separated by single spaces.
///
/// Prefix operators are suffixed with `u` so that a postfix sequence reads
/// unambiguously.
///
/// # Example
/// ```
/// use rpncalc::interpreter::token::{Token, render};
///
/// let postfix = [Token::Number(2.0), Token::prefix("-"), Token::Number(3.0), Token::infix("+")];
/// assert_eq!(render(&postfix), "2 -u 3 +");
/// ```
#[must_use]
pub fn render(tokens: &[Token]) -> String {
    tokens.iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join(" ")
}
