use thiserror::Error;

/// Represents all errors that can occur while scanning source text.
///
/// Every variant records the byte offset in the source where the offending
/// lexeme starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that cannot start any token, or a run of operator
    /// characters that contains no registered symbol.
    #[error("Unexpected character '{character}' at position {position}.")]
    UnexpectedCharacter {
        /// The character encountered.
        character: char,
        /// Byte offset of the character.
        position:  usize,
    },
    /// A quoted literal reached the end of input without its closing quote.
    #[error("Unterminated string literal starting at position {position}.")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        position: usize,
    },
    /// A numeric literal with more than one decimal point or a dangling
    /// exponent.
    #[error("Malformed number '{literal}' at position {position}.")]
    MalformedNumber {
        /// The literal as written.
        literal:  String,
        /// Byte offset of the literal.
        position: usize,
    },
}

impl LexError {
    /// Returns the byte offset the error refers to.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { position, .. }
            | Self::UnterminatedString { position }
            | Self::MalformedNumber { position, .. } => *position,
        }
    }
}
