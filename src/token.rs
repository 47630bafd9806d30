//! Tokens produced by the lexer.
//!
//! A token records its kind, its literal text, and the byte range it covers
//! in the source string. The source is shared as an `Arc<str>` so that
//! locations stay cheap to clone and errors can render the surrounding
//! context long after lexing finished.

use std::fmt;
use std::sync::Arc;

/// A byte range into the shared source string.
///
/// `start`/`end` are byte offsets; the input itself travels along so a
/// location can always reconstruct the text it covers.
#[derive(Clone)]
pub struct SourceLocation {
    /// The full source the range points into.
    pub input: Arc<str>,
    /// Byte offset of the first covered byte.
    pub start: usize,
    /// Byte offset one past the last covered byte.
    pub end: usize,
}

impl SourceLocation {
    /// Creates a location covering `start..end` of `input`.
    #[must_use]
    pub fn new(input: Arc<str>, start: usize, end: usize) -> Self {
        Self { input, start, end }
    }

    /// The text covered by this location.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.input[self.start..self.end]
    }
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl PartialEq for SourceLocation {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

/// What sort of token the lexer recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A backslash-prefixed command. For `\frac` the token text is `frac`;
    /// control symbols such as `\,` carry the single symbol character.
    ControlWord,
    /// A single literal character (letter, digit, operator, punctuation).
    Symbol,
    /// `{`
    BeginGroup,
    /// `}`
    EndGroup,
    /// `^`
    Superscript,
    /// `_`
    Subscript,
    /// `&` column separator; only meaningful inside a table environment,
    /// which is the parser's call.
    Alignment,
    /// `\\` row separator.
    RowSeparator,
    /// End of input. Emitted exactly once.
    Eof,
}

/// One lexed token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// Literal text. For [`TokenKind::ControlWord`] this is the command
    /// name without the backslash.
    pub text: String,
    /// Source byte range the token was read from.
    pub loc: SourceLocation,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, loc: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            loc,
        }
    }

    /// Byte offset where the token starts, for error ordering.
    #[must_use]
    pub fn position(&self) -> usize {
        self.loc.start
    }
}
