//! Error types for the two engine stages.
//!
//! Parsing never aborts: errors are accumulated and handed back next to a
//! best-effort tree. Layout errors are likewise data, reported alongside the
//! box tree while the failing sub-layout is replaced with a placeholder.
//! Nothing in this crate is a process-level fault.

use std::fmt;

use thiserror::Error;

use crate::token::{SourceLocation, Token};

/// An error found while parsing markup into an atom tree.
#[derive(Debug, Error)]
#[error("math parse error: {kind}{context}")]
pub struct ParseError {
    /// Categorized reason for the failure.
    pub kind: ParseErrorKind,
    /// Byte offset of the offending token, when known.
    pub position: Option<usize>,
    /// Byte length of the offending token, when known.
    pub length: Option<usize>,
    context: ErrorContext,
}

impl ParseError {
    /// Creates an error with no position information.
    #[must_use]
    pub fn new(kind: ParseErrorKind) -> Self {
        Self {
            kind,
            position: None,
            length: None,
            context: ErrorContext::None,
        }
    }

    /// Creates an error pointing at `token`.
    #[must_use]
    pub fn with_token(kind: ParseErrorKind, token: &Token) -> Self {
        Self::at(kind, &token.loc)
    }

    /// Creates an error pointing at a source location.
    #[must_use]
    pub fn at(kind: ParseErrorKind, loc: &SourceLocation) -> Self {
        Self {
            kind,
            position: Some(loc.start),
            length: Some(loc.end.saturating_sub(loc.start)),
            context: ErrorContext::Location(loc.clone()),
        }
    }
}

/// The specific reason for a [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A control word that is not in the command table.
    #[error(r"unknown command \{command}")]
    UnknownCommand {
        /// The unrecognized command name, without the backslash.
        command: String,
    },
    /// A command did not receive all its required arguments.
    #[error(r"\{command} is missing argument {index} of {expected}")]
    ArgumentArityMismatch {
        /// The command name.
        command: String,
        /// 1-based index of the first missing argument.
        index: usize,
        /// Total number of required arguments.
        expected: usize,
    },
    /// A `\left` without `\right` (or the reverse), or a delimiter token
    /// that is not a valid delimiter.
    #[error("unmatched delimiter {delimiter}")]
    UnmatchedDelimiter {
        /// The delimiter or command text involved.
        delimiter: String,
    },
    /// An unmatched `{` (reported at the opener) or a stray `}`.
    #[error("unmatched group brace")]
    UnmatchedGroup,
    /// Two superscripts on the same atom.
    #[error("double superscript")]
    DoubleSuperscript,
    /// Two subscripts on the same atom.
    #[error("double subscript")]
    DoubleSubscript,
    /// The input ended where more tokens were required.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
    },
    /// `\begin{...}` named an environment the table does not define.
    #[error("unknown environment {{{name}}}")]
    UnknownEnvironment {
        /// The environment name.
        name: String,
    },
    /// `\end{...}` did not name the environment opened by `\begin`.
    #[error(r"\begin{{{begin}}} ended by \end{{{end}}}")]
    MismatchedEnvironment {
        /// The name the environment opened with.
        begin: String,
        /// The name it closed with.
        end: String,
    },
    /// An `&` or `\\` outside any table environment.
    #[error("misplaced {token} outside a table environment")]
    MisplacedAlignment {
        /// The literal token text.
        token: String,
    },
}

/// An error found while laying out an atom tree.
///
/// Layout errors are diagnostics: the engine substitutes a placeholder box
/// and keeps going, so one bad symbol never blanks the whole expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The metrics provider has no metrics for a requested glyph.
    #[error("no font metrics for glyph '{glyph}'")]
    MissingGlyphMetric {
        /// The glyph text that could not be measured.
        glyph: String,
    },
    /// A table's rows disagree on column count.
    #[error("malformed table: row {row} has {found} columns, expected {expected}")]
    MalformedTableShape {
        /// 0-based row index of the first bad row.
        row: usize,
        /// Column count established by the first row.
        expected: usize,
        /// Column count actually found.
        found: usize,
    },
    /// No glyph variant or assembly was tall enough for a required size.
    #[error("no variant of glyph '{glyph}' reaches the required size")]
    MissingFontStyleVariant {
        /// The base glyph whose variants fell short.
        glyph: String,
    },
}

#[derive(Debug)]
enum ErrorContext {
    None,
    Location(SourceLocation),
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Location(loc) => {
                if loc.start >= loc.input.len() {
                    write!(f, " at end of input")
                } else {
                    write!(f, " at position {}: '{}'", loc.start, loc.text())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::token::TokenKind;

    #[test]
    fn error_without_position() {
        let err = ParseError::new(ParseErrorKind::DoubleSuperscript);
        assert_eq!(err.position, None);
        assert!(err.to_string().contains("double superscript"));
    }

    #[test]
    fn error_with_token_context() {
        let input: Arc<str> = Arc::from(r"x + \unknown{y}");
        let loc = SourceLocation::new(Arc::clone(&input), 4, 12);
        let token = Token::new(TokenKind::ControlWord, "unknown", loc);

        let err = ParseError::with_token(
            ParseErrorKind::UnknownCommand {
                command: "unknown".to_owned(),
            },
            &token,
        );
        assert_eq!(err.position, Some(4));
        assert_eq!(err.length, Some(8));
        let rendered = err.to_string();
        assert!(rendered.contains(r"unknown command \unknown"));
        assert!(rendered.contains("at position 4"));
    }

    #[test]
    fn layout_error_messages() {
        let err = LayoutError::MalformedTableShape {
            row: 1,
            expected: 2,
            found: 3,
        };
        assert!(err.to_string().contains("row 1 has 3 columns"));
    }
}
