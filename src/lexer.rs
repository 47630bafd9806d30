//! The lexer turns markup text into a stream of [`Token`]s.
//!
//! Lexing is total: there is no input it rejects. Characters that mean
//! nothing special become literal [`TokenKind::Symbol`] tokens and it is the
//! parser's job to decide whether a *command* is known. Whitespace is
//! insignificant except as a token separator, and `%` starts a comment that
//! runs to the end of the line, matching TeX math mode.

use std::sync::Arc;

use crate::token::{SourceLocation, Token, TokenKind};

/// Tokenizer over a shared source string.
///
/// The lexer is forward-only; restarting means constructing a new `Lexer`.
pub struct Lexer {
    input: Arc<str>,
    pos: usize,
    eof_emitted: bool,
}

impl Lexer {
    /// Creates a lexer over `input`, positioned at offset 0.
    #[must_use]
    pub fn new(input: Arc<str>) -> Self {
        Self {
            input,
            pos: 0,
            eof_emitted: false,
        }
    }

    /// The shared source string.
    #[must_use]
    pub fn input(&self) -> &Arc<str> {
        &self.input
    }

    /// Current byte position of the lexer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn loc(&self, start: usize) -> SourceLocation {
        SourceLocation::new(Arc::clone(&self.input), start, self.pos)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Skips whitespace and `%` comments. Whitespace only separates tokens;
    /// it never produces one.
    fn skip_insignificant(&mut self) {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('%') => {
                    while let Some(c) = self.peek_char() {
                        self.bump();
                        if c == '\n' {
                            break;
                        }
                    }
                }
                _ => return,
            }
        }
    }

    /// Reads the next token. After the input is exhausted this returns
    /// [`TokenKind::Eof`] every time.
    pub fn next_token(&mut self) -> Token {
        self.skip_insignificant();

        let start = self.pos;
        let Some(ch) = self.bump() else {
            self.eof_emitted = true;
            return Token::new(TokenKind::Eof, "", self.loc(start));
        };

        match ch {
            '{' => Token::new(TokenKind::BeginGroup, "{", self.loc(start)),
            '}' => Token::new(TokenKind::EndGroup, "}", self.loc(start)),
            '^' => Token::new(TokenKind::Superscript, "^", self.loc(start)),
            '_' => Token::new(TokenKind::Subscript, "_", self.loc(start)),
            '&' => Token::new(TokenKind::Alignment, "&", self.loc(start)),
            '\\' => self.lex_control_sequence(start),
            _ => {
                let mut text = String::new();
                text.push(ch);
                Token::new(TokenKind::Symbol, text, self.loc(start))
            }
        }
    }

    /// Lexes the tail of a control sequence, the backslash already consumed.
    ///
    /// `\word` does maximal munch over ASCII letters and swallows trailing
    /// whitespace the way TeX does. `\\` becomes the row separator and any
    /// other `\X` is a one-character control symbol, reported with the
    /// symbol as its text so the command table can be keyed uniformly.
    fn lex_control_sequence(&mut self, start: usize) -> Token {
        match self.peek_char() {
            Some('\\') => {
                self.bump();
                Token::new(TokenKind::RowSeparator, "\\\\", self.loc(start))
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let name_start = self.pos;
                while matches!(self.peek_char(), Some(c) if c.is_ascii_alphabetic()) {
                    self.bump();
                }
                let name = self.input[name_start..self.pos].to_owned();
                let loc = self.loc(start);
                // TeX eats the space after a control word.
                while matches!(self.peek_char(), Some(c) if c.is_whitespace()) {
                    self.bump();
                }
                Token::new(TokenKind::ControlWord, name, loc)
            }
            Some(c) => {
                self.bump();
                let mut text = String::new();
                text.push(c);
                Token::new(TokenKind::ControlWord, text, self.loc(start))
            }
            // Dangling backslash at end of input: surface it as a symbol and
            // let the parser reject it as an unknown command.
            None => Token::new(TokenKind::ControlWord, "", self.loc(start)),
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token including the final [`TokenKind::Eof`], then
    /// `None`. This is the lazy-sequence view of the lexer.
    fn next(&mut self) -> Option<Token> {
        if self.eof_emitted {
            return None;
        }
        Some(self.next_token())
    }
}
