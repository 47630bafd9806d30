//! Recursive-descent parser from tokens to a [`MathList`].
//!
//! Parsing never gives up: every error is recorded and recovered from, so
//! the caller always gets a best-effort tree alongside the error list, and
//! errors come back ordered by source position. Unknown commands leave a
//! placeholder atom behind; unmatched groups are closed implicitly at end
//! of input with one error per opener.

use std::sync::Arc;

use crate::atom::{
    Accent, Atom, AtomBody, AtomClass, Delimited, Fraction, LargeOp, MathList, Radical, Table,
};
use crate::commands::{resolve_delimiter, Command, COMMANDS, ENVIRONMENTS};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::Lexer;
use crate::token::{SourceLocation, Token, TokenKind};

/// The result of a parse: a best-effort tree plus accumulated errors.
#[derive(Debug)]
pub struct ParseOutcome {
    /// The parsed expression tree. Well-formed even when errors occurred.
    pub list: MathList,
    /// All errors found, ordered by source position.
    pub errors: Vec<ParseError>,
}

impl ParseOutcome {
    /// True if parsing reported no errors.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parses math markup into an atom tree. Total: never panics, never fails.
#[must_use]
pub fn parse(input: &str) -> ParseOutcome {
    let mut parser = Parser::new(input);
    let (list, _) = parser.parse_list(Stop::Eof, None);
    let mut errors = parser.errors;
    errors.sort_by_key(|e| e.position.unwrap_or(usize::MAX));
    ParseOutcome { list, errors }
}

/// What ends the list currently being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    /// Top level: only end of input.
    Eof,
    /// A braced group: `}`.
    Group,
    /// A `\left` body: `\right`.
    Right,
    /// A table cell: `&`, `\\`, or `\end`.
    TableCell,
}

/// Why a list ended.
#[derive(Debug)]
enum StopReason {
    Eof,
    Group,
    Right { loc: SourceLocation },
    Alignment,
    Row,
    End { name: String, loc: SourceLocation },
}

struct Parser {
    lexer: Lexer,
    lookahead: Option<Token>,
    errors: Vec<ParseError>,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            lexer: Lexer::new(Arc::from(input)),
            lookahead: None,
            errors: Vec::new(),
        }
    }

    fn fetch(&mut self) -> &Token {
        if self.lookahead.is_none() {
            self.lookahead = Some(self.lexer.next_token());
        }
        self.lookahead.as_ref().expect("lookahead just filled")
    }

    fn consume(&mut self) -> Token {
        self.fetch();
        self.lookahead.take().expect("lookahead just filled")
    }

    fn report(&mut self, kind: ParseErrorKind, token: &Token) {
        self.errors.push(ParseError::with_token(kind, token));
    }

    fn report_at(&mut self, kind: ParseErrorKind, loc: &SourceLocation) {
        self.errors.push(ParseError::at(kind, loc));
    }

    /// Parses atoms until the stop condition. The terminating token is
    /// consumed; the reason says which one it was. `opener` is the
    /// location blamed when end of input arrives before the real
    /// terminator.
    fn parse_list(&mut self, stop: Stop, opener: Option<SourceLocation>) -> (MathList, StopReason) {
        let mut list = MathList::new();
        loop {
            let token = self.fetch().clone();
            match token.kind {
                TokenKind::Eof => {
                    self.consume();
                    match stop {
                        Stop::Eof | Stop::TableCell => {}
                        Stop::Group => {
                            let loc = opener.unwrap_or(token.loc);
                            self.report_at(ParseErrorKind::UnmatchedGroup, &loc);
                        }
                        Stop::Right => {
                            let loc = opener.unwrap_or(token.loc);
                            self.report_at(
                                ParseErrorKind::UnmatchedDelimiter {
                                    delimiter: r"\left".to_owned(),
                                },
                                &loc,
                            );
                        }
                    }
                    return (list, StopReason::Eof);
                }
                TokenKind::EndGroup => {
                    if stop == Stop::Group {
                        self.consume();
                        return (list, StopReason::Group);
                    }
                    // Stray closer: report and skip so parsing continues.
                    self.consume();
                    self.report(ParseErrorKind::UnmatchedGroup, &token);
                }
                TokenKind::Superscript | TokenKind::Subscript => {
                    self.consume();
                    self.attach_script(&mut list, &token);
                }
                TokenKind::Alignment => {
                    if stop == Stop::TableCell {
                        self.consume();
                        return (list, StopReason::Alignment);
                    }
                    self.consume();
                    self.report(
                        ParseErrorKind::MisplacedAlignment {
                            token: "&".to_owned(),
                        },
                        &token,
                    );
                }
                TokenKind::RowSeparator => {
                    if stop == Stop::TableCell {
                        self.consume();
                        return (list, StopReason::Row);
                    }
                    self.consume();
                    self.report(
                        ParseErrorKind::MisplacedAlignment {
                            token: r"\\".to_owned(),
                        },
                        &token,
                    );
                }
                TokenKind::ControlWord if token.text == "right" => {
                    self.consume();
                    if stop == Stop::Right {
                        return (list, StopReason::Right { loc: token.loc });
                    }
                    // \right with no \left: swallow its delimiter too.
                    self.report(
                        ParseErrorKind::UnmatchedDelimiter {
                            delimiter: r"\right".to_owned(),
                        },
                        &token,
                    );
                    let _ = self.parse_delimiter(&token);
                }
                TokenKind::ControlWord if token.text == "end" => {
                    self.consume();
                    let name = self.parse_environment_name(&token);
                    if stop == Stop::TableCell {
                        return (list, StopReason::End {
                            name,
                            loc: token.loc,
                        });
                    }
                    self.report(
                        ParseErrorKind::UnmatchedDelimiter {
                            delimiter: r"\end".to_owned(),
                        },
                        &token,
                    );
                }
                TokenKind::BeginGroup | TokenKind::Symbol | TokenKind::ControlWord => {
                    let atom = self.parse_atom();
                    list.push(atom);
                }
            }
        }
    }

    /// Parses one atom: a symbol, a group, or a command with all its
    /// arguments. The caller guarantees the lookahead is a symbol, group
    /// opener, or a control word other than `\right`/`\end`.
    fn parse_atom(&mut self) -> Atom {
        let token = self.consume();
        match token.kind {
            TokenKind::Symbol => {
                let ch = token.text.chars().next().unwrap_or(' ');
                atom_for_char(ch)
            }
            TokenKind::BeginGroup => {
                let (inner, _) = self.parse_list(Stop::Group, Some(token.loc));
                Atom::new(AtomBody::Group(inner))
            }
            TokenKind::ControlWord => self.parse_command(&token),
            _ => Atom::new(AtomBody::Placeholder),
        }
    }

    fn parse_command(&mut self, token: &Token) -> Atom {
        let Some(command) = COMMANDS.get(token.text.as_str()) else {
            self.report(
                ParseErrorKind::UnknownCommand {
                    command: token.text.clone(),
                },
                token,
            );
            return Atom::new(AtomBody::Placeholder);
        };
        match *command {
            Command::Symbol { class, text } => Atom::symbol(class, text),
            Command::Operator { text, limits } => Atom::new(AtomBody::LargeOp(LargeOp {
                text: text.to_owned(),
                limits,
            })),
            Command::Space { mu } => Atom::new(AtomBody::Space(mu)),
            Command::Style { size } => Atom::new(AtomBody::StyleChange(size)),
            Command::Fraction { rule, delimiters } => {
                let numerator = self.parse_required_argument(token, 1, 2);
                let denominator = self.parse_required_argument(token, 2, 2);
                let fraction = Atom::new(AtomBody::Fraction(Fraction {
                    numerator,
                    denominator,
                    rule,
                }));
                match delimiters {
                    Some((left, right)) => Atom::new(AtomBody::Delimited(Delimited {
                        left: Some(left.to_owned()),
                        right: Some(right.to_owned()),
                        inner: MathList::from(vec![fraction]),
                    })),
                    None => fraction,
                }
            }
            Command::Radical => {
                let degree = self.parse_optional_bracket_argument();
                let radicand = self.parse_required_argument(token, 1, 1);
                Atom::new(AtomBody::Radical(Radical { degree, radicand }))
            }
            Command::Accent { glyph } => {
                let inner = self.parse_required_argument(token, 1, 1);
                Atom::new(AtomBody::Accent(Accent {
                    accent: glyph.to_owned(),
                    inner,
                }))
            }
            Command::Overline => {
                let inner = self.parse_required_argument(token, 1, 1);
                Atom::new(AtomBody::Overline(inner))
            }
            Command::Underline => {
                let inner = self.parse_required_argument(token, 1, 1);
                Atom::new(AtomBody::Underline(inner))
            }
            Command::Left => self.parse_delimited(token),
            Command::Begin => self.parse_environment(token),
            // \right and \end are intercepted by parse_list; reaching them
            // here means they were orphaned.
            Command::Right | Command::End => Atom::new(AtomBody::Placeholder),
        }
    }

    /// One required argument: a braced group or a single atom, per TeX's
    /// argument rules (`\frac12` is legal). A missing argument is an
    /// arity error; the offending token is left for the caller.
    fn parse_required_argument(&mut self, command: &Token, index: usize, expected: usize) -> MathList {
        let next = self.fetch().clone();
        let missing = match next.kind {
            TokenKind::Eof | TokenKind::EndGroup | TokenKind::Alignment | TokenKind::RowSeparator => {
                true
            }
            TokenKind::Superscript | TokenKind::Subscript => true,
            TokenKind::ControlWord => matches!(next.text.as_str(), "right" | "end"),
            _ => false,
        };
        if missing {
            self.report(
                ParseErrorKind::ArgumentArityMismatch {
                    command: command.text.clone(),
                    index,
                    expected,
                },
                command,
            );
            return MathList::new();
        }
        if next.kind == TokenKind::BeginGroup {
            let opener = self.consume();
            let (inner, _) = self.parse_list(Stop::Group, Some(opener.loc));
            inner
        } else {
            MathList::from(vec![self.parse_atom()])
        }
    }

    /// `\sqrt`'s optional `[degree]`.
    fn parse_optional_bracket_argument(&mut self) -> Option<MathList> {
        let next = self.fetch();
        if next.kind != TokenKind::Symbol || next.text != "[" {
            return None;
        }
        let opener = self.consume();
        let mut list = MathList::new();
        loop {
            let token = self.fetch().clone();
            match token.kind {
                TokenKind::Symbol if token.text == "]" => {
                    self.consume();
                    return Some(list);
                }
                TokenKind::Eof => {
                    self.report_at(
                        ParseErrorKind::UnexpectedEndOfInput {
                            expected: "]".to_owned(),
                        },
                        &opener.loc,
                    );
                    return Some(list);
                }
                _ => {
                    let atom = self.parse_atom_or_skip(&token);
                    if let Some(atom) = atom {
                        list.push(atom);
                    }
                }
            }
        }
    }

    /// Inside bracket arguments, structural tokens other than atoms are
    /// skipped with no dedicated error beyond what parse_atom reports.
    fn parse_atom_or_skip(&mut self, token: &Token) -> Option<Atom> {
        match token.kind {
            TokenKind::BeginGroup | TokenKind::Symbol | TokenKind::ControlWord => {
                Some(self.parse_atom())
            }
            _ => {
                self.consume();
                None
            }
        }
    }

    /// Attaches a `^`/`_` script to the last atom of `list`, creating an
    /// implicit empty nucleus when nothing scriptable precedes.
    fn attach_script(&mut self, list: &mut MathList, marker: &Token) {
        let script = self.parse_script_argument(marker);

        let needs_nucleus = match list.atoms.last() {
            None => true,
            Some(atom) => matches!(atom.body, AtomBody::Space(_) | AtomBody::StyleChange(_)),
        };
        if needs_nucleus {
            list.push(Atom::symbol(AtomClass::Ordinary, ""));
        }
        let target = list.atoms.last_mut().expect("nucleus just ensured");

        if marker.kind == TokenKind::Superscript {
            if target.superscript.is_some() {
                self.report(ParseErrorKind::DoubleSuperscript, marker);
            } else {
                target.superscript = Some(script);
            }
        } else if target.subscript.is_some() {
            self.report(ParseErrorKind::DoubleSubscript, marker);
        } else {
            target.subscript = Some(script);
        }
    }

    fn parse_script_argument(&mut self, marker: &Token) -> MathList {
        let next = self.fetch().clone();
        let missing = match next.kind {
            TokenKind::Eof | TokenKind::EndGroup | TokenKind::Alignment | TokenKind::RowSeparator => {
                true
            }
            TokenKind::Superscript | TokenKind::Subscript => true,
            TokenKind::ControlWord => matches!(next.text.as_str(), "right" | "end"),
            _ => false,
        };
        if missing {
            self.report(
                ParseErrorKind::UnexpectedEndOfInput {
                    expected: "script argument".to_owned(),
                },
                marker,
            );
            return MathList::new();
        }
        if next.kind == TokenKind::BeginGroup {
            let opener = self.consume();
            let (inner, _) = self.parse_list(Stop::Group, Some(opener.loc));
            inner
        } else {
            MathList::from(vec![self.parse_atom()])
        }
    }

    /// `\left<delim> ... \right<delim>`.
    fn parse_delimited(&mut self, left_token: &Token) -> Atom {
        let left = self.parse_delimiter(left_token);
        let (inner, reason) = self.parse_list(Stop::Right, Some(left_token.loc.clone()));
        let right = match reason {
            StopReason::Right { loc } => {
                // parse_list consumed the \right token itself; errors on
                // its delimiter blame the \right, not the opener.
                let right_token = Token::new(TokenKind::ControlWord, "right", loc);
                self.parse_delimiter(&right_token)
            }
            // Missing \right was already reported against the opener.
            _ => None,
        };
        Atom::new(AtomBody::Delimited(Delimited { left, right, inner }))
    }

    /// The delimiter token after `\left`, `\right`, or an orphaned
    /// `\right`. Reports and yields `None` when the next token is not a
    /// valid delimiter.
    fn parse_delimiter(&mut self, after: &Token) -> Option<String> {
        let next = self.fetch().clone();
        let usable = matches!(next.kind, TokenKind::Symbol | TokenKind::ControlWord);
        if !usable {
            self.report(
                ParseErrorKind::UnmatchedDelimiter {
                    delimiter: format!("\\{}", after.text),
                },
                after,
            );
            return None;
        }
        self.consume();
        match resolve_delimiter(&next.text) {
            Some(delim) => delim.map(str::to_owned),
            None => {
                self.report(
                    ParseErrorKind::UnmatchedDelimiter {
                        delimiter: next.text.clone(),
                    },
                    &next,
                );
                None
            }
        }
    }

    /// The `{name}` after `\begin` or `\end`. Best-effort: an absent or
    /// unbraced name yields an empty string plus an error.
    fn parse_environment_name(&mut self, command: &Token) -> String {
        if self.fetch().kind != TokenKind::BeginGroup {
            self.report(
                ParseErrorKind::ArgumentArityMismatch {
                    command: command.text.clone(),
                    index: 1,
                    expected: 1,
                },
                command,
            );
            return String::new();
        }
        self.consume();
        let mut name = String::new();
        loop {
            let token = self.fetch().clone();
            match token.kind {
                TokenKind::EndGroup => {
                    self.consume();
                    return name;
                }
                TokenKind::Eof => {
                    self.report(
                        ParseErrorKind::UnexpectedEndOfInput {
                            expected: "}".to_owned(),
                        },
                        &token,
                    );
                    return name;
                }
                _ => {
                    self.consume();
                    name.push_str(&token.text);
                }
            }
        }
    }

    /// `\begin{env} cells \end{env}`.
    fn parse_environment(&mut self, begin_token: &Token) -> Atom {
        let name = self.parse_environment_name(begin_token);
        let environment = ENVIRONMENTS.get(name.as_str()).copied();
        if environment.is_none() {
            self.report(
                ParseErrorKind::UnknownEnvironment { name: name.clone() },
                begin_token,
            );
        }

        let mut rows: Vec<Vec<MathList>> = Vec::new();
        let mut row: Vec<MathList> = Vec::new();
        loop {
            let (cell, reason) = self.parse_list(Stop::TableCell, Some(begin_token.loc.clone()));
            match reason {
                StopReason::Alignment => row.push(cell),
                StopReason::Row => {
                    row.push(cell);
                    rows.push(std::mem::take(&mut row));
                }
                StopReason::End {
                    name: end_name,
                    loc,
                } => {
                    row.push(cell);
                    rows.push(std::mem::take(&mut row));
                    if end_name != name {
                        self.report_at(
                            ParseErrorKind::MismatchedEnvironment {
                                begin: name.clone(),
                                end: end_name,
                            },
                            &loc,
                        );
                    }
                    break;
                }
                StopReason::Eof => {
                    row.push(cell);
                    rows.push(std::mem::take(&mut row));
                    self.report(
                        ParseErrorKind::UnexpectedEndOfInput {
                            expected: format!("\\end{{{name}}}"),
                        },
                        begin_token,
                    );
                    break;
                }
                StopReason::Group | StopReason::Right { .. } => unreachable!("not a cell stop"),
            }
        }

        // A trailing \\ before \end leaves one empty cell behind; drop it.
        if let Some(last) = rows.last() {
            if last.len() == 1 && last[0].is_empty() && rows.len() > 1 {
                rows.pop();
            }
        }

        let alignment = environment
            .map(|e| e.alignment)
            .unwrap_or(crate::atom::ColumnAlignment::Center);
        Atom::new(AtomBody::Table(Table {
            environment: name,
            rows,
            alignment,
        }))
    }
}

/// Classifies a literal character, applying the conventional glyph
/// replacements (`-` is set as minus, `'` as prime).
fn atom_for_char(ch: char) -> Atom {
    let (class, text): (AtomClass, String) = match ch {
        '+' => (AtomClass::Binary, "+".to_owned()),
        '-' => (AtomClass::Binary, "−".to_owned()),
        '*' => (AtomClass::Binary, "∗".to_owned()),
        '=' | '<' | '>' | ':' => (AtomClass::Relation, ch.to_string()),
        '(' | '[' => (AtomClass::Open, ch.to_string()),
        ')' | ']' => (AtomClass::Close, ch.to_string()),
        ',' | ';' => (AtomClass::Punctuation, ch.to_string()),
        '\'' => (AtomClass::Ordinary, "′".to_owned()),
        _ => (AtomClass::Ordinary, ch.to_string()),
    };
    Atom::symbol(class, text)
}
