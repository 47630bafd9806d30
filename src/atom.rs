//! The expression tree produced by the parser.
//!
//! A [`MathList`] is an ordered list of [`Atom`]s; every atom has a body
//! (its nucleus plus kind-specific payload) and optional superscript and
//! subscript lists. The body is a closed sum type so the layout engine's
//! per-kind dispatch is exhaustive at compile time.

use strum::Display;

use crate::style::StyleSize;

/// The eight TeX spacing classes. Inter-atom spacing is a pure function of
/// the classes of two neighboring atoms and the current style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AtomClass {
    /// Ordinary symbols: letters, digits, most glyphs. `Ord` in TeX.
    Ordinary,
    /// Large operators and named functions. `Op` in TeX.
    LargeOperator,
    /// Binary operators such as `+`. `Bin` in TeX.
    Binary,
    /// Relations such as `=`. `Rel` in TeX.
    Relation,
    /// Opening delimiters.
    Open,
    /// Closing delimiters.
    Close,
    /// Punctuation such as `,`.
    Punctuation,
    /// Delimited subformulas, fractions, tables. `Inner` in TeX.
    Inner,
}

impl AtomClass {
    /// Index into the 8x8 spacing table.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// An ordered list of atoms; one nesting level of the expression tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MathList {
    /// The atoms in display order.
    pub atoms: Vec<Atom>,
}

impl MathList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an atom.
    pub fn push(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    /// Number of atoms in this list (not counting nested lists).
    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// True if the list holds no atoms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// TeX's bin-to-ord demotion: a binary operator with no left operand
    /// (at the start of the list, or following another binary, a relation,
    /// an opening delimiter, or punctuation) is typeset as an ordinary
    /// atom. Layout runs this before spacing so `-x` and `(-x)` come out
    /// unspaced.
    #[must_use]
    pub fn finalized(&self) -> Self {
        let mut out = Vec::with_capacity(self.atoms.len());
        let mut prev_class: Option<AtomClass> = None;
        for atom in &self.atoms {
            let mut atom = atom.clone();
            if let AtomBody::Symbol { class, .. } = &mut atom.body {
                if *class == AtomClass::Binary
                    && !matches!(
                        prev_class,
                        Some(AtomClass::Ordinary | AtomClass::Close | AtomClass::Inner)
                    )
                {
                    *class = AtomClass::Ordinary;
                }
            }
            if !matches!(atom.body, AtomBody::Space(_) | AtomBody::StyleChange(_)) {
                prev_class = Some(atom.class());
            }
            out.push(atom);
        }
        // Second half of the rule: a binary with no right operand (followed
        // by a relation, closing delimiter, punctuation, or nothing) also
        // demotes.
        let next_classes: Vec<Option<AtomClass>> = {
            let mut next = vec![None; out.len()];
            let mut following: Option<AtomClass> = None;
            for (i, atom) in out.iter().enumerate().rev() {
                next[i] = following;
                if !matches!(atom.body, AtomBody::Space(_) | AtomBody::StyleChange(_)) {
                    following = Some(atom.class());
                }
            }
            next
        };
        for (atom, next) in out.iter_mut().zip(next_classes) {
            if let AtomBody::Symbol { class, .. } = &mut atom.body {
                if *class == AtomClass::Binary
                    && matches!(
                        next,
                        None | Some(
                            AtomClass::Relation | AtomClass::Close | AtomClass::Punctuation
                        )
                    )
                {
                    *class = AtomClass::Ordinary;
                }
            }
        }
        Self { atoms: out }
    }
}

impl From<Vec<Atom>> for MathList {
    fn from(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }
}

/// One node of the expression tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The nucleus and kind-specific payload.
    pub body: AtomBody,
    /// Optional superscript list.
    pub superscript: Option<MathList>,
    /// Optional subscript list.
    pub subscript: Option<MathList>,
}

impl Atom {
    /// Creates an atom with no scripts.
    #[must_use]
    pub fn new(body: AtomBody) -> Self {
        Self {
            body,
            superscript: None,
            subscript: None,
        }
    }

    /// Shorthand for a symbol atom.
    #[must_use]
    pub fn symbol(class: AtomClass, text: impl Into<String>) -> Self {
        Self::new(AtomBody::Symbol {
            class,
            text: text.into(),
        })
    }

    /// The spacing class of this atom.
    #[must_use]
    pub fn class(&self) -> AtomClass {
        match &self.body {
            AtomBody::Symbol { class, .. } => *class,
            AtomBody::LargeOp(_) => AtomClass::LargeOperator,
            AtomBody::Fraction(_) | AtomBody::Delimited(_) | AtomBody::Table(_) => AtomClass::Inner,
            AtomBody::Group(_)
            | AtomBody::Radical(_)
            | AtomBody::Accent(_)
            | AtomBody::Overline(_)
            | AtomBody::Underline(_)
            | AtomBody::Space(_)
            | AtomBody::StyleChange(_)
            | AtomBody::Placeholder => AtomClass::Ordinary,
        }
    }

    /// True if the atom has a superscript or a subscript.
    #[must_use]
    pub fn has_scripts(&self) -> bool {
        self.superscript.is_some() || self.subscript.is_some()
    }
}

/// The closed set of atom kinds with their payloads.
///
/// Every payload is well-formed by construction: a fraction always has both
/// a numerator and a denominator list (possibly empty), a radical always
/// has a radicand, and so on.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomBody {
    /// A leaf glyph (or multi-character run for named operators' cousins)
    /// with its spacing class.
    Symbol {
        /// Spacing class of the symbol.
        class: AtomClass,
        /// The glyph text. May be empty for the implicit nucleus scripts
        /// attach to when nothing precedes them.
        text: String,
    },
    /// A braced group; behaves as a single ordinary nucleus.
    Group(MathList),
    /// `\frac{num}{den}`.
    Fraction(Fraction),
    /// `\sqrt[degree]{radicand}`.
    Radical(Radical),
    /// A large operator (`\sum`, `\int`) or named function (`\sin`,
    /// `\lim`).
    LargeOp(LargeOp),
    /// A `\left ... \right` pair with auto-sized delimiters.
    Delimited(Delimited),
    /// An accented nucleus, e.g. `\hat{x}`.
    Accent(Accent),
    /// `\overline{...}`.
    Overline(MathList),
    /// `\underline{...}`.
    Underline(MathList),
    /// Explicit spacing in math units (18 mu = 1 em at the current size).
    Space(f64),
    /// An explicit style switch affecting the remainder of the list.
    StyleChange(StyleSize),
    /// A matrix-family environment.
    Table(Table),
    /// Inserted by the parser where an unknown command was skipped, so the
    /// rest of the input still parses and renders.
    Placeholder,
}

/// Payload of a fraction atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Fraction {
    /// The numerator list.
    pub numerator: MathList,
    /// The denominator list.
    pub denominator: MathList,
    /// Whether the fraction rule is drawn. Always true for `\frac`; kept
    /// explicit so binomial-style layouts share the same payload.
    pub rule: bool,
}

/// Payload of a radical atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Radical {
    /// Optional degree, typeset at scriptscript size next to the sign.
    pub degree: Option<MathList>,
    /// The expression under the sign.
    pub radicand: MathList,
}

/// Payload of a large operator atom.
#[derive(Debug, Clone, PartialEq)]
pub struct LargeOp {
    /// The operator glyph (`∑`) or function name (`sin`).
    pub text: String,
    /// Whether scripts are set as limits above/below in display style.
    pub limits: bool,
}

/// Payload of a `\left ... \right` atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Delimited {
    /// Left delimiter glyph; `None` for the null delimiter `.`.
    pub left: Option<String>,
    /// Right delimiter glyph; `None` when `\right` was missing or null.
    pub right: Option<String>,
    /// The enclosed list.
    pub inner: MathList,
}

/// Payload of an accent atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Accent {
    /// The accent glyph placed above the nucleus.
    pub accent: String,
    /// The accented subexpression.
    pub inner: MathList,
}

/// Column alignment inside a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlignment {
    /// Flush left.
    Left,
    /// Centered (the matrix default).
    Center,
    /// Flush right.
    Right,
}

/// Payload of a matrix-family environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Environment name as written (`matrix`, `pmatrix`, `cases`, ...).
    pub environment: String,
    /// Row-major cell lists.
    pub rows: Vec<Vec<MathList>>,
    /// Default alignment applied to every column.
    pub alignment: ColumnAlignment,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(class: AtomClass, text: &str) -> Atom {
        Atom::symbol(class, text)
    }

    #[test]
    fn leading_binary_demotes_to_ordinary() {
        let list = MathList::from(vec![
            sym(AtomClass::Binary, "−"),
            sym(AtomClass::Ordinary, "x"),
        ]);
        let finalized = list.finalized();
        assert_eq!(finalized.atoms[0].class(), AtomClass::Ordinary);
        assert_eq!(finalized.atoms[1].class(), AtomClass::Ordinary);
    }

    #[test]
    fn binary_after_open_demotes() {
        let list = MathList::from(vec![
            sym(AtomClass::Open, "("),
            sym(AtomClass::Binary, "−"),
            sym(AtomClass::Ordinary, "x"),
            sym(AtomClass::Close, ")"),
        ]);
        assert_eq!(list.finalized().atoms[1].class(), AtomClass::Ordinary);
    }

    #[test]
    fn infix_binary_is_kept() {
        let list = MathList::from(vec![
            sym(AtomClass::Ordinary, "a"),
            sym(AtomClass::Binary, "+"),
            sym(AtomClass::Ordinary, "b"),
        ]);
        assert_eq!(list.finalized().atoms[1].class(), AtomClass::Binary);
    }

    #[test]
    fn binary_after_relation_demotes() {
        let list = MathList::from(vec![
            sym(AtomClass::Ordinary, "a"),
            sym(AtomClass::Relation, "="),
            sym(AtomClass::Binary, "−"),
            sym(AtomClass::Ordinary, "b"),
        ]);
        assert_eq!(list.finalized().atoms[2].class(), AtomClass::Ordinary);
    }

    #[test]
    fn spacing_atoms_do_not_count_as_operands() {
        let list = MathList::from(vec![
            Atom::new(AtomBody::Space(3.0)),
            sym(AtomClass::Binary, "+"),
        ]);
        assert_eq!(list.finalized().atoms[1].class(), AtomClass::Ordinary);
    }

    #[test]
    fn compound_atoms_classify() {
        let frac = Atom::new(AtomBody::Fraction(Fraction {
            numerator: MathList::new(),
            denominator: MathList::new(),
            rule: true,
        }));
        assert_eq!(frac.class(), AtomClass::Inner);

        let rad = Atom::new(AtomBody::Radical(Radical {
            degree: None,
            radicand: MathList::new(),
        }));
        assert_eq!(rad.class(), AtomClass::Ordinary);
    }
}
