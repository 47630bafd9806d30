//! The command table.
//!
//! Every backslash command the parser understands is listed here, mapping
//! its name to either a plain symbol (with spacing class and replacement
//! text) or a function description that tells the parser how many arguments to
//! read and what atom to build. The table is static data so the supported
//! command set is auditable in one place.

use phf::{phf_map, phf_set};

use crate::atom::{AtomClass, ColumnAlignment};
use crate::style::StyleSize;

/// What a command name resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// A symbol atom: `\alpha`, `\leq`, `\infty`, ...
    Symbol {
        /// Spacing class of the produced atom.
        class: AtomClass,
        /// Replacement glyph text.
        text: &'static str,
    },
    /// A large operator glyph or named function.
    Operator {
        /// Glyph or function name as drawn.
        text: &'static str,
        /// Whether scripts become stacked limits in display style.
        limits: bool,
    },
    /// A fraction-family construct taking two required arguments:
    /// `\frac{num}{den}` draws the bar, `\binom{n}{k}` omits it and wraps
    /// the stack in parentheses.
    Fraction {
        /// Whether the bar between the halves is drawn.
        rule: bool,
        /// Delimiters wrapped around the construct, if any.
        delimiters: Option<(&'static str, &'static str)>,
    },
    /// `\sqrt[deg]{radicand}` — optional bracketed degree, one argument.
    Radical,
    /// An accent taking one argument, e.g. `\hat{x}`.
    Accent {
        /// The combining accent glyph drawn above the nucleus.
        glyph: &'static str,
    },
    /// Fixed spacing in math units (can be negative).
    Space {
        /// Width in mu; 18 mu = 1 em at the current size.
        mu: f64,
    },
    /// An explicit style switch, e.g. `\displaystyle`.
    Style {
        /// The size level the remainder of the group switches to.
        size: StyleSize,
    },
    /// `\overline{...}`.
    Overline,
    /// `\underline{...}`.
    Underline,
    /// `\left` — must be followed by a delimiter and matched by `\right`.
    Left,
    /// `\right` — closes a `\left`.
    Right,
    /// `\begin{env}`.
    Begin,
    /// `\end{env}`.
    End,
}

/// The shape of one matrix-family environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    /// Delimiter wrapped around the left of the table, if any.
    pub left_delimiter: Option<&'static str>,
    /// Delimiter wrapped around the right of the table, if any.
    pub right_delimiter: Option<&'static str>,
    /// Default column alignment.
    pub alignment: ColumnAlignment,
}

/// Commands understood by the parser. The key is the command name without
/// its backslash; one-character keys are control symbols (`\,`, `\{`, ...).
pub static COMMANDS: phf::Map<&'static str, Command> = phf_map! {
    // Structure
    "frac" => Command::Fraction { rule: true, delimiters: None },
    "binom" => Command::Fraction { rule: false, delimiters: Some(("(", ")")) },
    "sqrt" => Command::Radical,
    "left" => Command::Left,
    "right" => Command::Right,
    "begin" => Command::Begin,
    "end" => Command::End,
    "overline" => Command::Overline,
    "underline" => Command::Underline,

    // Style switches
    "displaystyle" => Command::Style { size: StyleSize::Display },
    "textstyle" => Command::Style { size: StyleSize::Text },
    "scriptstyle" => Command::Style { size: StyleSize::Script },
    "scriptscriptstyle" => Command::Style { size: StyleSize::ScriptScript },

    // Spacing
    "," => Command::Space { mu: 3.0 },
    ":" => Command::Space { mu: 4.0 },
    ";" => Command::Space { mu: 5.0 },
    "!" => Command::Space { mu: -3.0 },
    " " => Command::Space { mu: 9.0 },
    "quad" => Command::Space { mu: 18.0 },
    "qquad" => Command::Space { mu: 36.0 },

    // Accents
    "hat" => Command::Accent { glyph: "\u{0302}" },
    "widehat" => Command::Accent { glyph: "\u{0302}" },
    "tilde" => Command::Accent { glyph: "\u{0303}" },
    "widetilde" => Command::Accent { glyph: "\u{0303}" },
    "bar" => Command::Accent { glyph: "\u{0304}" },
    "breve" => Command::Accent { glyph: "\u{0306}" },
    "dot" => Command::Accent { glyph: "\u{0307}" },
    "ddot" => Command::Accent { glyph: "\u{0308}" },
    "check" => Command::Accent { glyph: "\u{030C}" },
    "acute" => Command::Accent { glyph: "\u{0301}" },
    "grave" => Command::Accent { glyph: "\u{0300}" },
    "vec" => Command::Accent { glyph: "\u{20D7}" },

    // Large operators with limits in display style
    "sum" => Command::Operator { text: "∑", limits: true },
    "prod" => Command::Operator { text: "∏", limits: true },
    "coprod" => Command::Operator { text: "∐", limits: true },
    "bigcup" => Command::Operator { text: "⋃", limits: true },
    "bigcap" => Command::Operator { text: "⋂", limits: true },
    "bigvee" => Command::Operator { text: "⋁", limits: true },
    "bigwedge" => Command::Operator { text: "⋀", limits: true },
    "bigoplus" => Command::Operator { text: "⨁", limits: true },
    "bigotimes" => Command::Operator { text: "⨂", limits: true },
    "bigodot" => Command::Operator { text: "⨀", limits: true },

    // Integrals never take limits by default
    "int" => Command::Operator { text: "∫", limits: false },
    "iint" => Command::Operator { text: "∬", limits: false },
    "iiint" => Command::Operator { text: "∭", limits: false },
    "oint" => Command::Operator { text: "∮", limits: false },

    // Named functions
    "sin" => Command::Operator { text: "sin", limits: false },
    "cos" => Command::Operator { text: "cos", limits: false },
    "tan" => Command::Operator { text: "tan", limits: false },
    "cot" => Command::Operator { text: "cot", limits: false },
    "sec" => Command::Operator { text: "sec", limits: false },
    "csc" => Command::Operator { text: "csc", limits: false },
    "arcsin" => Command::Operator { text: "arcsin", limits: false },
    "arccos" => Command::Operator { text: "arccos", limits: false },
    "arctan" => Command::Operator { text: "arctan", limits: false },
    "sinh" => Command::Operator { text: "sinh", limits: false },
    "cosh" => Command::Operator { text: "cosh", limits: false },
    "tanh" => Command::Operator { text: "tanh", limits: false },
    "coth" => Command::Operator { text: "coth", limits: false },
    "log" => Command::Operator { text: "log", limits: false },
    "lg" => Command::Operator { text: "lg", limits: false },
    "ln" => Command::Operator { text: "ln", limits: false },
    "exp" => Command::Operator { text: "exp", limits: false },
    "arg" => Command::Operator { text: "arg", limits: false },
    "deg" => Command::Operator { text: "deg", limits: false },
    "det" => Command::Operator { text: "det", limits: true },
    "dim" => Command::Operator { text: "dim", limits: false },
    "hom" => Command::Operator { text: "hom", limits: false },
    "ker" => Command::Operator { text: "ker", limits: false },
    "gcd" => Command::Operator { text: "gcd", limits: true },
    "lim" => Command::Operator { text: "lim", limits: true },
    "limsup" => Command::Operator { text: "lim sup", limits: true },
    "liminf" => Command::Operator { text: "lim inf", limits: true },
    "max" => Command::Operator { text: "max", limits: true },
    "min" => Command::Operator { text: "min", limits: true },
    "sup" => Command::Operator { text: "sup", limits: true },
    "inf" => Command::Operator { text: "inf", limits: true },
    "Pr" => Command::Operator { text: "Pr", limits: true },

    // Lowercase Greek
    "alpha" => Command::Symbol { class: AtomClass::Ordinary, text: "α" },
    "beta" => Command::Symbol { class: AtomClass::Ordinary, text: "β" },
    "gamma" => Command::Symbol { class: AtomClass::Ordinary, text: "γ" },
    "delta" => Command::Symbol { class: AtomClass::Ordinary, text: "δ" },
    "epsilon" => Command::Symbol { class: AtomClass::Ordinary, text: "ϵ" },
    "varepsilon" => Command::Symbol { class: AtomClass::Ordinary, text: "ε" },
    "zeta" => Command::Symbol { class: AtomClass::Ordinary, text: "ζ" },
    "eta" => Command::Symbol { class: AtomClass::Ordinary, text: "η" },
    "theta" => Command::Symbol { class: AtomClass::Ordinary, text: "θ" },
    "vartheta" => Command::Symbol { class: AtomClass::Ordinary, text: "ϑ" },
    "iota" => Command::Symbol { class: AtomClass::Ordinary, text: "ι" },
    "kappa" => Command::Symbol { class: AtomClass::Ordinary, text: "κ" },
    "lambda" => Command::Symbol { class: AtomClass::Ordinary, text: "λ" },
    "mu" => Command::Symbol { class: AtomClass::Ordinary, text: "μ" },
    "nu" => Command::Symbol { class: AtomClass::Ordinary, text: "ν" },
    "xi" => Command::Symbol { class: AtomClass::Ordinary, text: "ξ" },
    "omicron" => Command::Symbol { class: AtomClass::Ordinary, text: "ο" },
    "pi" => Command::Symbol { class: AtomClass::Ordinary, text: "π" },
    "varpi" => Command::Symbol { class: AtomClass::Ordinary, text: "ϖ" },
    "rho" => Command::Symbol { class: AtomClass::Ordinary, text: "ρ" },
    "varrho" => Command::Symbol { class: AtomClass::Ordinary, text: "ϱ" },
    "sigma" => Command::Symbol { class: AtomClass::Ordinary, text: "σ" },
    "varsigma" => Command::Symbol { class: AtomClass::Ordinary, text: "ς" },
    "tau" => Command::Symbol { class: AtomClass::Ordinary, text: "τ" },
    "upsilon" => Command::Symbol { class: AtomClass::Ordinary, text: "υ" },
    "phi" => Command::Symbol { class: AtomClass::Ordinary, text: "ϕ" },
    "varphi" => Command::Symbol { class: AtomClass::Ordinary, text: "φ" },
    "chi" => Command::Symbol { class: AtomClass::Ordinary, text: "χ" },
    "psi" => Command::Symbol { class: AtomClass::Ordinary, text: "ψ" },
    "omega" => Command::Symbol { class: AtomClass::Ordinary, text: "ω" },

    // Uppercase Greek
    "Gamma" => Command::Symbol { class: AtomClass::Ordinary, text: "Γ" },
    "Delta" => Command::Symbol { class: AtomClass::Ordinary, text: "Δ" },
    "Theta" => Command::Symbol { class: AtomClass::Ordinary, text: "Θ" },
    "Lambda" => Command::Symbol { class: AtomClass::Ordinary, text: "Λ" },
    "Xi" => Command::Symbol { class: AtomClass::Ordinary, text: "Ξ" },
    "Pi" => Command::Symbol { class: AtomClass::Ordinary, text: "Π" },
    "Sigma" => Command::Symbol { class: AtomClass::Ordinary, text: "Σ" },
    "Upsilon" => Command::Symbol { class: AtomClass::Ordinary, text: "Υ" },
    "Phi" => Command::Symbol { class: AtomClass::Ordinary, text: "Φ" },
    "Psi" => Command::Symbol { class: AtomClass::Ordinary, text: "Ψ" },
    "Omega" => Command::Symbol { class: AtomClass::Ordinary, text: "Ω" },

    // Binary operators
    "times" => Command::Symbol { class: AtomClass::Binary, text: "×" },
    "div" => Command::Symbol { class: AtomClass::Binary, text: "÷" },
    "pm" => Command::Symbol { class: AtomClass::Binary, text: "±" },
    "mp" => Command::Symbol { class: AtomClass::Binary, text: "∓" },
    "cdot" => Command::Symbol { class: AtomClass::Binary, text: "⋅" },
    "ast" => Command::Symbol { class: AtomClass::Binary, text: "∗" },
    "star" => Command::Symbol { class: AtomClass::Binary, text: "⋆" },
    "circ" => Command::Symbol { class: AtomClass::Binary, text: "∘" },
    "bullet" => Command::Symbol { class: AtomClass::Binary, text: "∙" },
    "cap" => Command::Symbol { class: AtomClass::Binary, text: "∩" },
    "cup" => Command::Symbol { class: AtomClass::Binary, text: "∪" },
    "wedge" => Command::Symbol { class: AtomClass::Binary, text: "∧" },
    "vee" => Command::Symbol { class: AtomClass::Binary, text: "∨" },
    "land" => Command::Symbol { class: AtomClass::Binary, text: "∧" },
    "lor" => Command::Symbol { class: AtomClass::Binary, text: "∨" },
    "oplus" => Command::Symbol { class: AtomClass::Binary, text: "⊕" },
    "ominus" => Command::Symbol { class: AtomClass::Binary, text: "⊖" },
    "otimes" => Command::Symbol { class: AtomClass::Binary, text: "⊗" },
    "odot" => Command::Symbol { class: AtomClass::Binary, text: "⊙" },
    "setminus" => Command::Symbol { class: AtomClass::Binary, text: "∖" },

    // Relations
    "leq" => Command::Symbol { class: AtomClass::Relation, text: "≤" },
    "le" => Command::Symbol { class: AtomClass::Relation, text: "≤" },
    "geq" => Command::Symbol { class: AtomClass::Relation, text: "≥" },
    "ge" => Command::Symbol { class: AtomClass::Relation, text: "≥" },
    "neq" => Command::Symbol { class: AtomClass::Relation, text: "≠" },
    "ne" => Command::Symbol { class: AtomClass::Relation, text: "≠" },
    "ll" => Command::Symbol { class: AtomClass::Relation, text: "≪" },
    "gg" => Command::Symbol { class: AtomClass::Relation, text: "≫" },
    "equiv" => Command::Symbol { class: AtomClass::Relation, text: "≡" },
    "sim" => Command::Symbol { class: AtomClass::Relation, text: "∼" },
    "simeq" => Command::Symbol { class: AtomClass::Relation, text: "≃" },
    "approx" => Command::Symbol { class: AtomClass::Relation, text: "≈" },
    "cong" => Command::Symbol { class: AtomClass::Relation, text: "≅" },
    "propto" => Command::Symbol { class: AtomClass::Relation, text: "∝" },
    "in" => Command::Symbol { class: AtomClass::Relation, text: "∈" },
    "ni" => Command::Symbol { class: AtomClass::Relation, text: "∋" },
    "notin" => Command::Symbol { class: AtomClass::Relation, text: "∉" },
    "subset" => Command::Symbol { class: AtomClass::Relation, text: "⊂" },
    "supset" => Command::Symbol { class: AtomClass::Relation, text: "⊃" },
    "subseteq" => Command::Symbol { class: AtomClass::Relation, text: "⊆" },
    "supseteq" => Command::Symbol { class: AtomClass::Relation, text: "⊇" },
    "perp" => Command::Symbol { class: AtomClass::Relation, text: "⊥" },
    "parallel" => Command::Symbol { class: AtomClass::Relation, text: "∥" },
    "mid" => Command::Symbol { class: AtomClass::Relation, text: "∣" },
    "vdash" => Command::Symbol { class: AtomClass::Relation, text: "⊢" },
    "dashv" => Command::Symbol { class: AtomClass::Relation, text: "⊣" },
    "models" => Command::Symbol { class: AtomClass::Relation, text: "⊨" },
    "prec" => Command::Symbol { class: AtomClass::Relation, text: "≺" },
    "succ" => Command::Symbol { class: AtomClass::Relation, text: "≻" },

    // Arrows (relations in TeX)
    "to" => Command::Symbol { class: AtomClass::Relation, text: "→" },
    "rightarrow" => Command::Symbol { class: AtomClass::Relation, text: "→" },
    "leftarrow" => Command::Symbol { class: AtomClass::Relation, text: "←" },
    "gets" => Command::Symbol { class: AtomClass::Relation, text: "←" },
    "leftrightarrow" => Command::Symbol { class: AtomClass::Relation, text: "↔" },
    "Rightarrow" => Command::Symbol { class: AtomClass::Relation, text: "⇒" },
    "Leftarrow" => Command::Symbol { class: AtomClass::Relation, text: "⇐" },
    "Leftrightarrow" => Command::Symbol { class: AtomClass::Relation, text: "⇔" },
    "iff" => Command::Symbol { class: AtomClass::Relation, text: "⟺" },
    "mapsto" => Command::Symbol { class: AtomClass::Relation, text: "↦" },
    "uparrow" => Command::Symbol { class: AtomClass::Relation, text: "↑" },
    "downarrow" => Command::Symbol { class: AtomClass::Relation, text: "↓" },
    "Uparrow" => Command::Symbol { class: AtomClass::Relation, text: "⇑" },
    "Downarrow" => Command::Symbol { class: AtomClass::Relation, text: "⇓" },

    // Ordinary symbols
    "infty" => Command::Symbol { class: AtomClass::Ordinary, text: "∞" },
    "partial" => Command::Symbol { class: AtomClass::Ordinary, text: "∂" },
    "nabla" => Command::Symbol { class: AtomClass::Ordinary, text: "∇" },
    "forall" => Command::Symbol { class: AtomClass::Ordinary, text: "∀" },
    "exists" => Command::Symbol { class: AtomClass::Ordinary, text: "∃" },
    "nexists" => Command::Symbol { class: AtomClass::Ordinary, text: "∄" },
    "neg" => Command::Symbol { class: AtomClass::Ordinary, text: "¬" },
    "lnot" => Command::Symbol { class: AtomClass::Ordinary, text: "¬" },
    "emptyset" => Command::Symbol { class: AtomClass::Ordinary, text: "∅" },
    "varnothing" => Command::Symbol { class: AtomClass::Ordinary, text: "∅" },
    "angle" => Command::Symbol { class: AtomClass::Ordinary, text: "∠" },
    "triangle" => Command::Symbol { class: AtomClass::Ordinary, text: "△" },
    "prime" => Command::Symbol { class: AtomClass::Ordinary, text: "′" },
    "hbar" => Command::Symbol { class: AtomClass::Ordinary, text: "ℏ" },
    "ell" => Command::Symbol { class: AtomClass::Ordinary, text: "ℓ" },
    "Re" => Command::Symbol { class: AtomClass::Ordinary, text: "ℜ" },
    "Im" => Command::Symbol { class: AtomClass::Ordinary, text: "ℑ" },
    "aleph" => Command::Symbol { class: AtomClass::Ordinary, text: "ℵ" },
    "wp" => Command::Symbol { class: AtomClass::Ordinary, text: "℘" },
    "ldots" => Command::Symbol { class: AtomClass::Ordinary, text: "…" },
    "cdots" => Command::Symbol { class: AtomClass::Ordinary, text: "⋯" },
    "vdots" => Command::Symbol { class: AtomClass::Ordinary, text: "⋮" },
    "ddots" => Command::Symbol { class: AtomClass::Ordinary, text: "⋱" },
    "degree" => Command::Symbol { class: AtomClass::Ordinary, text: "°" },
    "square" => Command::Symbol { class: AtomClass::Ordinary, text: "□" },

    // Delimiter symbols (usable with and without \left/\right)
    "{" => Command::Symbol { class: AtomClass::Open, text: "{" },
    "}" => Command::Symbol { class: AtomClass::Close, text: "}" },
    "lbrace" => Command::Symbol { class: AtomClass::Open, text: "{" },
    "rbrace" => Command::Symbol { class: AtomClass::Close, text: "}" },
    "langle" => Command::Symbol { class: AtomClass::Open, text: "⟨" },
    "rangle" => Command::Symbol { class: AtomClass::Close, text: "⟩" },
    "lceil" => Command::Symbol { class: AtomClass::Open, text: "⌈" },
    "rceil" => Command::Symbol { class: AtomClass::Close, text: "⌉" },
    "lfloor" => Command::Symbol { class: AtomClass::Open, text: "⌊" },
    "rfloor" => Command::Symbol { class: AtomClass::Close, text: "⌋" },
    "vert" => Command::Symbol { class: AtomClass::Ordinary, text: "|" },
    "Vert" => Command::Symbol { class: AtomClass::Ordinary, text: "‖" },
    "|" => Command::Symbol { class: AtomClass::Ordinary, text: "‖" },
    "backslash" => Command::Symbol { class: AtomClass::Ordinary, text: "\\" },

    // Punctuation
    "colon" => Command::Symbol { class: AtomClass::Punctuation, text: ":" },
};

/// Matrix-family environments.
pub static ENVIRONMENTS: phf::Map<&'static str, Environment> = phf_map! {
    "matrix" => Environment {
        left_delimiter: None,
        right_delimiter: None,
        alignment: ColumnAlignment::Center,
    },
    "pmatrix" => Environment {
        left_delimiter: Some("("),
        right_delimiter: Some(")"),
        alignment: ColumnAlignment::Center,
    },
    "bmatrix" => Environment {
        left_delimiter: Some("["),
        right_delimiter: Some("]"),
        alignment: ColumnAlignment::Center,
    },
    "Bmatrix" => Environment {
        left_delimiter: Some("{"),
        right_delimiter: Some("}"),
        alignment: ColumnAlignment::Center,
    },
    "vmatrix" => Environment {
        left_delimiter: Some("|"),
        right_delimiter: Some("|"),
        alignment: ColumnAlignment::Center,
    },
    "Vmatrix" => Environment {
        left_delimiter: Some("‖"),
        right_delimiter: Some("‖"),
        alignment: ColumnAlignment::Center,
    },
    "cases" => Environment {
        left_delimiter: Some("{"),
        right_delimiter: None,
        alignment: ColumnAlignment::Left,
    },
};

/// Characters allowed as the delimiter argument of `\left`/`\right`.
/// `.` is the null delimiter.
pub static DELIMITER_CHARS: phf::Set<char> = phf_set! {
    '(', ')', '[', ']', '{', '}', '|', '‖', '⟨', '⟩', '⌈', '⌉', '⌊', '⌋',
    '/', '\\', '↑', '↓', '↕',
};

/// Resolves a delimiter token's text to the glyph used for sizing, if the
/// text denotes a valid delimiter. Accepts single characters from
/// [`DELIMITER_CHARS`] and delimiter commands like `\langle`; `.` yields
/// `None` (the null delimiter).
#[must_use]
pub fn resolve_delimiter(text: &str) -> Option<Option<&'static str>> {
    if text == "." {
        return Some(None);
    }
    let mut chars = text.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if DELIMITER_CHARS.contains(&c) {
            // Return the static str for the char.
            return STATIC_DELIMS.get(text).map(|s| Some(*s));
        }
    }
    match COMMANDS.get(text) {
        Some(Command::Symbol { class, text })
            if matches!(
                *class,
                AtomClass::Open | AtomClass::Close | AtomClass::Ordinary
            ) && STATIC_DELIMS.contains_key(*text) =>
        {
            STATIC_DELIMS.get(*text).map(|s| Some(*s))
        }
        _ => None,
    }
}

/// Interning table so delimiter glyphs can be `&'static str`.
static STATIC_DELIMS: phf::Map<&'static str, &'static str> = phf_map! {
    "(" => "(", ")" => ")", "[" => "[", "]" => "]", "{" => "{", "}" => "}",
    "|" => "|", "‖" => "‖", "⟨" => "⟨", "⟩" => "⟩", "⌈" => "⌈", "⌉" => "⌉",
    "⌊" => "⌊", "⌋" => "⌋", "/" => "/", "\\" => "\\", "↑" => "↑",
    "↓" => "↓", "↕" => "↕",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_commands_present() {
        assert!(matches!(
            COMMANDS.get("frac"),
            Some(Command::Fraction { rule: true, .. })
        ));
        assert!(matches!(
            COMMANDS.get("binom"),
            Some(Command::Fraction {
                rule: false,
                delimiters: Some(("(", ")")),
            })
        ));
        assert!(matches!(COMMANDS.get("sqrt"), Some(Command::Radical)));
        assert!(matches!(COMMANDS.get("left"), Some(Command::Left)));
        assert!(matches!(COMMANDS.get("alpha"), Some(Command::Symbol { .. })));
    }

    #[test]
    fn greek_replacement_text() {
        let Some(Command::Symbol { text, .. }) = COMMANDS.get("pi") else {
            panic!("missing \\pi");
        };
        assert_eq!(*text, "π");
    }

    #[test]
    fn limits_flags() {
        assert!(matches!(
            COMMANDS.get("sum"),
            Some(Command::Operator { limits: true, .. })
        ));
        assert!(matches!(
            COMMANDS.get("int"),
            Some(Command::Operator { limits: false, .. })
        ));
        assert!(matches!(
            COMMANDS.get("lim"),
            Some(Command::Operator { limits: true, .. })
        ));
        assert!(matches!(
            COMMANDS.get("sin"),
            Some(Command::Operator { limits: false, .. })
        ));
    }

    #[test]
    fn delimiter_resolution() {
        assert_eq!(resolve_delimiter("("), Some(Some("(")));
        assert_eq!(resolve_delimiter("."), Some(None));
        assert_eq!(resolve_delimiter("langle"), Some(Some("⟨")));
        assert_eq!(resolve_delimiter("x"), None);
        assert_eq!(resolve_delimiter("frac"), None);
    }

    #[test]
    fn environment_delimiters() {
        let pmatrix = ENVIRONMENTS.get("pmatrix").unwrap();
        let cases = ENVIRONMENTS.get("cases").unwrap();
        let matrix = ENVIRONMENTS.get("matrix").unwrap();
        assert_eq!(pmatrix.left_delimiter, Some("("));
        assert_eq!(cases.right_delimiter, None);
        assert_eq!(matrix.left_delimiter, None);
        assert_eq!(cases.alignment, ColumnAlignment::Left);
    }

    #[test]
    fn unknown_command_is_absent() {
        assert!(COMMANDS.get("unknown").is_none());
    }
}
