//! The TeX math styles.
//!
//! TeX typesets math in one of four sizes (display, text, script,
//! scriptscript), each in a cramped or uncramped variant, giving eight
//! styles total. Transitions between them (entering a superscript, a
//! denominator, and so on) follow fixed rules which this module encodes as
//! lookup tables so they stay auditable in one place.

/// The four size levels of a math style, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleSize {
    /// `\displaystyle`, for standalone equations.
    Display = 0,
    /// `\textstyle`, for inline math.
    Text = 1,
    /// `\scriptstyle`, first script level.
    Script = 2,
    /// `\scriptscriptstyle`, all deeper script levels.
    ScriptScript = 3,
}

/// One of the eight TeX math styles.
///
/// Cramped styles suppress the extra superscript raise and are used inside
/// radicals, denominators, and subscripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    /// Size level.
    pub size: StyleSize,
    /// Whether the style is cramped.
    pub cramped: bool,
}

// Style ids: size level * 2 + cramped flag, D=0 .. SSC=7.
const D: usize = 0;
const DC: usize = 1;
const T: usize = 2;
const TC: usize = 3;
const S: usize = 4;
const SC: usize = 5;
const SS: usize = 6;
const SSC: usize = 7;

const STYLES: [Style; 8] = [
    Style::new(StyleSize::Display, false),
    Style::new(StyleSize::Display, true),
    Style::new(StyleSize::Text, false),
    Style::new(StyleSize::Text, true),
    Style::new(StyleSize::Script, false),
    Style::new(StyleSize::Script, true),
    Style::new(StyleSize::ScriptScript, false),
    Style::new(StyleSize::ScriptScript, true),
];

// Transition tables indexed by style id. These reproduce Appendix G's
// style rules: superscripts keep crampedness, subscripts always cramp,
// numerators step down one level, denominators step down and cramp.
const SUP: [usize; 8] = [S, SC, S, SC, SS, SSC, SS, SSC];
const SUB: [usize; 8] = [SC, SC, SC, SC, SSC, SSC, SSC, SSC];
const FRAC_NUM: [usize; 8] = [T, TC, S, SC, SS, SSC, SS, SSC];
const FRAC_DEN: [usize; 8] = [TC, TC, SC, SC, SSC, SSC, SSC, SSC];
const CRAMP: [usize; 8] = [DC, DC, TC, TC, SC, SC, SSC, SSC];

/// Uncramped display style.
pub const DISPLAY: Style = STYLES[D];
/// Uncramped text style.
pub const TEXT: Style = STYLES[T];
/// Uncramped script style.
pub const SCRIPT: Style = STYLES[S];
/// Uncramped scriptscript style.
pub const SCRIPTSCRIPT: Style = STYLES[SS];

impl Style {
    /// Creates a style.
    #[must_use]
    pub const fn new(size: StyleSize, cramped: bool) -> Self {
        Self { size, cramped }
    }

    const fn id(self) -> usize {
        self.size as usize * 2 + self.cramped as usize
    }

    /// The style of a superscript on a base in this style.
    #[must_use]
    pub const fn sup(self) -> Self {
        STYLES[SUP[self.id()]]
    }

    /// The style of a subscript on a base in this style.
    #[must_use]
    pub const fn sub(self) -> Self {
        STYLES[SUB[self.id()]]
    }

    /// The style of a fraction numerator in this style.
    #[must_use]
    pub const fn frac_num(self) -> Self {
        STYLES[FRAC_NUM[self.id()]]
    }

    /// The style of a fraction denominator in this style.
    #[must_use]
    pub const fn frac_den(self) -> Self {
        STYLES[FRAC_DEN[self.id()]]
    }

    /// The cramped version of this style. Cramping a cramped style is a
    /// no-op.
    #[must_use]
    pub const fn cramp(self) -> Self {
        STYLES[CRAMP[self.id()]]
    }

    /// Replaces the size level, keeping crampedness. Used by explicit style
    /// change commands.
    #[must_use]
    pub const fn with_size(self, size: StyleSize) -> Self {
        Self::new(size, self.cramped)
    }

    /// True at display size (cramped or not), which selects the larger
    /// fraction gaps, large-operator variants, and stacked limits.
    #[must_use]
    pub const fn is_display(self) -> bool {
        matches!(self.size, StyleSize::Display)
    }

    /// True for script and scriptscript styles, which suppress medium and
    /// thick inter-atom spacing.
    #[must_use]
    pub const fn is_tight(self) -> bool {
        self.size as usize >= StyleSize::Script as usize
    }
}
