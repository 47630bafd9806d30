//! The font-metrics capability consumed by the layout engine.
//!
//! The engine never touches font files. Everything it needs to know about
//! glyph geometry comes in through the [`FontMetrics`] trait: per-glyph
//! advance/ascent/descent/italic correction, the named constants of an
//! OpenType MATH table, ordered vertical glyph variants, and extensible
//! glyph assemblies. This keeps the engine testable against a
//! deterministic provider ([`UniformMetrics`]) with no font dependency.
//!
//! All lengths are in points. `constant` values are returned at the
//! requested font size except for the handful of pure ratios, see
//! [`MathConstant::is_ratio`].

use strum::{Display, EnumIter};

/// The named constants of a math table, following the OpenType MATH
/// convention (the same set the TeX `\sigma`/`\xi` font dimensions
/// expose). The set is fixed; the layout engine queries all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum MathConstant {
    /// Height of the math axis above the baseline (σ22).
    AxisHeight,
    /// Scale factor applied at script size. Ratio.
    ScriptScaleDown,
    /// Scale factor applied at scriptscript size. Ratio.
    ScriptScriptScaleDown,

    // Fractions
    /// Numerator baseline shift up, display style (σ8).
    FractionNumeratorDisplayStyleShiftUp,
    /// Numerator baseline shift up, other styles (σ9).
    FractionNumeratorShiftUp,
    /// Denominator baseline shift down, display style (σ11).
    FractionDenominatorDisplayStyleShiftDown,
    /// Denominator baseline shift down, other styles (σ12).
    FractionDenominatorShiftDown,
    /// Minimum numerator-to-rule gap, display style (3ξ8).
    FractionNumeratorDisplayStyleGapMin,
    /// Minimum numerator-to-rule gap (ξ8).
    FractionNumeratorGapMin,
    /// Minimum denominator-to-rule gap, display style (3ξ8).
    FractionDenominatorDisplayStyleGapMin,
    /// Minimum denominator-to-rule gap (ξ8).
    FractionDenominatorGapMin,
    /// Thickness of the fraction rule (ξ8).
    FractionRuleThickness,

    // Stacks (rule-less fractions)
    /// Stack top shift up, display style.
    StackTopDisplayStyleShiftUp,
    /// Stack top shift up.
    StackTopShiftUp,
    /// Minimum stack gap, display style (7ξ8).
    StackDisplayStyleGapMin,
    /// Minimum stack gap (3ξ8).
    StackGapMin,
    /// Stack bottom shift down, display style.
    StackBottomDisplayStyleShiftDown,
    /// Stack bottom shift down.
    StackBottomShiftDown,

    // Scripts
    /// Superscript baseline shift up, uncramped (σ13).
    SuperscriptShiftUp,
    /// Superscript baseline shift up, cramped (σ15).
    SuperscriptShiftUpCramped,
    /// Subscript baseline shift down (σ16).
    SubscriptShiftDown,
    /// Maximum superscript baseline drop from a tall nucleus (σ18).
    SuperscriptBaselineDropMax,
    /// Minimum subscript baseline drop from a deep nucleus (σ19).
    SubscriptBaselineDropMin,
    /// Minimum height of a superscript bottom above the baseline (¼σ5).
    SuperscriptBottomMin,
    /// Maximum height of a subscript top above the baseline (⅘σ5).
    SubscriptTopMax,
    /// Minimum vertical gap between super- and subscript (4ξ8).
    SubSuperscriptGapMin,
    /// Superscript bottom cap when a subscript is present (⅘σ5).
    SuperscriptBottomMaxWithSubscript,
    /// Kern inserted after a scripted atom.
    SpaceAfterScript,

    // Radicals
    /// Space above the radical vinculum (ξ8).
    RadicalExtraAscender,
    /// Thickness of the radical vinculum (ξ8).
    RadicalRuleThickness,
    /// Radicand clearance, display style (ξ8 + ¼σ5).
    RadicalDisplayStyleVerticalGap,
    /// Radicand clearance (5/4 ξ8).
    RadicalVerticalGap,
    /// Kern before the degree (5 mu).
    RadicalKernBeforeDegree,
    /// Kern after the degree (-10 mu).
    RadicalKernAfterDegree,
    /// How far up the sign the degree baseline sits. Ratio.
    RadicalDegreeBottomRaisePercent,

    // Large-operator limits
    /// Minimum baseline rise of an upper limit (ξ11).
    UpperLimitBaselineRiseMin,
    /// Minimum gap between operator and upper limit (ξ9).
    UpperLimitGapMin,
    /// Minimum gap between operator and lower limit (ξ10).
    LowerLimitGapMin,
    /// Minimum baseline drop of a lower limit (ξ12).
    LowerLimitBaselineDropMin,

    // Overlines and underlines
    /// Gap between an overline rule and its content (3ξ8).
    OverbarVerticalGap,
    /// Overline rule thickness (ξ8).
    OverbarRuleThickness,
    /// Extra space above an overline (ξ8).
    OverbarExtraAscender,
    /// Gap between an underline rule and its content (3ξ8).
    UnderbarVerticalGap,
    /// Underline rule thickness (ξ8).
    UnderbarRuleThickness,
    /// Extra space below an underline (ξ8).
    UnderbarExtraDescender,

    // Accents
    /// Height an accent expects its base to have (x-height, σ5).
    AccentBaseHeight,

    // Extensible delimiters
    /// Fraction of the enclosed extent a `\left`/`\right` delimiter must
    /// cover. Ratio (TeX's `\delimiterfactor` / 1000).
    DelimiterFactor,
    /// Amount a delimiter may fall short of the full extent
    /// (TeX's `\delimitershortfall`).
    DelimiterShortfall,
    /// Minimum overlap of connecting glyph parts in an assembly.
    MinConnectorOverlap,
}

impl MathConstant {
    /// True for constants that are dimensionless ratios; these do not scale
    /// with font size and providers must return them as-is.
    #[must_use]
    pub const fn is_ratio(self) -> bool {
        matches!(
            self,
            Self::ScriptScaleDown
                | Self::ScriptScriptScaleDown
                | Self::RadicalDegreeBottomRaisePercent
                | Self::DelimiterFactor
        )
    }
}

/// One piece of an extensible vertical glyph assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphPart {
    /// Glyph text of the part.
    pub glyph: String,
    /// Full advance of the part in the direction of extension, in points.
    pub full_advance: f64,
    /// Connector length at the start (bottom) of the part.
    pub start_connector: f64,
    /// Connector length at the end (top) of the part.
    pub end_connector: f64,
    /// Whether the part may be repeated or omitted.
    pub is_extender: bool,
}

/// Read-only font-metric queries at a given font size.
///
/// Implementations must be cheap to query and safe for concurrent reads;
/// layout may interleave thousands of calls and callers may share one
/// provider across threads.
pub trait FontMetrics {
    /// Advance width of `glyph` at `size`, or `None` if the glyph has no
    /// metrics.
    fn advance_width(&self, glyph: &str, size: f64) -> Option<f64>;

    /// Extent of `glyph` above the baseline at `size`.
    fn ascent(&self, glyph: &str, size: f64) -> Option<f64>;

    /// Extent of `glyph` below the baseline at `size` (non-negative).
    fn descent(&self, glyph: &str, size: f64) -> Option<f64>;

    /// Italic correction of `glyph` at `size`; 0 when none applies.
    fn italic_correction(&self, glyph: &str, size: f64) -> f64;

    /// Horizontal position of the accent attachment point of `glyph`, if
    /// the font defines one. Defaults to `None`, meaning half the advance.
    fn top_accent_attachment(&self, glyph: &str, size: f64) -> Option<f64> {
        let _ = (glyph, size);
        None
    }

    /// A named math-table constant at `size` (ratios are size-free, see
    /// [`MathConstant::is_ratio`]).
    fn constant(&self, constant: MathConstant, size: f64) -> f64;

    /// Ordered vertical variants of `glyph`, smallest first. The base
    /// glyph itself must be the first entry.
    fn vertical_variants(&self, glyph: &str) -> Vec<String> {
        vec![glyph.to_owned()]
    }

    /// Parts for building `glyph` at arbitrary height, or `None` if the
    /// font defines no assembly. Parts are ordered bottom to top.
    fn vertical_assembly(&self, glyph: &str, size: f64) -> Option<Vec<GlyphPart>> {
        let _ = (glyph, size);
        None
    }
}

/// A deterministic metrics provider with no font behind it.
///
/// Every glyph gets the same proportional box; constants use the classic
/// Computer Modern values expressed as fractions of the font size. Good
/// enough for headless layout, golden tests, and size estimation; a real
/// renderer should wire in a provider backed by an actual MATH table.
#[derive(Debug, Clone)]
pub struct UniformMetrics;

/// Suffix marking synthetic enlarged variants produced by
/// [`UniformMetrics::vertical_variants`].
const VARIANT_MARKER: &str = "\u{0}v";

impl UniformMetrics {
    /// Glyph width as a fraction of font size.
    const ADVANCE: f64 = 0.5;
    /// Glyph ascent as a fraction of font size.
    const ASCENT: f64 = 0.7;
    /// Glyph descent as a fraction of font size.
    const DESCENT: f64 = 0.2;

    /// Splits a synthetic variant name into its base glyph and scale step.
    fn variant_step(glyph: &str) -> (&str, u32) {
        match glyph.split_once(VARIANT_MARKER) {
            Some((base, step)) => (base, step.parse().unwrap_or(0)),
            None => (glyph, 0),
        }
    }

    fn vertical_scale(glyph: &str) -> f64 {
        let (_, step) = Self::variant_step(glyph);
        1.0 + 0.8 * f64::from(step)
    }

    fn char_count(glyph: &str) -> usize {
        let (base, _) = Self::variant_step(glyph);
        base.chars().count().max(1)
    }
}

impl FontMetrics for UniformMetrics {
    fn advance_width(&self, glyph: &str, size: f64) -> Option<f64> {
        if glyph.is_empty() {
            return Some(0.0);
        }
        Some(Self::ADVANCE * size * Self::char_count(glyph) as f64)
    }

    fn ascent(&self, glyph: &str, size: f64) -> Option<f64> {
        if glyph.is_empty() {
            return Some(0.0);
        }
        Some(Self::ASCENT * size * Self::vertical_scale(glyph))
    }

    fn descent(&self, glyph: &str, size: f64) -> Option<f64> {
        if glyph.is_empty() {
            return Some(0.0);
        }
        Some(Self::DESCENT * size * Self::vertical_scale(glyph))
    }

    fn italic_correction(&self, _glyph: &str, _size: f64) -> f64 {
        0.0
    }

    fn constant(&self, constant: MathConstant, size: f64) -> f64 {
        use MathConstant::*;
        // Fractions of the em, after Computer Modern's σ/ξ dimensions.
        let ratio = match constant {
            AxisHeight => 0.25,
            ScriptScaleDown => return 0.7,
            ScriptScriptScaleDown => return 0.5,
            FractionNumeratorDisplayStyleShiftUp => 0.677,
            FractionNumeratorShiftUp => 0.394,
            FractionDenominatorDisplayStyleShiftDown => 0.686,
            FractionDenominatorShiftDown => 0.345,
            FractionNumeratorDisplayStyleGapMin => 0.12,
            FractionNumeratorGapMin => 0.04,
            FractionDenominatorDisplayStyleGapMin => 0.12,
            FractionDenominatorGapMin => 0.04,
            FractionRuleThickness => 0.04,
            StackTopDisplayStyleShiftUp => 0.677,
            StackTopShiftUp => 0.444,
            StackDisplayStyleGapMin => 0.28,
            StackGapMin => 0.12,
            StackBottomDisplayStyleShiftDown => 0.686,
            StackBottomShiftDown => 0.345,
            SuperscriptShiftUp => 0.413,
            SuperscriptShiftUpCramped => 0.289,
            SubscriptShiftDown => 0.15,
            SuperscriptBaselineDropMax => 0.386,
            SubscriptBaselineDropMin => 0.05,
            SuperscriptBottomMin => 0.108,
            SubscriptTopMax => 0.345,
            SubSuperscriptGapMin => 0.16,
            SuperscriptBottomMaxWithSubscript => 0.345,
            SpaceAfterScript => 0.056,
            RadicalExtraAscender => 0.04,
            RadicalRuleThickness => 0.04,
            RadicalDisplayStyleVerticalGap => 0.148,
            RadicalVerticalGap => 0.05,
            RadicalKernBeforeDegree => 0.278,
            RadicalKernAfterDegree => -0.556,
            RadicalDegreeBottomRaisePercent => return 0.6,
            UpperLimitBaselineRiseMin => 0.111,
            UpperLimitGapMin => 0.167,
            LowerLimitGapMin => 0.167,
            LowerLimitBaselineDropMin => 0.6,
            OverbarVerticalGap => 0.12,
            OverbarRuleThickness => 0.04,
            OverbarExtraAscender => 0.04,
            UnderbarVerticalGap => 0.12,
            UnderbarRuleThickness => 0.04,
            UnderbarExtraDescender => 0.04,
            AccentBaseHeight => 0.431,
            DelimiterFactor => return 0.901,
            DelimiterShortfall => 0.5,
            MinConnectorOverlap => 0.05,
        };
        ratio * size
    }

    fn vertical_variants(&self, glyph: &str) -> Vec<String> {
        let mut variants = vec![glyph.to_owned()];
        for step in 1..=4u32 {
            variants.push(format!("{glyph}{VARIANT_MARKER}{step}"));
        }
        variants
    }

    fn vertical_assembly(&self, glyph: &str, size: f64) -> Option<Vec<GlyphPart>> {
        let advance = 0.6 * size;
        let connector = 0.1 * size;
        let part = |name: &str, is_extender: bool| GlyphPart {
            glyph: name.to_owned(),
            full_advance: advance,
            start_connector: connector,
            end_connector: connector,
            is_extender,
        };
        Some(vec![
            part(&format!("{glyph}.bot"), false),
            part(&format!("{glyph}.ext"), true),
            part(&format!("{glyph}.top"), false),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn constants_scale_with_size_except_ratios() {
        let m = UniformMetrics;
        for constant in MathConstant::iter() {
            let at_10 = m.constant(constant, 10.0);
            let at_20 = m.constant(constant, 20.0);
            if constant.is_ratio() {
                assert_eq!(at_10, at_20, "{constant} should not scale");
            } else if at_10 != 0.0 {
                assert!(
                    (at_20 / at_10 - 2.0).abs() < 1e-9,
                    "{constant} should scale linearly"
                );
            }
        }
    }

    #[test]
    fn uniform_glyph_extents() {
        let m = UniformMetrics;
        assert_eq!(m.advance_width("x", 10.0), Some(5.0));
        assert_eq!(m.ascent("x", 10.0), Some(7.0));
        assert_eq!(m.descent("x", 10.0), Some(2.0));
    }

    #[test]
    fn named_operator_width_grows_with_length() {
        let m = UniformMetrics;
        let sin = m.advance_width("sin", 10.0).unwrap();
        let x = m.advance_width("x", 10.0).unwrap();
        assert!((sin - 3.0 * x).abs() < 1e-9);
    }

    #[test]
    fn variants_grow_monotonically() {
        let m = UniformMetrics;
        let variants = m.vertical_variants("(");
        assert_eq!(variants[0], "(");
        let mut last = 0.0;
        for v in &variants {
            let total = m.ascent(v, 10.0).unwrap() + m.descent(v, 10.0).unwrap();
            assert!(total > last);
            last = total;
        }
    }

    #[test]
    fn assembly_has_an_extender() {
        let m = UniformMetrics;
        let parts = m.vertical_assembly("(", 10.0).unwrap();
        assert!(parts.iter().any(|p| p.is_extender));
    }

    #[test]
    fn empty_glyph_is_zero_sized() {
        let m = UniformMetrics;
        assert_eq!(m.advance_width("", 10.0), Some(0.0));
        assert_eq!(m.ascent("", 10.0), Some(0.0));
    }
}
