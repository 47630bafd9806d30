//! Layout options: the immutable context handed down during layout.
//!
//! An options value pins the current math style and the base font size.
//! It is never mutated; stepping into a script, numerator, or radicand
//! derives a new value. The actual glyph size at script levels comes from
//! the metrics provider's scale-down constants, so the options only track
//! the base size.

use bon::bon;

use crate::metrics::{FontMetrics, MathConstant};
use crate::style::{Style, StyleSize, DISPLAY};

/// Default base font size, in points.
pub const DEFAULT_FONT_SIZE: f64 = 20.0;

/// The immutable layout context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Current math style.
    pub style: Style,
    /// Base font size in points, before script scaling.
    pub base_size: f64,
}

#[bon]
impl LayoutOptions {
    /// Builds options. Defaults to display style at
    /// [`DEFAULT_FONT_SIZE`].
    #[builder]
    pub fn new(style: Option<Style>, font_size: Option<f64>) -> Self {
        Self {
            style: style.unwrap_or(DISPLAY),
            base_size: font_size.unwrap_or(DEFAULT_FONT_SIZE),
        }
    }

    /// The same options in a different style.
    #[must_use]
    pub fn with_style(self, style: Style) -> Self {
        Self { style, ..self }
    }

    /// Options for a superscript of an atom in this style.
    #[must_use]
    pub fn sup(self) -> Self {
        self.with_style(self.style.sup())
    }

    /// Options for a subscript of an atom in this style.
    #[must_use]
    pub fn sub(self) -> Self {
        self.with_style(self.style.sub())
    }

    /// Options for a fraction numerator in this style.
    #[must_use]
    pub fn frac_num(self) -> Self {
        self.with_style(self.style.frac_num())
    }

    /// Options for a fraction denominator in this style.
    #[must_use]
    pub fn frac_den(self) -> Self {
        self.with_style(self.style.frac_den())
    }

    /// The cramped version of these options.
    #[must_use]
    pub fn cramp(self) -> Self {
        self.with_style(self.style.cramp())
    }

    /// The effective font size at the current style level, applying the
    /// provider's script scale-down constants.
    #[must_use]
    pub fn font_size(&self, metrics: &dyn FontMetrics) -> f64 {
        let scale = match self.style.size {
            StyleSize::Display | StyleSize::Text => 1.0,
            StyleSize::Script => metrics.constant(MathConstant::ScriptScaleDown, self.base_size),
            StyleSize::ScriptScript => {
                metrics.constant(MathConstant::ScriptScriptScaleDown, self.base_size)
            }
        };
        self.base_size * scale
    }

    /// One math unit (1/18 em) at the current effective size.
    #[must_use]
    pub fn mu(&self, metrics: &dyn FontMetrics) -> f64 {
        self.font_size(metrics) / 18.0
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            style: DISPLAY,
            base_size: DEFAULT_FONT_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::UniformMetrics;
    use crate::style::{SCRIPT, SCRIPTSCRIPT, TEXT};

    #[test]
    fn builder_defaults() {
        let opts = LayoutOptions::builder().build();
        assert_eq!(opts.style, DISPLAY);
        assert_eq!(opts.base_size, DEFAULT_FONT_SIZE);
    }

    #[test]
    fn builder_overrides() {
        let opts = LayoutOptions::builder().style(TEXT).font_size(12.0).build();
        assert_eq!(opts.style, TEXT);
        assert_eq!(opts.base_size, 12.0);
    }

    #[test]
    fn script_sizes_scale_down() {
        let metrics = UniformMetrics;
        let opts = LayoutOptions::builder().font_size(10.0).build();
        assert_eq!(opts.font_size(&metrics), 10.0);
        assert_eq!(opts.with_style(SCRIPT).font_size(&metrics), 7.0);
        assert_eq!(opts.with_style(SCRIPTSCRIPT).font_size(&metrics), 5.0);
    }

    #[test]
    fn derivations_track_style_rules() {
        let opts = LayoutOptions::default();
        assert_eq!(opts.sup().style, DISPLAY.sup());
        assert_eq!(opts.sub().style, DISPLAY.sub());
        assert_eq!(opts.frac_den().style, DISPLAY.frac_den());
        assert!(opts.cramp().style.cramped);
        // Base size survives all derivations.
        assert_eq!(opts.sup().base_size, opts.base_size);
    }

    #[test]
    fn mu_is_an_eighteenth_of_an_em() {
        let metrics = UniformMetrics;
        let opts = LayoutOptions::builder().font_size(18.0).build();
        assert_eq!(opts.mu(&metrics), 1.0);
    }
}
