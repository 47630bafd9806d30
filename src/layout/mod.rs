//! The layout engine: atom trees in, measured box trees out.
//!
//! Layout is a pure function of the list, the options, and the metrics
//! provider. It never fails: a glyph the provider cannot measure becomes
//! an empty box plus a [`LayoutError`] in the outcome, and everything
//! else keeps its place.

mod accent;
mod delimiter;
mod fraction;
mod largeop;
mod radical;
mod scripts;
mod spacing;
mod table;

use crate::atom::{Atom, AtomBody, AtomClass, MathList};
use crate::boxes::LayoutBox;
use crate::error::LayoutError;
use crate::metrics::{FontMetrics, MathConstant};
use crate::options::LayoutOptions;

/// The result of laying out a list: the box tree plus any diagnostics.
#[derive(Debug)]
pub struct LayoutOutcome {
    /// The measured box tree. Never structurally broken.
    pub root: LayoutBox,
    /// Diagnostics collected during layout, in encounter order.
    pub errors: Vec<LayoutError>,
}

impl LayoutOutcome {
    /// True if layout reported no diagnostics.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Lays out `list` with `options` against `metrics`.
#[must_use]
pub fn layout(list: &MathList, options: &LayoutOptions, metrics: &dyn FontMetrics) -> LayoutOutcome {
    let mut ts = Typesetter {
        metrics,
        errors: Vec::new(),
    };
    let root = ts.layout_list(list, *options);
    LayoutOutcome {
        root,
        errors: ts.errors,
    }
}

/// Mutable layout state: the metrics provider plus accumulated
/// diagnostics. All positioning logic hangs off this.
pub(crate) struct Typesetter<'a> {
    pub(crate) metrics: &'a dyn FontMetrics,
    pub(crate) errors: Vec<LayoutError>,
}

impl Typesetter<'_> {
    /// A math-table constant at the effective size of `opts`.
    pub(crate) fn constant(&self, constant: MathConstant, opts: &LayoutOptions) -> f64 {
        self.metrics.constant(constant, opts.font_size(self.metrics))
    }

    /// A glyph box at the effective size of `opts`.
    pub(crate) fn glyph(&mut self, text: &str, opts: &LayoutOptions) -> LayoutBox {
        let size = opts.font_size(self.metrics);
        self.glyph_at(text, size)
    }

    /// A glyph box at an explicit size. A glyph the provider cannot
    /// measure becomes an empty box plus a diagnostic.
    pub(crate) fn glyph_at(&mut self, text: &str, size: f64) -> LayoutBox {
        let measured = (|| {
            let width = self.metrics.advance_width(text, size)?;
            let height = self.metrics.ascent(text, size)?;
            let depth = self.metrics.descent(text, size)?;
            Some(LayoutBox::glyph(text, size, width, height, depth))
        })();
        match measured {
            Some(node) => node,
            None => {
                self.errors.push(LayoutError::MissingGlyphMetric {
                    glyph: text.to_owned(),
                });
                LayoutBox::empty()
            }
        }
    }

    /// Lays out one list in `opts`: bin demotion first, then per-atom
    /// boxes with class-pair spacing kerns between them. `\displaystyle`
    /// and friends switch the style for the remainder of the list.
    pub(crate) fn layout_list(&mut self, list: &MathList, opts: LayoutOptions) -> LayoutBox {
        let list = list.finalized();
        let mut opts = opts;
        let mut row: Vec<LayoutBox> = Vec::new();
        let mut prev_class: Option<AtomClass> = None;

        for atom in &list.atoms {
            match &atom.body {
                AtomBody::Space(mu) => {
                    row.push(LayoutBox::kern(mu * opts.mu(self.metrics)));
                    continue;
                }
                AtomBody::StyleChange(size) => {
                    opts = opts.with_style(opts.style.with_size(*size));
                    continue;
                }
                _ => {}
            }

            let class = atom.class();
            if let Some(prev) = prev_class {
                let kern =
                    spacing::inter_atom_space(prev, class, opts.style, opts.mu(self.metrics));
                if kern != 0.0 {
                    row.push(LayoutBox::kern(kern));
                }
            }
            row.push(self.layout_atom(atom, opts));
            prev_class = Some(class);
        }
        LayoutBox::hbox(row)
    }

    fn layout_atom(&mut self, atom: &Atom, opts: LayoutOptions) -> LayoutBox {
        if let AtomBody::LargeOp(op) = &atom.body {
            return largeop::layout_large_op(self, atom, op, opts);
        }

        let nucleus = self.layout_nucleus(&atom.body, opts);
        if !atom.has_scripts() {
            return nucleus;
        }
        let italic = match &atom.body {
            AtomBody::Symbol { text, .. } if !text.is_empty() => self
                .metrics
                .italic_correction(text, opts.font_size(self.metrics)),
            _ => 0.0,
        };
        scripts::attach_scripts(self, atom, nucleus, italic, opts)
    }

    fn layout_nucleus(&mut self, body: &AtomBody, opts: LayoutOptions) -> LayoutBox {
        match body {
            AtomBody::Symbol { text, .. } => {
                if text.is_empty() {
                    LayoutBox::empty()
                } else {
                    self.glyph(text, &opts)
                }
            }
            AtomBody::Group(list) => self.layout_list(list, opts),
            AtomBody::Fraction(fraction) => fraction::layout_fraction(self, fraction, opts),
            AtomBody::Radical(radical) => radical::layout_radical(self, radical, opts),
            AtomBody::Delimited(delimited) => delimiter::layout_delimited(self, delimited, opts),
            AtomBody::Accent(accent) => accent::layout_accent(self, accent, opts),
            AtomBody::Overline(inner) => accent::layout_overline(self, inner, opts),
            AtomBody::Underline(inner) => accent::layout_underline(self, inner, opts),
            AtomBody::Table(table) => table::layout_table(self, table, opts),
            AtomBody::Placeholder => LayoutBox::empty(),
            // Handled by layout_list; a bare one (inside a script, say)
            // contributes nothing.
            AtomBody::Space(_) | AtomBody::StyleChange(_) => LayoutBox::empty(),
            // Dispatched before layout_nucleus.
            AtomBody::LargeOp(op) => self.glyph(&op.text, &opts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::BoxPayload;
    use crate::metrics::UniformMetrics;
    use crate::parser::parse;
    use crate::style::SCRIPT;

    fn layout_str(input: &str) -> LayoutBox {
        let outcome = parse(input);
        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        layout(&outcome.list, &LayoutOptions::default(), &UniformMetrics).root
    }

    #[test]
    fn empty_list_is_an_empty_box() {
        let result = layout(
            &MathList::new(),
            &LayoutOptions::default(),
            &UniformMetrics,
        );
        assert!(result.is_clean());
        assert!(result.root.is_empty());
    }

    #[test]
    fn binary_spacing_appears_between_operands() {
        let tight = layout_str("ab");
        let spaced = layout_str("a+b");
        let plus = layout_str("+");
        // a + b = two glyphs, the operator, and two medium spaces.
        let mu = 20.0 / 18.0;
        let expected = tight.width + plus.width + 2.0 * 4.0 * mu;
        assert!((spaced.width - expected).abs() < 1e-9);
    }

    #[test]
    fn leading_minus_gets_no_operator_space() {
        let neg = layout_str("-x");
        let glyphs = layout_str("yx");
        assert!((neg.width - glyphs.width).abs() < 1e-9);
    }

    #[test]
    fn script_style_drops_binary_spacing() {
        let outcome = parse("a+b");
        let opts = LayoutOptions::builder().style(SCRIPT).build();
        let spaced = layout(&outcome.list, &opts, &UniformMetrics).root;
        let mut kerns = 0;
        spaced.walk(&mut |_, node| {
            if node.payload == BoxPayload::Kern {
                kerns += 1;
            }
        });
        assert_eq!(kerns, 0);
    }

    #[test]
    fn explicit_space_commands_widen() {
        let plain = layout_str("ab");
        let spaced = layout_str(r"a\quad b");
        assert!((spaced.width - plain.width - 20.0).abs() < 1e-9);
    }

    #[test]
    fn negative_space_narrows() {
        let plain = layout_str("ab");
        let tightened = layout_str(r"a\!b");
        assert!(tightened.width < plain.width);
    }

    #[test]
    fn style_switch_affects_remainder_of_list() {
        let root = layout_str(r"a \scriptstyle b");
        let mut a_size = 0.0;
        let mut b_size = 0.0;
        root.walk(&mut |_, node| {
            if let BoxPayload::Glyph { text, size } = &node.payload {
                if text == "a" {
                    a_size = *size;
                }
                if text == "b" {
                    b_size = *size;
                }
            }
        });
        assert!(b_size < a_size);
    }

    #[test]
    fn layout_is_deterministic() {
        let outcome = parse(r"\frac{x^2}{\sqrt{y}} + \left( z \right)");
        assert!(outcome.errors.is_empty());
        let opts = LayoutOptions::default();
        let first = layout(&outcome.list, &opts, &UniformMetrics);
        let second = layout(&outcome.list, &opts, &UniformMetrics);
        assert_eq!(first.root, second.root);
    }

    #[test]
    fn placeholder_occupies_no_space_but_neighbors_survive() {
        let outcome = parse(r"\unknown{x}");
        assert_eq!(outcome.errors.len(), 1);
        let result = layout(&outcome.list, &LayoutOptions::default(), &UniformMetrics);
        assert!(result.is_clean());
        assert!(!result.root.is_empty());
    }

    #[test]
    fn extents_are_never_negative() {
        for input in [
            "",
            "x",
            r"\frac{a}{b}",
            r"\sqrt{x}",
            r"x^2_i",
            r"\left( \frac{a}{b} \right)",
            r"\begin{pmatrix} a & b \\ c & d \end{pmatrix}",
            r"\hat{x} + \overline{yz}",
            r"\sum_{i=0}^{n} i",
        ] {
            let outcome = parse(input);
            let result = layout(&outcome.list, &LayoutOptions::default(), &UniformMetrics);
            result.root.walk(&mut |_, node| {
                assert!(node.height >= 0.0, "height < 0 for {input:?}");
                assert!(node.depth >= 0.0, "depth < 0 for {input:?}");
            });
        }
    }
}
