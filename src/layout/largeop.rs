//! Large operators and named functions.
//!
//! Single-glyph operators take their display-size variant in display
//! style and are centered on the math axis. With `limits` in effect the
//! scripts stack above and below, centered, nudged by half the italic
//! correction; otherwise they attach like ordinary scripts.

use crate::atom::{Atom, LargeOp};
use crate::boxes::{BoxChild, LayoutBox, Point};
use crate::metrics::MathConstant;
use crate::options::LayoutOptions;

use super::{delimiter, scripts, Typesetter};

pub(super) fn layout_large_op(
    ts: &mut Typesetter<'_>,
    atom: &Atom,
    op: &LargeOp,
    opts: LayoutOptions,
) -> LayoutBox {
    let size = opts.font_size(ts.metrics);
    let single_glyph = op.text.chars().count() == 1;

    let (nucleus, italic) = if single_glyph {
        let variant = if opts.style.is_display() {
            // The display variant is the next larger glyph the font
            // offers.
            ts.metrics
                .vertical_variants(&op.text)
                .into_iter()
                .nth(1)
                .unwrap_or_else(|| op.text.clone())
        } else {
            op.text.clone()
        };
        let italic = ts.metrics.italic_correction(&variant, size);
        let glyph = ts.glyph_at(&variant, size);
        let axis = ts.constant(MathConstant::AxisHeight, &opts);
        (delimiter::centered_on_axis(glyph, axis), italic)
    } else {
        // Named functions are drawn as an upright word on the baseline.
        (ts.glyph_at(&op.text, size), 0.0)
    };

    let stack_limits = op.limits && opts.style.is_display();
    if !atom.has_scripts() {
        return nucleus;
    }
    if !stack_limits {
        return scripts::attach_scripts(ts, atom, nucleus, italic, opts);
    }

    let upper = atom
        .superscript
        .as_ref()
        .map(|list| ts.layout_list(list, opts.sup()));
    let lower = atom
        .subscript
        .as_ref()
        .map(|list| ts.layout_list(list, opts.sub()));

    let width = nucleus
        .width
        .max(upper.as_ref().map_or(0.0, |b| b.width))
        .max(lower.as_ref().map_or(0.0, |b| b.width));

    let nucleus_x = (width - nucleus.width) / 2.0;
    let nucleus_height = nucleus.height;
    let nucleus_depth = nucleus.depth;
    let mut children = vec![BoxChild {
        offset: Point::new(nucleus_x, 0.0),
        node: nucleus,
    }];

    if let Some(upper) = upper {
        let rise_min = ts.constant(MathConstant::UpperLimitBaselineRiseMin, &opts);
        let gap_min = ts.constant(MathConstant::UpperLimitGapMin, &opts);
        let baseline = nucleus_height + rise_min.max(gap_min + upper.depth);
        children.push(BoxChild {
            offset: Point::new((width - upper.width) / 2.0 + italic / 2.0, baseline),
            node: upper,
        });
    }
    if let Some(lower) = lower {
        let drop_min = ts.constant(MathConstant::LowerLimitBaselineDropMin, &opts);
        let gap_min = ts.constant(MathConstant::LowerLimitGapMin, &opts);
        let baseline = nucleus_depth + drop_min.max(gap_min + lower.height);
        children.push(BoxChild {
            offset: Point::new((width - lower.width) / 2.0 - italic / 2.0, -baseline),
            node: lower,
        });
    }

    LayoutBox::container(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::BoxPayload;
    use crate::metrics::UniformMetrics;
    use crate::parser::parse;
    use crate::style::TEXT;

    fn layout_with(input: &str, opts: LayoutOptions) -> LayoutBox {
        let outcome = parse(input);
        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        super::super::layout(&outcome.list, &opts, &UniformMetrics).root
    }

    #[test]
    fn display_style_limits_stack_vertically() {
        let root = layout_with(r"\sum_{i=0}^{n} x", LayoutOptions::default());
        let mut upper_y = None;
        let mut lower_y = None;
        root.walk(&mut |origin, node| {
            if let BoxPayload::Glyph { text, .. } = &node.payload {
                if text == "n" {
                    upper_y = Some(origin.y);
                }
                if text == "i" {
                    lower_y = Some(origin.y);
                }
            }
        });
        assert!(upper_y.expect("upper limit") > 0.0);
        assert!(lower_y.expect("lower limit") < 0.0);
    }

    #[test]
    fn text_style_scripts_attach_to_the_side() {
        let opts = LayoutOptions::builder().style(TEXT).build();
        let root = layout_with(r"\sum_{i=0}^{n}", opts);
        let mut sum_right = 0.0;
        let mut upper_x = 0.0;
        root.walk(&mut |origin, node| {
            if let BoxPayload::Glyph { text, .. } = &node.payload {
                if text.starts_with('∑') {
                    sum_right = origin.x + node.width;
                }
                if text == "n" {
                    upper_x = origin.x;
                }
            }
        });
        assert!(upper_x >= sum_right - 1e-9);
    }

    #[test]
    fn display_operator_uses_a_larger_variant() {
        let display = layout_with(r"\sum", LayoutOptions::default());
        let text = layout_with(r"\sum", LayoutOptions::builder().style(TEXT).build());
        assert!(
            display.height + display.depth > text.height + text.depth,
            "display operator should be larger"
        );
    }

    #[test]
    fn integral_keeps_side_scripts_in_display() {
        let root = layout_with(r"\int_0^1", LayoutOptions::default());
        let mut zero_x = 0.0;
        let mut int_x = 0.0;
        let mut int_width = 0.0;
        root.walk(&mut |origin, node| {
            if let BoxPayload::Glyph { text, .. } = &node.payload {
                if text == "0" {
                    zero_x = origin.x;
                }
                if text.starts_with('∫') {
                    int_x = origin.x;
                    int_width = node.width;
                }
            }
        });
        assert!(zero_x >= int_x + int_width - 1e-9);
    }

    #[test]
    fn named_function_is_one_word_glyph() {
        let root = layout_with(r"\sin x", LayoutOptions::default());
        let mut found = false;
        root.walk(&mut |_, node| {
            if let BoxPayload::Glyph { text, .. } = &node.payload {
                if text == "sin" {
                    found = true;
                }
            }
        });
        assert!(found);
    }

    #[test]
    fn operator_is_centered_on_the_axis() {
        let root = layout_with(r"\sum", LayoutOptions::default());
        let metrics = UniformMetrics;
        use crate::metrics::FontMetrics;
        let axis = metrics.constant(MathConstant::AxisHeight, 20.0);
        let center = (root.height - root.depth) / 2.0;
        assert!((center - axis).abs() < 1e-9);
    }
}
