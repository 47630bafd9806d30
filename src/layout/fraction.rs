//! Fractions and rule-less stacks.
//!
//! The numerator and denominator are laid out one style down, centered on
//! the wider of the two, and shifted by the style's shift constants with
//! the minimum-gap rules pushing them further apart when they crowd the
//! rule (or each other, for a rule-less stack). The rule sits on the math
//! axis.

use crate::atom::Fraction;
use crate::boxes::{BoxChild, LayoutBox, Point};
use crate::metrics::MathConstant;
use crate::options::LayoutOptions;

use super::Typesetter;

pub(super) fn layout_fraction(
    ts: &mut Typesetter<'_>,
    fraction: &Fraction,
    opts: LayoutOptions,
) -> LayoutBox {
    let numerator = ts.layout_list(&fraction.numerator, opts.frac_num());
    let denominator = ts.layout_list(&fraction.denominator, opts.frac_den());

    let display = opts.style.is_display();
    let axis = ts.constant(MathConstant::AxisHeight, &opts);

    let (mut num_shift, mut den_shift) = if display {
        (
            ts.constant(MathConstant::FractionNumeratorDisplayStyleShiftUp, &opts),
            ts.constant(
                MathConstant::FractionDenominatorDisplayStyleShiftDown,
                &opts,
            ),
        )
    } else if fraction.rule {
        (
            ts.constant(MathConstant::FractionNumeratorShiftUp, &opts),
            ts.constant(MathConstant::FractionDenominatorShiftDown, &opts),
        )
    } else {
        (
            ts.constant(MathConstant::StackTopShiftUp, &opts),
            ts.constant(MathConstant::StackBottomShiftDown, &opts),
        )
    };

    if fraction.rule {
        let thickness = ts.constant(MathConstant::FractionRuleThickness, &opts);
        let (num_gap_min, den_gap_min) = if display {
            (
                ts.constant(MathConstant::FractionNumeratorDisplayStyleGapMin, &opts),
                ts.constant(MathConstant::FractionDenominatorDisplayStyleGapMin, &opts),
            )
        } else {
            (
                ts.constant(MathConstant::FractionNumeratorGapMin, &opts),
                ts.constant(MathConstant::FractionDenominatorGapMin, &opts),
            )
        };

        let rule_top = axis + thickness / 2.0;
        let rule_bottom = axis - thickness / 2.0;
        let num_gap = (num_shift - numerator.depth) - rule_top;
        if num_gap < num_gap_min {
            num_shift += num_gap_min - num_gap;
        }
        let den_gap = rule_bottom - (denominator.height - den_shift);
        if den_gap < den_gap_min {
            den_shift += den_gap_min - den_gap;
        }

        let width = numerator.width.max(denominator.width);
        let num_x = (width - numerator.width) / 2.0;
        let den_x = (width - denominator.width) / 2.0;
        LayoutBox::container(vec![
            BoxChild {
                offset: Point::new(num_x, num_shift),
                node: numerator,
            },
            BoxChild {
                offset: Point::new(0.0, rule_bottom),
                node: LayoutBox::rule(width, thickness, 0.0),
            },
            BoxChild {
                offset: Point::new(den_x, -den_shift),
                node: denominator,
            },
        ])
    } else {
        let gap_min = if display {
            ts.constant(MathConstant::StackDisplayStyleGapMin, &opts)
        } else {
            ts.constant(MathConstant::StackGapMin, &opts)
        };
        let gap = (num_shift - numerator.depth) - (denominator.height - den_shift);
        if gap < gap_min {
            // Split the correction between the two halves.
            let bump = (gap_min - gap) / 2.0;
            num_shift += bump;
            den_shift += bump;
        }

        let width = numerator.width.max(denominator.width);
        let num_x = (width - numerator.width) / 2.0;
        let den_x = (width - denominator.width) / 2.0;
        LayoutBox::container(vec![
            BoxChild {
                offset: Point::new(num_x, num_shift),
                node: numerator,
            },
            BoxChild {
                offset: Point::new(den_x, -den_shift),
                node: denominator,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::BoxPayload;
    use crate::metrics::{FontMetrics, UniformMetrics};
    use crate::parser::parse;
    use crate::style::TEXT;

    fn layout_str(input: &str, opts: LayoutOptions) -> LayoutBox {
        let outcome = parse(input);
        assert!(outcome.errors.is_empty());
        super::super::layout(&outcome.list, &opts, &UniformMetrics).root
    }

    #[test]
    fn rule_sits_on_the_math_axis() {
        let opts = LayoutOptions::default();
        let root = layout_str(r"\frac{1}{2}", opts);
        let metrics = UniformMetrics;
        let axis = metrics.constant(MathConstant::AxisHeight, opts.base_size);
        let thickness = metrics.constant(MathConstant::FractionRuleThickness, opts.base_size);

        let mut rule_center = None;
        root.walk(&mut |origin, node| {
            if node.payload == BoxPayload::Rule {
                rule_center = Some(origin.y + node.height / 2.0);
            }
        });
        let center = rule_center.expect("fraction should draw a rule");
        assert!((center - axis).abs() < thickness);
    }

    #[test]
    fn halves_are_centered_on_the_wider_one() {
        let root = layout_str(r"\frac{xxx}{y}", LayoutOptions::default());
        let mut den_x = None;
        root.walk(&mut |origin, node| {
            if let BoxPayload::Glyph { text, .. } = &node.payload {
                if text == "y" {
                    den_x = Some(origin.x);
                }
            }
        });
        assert!(den_x.expect("denominator glyph") > 0.0);
    }

    #[test]
    fn numerator_clears_the_rule() {
        let root = layout_str(r"\frac{x}{y}", LayoutOptions::default());
        let mut num_bottom = f64::INFINITY;
        let mut rule_top = f64::NEG_INFINITY;
        root.walk(&mut |origin, node| {
            match &node.payload {
                BoxPayload::Glyph { text, .. } if text == "x" => {
                    num_bottom = origin.y - node.depth;
                }
                BoxPayload::Rule => rule_top = origin.y + node.height,
                _ => {}
            }
        });
        assert!(num_bottom > rule_top);
    }

    #[test]
    fn text_style_fraction_is_shorter() {
        let display = layout_str(r"\frac{a}{b}", LayoutOptions::default());
        let text = layout_str(
            r"\frac{a}{b}",
            LayoutOptions::builder().style(TEXT).build(),
        );
        let total_display = display.height + display.depth;
        let total_text = text.height + text.depth;
        assert!(total_text < total_display);
    }

    #[test]
    fn binomial_draws_no_rule() {
        let root = layout_str(r"\binom{n}{k}", LayoutOptions::default());
        let mut rules = 0;
        root.walk(&mut |_, node| {
            if node.payload == BoxPayload::Rule {
                rules += 1;
            }
        });
        assert_eq!(rules, 0);
    }

    #[test]
    fn binomial_halves_keep_the_stack_gap() {
        let opts = LayoutOptions::default();
        let root = layout_str(r"\binom{n}{k}", opts);
        let metrics = UniformMetrics;
        let gap_min = metrics.constant(MathConstant::StackDisplayStyleGapMin, opts.base_size);

        let mut top_bottom = None;
        let mut bottom_top = None;
        root.walk(&mut |origin, node| {
            if let BoxPayload::Glyph { text, .. } = &node.payload {
                if text == "n" {
                    top_bottom = Some(origin.y - node.depth);
                } else if text == "k" {
                    bottom_top = Some(origin.y + node.height);
                }
            }
        });
        let gap = top_bottom.expect("upper glyph") - bottom_top.expect("lower glyph");
        assert!(gap >= gap_min - 1e-9);
    }

    #[test]
    fn nested_fraction_shrinks() {
        let root = layout_str(r"\frac{\frac{a}{b}}{c}", LayoutOptions::default());
        let mut sizes = Vec::new();
        root.walk(&mut |_, node| {
            if let BoxPayload::Glyph { text, size } = &node.payload {
                if text == "a" || text == "c" {
                    sizes.push((text.clone(), *size));
                }
            }
        });
        let a = sizes.iter().find(|(t, _)| t == "a").unwrap().1;
        let c = sizes.iter().find(|(t, _)| t == "c").unwrap().1;
        assert!(a < c);
    }
}
