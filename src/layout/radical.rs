//! Radicals.
//!
//! The radicand is laid out cramped, the radical sign is sized like a
//! delimiter to cover radicand plus clearance plus vinculum, and the
//! vinculum runs from the top of the sign across the radicand. An
//! optional degree is set at scriptscript size, raised part-way up the
//! sign.

use crate::atom::Radical;
use crate::boxes::{BoxChild, LayoutBox, Point};
use crate::metrics::MathConstant;
use crate::options::LayoutOptions;
use crate::style::{Style, StyleSize};

use super::{delimiter, Typesetter};

/// The radical sign glyph.
const RADICAL_GLYPH: &str = "√";

pub(super) fn layout_radical(
    ts: &mut Typesetter<'_>,
    radical: &Radical,
    opts: LayoutOptions,
) -> LayoutBox {
    let radicand = ts.layout_list(&radical.radicand, opts.cramp());

    let thickness = ts.constant(MathConstant::RadicalRuleThickness, &opts);
    let mut clearance = if opts.style.is_display() {
        ts.constant(MathConstant::RadicalDisplayStyleVerticalGap, &opts)
    } else {
        ts.constant(MathConstant::RadicalVerticalGap, &opts)
    };
    let extra_ascender = ts.constant(MathConstant::RadicalExtraAscender, &opts);

    let target = radicand.height + radicand.depth + clearance + thickness;
    let sign = delimiter::make_vertical_glyph(ts, RADICAL_GLYPH, target, opts);

    // A sign taller than required donates half its excess to the
    // clearance, so the vinculum does not hug the radicand.
    let excess = (sign.height + sign.depth) - target;
    if excess > 0.0 {
        clearance += excess / 2.0;
    }

    let rule_bottom = radicand.height + clearance;
    let rule_top = rule_bottom + thickness;
    // Align the top of the sign with the top of the vinculum.
    let sign_y = rule_top - sign.height;
    let sign_total = sign.height + sign.depth;
    let sign_width = sign.width;

    let mut x = 0.0;
    let mut children = Vec::new();

    if let Some(degree) = &radical.degree {
        let degree_opts =
            opts.with_style(Style::new(StyleSize::ScriptScript, opts.style.cramped));
        let degree_box = ts.layout_list(degree, degree_opts);
        let kern_before = ts.constant(MathConstant::RadicalKernBeforeDegree, &opts);
        let kern_after = ts.constant(MathConstant::RadicalKernAfterDegree, &opts);
        let raise = ts.constant(MathConstant::RadicalDegreeBottomRaisePercent, &opts)
            * sign_total
            + (sign_y - sign.depth);
        let degree_width = degree_box.width;
        children.push(BoxChild {
            offset: Point::new(kern_before, raise),
            node: degree_box,
        });
        x = (kern_before + degree_width + kern_after).max(0.0);
    }

    children.push(BoxChild {
        offset: Point::new(x, sign_y),
        node: sign,
    });
    let body_x = x + sign_width;
    children.push(BoxChild {
        offset: Point::new(body_x, rule_bottom),
        node: LayoutBox::rule(radicand.width, thickness, 0.0),
    });
    children.push(BoxChild {
        offset: Point::new(body_x, 0.0),
        node: radicand,
    });

    let mut built = LayoutBox::container(children);
    built.height += extra_ascender;
    built
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::BoxPayload;
    use crate::metrics::{FontMetrics, UniformMetrics};
    use crate::parser::parse;

    fn layout_str(input: &str) -> LayoutBox {
        let outcome = parse(input);
        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        super::super::layout(&outcome.list, &LayoutOptions::default(), &UniformMetrics).root
    }

    #[test]
    fn sign_covers_the_radicand() {
        let root = layout_str(r"\sqrt{x}");
        let metrics = UniformMetrics;
        let x_total = metrics.ascent("x", 20.0).unwrap() + metrics.descent("x", 20.0).unwrap();

        let mut sign_total = 0.0;
        root.walk(&mut |_, node| {
            if let BoxPayload::Glyph { text, .. } = &node.payload {
                if text.starts_with(RADICAL_GLYPH) {
                    sign_total = node.height + node.depth;
                }
            }
        });
        assert!(sign_total > x_total);
    }

    #[test]
    fn taller_radicand_gets_a_taller_sign() {
        let plain = layout_str(r"\sqrt{x}");
        let tall = layout_str(r"\sqrt{\frac{a}{b}}");
        assert!(tall.height + tall.depth > plain.height + plain.depth);
    }

    #[test]
    fn vinculum_spans_the_radicand() {
        let root = layout_str(r"\sqrt{abc}");
        let metrics = UniformMetrics;
        let expected = metrics.advance_width("abc", 20.0).unwrap();
        let mut rule_width = 0.0;
        root.walk(&mut |_, node| {
            if node.payload == BoxPayload::Rule {
                rule_width = node.width;
            }
        });
        assert!((rule_width - expected).abs() < 1e-9);
    }

    #[test]
    fn vinculum_clears_the_radicand() {
        let root = layout_str(r"\sqrt{x}");
        let metrics = UniformMetrics;
        let x_height = metrics.ascent("x", 20.0).unwrap();
        let mut rule_bottom = 0.0;
        root.walk(&mut |origin, node| {
            if node.payload == BoxPayload::Rule {
                rule_bottom = origin.y;
            }
        });
        assert!(rule_bottom > x_height);
    }

    #[test]
    fn degree_is_set_small_and_raised() {
        let root = layout_str(r"\sqrt[3]{x}");
        let mut degree = None;
        root.walk(&mut |origin, node| {
            if let BoxPayload::Glyph { text, size } = &node.payload {
                if text == "3" {
                    degree = Some((origin.y, *size));
                }
            }
        });
        let (y, size) = degree.expect("degree glyph");
        assert!(size < 20.0);
        assert!(y > 0.0);
    }
}
