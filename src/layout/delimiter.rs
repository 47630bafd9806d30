//! Delimiter sizing: glyph variants and extensible assemblies.
//!
//! A delimiter must cover a target extent derived from what it encloses.
//! The font's ordered vertical variants are tried smallest-first; when
//! none is tall enough the glyph is assembled from parts, repeating
//! extenders until the stack reaches the target. The result is centered
//! on the math axis.

use crate::atom::Delimited;
use crate::boxes::{BoxChild, LayoutBox, Point};
use crate::error::LayoutError;
use crate::metrics::MathConstant;
use crate::options::LayoutOptions;

use super::Typesetter;

/// Upper bound on extender repetitions, so a degenerate assembly (zero
/// advance parts) cannot loop forever.
const MAX_EXTENDER_REPEATS: usize = 64;

pub(super) fn layout_delimited(
    ts: &mut Typesetter<'_>,
    delimited: &Delimited,
    opts: LayoutOptions,
) -> LayoutBox {
    let inner = ts.layout_list(&delimited.inner, opts);
    wrap_in_delimiters(
        ts,
        delimited.left.as_deref(),
        delimited.right.as_deref(),
        inner,
        opts,
    )
}

/// Wraps `inner` in optional left/right delimiters sized to cover it.
/// Shared by `\left`/`\right` pairs and bracketed table environments.
pub(super) fn wrap_in_delimiters(
    ts: &mut Typesetter<'_>,
    left: Option<&str>,
    right: Option<&str>,
    inner: LayoutBox,
    opts: LayoutOptions,
) -> LayoutBox {
    if left.is_none() && right.is_none() {
        return inner;
    }

    let axis = ts.constant(MathConstant::AxisHeight, &opts);
    // The delimiter covers the enclosed extent measured from the axis,
    // allowed to fall short by the shortfall but never below the
    // coverage factor.
    let half_extent = (inner.height - axis).max(inner.depth + axis).max(0.0);
    let factor = ts.constant(MathConstant::DelimiterFactor, &opts);
    let shortfall = ts.constant(MathConstant::DelimiterShortfall, &opts);
    let target = (2.0 * half_extent * factor).max(2.0 * half_extent - shortfall);

    let mut row = Vec::new();
    if let Some(glyph) = left {
        let sized = make_vertical_glyph(ts, glyph, target, opts);
        row.push(centered_on_axis(sized, axis));
    }
    row.push(inner);
    if let Some(glyph) = right {
        let sized = make_vertical_glyph(ts, glyph, target, opts);
        row.push(centered_on_axis(sized, axis));
    }
    LayoutBox::hbox(row)
}

/// Builds `glyph` at a total vertical extent of at least `target`:
/// smallest sufficient variant, else an assembly, else the largest
/// variant with a diagnostic.
pub(super) fn make_vertical_glyph(
    ts: &mut Typesetter<'_>,
    glyph: &str,
    target: f64,
    opts: LayoutOptions,
) -> LayoutBox {
    let size = opts.font_size(ts.metrics);

    let mut largest: Option<LayoutBox> = None;
    for variant in ts.metrics.vertical_variants(glyph) {
        let Some(node) = glyph_extents(ts, &variant, size) else {
            continue;
        };
        if node.height + node.depth >= target {
            return node;
        }
        let grows = match &largest {
            Some(best) => node.height + node.depth > best.height + best.depth,
            None => true,
        };
        if grows {
            largest = Some(node);
        }
    }

    if let Some(parts) = ts.metrics.vertical_assembly(glyph, size) {
        if let Some(assembled) = assemble(ts, glyph, &parts, target, size, opts) {
            return assembled;
        }
    }

    ts.errors.push(LayoutError::MissingFontStyleVariant {
        glyph: glyph.to_owned(),
    });
    largest.unwrap_or_else(|| ts.glyph(glyph, &opts))
}

fn glyph_extents(ts: &Typesetter<'_>, glyph: &str, size: f64) -> Option<LayoutBox> {
    let width = ts.metrics.advance_width(glyph, size)?;
    let height = ts.metrics.ascent(glyph, size)?;
    let depth = ts.metrics.descent(glyph, size)?;
    Some(LayoutBox::glyph(glyph, size, width, height, depth))
}

/// Stacks assembly parts bottom-to-top, repeating extenders until the
/// total reaches `target`. The result sits entirely above its baseline;
/// callers recenter it.
fn assemble(
    ts: &mut Typesetter<'_>,
    base_glyph: &str,
    parts: &[crate::metrics::GlyphPart],
    target: f64,
    size: f64,
    opts: LayoutOptions,
) -> Option<LayoutBox> {
    if parts.is_empty() || parts.iter().all(|p| p.full_advance <= 0.0) {
        return None;
    }
    let overlap = ts.constant(MathConstant::MinConnectorOverlap, &opts);

    let total_for = |repeats: usize| -> (f64, usize) {
        let mut total = 0.0;
        let mut count = 0usize;
        for part in parts {
            let times = if part.is_extender { repeats } else { 1 };
            total += part.full_advance * times as f64;
            count += times;
        }
        let joints = count.saturating_sub(1);
        (total - overlap * joints as f64, count)
    };

    let mut repeats = 1;
    loop {
        let (total, _) = total_for(repeats);
        if total >= target || repeats >= MAX_EXTENDER_REPEATS {
            break;
        }
        repeats += 1;
    }
    let (total, count) = total_for(repeats);
    if total < target {
        return None;
    }

    let width = ts
        .metrics
        .advance_width(base_glyph, size)
        .unwrap_or(0.0);
    let mut children = Vec::with_capacity(count);
    let mut y = 0.0;
    for part in parts {
        let times = if part.is_extender { repeats } else { 1 };
        for _ in 0..times {
            children.push(BoxChild {
                offset: Point::new(0.0, y),
                node: LayoutBox::glyph(&part.glyph, size, width, part.full_advance, 0.0),
            });
            y += part.full_advance - overlap;
        }
    }
    let mut built = LayoutBox::container(children);
    built.width = width;
    Some(built)
}

/// Re-baselines a box so its vertical center sits on the math axis.
pub(super) fn centered_on_axis(node: LayoutBox, axis: f64) -> LayoutBox {
    let total = node.height + node.depth;
    let target_height = total / 2.0 + axis;
    let dy = target_height - node.height;
    let width = node.width;
    let mut built = LayoutBox::container(vec![BoxChild {
        offset: Point::new(0.0, dy),
        node,
    }]);
    built.width = width;
    built
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{FontMetrics, UniformMetrics};
    use crate::parser::parse;

    fn layout_str(input: &str) -> LayoutBox {
        let outcome = parse(input);
        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        super::super::layout(&outcome.list, &LayoutOptions::default(), &UniformMetrics).root
    }

    #[test]
    fn delimiters_grow_with_content() {
        let small = layout_str(r"\left( x \right)");
        let tall = layout_str(r"\left( \frac{a}{b} \right)");
        assert!(tall.height + tall.depth > small.height + small.depth);
    }

    #[test]
    fn delimiter_covers_most_of_the_extent() {
        let metrics = UniformMetrics;
        let opts = LayoutOptions::default();
        let outcome = parse(r"\left( \frac{\frac{a}{b}}{c} \right)");
        let inner = super::super::layout(&outcome.list, &opts, &metrics);
        assert!(inner.errors.is_empty());

        // The fraction box alone.
        let body = parse(r"\frac{\frac{a}{b}}{c}");
        let body_box = super::super::layout(&body.list, &opts, &metrics).root;
        let axis = metrics.constant(MathConstant::AxisHeight, opts.base_size);
        let half = (body_box.height - axis).max(body_box.depth + axis);
        let factor = metrics.constant(MathConstant::DelimiterFactor, opts.base_size);

        let root = inner.root;
        assert!(root.height + root.depth >= 2.0 * half * factor - 1e-9);
    }

    #[test]
    fn null_delimiter_adds_nothing() {
        let with = layout_str(r"\left. x \right)");
        let bare = layout_str("x");
        assert!(with.width > bare.width);
    }

    #[test]
    fn assembly_kicks_in_for_very_tall_content() {
        let metrics = UniformMetrics;
        let opts = LayoutOptions::default();
        // Deep nesting outgrows every discrete variant (max scale 4.2x).
        let outcome =
            parse(r"\left( \frac{\frac{\frac{a}{b}}{\frac{c}{d}}}{\frac{\frac{e}{f}}{\frac{g}{h}}} \right)");
        assert!(outcome.errors.is_empty());
        let result = super::super::layout(&outcome.list, &opts, &metrics);
        assert!(result.errors.is_empty());

        let mut parts = Vec::new();
        result.root.walk(&mut |_, node| {
            if let crate::boxes::BoxPayload::Glyph { text, .. } = &node.payload {
                if text.ends_with(".ext") {
                    parts.push(text.clone());
                }
            }
        });
        assert!(!parts.is_empty(), "expected assembled delimiter parts");
    }

    #[test]
    fn centering_splits_extent_around_axis() {
        let node = LayoutBox::glyph("(", 20.0, 10.0, 30.0, 0.0);
        let centered = centered_on_axis(node, 5.0);
        assert!((centered.height - 20.0).abs() < 1e-9);
        assert!((centered.depth - 10.0).abs() < 1e-9);
    }
}
