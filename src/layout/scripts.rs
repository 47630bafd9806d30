//! Superscript and subscript placement.
//!
//! Follows the TeX shift rules: candidate shifts come from the nucleus
//! extents and the style's shift constants, scripts are pushed apart when
//! they would collide, and a small kern is added after the script column.

use crate::atom::{Atom, AtomBody};
use crate::boxes::{BoxChild, LayoutBox, Point};
use crate::metrics::MathConstant;
use crate::options::LayoutOptions;

use super::Typesetter;

/// Lays out `atom`'s scripts against an already laid-out `nucleus`.
/// `italic` is the nucleus glyph's italic correction; the superscript
/// column is nudged right by it.
pub(super) fn attach_scripts(
    ts: &mut Typesetter<'_>,
    atom: &Atom,
    nucleus: LayoutBox,
    italic: f64,
    opts: LayoutOptions,
) -> LayoutBox {
    let sup = atom
        .superscript
        .as_ref()
        .map(|list| ts.layout_list(list, opts.sup()));
    let sub = atom
        .subscript
        .as_ref()
        .map(|list| ts.layout_list(list, opts.sub()));
    if sup.is_none() && sub.is_none() {
        return nucleus;
    }

    // A lone character hangs its scripts straight off the baseline; a
    // compound nucleus drops them relative to its own extents.
    let is_char = matches!(&atom.body, AtomBody::Symbol { .. });
    let (u, v) = if is_char {
        (0.0, 0.0)
    } else {
        (
            nucleus.height - ts.constant(MathConstant::SuperscriptBaselineDropMax, &opts),
            nucleus.depth + ts.constant(MathConstant::SubscriptBaselineDropMin, &opts),
        )
    };

    let mut sup_shift = 0.0;
    if let Some(sup) = &sup {
        let base = if opts.style.cramped {
            ts.constant(MathConstant::SuperscriptShiftUpCramped, &opts)
        } else {
            ts.constant(MathConstant::SuperscriptShiftUp, &opts)
        };
        let bottom_min = ts.constant(MathConstant::SuperscriptBottomMin, &opts);
        sup_shift = u.max(base).max(sup.depth + bottom_min);
    }

    let mut sub_shift = 0.0;
    if let Some(sub) = &sub {
        let base = ts.constant(MathConstant::SubscriptShiftDown, &opts);
        sub_shift = v.max(base);
        if sup.is_none() {
            // Without a superscript the subscript may ride higher, but its
            // top must stay below the cap.
            let top_max = ts.constant(MathConstant::SubscriptTopMax, &opts);
            sub_shift = sub_shift.max(sub.height - top_max);
        }
    }

    if let (Some(sup_box), Some(sub_box)) = (&sup, &sub) {
        let gap_min = ts.constant(MathConstant::SubSuperscriptGapMin, &opts);
        let gap = (sup_shift - sup_box.depth) - (sub_box.height - sub_shift);
        if gap < gap_min {
            sub_shift += gap_min - gap;
            // If pushing apart buried the superscript, lift both scripts
            // back up together.
            let bottom_cap =
                ts.constant(MathConstant::SuperscriptBottomMaxWithSubscript, &opts);
            let lift = bottom_cap - (sup_shift - sup_box.depth);
            if lift > 0.0 {
                sup_shift += lift;
                sub_shift -= lift;
            }
        }
    }

    let nucleus_width = nucleus.width;
    let mut children = vec![BoxChild {
        offset: Point::zero(),
        node: nucleus,
    }];
    if let Some(sup) = sup {
        children.push(BoxChild {
            offset: Point::new(nucleus_width + italic, sup_shift),
            node: sup,
        });
    }
    if let Some(sub) = sub {
        children.push(BoxChild {
            offset: Point::new(nucleus_width, -sub_shift),
            node: sub,
        });
    }
    let mut built = LayoutBox::container(children);
    built.width += ts.constant(MathConstant::SpaceAfterScript, &opts);
    built
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{FontMetrics, UniformMetrics};
    use crate::parser::parse;

    fn layout_str(input: &str) -> LayoutBox {
        let outcome = parse(input);
        assert!(outcome.errors.is_empty());
        super::super::layout(&outcome.list, &LayoutOptions::default(), &UniformMetrics).root
    }

    #[test]
    fn superscript_raises_height() {
        let plain = layout_str("x");
        let scripted = layout_str("x^2");
        assert!(scripted.height > plain.height);
        assert!(scripted.width > plain.width);
    }

    #[test]
    fn subscript_deepens_depth() {
        let plain = layout_str("x");
        let scripted = layout_str("x_i");
        assert!(scripted.depth > plain.depth);
    }

    #[test]
    fn scripts_keep_their_minimum_gap() {
        let root = layout_str("x^2_i");
        // Find the superscript and subscript glyph boxes by absolute
        // offset: the superscript sits above the baseline, the subscript
        // below.
        let mut sup_bottom = f64::INFINITY;
        let mut sub_top = f64::NEG_INFINITY;
        root.walk(&mut |origin, node| {
            if let crate::boxes::BoxPayload::Glyph { text, .. } = &node.payload {
                if text == "2" {
                    sup_bottom = origin.y - node.depth;
                }
                if text == "i" {
                    sub_top = origin.y + node.height;
                }
            }
        });
        let metrics = UniformMetrics;
        let opts = LayoutOptions::default();
        let gap_min = metrics.constant(
            MathConstant::SubSuperscriptGapMin,
            opts.base_size,
        );
        assert!(sup_bottom.is_finite() && sub_top.is_finite());
        assert!(sup_bottom - sub_top >= gap_min - 1e-9);
    }

    #[test]
    fn script_glyphs_are_smaller() {
        let root = layout_str("x^2");
        let mut base_size = 0.0;
        let mut sup_size = 0.0;
        root.walk(&mut |_, node| {
            if let crate::boxes::BoxPayload::Glyph { text, size } = &node.payload {
                if text == "x" {
                    base_size = *size;
                }
                if text == "2" {
                    sup_size = *size;
                }
            }
        });
        assert!(sup_size > 0.0 && sup_size < base_size);
    }
}
