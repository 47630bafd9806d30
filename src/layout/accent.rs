//! Accents, overlines, and underlines.

use crate::atom::{Accent, AtomBody, MathList};
use crate::boxes::{BoxChild, LayoutBox, Point};
use crate::metrics::MathConstant;
use crate::options::LayoutOptions;

use super::Typesetter;

/// The glyph text of a bare single-character nucleus, if the list is one.
/// Accent skew only applies to such nuclei; anything compound is centered
/// on its width.
fn single_glyph(list: &MathList) -> Option<&str> {
    match list.atoms.as_slice() {
        [atom] if !atom.has_scripts() => match &atom.body {
            AtomBody::Symbol { text, .. } if text.chars().count() == 1 => Some(text),
            AtomBody::Group(inner) => single_glyph(inner),
            _ => None,
        },
        _ => None,
    }
}

pub(super) fn layout_accent(
    ts: &mut Typesetter<'_>,
    accent: &Accent,
    opts: LayoutOptions,
) -> LayoutBox {
    let inner = ts.layout_list(&accent.inner, opts.cramp());
    let glyph = ts.glyph(&accent.accent, &opts);

    // The accent is designed to sit on a base of x-height; a taller base
    // raises it by the difference.
    let base_height = ts.constant(MathConstant::AccentBaseHeight, &opts);
    let glyph_y = inner.height - inner.height.min(base_height);

    // Center the accent over the base's attachment point. A single-glyph
    // base may carry a font-defined attachment position or an italic
    // correction skewing its optical center; compound bases center on
    // their width.
    let size = opts.font_size(ts.metrics);
    let attachment = match single_glyph(&accent.inner) {
        Some(base) => ts
            .metrics
            .top_accent_attachment(base, size)
            .unwrap_or_else(|| {
                inner.width / 2.0 + ts.metrics.italic_correction(base, size) / 2.0
            }),
        None => inner.width / 2.0,
    };
    let glyph_x = attachment - glyph.width / 2.0;

    let inner_width = inner.width;
    let mut built = LayoutBox::container(vec![
        BoxChild {
            offset: Point::zero(),
            node: inner,
        },
        BoxChild {
            offset: Point::new(glyph_x, glyph_y),
            node: glyph,
        },
    ]);
    built.width = inner_width;
    built
}

pub(super) fn layout_overline(
    ts: &mut Typesetter<'_>,
    inner: &crate::atom::MathList,
    opts: LayoutOptions,
) -> LayoutBox {
    let body = ts.layout_list(inner, opts.cramp());
    let gap = ts.constant(MathConstant::OverbarVerticalGap, &opts);
    let thickness = ts.constant(MathConstant::OverbarRuleThickness, &opts);
    let extra = ts.constant(MathConstant::OverbarExtraAscender, &opts);

    let rule_y = body.height + gap;
    let width = body.width;
    let mut built = LayoutBox::container(vec![
        BoxChild {
            offset: Point::zero(),
            node: body,
        },
        BoxChild {
            offset: Point::new(0.0, rule_y),
            node: LayoutBox::rule(width, thickness, 0.0),
        },
    ]);
    built.height += extra;
    built
}

pub(super) fn layout_underline(
    ts: &mut Typesetter<'_>,
    inner: &crate::atom::MathList,
    opts: LayoutOptions,
) -> LayoutBox {
    let body = ts.layout_list(inner, opts);
    let gap = ts.constant(MathConstant::UnderbarVerticalGap, &opts);
    let thickness = ts.constant(MathConstant::UnderbarRuleThickness, &opts);
    let extra = ts.constant(MathConstant::UnderbarExtraDescender, &opts);

    let rule_y = -(body.depth + gap + thickness);
    let width = body.width;
    let mut built = LayoutBox::container(vec![
        BoxChild {
            offset: Point::zero(),
            node: body,
        },
        BoxChild {
            offset: Point::new(0.0, rule_y),
            node: LayoutBox::rule(width, thickness, 0.0),
        },
    ]);
    built.depth += extra;
    built
}
