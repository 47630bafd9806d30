//! Inter-atom spacing.
//!
//! Spacing between two neighboring atoms is a pure function of their
//! classes and the current style: TeX's 8x8 table of none/thin/medium/
//! thick, where medium and thick (and some thins) are suppressed in
//! script styles.

use crate::atom::AtomClass;
use crate::style::Style;

/// One entry of the spacing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Space {
    /// No space.
    None,
    /// Thin space (3 mu) in every style.
    Thin,
    /// Thin space, suppressed in script styles.
    NsThin,
    /// Medium space (4 mu), suppressed in script styles.
    NsMedium,
    /// Thick space (5 mu), suppressed in script styles.
    NsThick,
    /// Pair that cannot occur after bin demotion; treated as no space.
    Invalid,
}

use Space::{Invalid as X, NsMedium as M, NsThick as K, NsThin as S, None as N, Thin as T};

/// Rows are the left atom's class, columns the right atom's class, both in
/// [`AtomClass`] declaration order: ord, op, bin, rel, open, close, punct,
/// inner.
#[rustfmt::skip]
const SPACING: [[Space; 8]; 8] = [
    /* ord   */ [N, T, M, K, N, N, N, S],
    /* op    */ [T, T, X, K, N, N, N, S],
    /* bin   */ [M, M, X, X, M, X, X, M],
    /* rel   */ [K, K, X, N, K, N, N, K],
    /* open  */ [N, N, X, N, N, N, N, N],
    /* close */ [N, T, M, K, N, N, N, S],
    /* punct */ [S, S, X, S, S, S, S, S],
    /* inner */ [S, T, M, K, S, N, S, S],
];

/// Width in points of the space between a `left` and a `right` atom in
/// `style`, given the current math unit.
pub(super) fn inter_atom_space(
    left: AtomClass,
    right: AtomClass,
    style: Style,
    mu_unit: f64,
) -> f64 {
    let entry = SPACING[left.index()][right.index()];
    let mus = match entry {
        Space::None | Space::Invalid => 0.0,
        Space::Thin => 3.0,
        Space::NsThin => {
            if style.is_tight() {
                0.0
            } else {
                3.0
            }
        }
        Space::NsMedium => {
            if style.is_tight() {
                0.0
            } else {
                4.0
            }
        }
        Space::NsThick => {
            if style.is_tight() {
                0.0
            } else {
                5.0
            }
        }
    };
    mus * mu_unit
}
