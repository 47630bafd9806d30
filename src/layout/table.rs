//! Matrix-family environments.
//!
//! Cells are laid out in text style, columns are sized by their widest
//! cell and aligned per the environment, rows share a baseline, and the
//! whole grid is centered on the math axis. Environments with brackets
//! (`pmatrix`, `cases`, ...) reuse the delimiter machinery around the
//! grid.

use crate::atom::{ColumnAlignment, Table};
use crate::boxes::{BoxChild, LayoutBox, Point};
use crate::commands::ENVIRONMENTS;
use crate::error::LayoutError;
use crate::metrics::MathConstant;
use crate::options::LayoutOptions;
use crate::style::StyleSize;

use super::{delimiter, Typesetter};

/// Gap between columns, in mu (one quad).
const INTER_COLUMN_GAP_MU: f64 = 18.0;
/// Gap between the boxes of consecutive rows, in mu.
const INTER_ROW_GAP_MU: f64 = 6.0;

pub(super) fn layout_table(
    ts: &mut Typesetter<'_>,
    table: &Table,
    opts: LayoutOptions,
) -> LayoutBox {
    // Cells never typeset in display style.
    let cell_opts = if opts.style.size == StyleSize::Display {
        opts.with_style(opts.style.with_size(StyleSize::Text))
    } else {
        opts
    };

    if table.rows.is_empty() {
        return LayoutBox::empty();
    }

    let columns = table.rows[0].len();
    for (i, row) in table.rows.iter().enumerate().skip(1) {
        if row.len() != columns {
            ts.errors.push(LayoutError::MalformedTableShape {
                row: i,
                expected: columns,
                found: row.len(),
            });
            break;
        }
    }

    // Lay out every cell; ragged rows are padded with empty boxes.
    let cells: Vec<Vec<LayoutBox>> = table
        .rows
        .iter()
        .map(|row| {
            (0..columns.max(row.len()))
                .map(|c| match row.get(c) {
                    Some(list) => ts.layout_list(list, cell_opts),
                    None => LayoutBox::empty(),
                })
                .collect()
        })
        .collect();
    let columns = cells.iter().map(Vec::len).max().unwrap_or(0);

    let mut col_widths = vec![0.0f64; columns];
    for row in &cells {
        for (c, cell) in row.iter().enumerate() {
            col_widths[c] = col_widths[c].max(cell.width);
        }
    }

    let mu = opts.mu(ts.metrics);
    let col_gap = INTER_COLUMN_GAP_MU * mu;
    let row_gap = INTER_ROW_GAP_MU * mu;

    let row_heights: Vec<f64> = cells
        .iter()
        .map(|row| row.iter().map(|c| c.height).fold(0.0, f64::max))
        .collect();
    let row_depths: Vec<f64> = cells
        .iter()
        .map(|row| row.iter().map(|c| c.depth).fold(0.0, f64::max))
        .collect();

    let total: f64 = row_heights
        .iter()
        .zip(&row_depths)
        .map(|(h, d)| h + d)
        .sum::<f64>()
        + row_gap * (cells.len().saturating_sub(1)) as f64;

    let mut children = Vec::new();
    // Stack rows top to bottom, then recenter on the axis below.
    let mut baseline = total;
    for ((row, height), depth) in cells.into_iter().zip(&row_heights).zip(&row_depths) {
        baseline -= height;
        let mut x = 0.0;
        for (c, cell) in row.into_iter().enumerate() {
            let slack = col_widths[c] - cell.width;
            let indent = match table.alignment {
                ColumnAlignment::Left => 0.0,
                ColumnAlignment::Center => slack / 2.0,
                ColumnAlignment::Right => slack,
            };
            children.push(BoxChild {
                offset: Point::new(x + indent, baseline),
                node: cell,
            });
            x += col_widths[c] + col_gap;
        }
        baseline -= depth + row_gap;
    }

    let grid = LayoutBox::container(children);
    let axis = ts.constant(MathConstant::AxisHeight, &opts);
    let grid = delimiter::centered_on_axis(grid, axis);

    let env = ENVIRONMENTS.get(table.environment.as_str());
    let (left, right) = match env {
        Some(env) => (env.left_delimiter, env.right_delimiter),
        None => (None, None),
    };
    delimiter::wrap_in_delimiters(ts, left, right, grid, opts)
}
