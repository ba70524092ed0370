// column_layout.rs — Multi-column grid fitting and placement
//
// Greedy width search over the candidate column count. Candidates that
// cannot reduce the row count are skipped by jumping straight to the
// first N that would, so wide terminals do not degrade into a linear
// scan over every column count.

use log::debug;

/// Placement decision for one level's visible entries.
///
/// `columns == 1` means the grid failed to beat single-column output and
/// the caller renders one entry per line instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub columns:    usize,
    pub rows:       usize,
    pub col_widths: Vec<usize>,
    horizontal:     bool,
    count:          usize,
}

impl LayoutPlan {
    /// Trivial one-column plan for count entries.
    pub fn single_column(count: usize) -> Self {
        LayoutPlan {
            columns: 1,
            rows: count,
            col_widths: Vec::new(),
            horizontal: false,
            count,
        }
    }

    pub fn is_grid(&self) -> bool {
        self.columns > 1
    }

    /// Index (into the sorted visible sequence) of the entry at a grid
    /// coordinate, or None for the empty tail cells of the last column/row.
    ///
    /// Walking rows 0..R with columns 0..N yields the row-major output
    /// order regardless of the assignment policy used to fill the grid.
    pub fn index_at(&self, row: usize, col: usize) -> Option<usize> {
        debug_assert!(row < self.rows && col < self.columns);
        let idx = if self.horizontal {
            row * self.columns + col
        } else {
            col * self.rows + row
        };
        (idx < self.count).then_some(idx)
    }

    pub fn width_of(&self, col: usize) -> usize {
        self.col_widths[col]
    }
}

/// Find the largest column count whose packed width fits `output_width`,
/// then place every entry.
///
/// `name_widths` are the display widths of the visible entries in sorted
/// order; `overhead` is the fixed per-column cost (spacing plus inode and
/// block fields when active). Column-major assignment (`col = i / R`) by
/// default, row-major (`col = i % N`) when `horizontal` is set.
pub fn layout(name_widths: &[usize], overhead: usize, output_width: usize, horizontal: bool) -> LayoutPlan {
    let count = name_widths.len();
    if count < 2 {
        return LayoutPlan::single_column(count);
    }

    let mut best = 1;
    let mut n = 2;

    while n <= count {
        let rows = count.div_ceil(n);
        let widths = column_widths(name_widths, n, rows, horizontal);
        let packed: usize = widths.iter().sum::<usize>() + overhead * n;
        if packed > output_width {
            break;
        }
        best = n;

        if horizontal || n < rows {
            n += 1;
        } else if rows > 1 {
            // Any candidate between here and this jump keeps the same row
            // count and cannot fit if a narrower layout already stopped;
            // go straight to the first N that drops a row.
            n = count.div_ceil(rows - 1);
        } else {
            break;
        }
    }

    if best == 1 {
        return LayoutPlan::single_column(count);
    }

    let rows = count.div_ceil(best);
    let col_widths = column_widths(name_widths, best, rows, horizontal);
    debug!("layout: {} entries -> {} columns x {} rows", count, best, rows);

    LayoutPlan { columns: best, rows, col_widths, horizontal, count }
}

/// Per-column maximum name width for a candidate column count.
fn column_widths(name_widths: &[usize], columns: usize, rows: usize, horizontal: bool) -> Vec<usize> {
    let mut widths = vec![0usize; columns];
    for (i, &w) in name_widths.iter().enumerate() {
        let col = if horizontal { i % columns } else { i / rows };
        if widths[col] < w {
            widths[col] = w;
        }
    }
    widths
}
