//! The auto-tiling placement and reflow engine.
//!
//! [`GridLayoutEngine`] owns an insertion-ordered sequence of [`Window`]s
//! inside a fixed [`GridDims`] capacity.  [`insert`](GridLayoutEngine::insert)
//! places each new window at the next free cell in row-major order;
//! [`reflow`](GridLayoutEngine::reflow) then recomputes every window's span
//! so the layout looks fully packed: the window occupying the last filled
//! slot stretches to the right edge, and every window sharing its row band
//! stretches to the bottom edge.
//!
//! The engine is synchronous and single-threaded.  A concurrent host must
//! wrap each engine instance in its own exclusive boundary (a mutex, an
//! actor, …); the engine has no internal locking.

use crate::grid::{DimensionError, GridDims, Window, WindowHandle};
use log::{debug, warn};

/// Possible errors from the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The requested grid capacity was invalid.
    #[error(transparent)]
    InvalidDimensions(#[from] DimensionError),

    /// Every row of the grid is occupied and the engine is configured to
    /// reject further insertions ([`OverflowPolicy::Reject`]).
    #[error("grid capacity of {rows}×{cols} cells exceeded")]
    CapacityExceeded {
        /// Row capacity of the full grid.
        rows: usize,
        /// Column capacity of the full grid.
        cols: usize,
    },
}

/// What [`insert`](GridLayoutEngine::insert) does once the grid is full.
///
/// The original tiler only *reported* overflow and kept appending windows
/// past the bottom edge, which is almost certainly a latent defect but is
/// the behavior hosts may depend on.  `Signal` reproduces it; `Reject`
/// turns the condition into a hard error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Log a warning and insert anyway, producing a window with
    /// `row >= rows`.  Source-faithful default.
    #[default]
    Signal,
    /// Refuse the insertion with [`LayoutError::CapacityExceeded`] and leave
    /// the engine untouched.
    Reject,
}

/// Deterministic grid placement and reflow.
///
/// # Typical usage
///
/// ```
/// use tilegrid::engine::GridLayoutEngine;
///
/// let mut engine = GridLayoutEngine::new(4, 4).unwrap();
/// let mut count = 0;
/// for _ in 0..5 {
///     count += 1;
///     engine.insert().unwrap();
///     engine.reflow(count);
/// }
/// // Window 4 sits alone in row 1 and stretches to fill the rest.
/// let last = engine.snapshot()[4];
/// assert_eq!((last.width, last.height), (4, 3));
/// ```
#[derive(Debug, Clone)]
pub struct GridLayoutEngine {
    /// Fixed grid capacity.
    dims: GridDims,
    /// Placed windows, in insertion order.  Never shrinks.
    windows: Vec<Window>,
    /// Row of the next cell to allocate (row-major cursor).
    next_row: usize,
    /// Column of the next cell to allocate.
    next_col: usize,
    /// Behavior once the cursor has moved past the last row.
    overflow: OverflowPolicy,
}

impl GridLayoutEngine {
    /// Create an empty engine for a `rows × cols` grid.
    ///
    /// Uses the source-faithful [`OverflowPolicy::Signal`]; see
    /// [`with_overflow_policy`](Self::with_overflow_policy).
    pub fn new(rows: usize, cols: usize) -> Result<Self, LayoutError> {
        let dims = GridDims::new(rows, cols)?;
        Ok(Self {
            dims,
            windows: Vec::new(),
            next_row: 0,
            next_col: 0,
            overflow: OverflowPolicy::Signal,
        })
    }

    /// Set the overflow policy (builder-style).
    pub fn with_overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow = policy;
        self
    }

    //  Accessors

    /// Grid capacity.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Current allocation cursor as `(row, col)` — the cell the next
    /// insertion will occupy.
    pub fn cursor(&self) -> (usize, usize) {
        (self.next_row, self.next_col)
    }

    /// Number of windows placed so far.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no window has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The window behind `handle`, if the handle came from this engine.
    pub fn get(&self, handle: WindowHandle) -> Option<&Window> {
        self.windows.get(handle.0)
    }

    /// All windows in insertion order, read-only.
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Ordered copy of the window states, for rendering.
    pub fn snapshot(&self) -> Vec<Window> {
        self.windows.clone()
    }

    /// Whether the allocation cursor has moved past the last row.
    ///
    /// Under [`OverflowPolicy::Signal`] the next [`insert`](Self::insert)
    /// will still succeed; hosts that need a hard limit check this first.
    pub fn at_capacity(&self) -> bool {
        self.next_row >= self.dims.rows()
    }

    //  Mutation

    /// Place the next window as a 1×1 tile and advance the cursor.
    ///
    /// The very first window always lands at `(row 0, col 0)`; every later
    /// one lands at the cursor.  Call [`reflow`](Self::reflow) afterwards to
    /// restore the packed look — insertion alone leaves the previous
    /// stretched spans stale.
    ///
    /// Returns a handle that stays valid for the engine's lifetime.  Fails
    /// only with [`LayoutError::CapacityExceeded`], and only under
    /// [`OverflowPolicy::Reject`].
    pub fn insert(&mut self) -> Result<WindowHandle, LayoutError> {
        if self.at_capacity() {
            match self.overflow {
                OverflowPolicy::Reject => {
                    return Err(LayoutError::CapacityExceeded {
                        rows: self.dims.rows(),
                        cols: self.dims.cols(),
                    });
                }
                OverflowPolicy::Signal => {
                    warn!(
                        "maximum window count for {} grid reached, inserting past the bottom edge",
                        self.dims
                    );
                }
            }
        }

        let window = if self.windows.is_empty() {
            Window::unit(0, 0)
        } else {
            Window::unit(self.next_col, self.next_row)
        };
        debug!("placing window {} at ({}, {})", self.windows.len(), window.row, window.col);
        self.windows.push(window);
        self.advance_cursor();

        Ok(WindowHandle(self.windows.len() - 1))
    }

    /// Recompute every window's span so the grid looks fully packed.
    ///
    /// `count` is the host-tracked 1-based insertion count.  It is
    /// authoritative: the reflow is computed against `count`, not against
    /// the stored window sequence, so a host that batches insertions can
    /// replay intermediate layouts.
    ///
    /// For each window, using its stored anchor cell: if its row band (its
    /// linear index floor-divided by the column capacity) equals the band of
    /// `count`, it stretches down to the bottom row; if additionally its
    /// linear index is exactly the last filled slot (`linear + 1 == count`),
    /// it also stretches right to the last column.  Every other span resets
    /// to 1, so calling reflow twice with the same `count` is a no-op.
    pub fn reflow(&mut self, count: usize) {
        let rows = self.dims.rows();
        let cols = self.dims.cols();
        let target_band = count / cols;

        for window in &mut self.windows {
            let linear = window.linear_index(cols);
            let row_filled = linear / cols == target_band;
            let col_filled = row_filled && linear + 1 == count;

            // Windows appended past the bottom edge under the Signal policy
            // have row >= rows; their stretch clamps to zero height.
            window.height = if row_filled {
                rows.saturating_sub(window.row)
            } else {
                1
            };
            window.width = if col_filled { cols - window.col } else { 1 };
        }
    }

    //  Internal

    /// Advance the row-major cursor by one cell, wrapping at the last
    /// column.  The row is allowed to run past the capacity; `insert`
    /// handles that boundary.
    fn advance_cursor(&mut self) {
        if self.next_col >= self.dims.cols() - 1 {
            self.next_col = 0;
            self.next_row += 1;
        } else {
            self.next_col += 1;
        }
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    /// Insert `n` windows and reflow after each one, like a host would.
    fn fill(engine: &mut GridLayoutEngine, n: usize) {
        for count in 1..=n {
            engine.insert().unwrap();
            engine.reflow(count);
        }
    }

    #[test]
    fn new_engine_is_empty_with_cursor_at_origin() {
        let engine = GridLayoutEngine::new(4, 4).unwrap();
        assert!(engine.is_empty());
        assert_eq!(engine.cursor(), (0, 0));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            GridLayoutEngine::new(0, 4),
            Err(LayoutError::InvalidDimensions(_))
        ));
        assert!(matches!(
            GridLayoutEngine::new(4, 0),
            Err(LayoutError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn first_insert_lands_at_origin() {
        let mut engine = GridLayoutEngine::new(4, 4).unwrap();
        let handle = engine.insert().unwrap();
        assert_eq!(handle.index(), 0);
        assert_eq!(engine.get(handle), Some(&Window::unit(0, 0)));
    }

    #[test]
    fn inserting_col_capacity_windows_fills_one_row() {
        // Holds for every column capacity >= 2.
        for cols in 2..=6 {
            let mut engine = GridLayoutEngine::new(4, cols).unwrap();
            for _ in 0..cols {
                engine.insert().unwrap();
            }
            for (i, w) in engine.windows().iter().enumerate() {
                assert_eq!((w.row, w.col), (0, i), "cols={}", cols);
            }
            // The cursor has wrapped to the second row.
            assert_eq!(engine.cursor(), (1, 0));
        }
    }

    #[test]
    fn single_window_fills_whole_grid_after_reflow() {
        let mut engine = GridLayoutEngine::new(4, 4).unwrap();
        fill(&mut engine, 1);
        assert_eq!(
            engine.snapshot(),
            vec![Window { col: 0, row: 0, width: 4, height: 4 }]
        );
    }

    #[test]
    fn five_windows_on_4x4_grid() {
        let mut engine = GridLayoutEngine::new(4, 4).unwrap();
        fill(&mut engine, 5);

        let windows = engine.snapshot();
        assert_eq!(windows.len(), 5);

        // Row 0 holds windows 0..=3 at 1×1: their band (0) no longer matches
        // the target band floor(5 / 4) = 1, so even window 3 at the row's end
        // resets to a unit tile.
        for (i, w) in windows[..4].iter().enumerate() {
            assert_eq!(*w, Window { col: i, row: 0, width: 1, height: 1 });
        }

        // Window 4 starts row 1 and stretches right and down.
        assert_eq!(windows[4], Window { col: 0, row: 1, width: 4, height: 3 });
    }

    #[test]
    fn exactly_one_window_stretches_wide() {
        let mut engine = GridLayoutEngine::new(4, 4).unwrap();
        for n in 1..=10 {
            engine.insert().unwrap();
            engine.reflow(n);
            let wide: Vec<usize> = engine
                .windows()
                .iter()
                .enumerate()
                .filter(|(_, w)| w.width > 1)
                .map(|(i, _)| i)
                .collect();
            // The sole stretched window is the most recently inserted one,
            // unless its slot ends a column (width 1 == stretch width).
            assert!(wide.len() <= 1, "n={}: {:?}", n, wide);
            if let Some(&i) = wide.first() {
                assert_eq!(i, n - 1, "n={}", n);
            }
        }
    }

    #[test]
    fn last_window_stretches_right_and_down() {
        let mut engine = GridLayoutEngine::new(3, 2).unwrap();
        fill(&mut engine, 3);
        let windows = engine.snapshot();
        // Window 2 at (row 1, col 0) is in the target band floor(3 / 2) = 1
        // and owns the last filled slot, so it stretches both ways.
        assert_eq!(windows[2], Window { col: 0, row: 1, width: 2, height: 2 });
        assert_eq!(windows[0], Window { col: 0, row: 0, width: 1, height: 1 });
        assert_eq!(windows[1], Window { col: 1, row: 0, width: 1, height: 1 });
    }

    #[test]
    fn whole_target_band_stretches_down() {
        let mut engine = GridLayoutEngine::new(4, 4).unwrap();
        fill(&mut engine, 6);
        let windows = engine.snapshot();
        // Windows 4 and 5 share band 1 (the target band for count 6): both
        // stretch to the bottom, but only window 5 owns the last slot and
        // widens.
        assert_eq!(windows[4], Window { col: 0, row: 1, width: 1, height: 3 });
        assert_eq!(windows[5], Window { col: 1, row: 1, width: 3, height: 3 });
        for w in &windows[..4] {
            assert_eq!((w.width, w.height), (1, 1));
        }
    }

    #[test]
    fn reflow_is_idempotent_for_fixed_count() {
        let mut engine = GridLayoutEngine::new(4, 4).unwrap();
        fill(&mut engine, 7);
        let first = engine.snapshot();
        engine.reflow(7);
        assert_eq!(engine.snapshot(), first);
    }

    #[test]
    fn reflow_count_is_authoritative() {
        // Reflowing with a stale count reproduces the earlier layout even
        // though more windows exist.
        let mut engine = GridLayoutEngine::new(4, 4).unwrap();
        for _ in 0..5 {
            engine.insert().unwrap();
        }
        engine.reflow(4);
        // Count 4 has band 1, so row 0 (band 0) is all unit tiles and the
        // row-1 window stretches down but not wide (its slot is 4, not 3).
        let windows = engine.snapshot();
        for w in &windows[..4] {
            assert_eq!((w.width, w.height), (1, 1));
        }
        assert_eq!((windows[4].width, windows[4].height), (1, 3));
    }

    #[test]
    fn cursor_wraps_row_major() {
        let mut engine = GridLayoutEngine::new(4, 3).unwrap();
        let expected = [(0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0)];
        for pos in expected {
            engine.insert().unwrap();
            assert_eq!(engine.cursor(), pos);
        }
    }

    //  Overflow behavior
    //
    // The two policies deliberately diverge here: Signal reproduces the
    // original's report-and-proceed behavior, Reject is the hardened
    // alternative.  Both are pinned down so a change to either is loud.

    #[test]
    fn signal_policy_inserts_past_capacity() {
        let mut engine = GridLayoutEngine::new(1, 1).unwrap();
        engine.insert().unwrap();
        assert!(engine.at_capacity());

        // Second insert overflows but still succeeds.
        let handle = engine.insert().unwrap();
        let w = engine.get(handle).unwrap();
        assert_eq!((w.row, w.col), (1, 0));
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn signal_policy_clamps_overflowed_stretch() {
        let mut engine = GridLayoutEngine::new(1, 2).unwrap();
        for _ in 0..3 {
            engine.insert().unwrap();
        }
        engine.reflow(3);
        // Window 2 sits at (row 1, col 0), linear 2, which is the target
        // band floor(3 / 2) = 1 and the last filled slot, but the whole row
        // is below the grid: the downward stretch clamps to zero height.
        let w = engine.windows()[2];
        assert_eq!((w.row, w.col), (1, 0));
        assert_eq!(w.width, 2);
        assert_eq!(w.height, 0);
    }

    #[test]
    fn reject_policy_refuses_insert_at_capacity() {
        let mut engine =
            GridLayoutEngine::new(1, 1).unwrap().with_overflow_policy(OverflowPolicy::Reject);
        engine.insert().unwrap();

        let err = engine.insert().unwrap_err();
        assert_eq!(err, LayoutError::CapacityExceeded { rows: 1, cols: 1 });
        // State is untouched: same window count, same cursor.
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.cursor(), (1, 0));
    }

    #[test]
    fn reject_policy_allows_exactly_capacity_windows() {
        let mut engine =
            GridLayoutEngine::new(2, 2).unwrap().with_overflow_policy(OverflowPolicy::Reject);
        for _ in 0..4 {
            engine.insert().unwrap();
        }
        assert!(engine.insert().is_err());
        assert_eq!(engine.len(), 4);
    }

    #[test]
    fn full_grid_reflow_resets_all_spans() {
        let mut engine = GridLayoutEngine::new(2, 2).unwrap();
        fill(&mut engine, 4);
        let windows = engine.snapshot();
        // Count 4 has band 2, which no window occupies: everything resets
        // to unit tiles.  The grid is exactly full, so that is the packed
        // layout.
        for w in &windows {
            assert_eq!((w.width, w.height), (1, 1));
        }
    }

    #[test]
    fn handles_stay_valid_across_reflows() {
        let mut engine = GridLayoutEngine::new(4, 4).unwrap();
        let first = engine.insert().unwrap();
        for count in 2..=5 {
            engine.insert().unwrap();
            engine.reflow(count);
        }
        let w = engine.get(first).unwrap();
        assert_eq!((w.row, w.col), (0, 0), "anchor cell never moves");
    }
}
