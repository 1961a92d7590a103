//! Grid geometry types.
//!
//! [`GridDims`] is the fixed capacity of the layout grid — how many rows and
//! columns the auto-tiler may use.  Unlike a dynamic workspace grid, the
//! capacity is immutable for the lifetime of an engine: the tiler packs
//! windows *into* it rather than growing it.
//!
//! [`Window`] is one placed tile: the cell its top-left corner occupies plus
//! its span in cells.  Windows are created 1×1 by the engine and only ever
//! resized by the reflow pass; their anchor cell never moves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error from constructing [`GridDims`] with a zero capacity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid grid dimensions {rows}×{cols}: both capacities must be at least 1")]
pub struct DimensionError {
    /// Requested row capacity.
    pub rows: usize,
    /// Requested column capacity.
    pub cols: usize,
}

/// Fixed grid capacity: the maximum number of rows and columns the layout
/// may use.
///
/// Both capacities are guaranteed `>= 1` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    rows: usize,
    cols: usize,
}

impl GridDims {
    /// Create a capacity pair, rejecting zero rows or columns.
    pub fn new(rows: usize, cols: usize) -> Result<Self, DimensionError> {
        if rows < 1 || cols < 1 {
            return Err(DimensionError { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Row capacity.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column capacity.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.rows, self.cols)
    }
}

/// One placed tile.
///
/// `col`/`row` are the zero-based cell of the top-left corner and are fixed
/// at insertion time; `width`/`height` are the span in cells and are
/// recomputed by every reflow pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Column of the top-left corner (0-indexed).
    pub col: usize,
    /// Row of the top-left corner (0-indexed).
    pub row: usize,
    /// Horizontal span in cells.
    pub width: usize,
    /// Vertical span in cells.
    pub height: usize,
}

impl Window {
    /// A 1×1 window anchored at `(col, row)`.
    pub fn unit(col: usize, row: usize) -> Self {
        Self {
            col,
            row,
            width: 1,
            height: 1,
        }
    }

    /// Row-major flattened position of the anchor cell.
    pub fn linear_index(&self, cols: usize) -> usize {
        self.row * cols + self.col
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "col:{}, row:{}, width:{}, height:{}",
            self.col, self.row, self.width, self.height
        )
    }
}

/// Stable handle to a window inside an engine.
///
/// Handles are plain indices into the engine's insertion-ordered window
/// sequence.  Because the core never removes windows, a handle stays valid
/// for the engine's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle(pub(crate) usize);

impl WindowHandle {
    /// Position of the window in insertion order.
    pub fn index(&self) -> usize {
        self.0
    }
}

//  Tests
