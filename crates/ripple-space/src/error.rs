//! Error types for grid construction and spatial queries.

use std::fmt;

/// Errors arising from extent construction or spatial queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a grid with zero cells on some axis.
    EmptyExtent {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A cell coordinate is outside the grid.
    CellOutOfBounds {
        /// Column.
        x: u32,
        /// Row.
        y: u32,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// A rectangle is inverted or extends past the grid.
    InvalidRect {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyExtent { width, height } => {
                write!(f, "grid must have at least one cell, got {width}x{height}")
            }
            Self::CellOutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(f, "cell ({x}, {y}) outside {width}x{height} grid"),
            Self::InvalidRect { reason } => write!(f, "invalid rectangle: {reason}"),
        }
    }
}

impl std::error::Error for SpaceError {}
