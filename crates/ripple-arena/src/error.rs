//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while allocating or binding grids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The allocator could not provide storage for a grid slot.
    AllocationFailed {
        /// Which grid was being allocated.
        grid: &'static str,
        /// Number of cells requested for one slot.
        requested_cells: usize,
    },
    /// Caller-supplied cells do not match the grid extent.
    ExtentMismatch {
        /// Cell count implied by the extent.
        expected: usize,
        /// Cell count supplied.
        found: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed {
                grid,
                requested_cells,
            } => write!(
                f,
                "failed to allocate {requested_cells} cells for grid '{grid}'"
            ),
            Self::ExtentMismatch { expected, found } => {
                write!(f, "extent mismatch: expected {expected} cells, found {found}")
            }
        }
    }
}

impl Error for ArenaError {}
