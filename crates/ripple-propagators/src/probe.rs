//! Finiteness check over the field grid.

use rayon::prelude::*;
use ripple_arena::{BufferPair, Dispatch};
use ripple_core::FieldCell;

/// Index of the first cell whose `ez`, `hx` or `hy` is NaN or infinite.
///
/// Read-only: the caller decides how to report the instability.
pub fn first_non_finite(field: &BufferPair<FieldCell>, dispatch: Dispatch) -> Option<usize> {
    let bad = |c: &FieldCell| !(c.ez.is_finite() && c.hx.is_finite() && c.hy.is_finite());
    let view = field.read();
    let cells = view.cells();
    match dispatch {
        Dispatch::Parallel => cells.par_iter().position_first(bad),
        Dispatch::Sequential => cells.iter().position(bad),
    }
}
