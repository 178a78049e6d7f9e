//! Inputs shared by every pass.

use ripple_arena::{Dispatch, ReadHandle};
use ripple_core::{AccessoryCell, FieldCell, HistoryCell, SolverConstants};

/// Immutable inputs of a pass: the coefficients and the dispatch mode.
#[derive(Clone, Copy, Debug)]
pub struct PassContext<'a> {
    /// Coefficients derived at construction.
    pub constants: &'a SolverConstants,
    /// Parallel or sequential execution.
    pub dispatch: Dispatch,
}

impl<'a> PassContext<'a> {
    /// Bundle coefficients and dispatch mode.
    pub fn new(constants: &'a SolverConstants, dispatch: Dispatch) -> Self {
        Self {
            constants,
            dispatch,
        }
    }
}

/// Read-only views of the current slot of every grid.
///
/// This is the whole neighbourhood an E-update kernel may look at.
#[derive(Clone, Copy, Debug)]
pub struct FieldViews<'a> {
    /// Primary field grid.
    pub field: ReadHandle<'a, FieldCell>,
    /// Accessory grid.
    pub accessory: ReadHandle<'a, AccessoryCell>,
    /// History grid, one step behind `field`.
    pub history: ReadHandle<'a, HistoryCell>,
}
