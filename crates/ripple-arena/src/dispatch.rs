//! How a pass walks the grid.

/// Execution strategy for a per-cell pass.
///
/// Both strategies evaluate the same pure kernel for every cell and
/// produce bit-identical results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dispatch {
    /// Rows are distributed over the rayon thread pool.
    #[default]
    Parallel,
    /// Rows are visited in order on the calling thread.
    Sequential,
}

impl Dispatch {
    /// `Parallel` when `parallel` is true, `Sequential` otherwise.
    pub fn from_flag(parallel: bool) -> Self {
        if parallel {
            Self::Parallel
        } else {
            Self::Sequential
        }
    }
}
