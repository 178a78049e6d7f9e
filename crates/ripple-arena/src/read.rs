//! Read-only view of the current slot of a buffer pair.

use ripple_core::CellLayout;
use ripple_space::GridExtent;

/// Borrowed, read-only view of a grid's current slot.
///
/// Created by [`BufferPair::read`](crate::BufferPair::read). The handle
/// borrows the pair, so it cannot outlive the next swap.
#[derive(Clone, Copy, Debug)]
pub struct ReadHandle<'a, C: CellLayout> {
    cells: &'a [C],
    extent: GridExtent,
    generation: u64,
}

impl<'a, C: CellLayout> ReadHandle<'a, C> {
    pub(crate) fn new(cells: &'a [C], extent: GridExtent, generation: u64) -> Self {
        Self {
            cells,
            extent,
            generation,
        }
    }

    /// Extent of the underlying grid.
    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    /// Swap count of the pair when this handle was bound.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &'a [C] {
        self.cells
    }

    /// Cell at `(x, y)`. The caller guarantees the cell is inside the grid.
    #[inline]
    pub fn at(&self, x: u32, y: u32) -> C {
        self.cells[self.extent.index(x, y)]
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<C> {
        if self.extent.contains(x, y) {
            Some(self.at(x, y))
        } else {
            None
        }
    }

    /// Cell at `(x + dx, y + dy)`, or `None` outside the grid.
    #[inline]
    pub fn offset(&self, x: u32, y: u32, dx: i32, dy: i32) -> Option<C> {
        let nx = x as i64 + dx as i64;
        let ny = y as i64 + dy as i64;
        if nx < 0 || ny < 0 {
            return None;
        }
        self.get(u32::try_from(nx).ok()?, u32::try_from(ny).ok()?)
    }

    /// Cell at `(x + dx, y + dy)`, or `C::default()` outside the grid.
    #[inline]
    pub fn offset_or_default(&self, x: u32, y: u32, dx: i32, dy: i32) -> C {
        self.offset(x, y, dx, dy).unwrap_or_default()
    }
}
