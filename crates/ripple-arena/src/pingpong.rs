//! Double-buffered grid with ping-pong swap.
//!
//! [`BufferPair`] holds two equally sized slots. One is current (read by
//! kernels), the other is the staging target of the next pass. A pass
//! writes every staging cell from a pure kernel and then swaps, so the
//! staging slot becomes current. The previously current slot is reused as
//! the next staging target without being cleared.

use rayon::prelude::*;
use ripple_core::CellLayout;
use ripple_space::GridExtent;

use crate::dispatch::Dispatch;
use crate::error::ArenaError;
use crate::read::ReadHandle;

/// Identity of one of the two physical slots of a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The first allocated slot.
    A,
    /// The second allocated slot.
    B,
}

/// Two same-shaped cell buffers with a one-bit current/staging selector.
///
/// # Buffer layout
///
/// ```text
/// slot_a: Vec<C>  ←─── current (even generations) / staging (odd)
/// slot_b: Vec<C>  ←─── staging (even generations) / current (odd)
/// ```
///
/// # Examples
///
/// ```
/// use ripple_arena::{BufferPair, Dispatch};
/// use ripple_core::HistoryCell;
/// use ripple_space::GridExtent;
///
/// let extent = GridExtent::new(8, 8).unwrap();
/// let mut pair = BufferPair::<HistoryCell>::new("history", extent).unwrap();
/// pair.pass(Dispatch::Sequential, |view, x, y| {
///     let mut c = view.at(x, y);
///     c.ez = (x + y) as f32;
///     c
/// });
/// assert_eq!(pair.read().at(3, 4).ez, 7.0);
/// assert_eq!(pair.generation(), 1);
/// ```
pub struct BufferPair<C: CellLayout> {
    label: &'static str,
    extent: GridExtent,
    slot_a: Vec<C>,
    slot_b: Vec<C>,
    /// Which slot is current (false = A current, true = B current).
    b_is_current: bool,
    /// Number of swaps since allocation.
    generation: u64,
}

impl<C: CellLayout> BufferPair<C> {
    /// Allocate both slots filled with `C::default()`.
    ///
    /// Returns [`ArenaError::AllocationFailed`] when the allocator cannot
    /// reserve a slot.
    pub fn new(label: &'static str, extent: GridExtent) -> Result<Self, ArenaError> {
        let n = extent.cell_count();
        let slot_a = allocate_slot::<C>(label, n)?;
        let slot_b = allocate_slot::<C>(label, n)?;
        log::trace!(
            "allocated pair '{label}': 2 x {n} cells x {} channels",
            C::CHANNELS
        );
        Ok(Self {
            label,
            extent,
            slot_a,
            slot_b,
            b_is_current: false,
            generation: 0,
        })
    }

    /// Build a pair whose current slot holds `cells`.
    ///
    /// The staging slot is filled with `C::default()`.
    pub fn from_cells(
        label: &'static str,
        extent: GridExtent,
        cells: Vec<C>,
    ) -> Result<Self, ArenaError> {
        let n = extent.cell_count();
        if cells.len() != n {
            return Err(ArenaError::ExtentMismatch {
                expected: n,
                found: cells.len(),
            });
        }
        let slot_b = allocate_slot::<C>(label, n)?;
        Ok(Self {
            label,
            extent,
            slot_a: cells,
            slot_b,
            b_is_current: false,
            generation: 0,
        })
    }

    /// Name used in diagnostics.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Extent shared by both slots.
    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    /// Number of swaps since allocation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Which physical slot is current.
    pub fn current_slot(&self) -> Slot {
        if self.b_is_current {
            Slot::B
        } else {
            Slot::A
        }
    }

    /// Bytes held by both slots.
    pub fn memory_bytes(&self) -> usize {
        (self.slot_a.capacity() + self.slot_b.capacity()) * std::mem::size_of::<C>()
    }

    /// Bind a read-only view of the current slot.
    pub fn read(&self) -> ReadHandle<'_, C> {
        ReadHandle::new(self.current(), self.extent, self.generation)
    }

    /// Exchange the current and staging roles. No cell data moves.
    pub fn swap(&mut self) {
        self.b_is_current = !self.b_is_current;
        self.generation += 1;
    }

    /// Evaluate `kernel` for every cell into the staging slot, then swap.
    ///
    /// The kernel sees only the current slot; it cannot observe the slot it
    /// is writing. Rows are distributed across the rayon pool for
    /// [`Dispatch::Parallel`].
    pub fn pass<F>(&mut self, dispatch: Dispatch, kernel: F)
    where
        F: Fn(&ReadHandle<'_, C>, u32, u32) -> C + Sync,
    {
        self.stage(dispatch, kernel);
        self.swap();
    }

    /// Evaluate `kernel` into the staging slot without swapping.
    ///
    /// Readers keep seeing the current slot until [`BufferPair::swap`] is
    /// called. `stage` followed by `swap` is exactly [`BufferPair::pass`].
    pub fn stage<F>(&mut self, dispatch: Dispatch, kernel: F)
    where
        F: Fn(&ReadHandle<'_, C>, u32, u32) -> C + Sync,
    {
        let extent = self.extent;
        let width = extent.width() as usize;
        let generation = self.generation;
        let (current, staging) = self.split();
        let view = ReadHandle::new(current, extent, generation);

        let write_row = |y: usize, row: &mut [C]| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = kernel(&view, x as u32, y as u32);
            }
        };
        match dispatch {
            Dispatch::Parallel => staging
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| write_row(y, row)),
            Dispatch::Sequential => staging
                .chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| write_row(y, row)),
        }
    }

    fn current(&self) -> &[C] {
        if self.b_is_current {
            self.slot_b.as_slice()
        } else {
            self.slot_a.as_slice()
        }
    }

    /// (current, staging) as disjoint borrows.
    fn split(&mut self) -> (&[C], &mut [C]) {
        if self.b_is_current {
            (self.slot_b.as_slice(), self.slot_a.as_mut_slice())
        } else {
            (self.slot_a.as_slice(), self.slot_b.as_mut_slice())
        }
    }
}

fn allocate_slot<C: CellLayout>(grid: &'static str, n: usize) -> Result<Vec<C>, ArenaError> {
    let mut v: Vec<C> = Vec::new();
    v.try_reserve_exact(n)
        .map_err(|_| ArenaError::AllocationFailed {
            grid,
            requested_cells: n,
        })?;
    v.resize(n, C::default());
    Ok(v)
}

impl<C: CellLayout> std::fmt::Debug for BufferPair<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPair")
            .field("label", &self.label)
            .field("extent", &self.extent)
            .field("current", &self.current_slot())
            .field("generation", &self.generation)
            .finish()
    }
}
