//! Owner of every grid the solver touches.

use ripple_core::{AccessoryCell, CellLayout, FieldCell, HistoryCell};
use ripple_space::GridExtent;

use crate::error::ArenaError;
use crate::pingpong::BufferPair;

/// Mutable borrows of all three grids at once.
///
/// Lets a pass write one grid while reading the others.
pub struct GridsMut<'a> {
    /// Primary field grid.
    pub field: &'a mut BufferPair<FieldCell>,
    /// Accessory grid: source map and permittivity.
    pub accessory: &'a mut BufferPair<AccessoryCell>,
    /// One-step-delayed history grid.
    pub history: &'a mut BufferPair<HistoryCell>,
}

/// Exclusive owner of the field, accessory and history buffer pairs.
///
/// All three pairs share one extent. Allocation happens once, in
/// [`GridBufferStore::new`]; failure is reported before any stepping.
#[derive(Debug)]
pub struct GridBufferStore {
    extent: GridExtent,
    field: BufferPair<FieldCell>,
    accessory: BufferPair<AccessoryCell>,
    history: BufferPair<HistoryCell>,
}

impl GridBufferStore {
    /// Allocate all grids for `extent`, initialized to zero fields and vacuum.
    pub fn new(extent: GridExtent) -> Result<Self, ArenaError> {
        let field = BufferPair::new("field", extent)?;
        let accessory = BufferPair::new("accessory", extent)?;
        let history = BufferPair::new("history", extent)?;
        let store = Self {
            extent,
            field,
            accessory,
            history,
        };
        log::info!(
            "grid store allocated: {}x{} cells, {} channels/cell, {} bytes",
            extent.width(),
            extent.height(),
            FieldCell::CHANNELS + AccessoryCell::CHANNELS + HistoryCell::CHANNELS,
            store.memory_bytes()
        );
        Ok(store)
    }

    /// Extent shared by every grid.
    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    /// Primary field grid.
    pub fn field(&self) -> &BufferPair<FieldCell> {
        &self.field
    }

    /// Accessory grid.
    pub fn accessory(&self) -> &BufferPair<AccessoryCell> {
        &self.accessory
    }

    /// History grid.
    pub fn history(&self) -> &BufferPair<HistoryCell> {
        &self.history
    }

    /// Mutable primary field grid.
    pub fn field_mut(&mut self) -> &mut BufferPair<FieldCell> {
        &mut self.field
    }

    /// Mutable accessory grid.
    pub fn accessory_mut(&mut self) -> &mut BufferPair<AccessoryCell> {
        &mut self.accessory
    }

    /// Mutable history grid.
    pub fn history_mut(&mut self) -> &mut BufferPair<HistoryCell> {
        &mut self.history
    }

    /// Disjoint mutable borrows of all grids.
    pub fn split_mut(&mut self) -> GridsMut<'_> {
        GridsMut {
            field: &mut self.field,
            accessory: &mut self.accessory,
            history: &mut self.history,
        }
    }

    /// Bytes held by every slot of every grid.
    pub fn memory_bytes(&self) -> usize {
        self.field.memory_bytes() + self.accessory.memory_bytes() + self.history.memory_bytes()
    }
}
