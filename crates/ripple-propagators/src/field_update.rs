//! Leapfrog H and E updates.
//!
//! One physical time step is an H update followed by an E update.
//! [`FieldUpdateEngine`] tracks which of the two is due and refuses to
//! run them out of order.
//!
//! Magnetic components of cells outside the grid read as zero. `hx` is
//! not updated on the last row and `hy` is not updated on the last
//! column, because their forward difference would leave the grid.

use ripple_arena::{Dispatch, GridBufferStore, GridsMut, ReadHandle};
use ripple_core::{FieldCell, HistoryCell, KernelError, SolverConstants};
use ripple_space::Edge;

use crate::boundary::BoundaryModule;
use crate::context::{FieldViews, PassContext};

/// Which half of the leapfrog step runs next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LeapfrogPhase {
    /// Magnetic update from the curl of E.
    #[default]
    HUpdate,
    /// Electric update from the curl of H, followed by boundary correction.
    EUpdate,
}

impl LeapfrogPhase {
    /// Pass name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::HUpdate => "h_update",
            Self::EUpdate => "e_update",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::HUpdate => Self::EUpdate,
            Self::EUpdate => Self::HUpdate,
        }
    }
}

// ── Kernels ─────────────────────────────────────────────────────

/// New magnetic components of cell `(x, y)`.
#[inline]
pub fn h_cell(field: &ReadHandle<'_, FieldCell>, k: &SolverConstants, x: u32, y: u32) -> FieldCell {
    let extent = field.extent();
    let mut cell = field.at(x, y);
    if y + 1 < extent.height() {
        let up = field.at(x, y + 1);
        cell.hx -= k.chxe * (up.ez - cell.ez);
    }
    if x + 1 < extent.width() {
        let right = field.at(x + 1, y);
        cell.hy -= k.chye * (cell.ez - right.ez);
    }
    cell
}

/// Interior E update of cell `(x, y)`: curl of H scaled by the local
/// permittivity, then the material mask, then the loss factor.
#[inline]
pub fn interior_ez(views: &FieldViews<'_>, k: &SolverConstants, x: u32, y: u32) -> f32 {
    let cell = views.field.at(x, y);
    let left = views.field.offset_or_default(x, y, -1, 0);
    let down = views.field.offset_or_default(x, y, 0, -1);
    let curl = (cell.hy - left.hy) - (cell.hx - down.hx);
    let dielectric = views.accessory.at(x, y).dielectric;
    let ez = cell.ez + k.ceh * curl / dielectric;
    ez * cell.material * k.loss
}

/// New electric field of cell `(x, y)`, boundary correction included.
///
/// Edge cells take the absorbing boundary value, masked by the material
/// flag so that a conductor on the edge still carries zero field.
#[inline]
pub fn e_cell(
    views: &FieldViews<'_>,
    boundary: &BoundaryModule,
    k: &SolverConstants,
    x: u32,
    y: u32,
) -> FieldCell {
    let mut cell = views.field.at(x, y);
    cell.ez = match Edge::classify(&views.field.extent(), x, y) {
        Some(edge) => boundary.correct(edge, views, k, x, y) * cell.material,
        None => interior_ez(views, k, x, y),
    };
    cell
}

// ── Engine ──────────────────────────────────────────────────────

/// Runs the H and E passes in strict alternation.
///
/// The E pass also maintains the history grid: before E is rewritten,
/// the current field is staged into the history pair, and the history
/// swap is published once the E pass has committed. During the E pass
/// the history therefore holds the field one step behind the current
/// one, which is what the second-order boundary needs.
///
/// # Examples
///
/// ```
/// use ripple_arena::{Dispatch, GridBufferStore};
/// use ripple_core::{BoundaryOrder, SolverConstants};
/// use ripple_propagators::{BoundaryModule, FieldUpdateEngine, LeapfrogPhase, PassContext};
/// use ripple_space::GridExtent;
///
/// let k = SolverConstants::derive(1.0e9, 10.0, 1.0, 0.99);
/// let mut store = GridBufferStore::new(GridExtent::new(16, 16).unwrap()).unwrap();
/// let mut engine = FieldUpdateEngine::new(BoundaryModule::new(BoundaryOrder::SecondOrder));
/// engine.step(&mut store, &PassContext::new(&k, Dispatch::Sequential)).unwrap();
/// assert_eq!(engine.phase(), LeapfrogPhase::HUpdate);
/// ```
#[derive(Clone, Debug)]
pub struct FieldUpdateEngine {
    boundary: BoundaryModule,
    phase: LeapfrogPhase,
}

impl FieldUpdateEngine {
    /// Create an engine whose next pass is the H update.
    pub fn new(boundary: BoundaryModule) -> Self {
        Self {
            boundary,
            phase: LeapfrogPhase::HUpdate,
        }
    }

    /// The pass that runs next.
    pub fn phase(&self) -> LeapfrogPhase {
        self.phase
    }

    /// The boundary module applied on E updates.
    pub fn boundary(&self) -> &BoundaryModule {
        &self.boundary
    }

    /// Forget any half-finished step; the next pass is the H update.
    pub fn reset_phase(&mut self) {
        self.phase = LeapfrogPhase::HUpdate;
    }

    /// Run the H update. Fails if the E update is due.
    pub fn h_update(&mut self, grids: &mut GridsMut<'_>, ctx: &PassContext<'_>) -> Result<(), KernelError> {
        self.expect(LeapfrogPhase::HUpdate)?;
        check_extents(grids)?;
        let k = ctx.constants;
        grids.field.pass(ctx.dispatch, |field, x, y| h_cell(field, k, x, y));
        log::trace!("h_update committed, field generation {}", grids.field.generation());
        self.phase = self.phase.next();
        Ok(())
    }

    /// Run the E update with boundary correction. Fails if the H update is due.
    pub fn e_update(&mut self, grids: &mut GridsMut<'_>, ctx: &PassContext<'_>) -> Result<(), KernelError> {
        self.expect(LeapfrogPhase::EUpdate)?;
        check_extents(grids)?;
        let k = ctx.constants;

        {
            let field = grids.field.read();
            grids
                .history
                .stage(ctx.dispatch, |_, x, y| HistoryCell::from(field.at(x, y)));
        }
        {
            let accessory = grids.accessory.read();
            let history = grids.history.read();
            let boundary = &self.boundary;
            grids.field.pass(ctx.dispatch, |field, x, y| {
                let views = FieldViews {
                    field: *field,
                    accessory,
                    history,
                };
                e_cell(&views, boundary, k, x, y)
            });
        }
        grids.history.swap();
        log::trace!("e_update committed, field generation {}", grids.field.generation());
        self.phase = self.phase.next();
        Ok(())
    }

    /// Run whichever pass is due and return the phase that ran.
    pub fn advance(&mut self, grids: &mut GridsMut<'_>, ctx: &PassContext<'_>) -> Result<LeapfrogPhase, KernelError> {
        let ran = self.phase;
        match ran {
            LeapfrogPhase::HUpdate => self.h_update(grids, ctx)?,
            LeapfrogPhase::EUpdate => self.e_update(grids, ctx)?,
        }
        Ok(ran)
    }

    /// Zero `ez`, `hx`, `hy` and the history grid, keeping material flags.
    ///
    /// The next pass is the H update. Clearing an already quiet store
    /// leaves every cell value unchanged.
    pub fn clear_fields(&mut self, store: &mut GridBufferStore, dispatch: Dispatch) {
        store
            .field_mut()
            .pass(dispatch, |field, x, y| field.at(x, y).with_fields_cleared());
        store
            .history_mut()
            .pass(dispatch, |_, _, _| HistoryCell::default());
        self.reset_phase();
        log::debug!("field and history grids zeroed");
    }

    /// One full time step: H update then E update.
    pub fn step(&mut self, store: &mut GridBufferStore, ctx: &PassContext<'_>) -> Result<(), KernelError> {
        let mut grids = store.split_mut();
        self.h_update(&mut grids, ctx)?;
        self.e_update(&mut grids, ctx)
    }

    fn expect(&self, requested: LeapfrogPhase) -> Result<(), KernelError> {
        if self.phase == requested {
            Ok(())
        } else {
            Err(KernelError::PhaseOrder {
                expected: self.phase.name(),
                found: requested.name(),
            })
        }
    }
}

fn check_extents(grids: &GridsMut<'_>) -> Result<(), KernelError> {
    let expected = grids.field.extent().cell_count();
    for found in [
        grids.accessory.extent().cell_count(),
        grids.history.extent().cell_count(),
    ] {
        if found != expected {
            return Err(KernelError::ExtentMismatch { expected, found });
        }
    }
    if grids.accessory.extent() != grids.field.extent() || grids.history.extent() != grids.field.extent() {
        return Err(KernelError::ExecutionFailed {
            reason: "grids share a cell count but not a shape".into(),
        });
    }
    Ok(())
}
