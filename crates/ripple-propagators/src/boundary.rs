//! Mur absorbing boundary conditions.
//!
//! Applied to the outermost ring of cells, strictly between corners, as
//! part of the E pass. Each edge cell `b` has an inner neighbour `i`
//! one step toward the interior; the tangential direction runs along the
//! edge. With `n` the current step:
//!
//! ```text
//! first order:  b(n+1) = i(n) + mur1 * (i(n+1) - b(n))
//! second order: b(n+1) = -i(n-1) - mur2a * (i(n+1) + b(n-1))
//!                        + mur2b * (b(n) + i(n))
//!                        + mur2c * (Dtt b(n) + Dtt i(n))
//! ```
//!
//! `i(n+1)` is the interior update of the inner neighbour, `n-1` values
//! come from the history grid and `Dtt` is the tangential second
//! difference. Both conditions lose accuracy, and the first order one
//! can grow unboundedly, when a conductor sits against the edge.

use ripple_core::{BoundaryOrder, SolverConstants};
use ripple_space::Edge;

use crate::context::FieldViews;
use crate::field_update::interior_ez;

/// Absorbing boundary of a fixed order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryModule {
    order: BoundaryOrder,
}

impl BoundaryModule {
    /// Create a boundary module.
    pub fn new(order: BoundaryOrder) -> Self {
        Self { order }
    }

    /// The configured order.
    pub fn order(&self) -> BoundaryOrder {
        self.order
    }

    /// Corrected `ez` for edge cell `(x, y)`.
    pub fn correct(
        &self,
        edge: Edge,
        views: &FieldViews<'_>,
        k: &SolverConstants,
        x: u32,
        y: u32,
    ) -> f32 {
        match self.order {
            BoundaryOrder::FirstOrder => mur1(edge, views, k, x, y),
            BoundaryOrder::SecondOrder => mur2(edge, views, k, x, y),
        }
    }
}

fn step(x: u32, y: u32, (dx, dy): (i32, i32)) -> (u32, u32) {
    (x.wrapping_add_signed(dx), y.wrapping_add_signed(dy))
}

fn mur1(edge: Edge, views: &FieldViews<'_>, k: &SolverConstants, x: u32, y: u32) -> f32 {
    let (ix, iy) = step(x, y, edge.inward());
    let boundary_now = views.field.at(x, y).ez;
    let inner_now = views.field.at(ix, iy).ez;
    let inner_next = interior_ez(views, k, ix, iy);
    inner_now + k.mur1 * (inner_next - boundary_now)
}

fn mur2(edge: Edge, views: &FieldViews<'_>, k: &SolverConstants, x: u32, y: u32) -> f32 {
    let inward = edge.inward();
    let (tx, ty) = edge.tangent();
    let (ix, iy) = step(x, y, inward);

    let field = &views.field;
    let b_now = field.at(x, y).ez;
    let i_now = field.at(ix, iy).ez;
    let b_prev = views.history.at(x, y).ez;
    let i_prev = views.history.at(ix, iy).ez;
    let i_next = interior_ez(views, k, ix, iy);

    let b_tt = field.offset_or_default(x, y, tx, ty).ez - 2.0 * b_now
        + field.offset_or_default(x, y, -tx, -ty).ez;
    let i_tt = field.offset_or_default(ix, iy, tx, ty).ez - 2.0 * i_now
        + field.offset_or_default(ix, iy, -tx, -ty).ez;

    -i_prev - k.mur2a * (i_next + b_prev) + k.mur2b * (b_now + i_now) + k.mur2c * (b_tt + i_tt)
}
