//! Physical constants and the immutable per-instance update coefficients.

use std::f64::consts::{PI, SQRT_2};

/// Vacuum permeability (H/m).
pub const MU_0: f64 = 4.0e-7 * PI;

/// Vacuum permittivity (F/m).
pub const EPSILON_0: f64 = 8.854e-12;

/// Propagation speed in free space (m/s).
pub const SPEED_OF_LIGHT: f64 = 3.0e8;

/// Free-space impedance used to bring H into the same range as E on output.
pub const FREE_SPACE_IMPEDANCE: f32 = 377.0;

/// Update coefficients derived once from the discretization.
///
/// Every kernel receives a shared reference to this value; nothing mutates
/// it after [`SolverConstants::derive`] returns. Spatial and temporal
/// quantities are kept in `f64`, the per-cell coefficients are narrowed to
/// `f32` to match the grid storage precision.
///
/// # Examples
///
/// ```
/// use ripple_core::SolverConstants;
///
/// let k = SolverConstants::derive(1.0e9, 10.0, 1.0, 0.99);
/// assert!((k.dx - 0.03).abs() < 1e-12);
/// assert!(k.courant_number() <= 1.0 + 1e-9);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConstants {
    /// Excitation frequency (Hz).
    pub frequency_hz: f64,
    /// Free-space wavelength at the excitation frequency (m).
    pub wavelength: f64,
    /// Cell pitch (m).
    pub dx: f64,
    /// Time step (s).
    pub dt: f64,
    /// E-update curl coefficient.
    pub ceh: f32,
    /// H-update curl coefficient.
    pub che: f32,
    /// H-update coefficient for the x component.
    pub chxe: f32,
    /// H-update coefficient for the y component.
    pub chye: f32,
    /// First-order absorbing boundary coefficient.
    pub mur1: f32,
    /// Second-order absorbing boundary coefficient on `(new_inner + prev_boundary)`.
    pub mur2a: f32,
    /// Second-order absorbing boundary coefficient on `(cur_boundary + cur_inner)`.
    pub mur2b: f32,
    /// Second-order absorbing boundary coefficient on the tangential second differences.
    pub mur2c: f32,
    /// Grid-wide E damping applied once per E update.
    pub loss: f32,
}

impl SolverConstants {
    /// Derive all coefficients from the excitation frequency, the number of
    /// cells per wavelength, the Courant factor `S` and the loss factor.
    ///
    /// The time step is `dt = S * dx / (c * sqrt(2))`, so any `S` in
    /// `(0, 1]` satisfies the 2D stability bound. Inputs are assumed to be
    /// validated by the caller.
    pub fn derive(
        frequency_hz: f64,
        cells_per_wavelength: f64,
        courant_factor: f64,
        loss: f32,
    ) -> Self {
        let c = SPEED_OF_LIGHT;
        let wavelength = c / frequency_hz;
        let dx = wavelength / cells_per_wavelength;
        let dt = courant_factor * dx / (c * SQRT_2);
        let cdt = c * dt;

        let ceh = dt / (MU_0 * dx);
        let che = dt / (EPSILON_0 * dx);

        Self {
            frequency_hz,
            wavelength,
            dx,
            dt,
            ceh: ceh as f32,
            che: che as f32,
            chxe: che as f32,
            chye: che as f32,
            mur1: ((cdt - dx) / (cdt + dx)) as f32,
            mur2a: ((dx - cdt) / (dx + cdt)) as f32,
            mur2b: (2.0 * dx / (dx + cdt)) as f32,
            mur2c: (cdt * cdt / (2.0 * dx * (dx + cdt))) as f32,
            loss,
        }
    }

    /// Courant number for the 2D grid: `c * dt * sqrt(2) / dx`.
    ///
    /// The explicit scheme is stable while this is at most `1.0`.
    pub fn courant_number(&self) -> f64 {
        SPEED_OF_LIGHT * self.dt * SQRT_2 / self.dx
    }
}
