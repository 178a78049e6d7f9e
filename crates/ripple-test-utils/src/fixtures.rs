//! Reusable grid fixtures.
//!
//! - [`quiet_store`]: vacuum, zero fields.
//! - [`impulse_store`]: a single `ez` spike.
//! - [`noisy_store`]: seeded uniform noise on `ez`.

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ripple_arena::{Dispatch, GridBufferStore};
use ripple_core::{FieldCell, Point2, SolverConstants};
use ripple_space::GridExtent;

/// Coefficients for 1 GHz, 10 cells per wavelength, Courant factor 1, loss 0.99.
pub fn test_constants() -> SolverConstants {
    SolverConstants::derive(1.0e9, 10.0, 1.0, 0.99)
}

/// A `w` x `h` store in vacuum with zero fields.
pub fn quiet_store(w: u32, h: u32) -> GridBufferStore {
    let extent = GridExtent::new(w, h).expect("fixture extent");
    GridBufferStore::new(extent).expect("fixture allocation")
}

/// A quiet store with `ez = amplitude` at `(x, y)`.
pub fn impulse_store(w: u32, h: u32, x: u32, y: u32, amplitude: f32) -> GridBufferStore {
    let mut store = quiet_store(w, h);
    paint_cells(&mut store, |cx, cy, cell| {
        if (cx, cy) == (x, y) {
            cell.ez = amplitude;
        }
    });
    store
}

/// A quiet store with `ez` drawn uniformly from `[-amplitude, amplitude]`.
///
/// The same seed always produces the same grid.
pub fn noisy_store(w: u32, h: u32, seed: u64, amplitude: f32) -> GridBufferStore {
    let mut store = quiet_store(w, h);
    let extent = store.extent();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise: Vec<f32> = (0..extent.cell_count())
        .map(|_| (unit(&mut rng) * 2.0 - 1.0) * amplitude)
        .collect();
    paint_cells(&mut store, |x, y, cell| {
        cell.ez = noise[extent.index(x, y)];
    });
    store
}

/// Apply `f` to every field cell through one sequential pass.
pub fn paint_cells(store: &mut GridBufferStore, f: impl Fn(u32, u32, &mut FieldCell) + Sync) {
    store.field_mut().pass(Dispatch::Sequential, |view, x, y| {
        let mut cell = view.at(x, y);
        f(x, y, &mut cell);
        cell
    });
}

/// `n` seeded points uniformly spread over `[-1, 1]^2`.
pub fn seeded_points(seed: u64, n: usize) -> Vec<Point2> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let x = unit(&mut rng) * 2.0 - 1.0;
            let y = unit(&mut rng) * 2.0 - 1.0;
            Point2::new(x, y)
        })
        .collect()
}

/// Uniform sample in `[0, 1)` from the top 24 bits of a `u32`.
fn unit(rng: &mut ChaCha8Rng) -> f32 {
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}
