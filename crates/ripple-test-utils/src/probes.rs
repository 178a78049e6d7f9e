//! Measurements over a grid store.

use ripple_arena::GridBufferStore;
use ripple_core::FREE_SPACE_IMPEDANCE;

/// Largest `|ez|` in the current field.
pub fn peak_abs_ez(store: &GridBufferStore) -> f32 {
    store
        .field()
        .read()
        .cells()
        .iter()
        .fold(0.0f32, |m, c| m.max(c.ez.abs()))
}

/// Largest `sqrt(hx^2 + hy^2) / 377` in the current field.
pub fn peak_abs_h_scaled(store: &GridBufferStore) -> f32 {
    store
        .field()
        .read()
        .cells()
        .iter()
        .fold(0.0f32, |m, c| {
            m.max((c.hx * c.hx + c.hy * c.hy).sqrt() / FREE_SPACE_IMPEDANCE)
        })
}

/// Discrete energy `sum(ez^2 + (hx^2 + hy^2) / 377^2)` in `f64`.
pub fn field_energy(store: &GridBufferStore) -> f64 {
    let z2 = (FREE_SPACE_IMPEDANCE as f64).powi(2);
    store
        .field()
        .read()
        .cells()
        .iter()
        .map(|c| {
            let e = c.ez as f64;
            let hx = c.hx as f64;
            let hy = c.hy as f64;
            e * e + (hx * hx + hy * hy) / z2
        })
        .sum()
}

/// Largest source amplitude in the accessory map.
pub fn peak_source_amplitude(store: &GridBufferStore) -> f32 {
    store
        .accessory()
        .read()
        .cells()
        .iter()
        .fold(0.0f32, |m, c| m.max(c.source_amplitude))
}
