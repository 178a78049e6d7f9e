//! Test fixtures and probes for Ripple development.
//!
//! Builds grid stores in known states (quiet, single impulse, seeded
//! noise) and measures them (peak magnitudes, discrete energy) so the
//! solver crates can share one vocabulary for their tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod probes;

pub use fixtures::{
    impulse_store, noisy_store, paint_cells, quiet_store, seeded_points, test_constants,
};
pub use probes::{field_energy, peak_abs_ez, peak_abs_h_scaled, peak_source_amplitude};
