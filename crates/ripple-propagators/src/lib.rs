//! Per-cell passes of the Ripple FDTD solver.
//!
//! Every pass is a pure kernel `(views, constants, x, y) -> cell`
//! dispatched over the grid by [`ripple_arena::BufferPair::pass`]. The
//! kernels never read the slot they write.
//!
//! - [`FieldUpdateEngine`] runs the leapfrog H and E updates in strict
//!   alternation and delegates edge cells to the [`BoundaryModule`].
//! - [`BoundaryModule`] applies first- or second-order Mur conditions.
//! - [`SourceInjector`] maintains the persistent amplitude map and adds
//!   the monochromatic excitation to `ez`.
//! - [`GeometryEditor`] paints conductors and dielectrics.
//! - [`output`] turns the field grid into the published frame.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod context;
pub mod field_update;
pub mod geometry;
pub mod output;
pub mod probe;
pub mod source;

pub use boundary::BoundaryModule;
pub use context::{FieldViews, PassContext};
pub use field_update::{FieldUpdateEngine, LeapfrogPhase};
pub use geometry::GeometryEditor;
pub use output::{Frame, Normal};
pub use probe::first_non_finite;
pub use source::{LineSource, PointSource, SourceInjector};
