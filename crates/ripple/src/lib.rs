//! Ripple: an interactive two-dimensional FDTD wave solver.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Ripple sub-crates. For most users, adding `ripple` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use ripple::prelude::*;
//!
//! let config = SolverConfig {
//!     width: 64,
//!     height: 64,
//!     ..SolverConfig::default()
//! };
//! let mut solver = StepScheduler::new(config).unwrap();
//! for payload in [
//!     CommandPayload::SetSourceActive { active: true },
//!     CommandPayload::MoveSource { position: Point2::new(0.0, 0.0) },
//!     CommandPayload::Start,
//! ] {
//!     assert!(solver.apply(payload.into()).accepted);
//! }
//! for _ in 0..10 {
//!     solver.advance(1.0 / 60.0).unwrap();
//! }
//! assert_eq!(solver.tick_id(), TickId(10));
//! assert!(solver.frame().values().iter().all(|v| v.is_finite()));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ripple-core` | Cell layouts, commands, ids, constants, errors |
//! | [`space`] | `ripple-space` | Grid extent, footprints, segments, edges |
//! | [`arena`] | `ripple-arena` | Buffer pairs and the grid store |
//! | [`propagators`] | `ripple-propagators` | Field update, boundary, geometry, sources, output |
//! | [`engine`] | `ripple-engine` | The step scheduler and its command channel |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, constants, and ids (`ripple-core`).
///
/// Contains the per-cell layouts, [`types::Command`] and
/// [`types::Receipt`], [`types::SolverConstants`], and the error types.
pub use ripple_core as types;

/// Grid geometry (`ripple-space`).
///
/// [`space::GridExtent`] maps cells to normalized coordinates;
/// [`space::Circle`] and [`space::Segment`] describe footprints.
pub use ripple_space as space;

/// Double-buffered grid storage (`ripple-arena`).
pub use ripple_arena as arena;

/// Per-cell passes over the grid store (`ripple-propagators`).
///
/// [`propagators::FieldUpdateEngine`] runs the leapfrog,
/// [`propagators::BoundaryModule`] the absorbing edges,
/// [`propagators::GeometryEditor`] and [`propagators::SourceInjector`]
/// edit the material and source maps.
pub use ripple_propagators as propagators;

/// The step scheduler (`ripple-engine`).
pub use ripple_engine as engine;

/// Common imports for typical Ripple usage.
///
/// ```rust
/// use ripple::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use ripple_core::{
        BoundaryOrder, Command, CommandPayload, IngressError, MaterialMode, MaterialProperty,
        ObstacleId, OutputChannel, Point2, Receipt, SolverConstants, StepError, TickId,
    };

    // Storage
    pub use ripple_arena::{Dispatch, GridBufferStore};

    // Output
    pub use ripple_propagators::Frame;

    // Engine
    pub use ripple_engine::{
        CommandSender, SchedulerState, SolverConfig, StepScheduler, TickMetrics, TickOutcome,
        TickReport,
    };
}
