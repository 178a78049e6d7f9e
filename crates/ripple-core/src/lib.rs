//! Core types for the Ripple 2D FDTD solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the per-cell layouts stored in the grid buffers, the immutable
//! physical constants derived at construction, the command vocabulary
//! accepted by the scheduler, and the error types shared by every
//! other crate in the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod command;
pub mod constants;
pub mod error;
pub mod geom;
pub mod id;
pub mod mode;

pub use cell::{AccessoryCell, CellLayout, FieldCell, HistoryCell, PEC, VACUUM};
pub use command::{Command, CommandPayload, Receipt};
pub use constants::{SolverConstants, FREE_SPACE_IMPEDANCE, SPEED_OF_LIGHT};
pub use error::{IngressError, KernelError, StepError};
pub use geom::{CellRect, Point2};
pub use id::{ObstacleId, TickId};
pub use mode::{BoundaryOrder, MaterialMode, MaterialProperty, OutputChannel};
