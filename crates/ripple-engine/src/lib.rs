//! Step scheduler orchestrating the Ripple FDTD solver.
//!
//! Provides [`StepScheduler`], which owns the grid store and runs one
//! tick per call: obstacle painting, source injection, the leapfrog
//! steps and the published frame. Interaction layers drive it with
//! [`Command`](ripple_core::Command)s, applied directly or queued from
//! other threads through a [`CommandSender`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod excitation;
pub mod ingress;
pub mod metrics;
pub mod obstacle;
pub mod scheduler;
pub mod state;

pub use config::{ConfigError, Range, SolverConfig};
pub use excitation::Excitation;
pub use ingress::CommandSender;
pub use metrics::TickMetrics;
pub use obstacle::{Obstacle, ObstacleSet, Trail};
pub use scheduler::{StepScheduler, TickOutcome, TickReport};
pub use state::{Control, SchedulerState, Transition};
