//! Error types shared across the Ripple workspace.
//!
//! Organized by subsystem: step (scheduler tick), kernel (field and
//! material passes), and ingress (command submission).

use std::error::Error;
use std::fmt;

/// Errors from the scheduler while running a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A kernel pass refused to run.
    KernelFailed {
        /// Name of the failing pass.
        name: String,
        /// The underlying kernel error.
        reason: KernelError,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KernelFailed { name, reason } => {
                write!(f, "pass '{name}' failed: {reason}")
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::KernelFailed { reason, .. } => Some(reason),
        }
    }
}

/// Errors from an individual kernel pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KernelError {
    /// Two grids bound into the same pass have different extents.
    ExtentMismatch {
        /// Cell count of the grid being written.
        expected: usize,
        /// Cell count of the grid being read.
        found: usize,
    },
    /// The leapfrog pass was invoked out of order.
    PhaseOrder {
        /// The pass that was due.
        expected: &'static str,
        /// The pass that was requested.
        found: &'static str,
    },
    /// The pass could not complete for another reason.
    ExecutionFailed {
        /// Human-readable description.
        reason: String,
    },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtentMismatch { expected, found } => {
                write!(f, "extent mismatch: expected {expected} cells, found {found}")
            }
            Self::PhaseOrder { expected, found } => {
                write!(f, "leapfrog order violated: expected {expected}, got {found}")
            }
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
        }
    }
}

impl Error for KernelError {}

/// Errors from the command ingress path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngressError {
    /// The command queue is at capacity.
    QueueFull,
    /// The scheduler side of the queue has been dropped.
    Disconnected,
    /// The command names an obstacle that does not exist.
    UnknownObstacle,
    /// A region write targets cells outside the grid or has inverted bounds.
    InvalidRegion,
    /// A numeric argument is NaN or infinite.
    NonFiniteArgument,
}

impl fmt::Display for IngressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull => write!(f, "command queue full"),
            Self::Disconnected => write!(f, "scheduler disconnected"),
            Self::UnknownObstacle => write!(f, "unknown obstacle"),
            Self::InvalidRegion => write!(f, "region outside grid or inverted"),
            Self::NonFiniteArgument => write!(f, "non-finite command argument"),
        }
    }
}

impl Error for IngressError {}
