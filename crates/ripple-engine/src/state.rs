//! The scheduler's run state.
//!
//! One value replaces the loose pause, write and single-step flags an
//! interactive loop tends to accumulate:
//!
//! ```text
//!            Start/Toggle          ArmWrite
//!   Idle ───────────────► Stepping ◄──────► Editing
//!     │                     │   ▲    Disarm    │  ▲
//!     │ Pause/StepOnce      │   │              │  │
//!     ▼                     ▼   │ Start/Toggle ▼  │
//!   Paused{editing: false} ◄───►  Paused{editing: true}
//!                       Arm / Disarm
//! ```
//!
//! `StepOnce` runs exactly one tick and always lands in `Paused`.

use std::fmt;

/// Where the scheduler is in its run cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SchedulerState {
    /// Constructed, never started.
    #[default]
    Idle,
    /// Free-running with obstacle painting armed.
    Editing,
    /// Free-running, geometry left alone.
    Stepping,
    /// Not running; `editing` remembers whether painting is armed.
    Paused {
        /// Painting is armed and resumes with the run.
        editing: bool,
    },
}

/// Control inputs that move the scheduler between states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// Start or resume running.
    Start,
    /// Stop running.
    Pause,
    /// Pause when running, resume otherwise.
    TogglePause,
    /// Run one tick, then stay paused.
    StepOnce,
    /// Arm obstacle painting.
    ArmWrite,
    /// Disarm obstacle painting.
    DisarmWrite,
}

/// Result of applying a [`Control`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// State after the control.
    pub next: SchedulerState,
    /// A single tick was requested.
    pub single_step: bool,
}

impl SchedulerState {
    /// Apply `control` and return the next state.
    pub fn transition(self, control: Control) -> Transition {
        use Control::*;
        use SchedulerState::*;

        let next = match (self, control) {
            (Idle, Start | TogglePause) => Stepping,
            (Idle, Pause | StepOnce) => Paused { editing: false },
            (Idle, ArmWrite) => Editing,
            (Idle, DisarmWrite) => Idle,

            (Stepping, Start | DisarmWrite) => Stepping,
            (Stepping, ArmWrite) => Editing,
            (Stepping, Pause | TogglePause | StepOnce) => Paused { editing: false },

            (Editing, Start | ArmWrite) => Editing,
            (Editing, DisarmWrite) => Stepping,
            (Editing, Pause | TogglePause | StepOnce) => Paused { editing: true },

            (Paused { editing }, Start | TogglePause) => {
                if editing {
                    Editing
                } else {
                    Stepping
                }
            }
            (Paused { editing }, Pause | StepOnce) => Paused { editing },
            (Paused { .. }, ArmWrite) => Paused { editing: true },
            (Paused { .. }, DisarmWrite) => Paused { editing: false },
        };
        Transition {
            next,
            single_step: control == StepOnce,
        }
    }

    /// Ticks advance on their own.
    pub fn is_running(self) -> bool {
        matches!(self, Self::Editing | Self::Stepping)
    }

    /// Obstacles paint on each tick that runs.
    pub fn writes_armed(self) -> bool {
        matches!(self, Self::Editing | Self::Paused { editing: true })
    }
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Editing => write!(f, "editing"),
            Self::Stepping => write!(f, "stepping"),
            Self::Paused { editing: true } => write!(f, "paused (editing)"),
            Self::Paused { editing: false } => write!(f, "paused"),
        }
    }
}
