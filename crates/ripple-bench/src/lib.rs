//! Benchmark profiles for the Ripple solver.
//!
//! - [`reference_profile`]: 256x256 grid (64K cells), the interactive default
//! - [`stress_profile`]: 1024x1024 grid (~1M cells)
//! - [`busy_session`]: a source and armed obstacles so every tick does full work

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ripple_core::{CommandPayload, Point2};
use ripple_engine::{SolverConfig, StepScheduler};

/// 256x256 cells, second-order boundary, two leapfrog steps per tick.
pub fn reference_profile(parallel: bool) -> SolverConfig {
    SolverConfig {
        width: 256,
        height: 256,
        parallel,
        ..SolverConfig::default()
    }
}

/// Same as [`reference_profile`] at 16x the cell count.
pub fn stress_profile(parallel: bool) -> SolverConfig {
    SolverConfig {
        width: 1024,
        height: 1024,
        ..reference_profile(parallel)
    }
}

/// Commands that switch on the source, arm obstacle writes and start running.
pub fn busy_session() -> Vec<CommandPayload> {
    vec![
        CommandPayload::SetSourceActive { active: true },
        CommandPayload::MoveSource {
            position: Point2::new(-0.5, -0.5),
        },
        CommandPayload::SetPersistence { persist: true },
        CommandPayload::SetWriteEnabled { enabled: true },
        CommandPayload::Start,
    ]
}

/// Build a scheduler from `config` and apply [`busy_session`] to it.
///
/// Returns `None` if the configuration is rejected or a command is refused.
pub fn busy_scheduler(config: SolverConfig) -> Option<StepScheduler> {
    let mut scheduler = StepScheduler::new(config).ok()?;
    for payload in busy_session() {
        if !scheduler.apply(payload.into()).accepted {
            return None;
        }
    }
    Some(scheduler)
}
