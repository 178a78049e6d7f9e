//! Strongly-typed identifiers.

use std::fmt;

/// Monotonically increasing tick counter.
///
/// Incremented each time the scheduler completes a tick: geometry,
/// sources, `steps_per_tick` leapfrog steps and the published frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies one of the two interactive obstacles.
///
/// The solver keeps exactly two obstacles; any other index is rejected
/// at ingress with [`IngressError::UnknownObstacle`](crate::IngressError::UnknownObstacle).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(pub u8);

impl ObstacleId {
    /// The first obstacle.
    pub const FIRST: Self = Self(0);
    /// The second obstacle.
    pub const SECOND: Self = Self(1);

    /// Slot index of this obstacle, if it names one of the two obstacles.
    pub fn slot(self) -> Option<usize> {
        match self.0 {
            0 | 1 => Some(self.0 as usize),
            _ => None,
        }
    }
}

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
