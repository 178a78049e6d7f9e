//! Small enums selecting solver behaviour.

use std::fmt;

/// Absorbing boundary approximation applied at the grid edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryOrder {
    /// First-order Mur condition. Needs no history buffer.
    FirstOrder,
    /// Second-order Mur condition. Reads the one-step-delayed history grid.
    #[default]
    SecondOrder,
}

/// What an obstacle paints when writes are armed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MaterialMode {
    /// Perfect electric conductor: material flag `0.0`.
    #[default]
    Pec,
    /// Dielectric: permittivity set to the configured paint value.
    Dielectric,
    /// Line source laid between the two obstacles.
    LineSource,
}

/// The per-cell property targeted by a region write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialProperty {
    /// The material flag in the primary field grid.
    MaterialFlag,
    /// Relative permittivity in the accessory grid.
    Dielectric,
}

/// Channel published to the rendering collaborator after each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputChannel {
    /// Electric field `ez`.
    #[default]
    E,
    /// Magnetic x component scaled by 1/377.
    Hx,
    /// Magnetic y component scaled by 1/377.
    Hy,
    /// Magnitude of the in-plane magnetic field scaled by 1/377.
    HMagnitude,
}

impl fmt::Display for OutputChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::E => write!(f, "E"),
            Self::Hx => write!(f, "Hx"),
            Self::Hy => write!(f, "Hy"),
            Self::HMagnitude => write!(f, "|H|"),
        }
    }
}
