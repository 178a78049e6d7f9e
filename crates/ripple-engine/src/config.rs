//! Scheduler configuration and validation.
//!
//! [`SolverConfig`] carries everything fixed at construction: grid size,
//! discretization, boundary order, and the ranges that runtime commands
//! are clamped into. [`SolverConfig::validate`] checks every invariant
//! before a single grid is allocated.

use std::error::Error;
use std::fmt;

use ripple_arena::ArenaError;
use ripple_core::{BoundaryOrder, Point2, SolverConstants};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a [`SolverConfig`] or building the
/// scheduler from it.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid allocation failed.
    Arena(ArenaError),
    /// Width or height is zero.
    EmptyGrid {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// Grid is too small to hold a boundary ring around an interior.
    GridTooSmall {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// Excitation frequency is not finite and positive.
    InvalidFrequency {
        /// The rejected value.
        value: f64,
    },
    /// Cells per wavelength is not finite or below two.
    InvalidCellsPerWavelength {
        /// The rejected value.
        value: f64,
    },
    /// The derived time step breaks the 2D Courant bound.
    CourantViolation {
        /// Configured Courant factor.
        factor: f64,
        /// Resulting Courant number.
        courant: f64,
    },
    /// Default persistence is outside `[0, 1]`.
    InvalidPersistence {
        /// The rejected value.
        value: f32,
    },
    /// Phase increment or its range is malformed.
    InvalidPhaseIncrement {
        /// Description of the violated constraint.
        reason: String,
    },
    /// Loss factor is outside `(0, 1]`.
    InvalidLoss {
        /// The rejected value.
        value: f32,
    },
    /// A configured radius is not finite, not positive, or below `min_radius`.
    InvalidRadius {
        /// Description of the violated constraint.
        reason: String,
    },
    /// Source amplitude or its range is malformed.
    InvalidAmplitude {
        /// Description of the violated constraint.
        reason: String,
    },
    /// Painted permittivity is not finite and positive.
    InvalidDielectric {
        /// The rejected value.
        value: f32,
    },
    /// `steps_per_tick` is zero.
    InvalidSteps,
    /// `max_elapsed_secs` is not finite and positive.
    InvalidElapsedBound {
        /// The rejected value.
        value: f64,
    },
    /// `ingress_capacity` is zero.
    IngressQueueZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::EmptyGrid { width, height } => {
                write!(f, "grid {width}x{height} has zero cells")
            }
            Self::GridTooSmall { width, height } => {
                write!(f, "grid {width}x{height} is below the 3x3 minimum")
            }
            Self::InvalidFrequency { value } => {
                write!(f, "frequency_hz must be finite and positive, got {value}")
            }
            Self::InvalidCellsPerWavelength { value } => {
                write!(f, "cells_per_wavelength must be finite and >= 2, got {value}")
            }
            Self::CourantViolation { factor, courant } => write!(
                f,
                "courant_factor {factor} gives Courant number {courant}, must be in (0, 1]"
            ),
            Self::InvalidPersistence { value } => {
                write!(f, "persistence_default must be in [0, 1], got {value}")
            }
            Self::InvalidPhaseIncrement { reason } => {
                write!(f, "invalid phase increment: {reason}")
            }
            Self::InvalidLoss { value } => {
                write!(f, "loss_factor must be in (0, 1], got {value}")
            }
            Self::InvalidRadius { reason } => write!(f, "invalid radius: {reason}"),
            Self::InvalidAmplitude { reason } => write!(f, "invalid amplitude: {reason}"),
            Self::InvalidDielectric { value } => {
                write!(f, "dielectric_paint must be finite and positive, got {value}")
            }
            Self::InvalidSteps => write!(f, "steps_per_tick must be at least 1"),
            Self::InvalidElapsedBound { value } => {
                write!(f, "max_elapsed_secs must be finite and positive, got {value}")
            }
            Self::IngressQueueZero => write!(f, "ingress_capacity must be at least 1"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for ConfigError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

// ── Range ──────────────────────────────────────────────────────────

/// A closed interval with a nudge step, used for runtime-tunable values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
    /// Size of one nudge.
    pub step: f32,
}

impl Range {
    /// Clamp `value` into `[min, max]`.
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Move `value` by `steps` nudges and clamp.
    pub fn nudge(&self, value: f32, steps: i32) -> f32 {
        self.clamp(value + steps as f32 * self.step)
    }

    fn check(&self, name: &str, value: f32) -> Result<(), String> {
        let finite = self.min.is_finite() && self.max.is_finite() && self.step.is_finite();
        if !finite || self.min <= 0.0 || self.min > self.max || self.step < 0.0 {
            return Err(format!(
                "{name} range [{}, {}] step {} is malformed",
                self.min, self.max, self.step
            ));
        }
        if !value.is_finite() || value < self.min || value > self.max {
            return Err(format!(
                "{name} {value} is outside [{}, {}]",
                self.min, self.max
            ));
        }
        Ok(())
    }
}

// ── SolverConfig ───────────────────────────────────────────────────

/// Complete configuration for constructing a step scheduler.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    /// Cells along x. Default: 256.
    pub width: u32,
    /// Cells along y. Default: 256.
    pub height: u32,
    /// Excitation frequency in Hz. Default: 1 GHz.
    pub frequency_hz: f64,
    /// Spatial resolution. Default: 10 cells per wavelength.
    pub cells_per_wavelength: f64,
    /// Fraction of the 2D stability limit used for `dt`. Default: 1.0.
    pub courant_factor: f64,
    /// Absorbing boundary order. Default: second order.
    pub boundary_order: BoundaryOrder,
    /// Grid-wide E damping per step. Default: 0.990.
    pub loss_factor: f32,
    /// Persistence factor the point source starts with. Default: 0.0.
    pub persistence_default: f32,
    /// Phase advance per tick, in radians. Default: 0.6 in `[0.1, 2.0]`, step 0.005.
    pub phase_increment: f32,
    /// Clamp range and nudge step for the phase increment.
    pub phase_increment_range: Range,
    /// Source amplitude. Default: 0.1 in `[0.01, 2.0]`, step 0.05.
    pub source_amplitude: f32,
    /// Clamp range and nudge step for the source amplitude.
    pub source_amplitude_range: Range,
    /// Source footprint radius in normalized units. Default: 0.04.
    pub source_radius: f32,
    /// Initial source position. Default: `(0.8, 0.8)`.
    pub source_position: Point2,
    /// Smallest obstacle radius. Default: 0.001.
    pub min_radius: f32,
    /// Obstacle radius restored by an obstacle reset. Default: 0.125.
    pub obstacle_reset_radius: f32,
    /// Initial obstacle centres. Default: `(-0.4, 0.2)` and `(0.4, 0.2)`.
    pub obstacle_centers: [Point2; 2],
    /// Ticks whose elapsed time exceeds this are skipped. Default: 1 s.
    pub max_elapsed_secs: f64,
    /// Permittivity painted in dielectric mode. Default: 3.0.
    pub dielectric_paint: f32,
    /// Leapfrog steps per tick. Default: 2.
    pub steps_per_tick: u32,
    /// Run passes on the rayon pool. Default: true.
    pub parallel: bool,
    /// Scan the field for non-finite values after each tick. Default: false.
    pub check_finite: bool,
    /// Capacity of the command channel. Default: 256.
    pub ingress_capacity: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            frequency_hz: 1.0e9,
            cells_per_wavelength: 10.0,
            courant_factor: 1.0,
            boundary_order: BoundaryOrder::SecondOrder,
            loss_factor: 0.990,
            persistence_default: 0.0,
            phase_increment: 0.6,
            phase_increment_range: Range {
                min: 0.1,
                max: 2.0,
                step: 0.005,
            },
            source_amplitude: 0.1,
            source_amplitude_range: Range {
                min: 0.01,
                max: 2.0,
                step: 0.05,
            },
            source_radius: 0.04,
            source_position: Point2::new(0.8, 0.8),
            min_radius: 0.001,
            obstacle_reset_radius: 0.125,
            obstacle_centers: [Point2::new(-0.4, 0.2), Point2::new(0.4, 0.2)],
            max_elapsed_secs: 1.0,
            dielectric_paint: 3.0,
            steps_per_tick: 2,
            parallel: true,
            check_finite: false,
            ingress_capacity: 256,
        }
    }
}

impl SolverConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Grid shape.
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        // 2. Discretization.
        if !self.frequency_hz.is_finite() || self.frequency_hz <= 0.0 {
            return Err(ConfigError::InvalidFrequency {
                value: self.frequency_hz,
            });
        }
        if !self.cells_per_wavelength.is_finite() || self.cells_per_wavelength < 2.0 {
            return Err(ConfigError::InvalidCellsPerWavelength {
                value: self.cells_per_wavelength,
            });
        }
        let factor = self.courant_factor;
        if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
            return Err(ConfigError::CourantViolation {
                factor,
                courant: factor,
            });
        }
        let courant = self.constants().courant_number();
        if !courant.is_finite() || courant > 1.0 + 1e-9 {
            return Err(ConfigError::CourantViolation { factor, courant });
        }
        // 3. Damping and persistence.
        if !self.loss_factor.is_finite() || self.loss_factor <= 0.0 || self.loss_factor > 1.0 {
            return Err(ConfigError::InvalidLoss {
                value: self.loss_factor,
            });
        }
        if !(0.0..=1.0).contains(&self.persistence_default) {
            return Err(ConfigError::InvalidPersistence {
                value: self.persistence_default,
            });
        }
        // 4. Tunable ranges.
        self.phase_increment_range
            .check("phase_increment", self.phase_increment)
            .map_err(|reason| ConfigError::InvalidPhaseIncrement { reason })?;
        self.source_amplitude_range
            .check("source_amplitude", self.source_amplitude)
            .map_err(|reason| ConfigError::InvalidAmplitude { reason })?;
        // 5. Radii and positions.
        if !self.min_radius.is_finite() || self.min_radius <= 0.0 {
            return Err(ConfigError::InvalidRadius {
                reason: format!("min_radius must be finite and positive, got {}", self.min_radius),
            });
        }
        for (name, r) in [
            ("obstacle_reset_radius", self.obstacle_reset_radius),
            ("source_radius", self.source_radius),
        ] {
            if !r.is_finite() || r < self.min_radius {
                return Err(ConfigError::InvalidRadius {
                    reason: format!("{name} {r} is below min_radius {}", self.min_radius),
                });
            }
        }
        if self.obstacle_reset_radius >= 1.0 {
            return Err(ConfigError::InvalidRadius {
                reason: format!(
                    "obstacle_reset_radius {} does not fit the domain",
                    self.obstacle_reset_radius
                ),
            });
        }
        let points = [
            self.source_position,
            self.obstacle_centers[0],
            self.obstacle_centers[1],
        ];
        if points.iter().any(|p| !p.is_finite()) {
            return Err(ConfigError::InvalidRadius {
                reason: "source and obstacle positions must be finite".to_string(),
            });
        }
        // 6. Painting, stepping, ingress.
        if !self.dielectric_paint.is_finite() || self.dielectric_paint <= 0.0 {
            return Err(ConfigError::InvalidDielectric {
                value: self.dielectric_paint,
            });
        }
        if self.steps_per_tick == 0 {
            return Err(ConfigError::InvalidSteps);
        }
        if !self.max_elapsed_secs.is_finite() || self.max_elapsed_secs <= 0.0 {
            return Err(ConfigError::InvalidElapsedBound {
                value: self.max_elapsed_secs,
            });
        }
        if self.ingress_capacity == 0 {
            return Err(ConfigError::IngressQueueZero);
        }
        Ok(())
    }

    /// Coefficients derived from this configuration.
    pub fn constants(&self) -> SolverConstants {
        SolverConstants::derive(
            self.frequency_hz,
            self.cells_per_wavelength,
            self.courant_factor,
            self.loss_factor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SolverConfig::default();
        cfg.validate().unwrap();
        assert!((cfg.constants().courant_number() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_empty_and_tiny_grids() {
        let cfg = SolverConfig {
            width: 0,
            ..SolverConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::EmptyGrid {
                width: 0,
                height: 256
            })
        );
        let cfg = SolverConfig {
            width: 2,
            height: 40,
            ..SolverConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::GridTooSmall { .. })));
    }

    #[test]
    fn rejects_courant_factor_above_one() {
        let cfg = SolverConfig {
            courant_factor: 1.2,
            ..SolverConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::CourantViolation { .. })
        ));
        let cfg = SolverConfig {
            courant_factor: f64::NAN,
            ..SolverConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::CourantViolation { .. })
        ));
    }

    #[test]
    fn rejects_bad_discretization() {
        let cfg = SolverConfig {
            frequency_hz: -1.0,
            ..SolverConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidFrequency { .. })));
        let cfg = SolverConfig {
            cells_per_wavelength: 1.0,
            ..SolverConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidCellsPerWavelength { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_tunables() {
        let cfg = SolverConfig {
            phase_increment: 5.0,
            ..SolverConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidPhaseIncrement { .. })
        ));
        let cfg = SolverConfig {
            source_amplitude: 0.0,
            ..SolverConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidAmplitude { .. })));
        let cfg = SolverConfig {
            persistence_default: 1.5,
            ..SolverConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidPersistence { .. })));
        let cfg = SolverConfig {
            loss_factor: 0.0,
            ..SolverConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidLoss { .. })));
    }

    #[test]
    fn rejects_bad_radii_and_bounds() {
        let cfg = SolverConfig {
            min_radius: 0.0,
            ..SolverConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidRadius { .. })));
        let cfg = SolverConfig {
            source_radius: 0.0001,
            ..SolverConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidRadius { .. })));
        let cfg = SolverConfig {
            steps_per_tick: 0,
            ..SolverConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidSteps));
        let cfg = SolverConfig {
            max_elapsed_secs: f64::INFINITY,
            ..SolverConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidElapsedBound { .. })
        ));
        let cfg = SolverConfig {
            ingress_capacity: 0,
            ..SolverConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::IngressQueueZero));
    }

    #[test]
    fn range_nudges_and_clamps() {
        let r = SolverConfig::default().phase_increment_range;
        assert!((r.nudge(0.6, 2) - 0.61).abs() < 1e-6);
        assert_eq!(r.nudge(0.6, -1000), 0.1);
        assert_eq!(r.nudge(1.99, 20), 2.0);
    }

    #[test]
    fn arena_error_is_source_chained() {
        let e = ConfigError::from(ArenaError::AllocationFailed {
            grid: "field",
            requested_cells: 4,
        });
        assert!(e.source().is_some());
        assert!(e.to_string().starts_with("arena:"));
    }
}
