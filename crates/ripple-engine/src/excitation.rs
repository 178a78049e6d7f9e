//! Interactive point source settings and the global phase.

use std::f64::consts::TAU;

use ripple_core::Point2;
use ripple_propagators::PointSource;

use crate::config::{Range, SolverConfig};

/// Height of the bar source in normalized units.
pub const BAR_Y: f32 = 0.8;
/// Left end of the bar source; the first point sits one spacing to the right.
pub const BAR_X_START: f32 = -0.5;
/// Right end of the bar source.
pub const BAR_X_END: f32 = 0.5;
/// Distance between neighbouring bar points.
pub const BAR_SPACING: f32 = 0.03;
/// Footprint radius of each bar point.
pub const BAR_RADIUS: f32 = 0.02;

/// State of the interactive source and the monochromatic phase clock.
#[derive(Clone, Debug, PartialEq)]
pub struct Excitation {
    active: bool,
    position: Point2,
    radius: f32,
    amplitude: f32,
    amplitude_range: Range,
    persist: f32,
    // Kept in f64 and wrapped to [0, TAU) so the drive frequency holds
    // over arbitrarily long runs.
    phase: f64,
    increment: f32,
    increment_range: Range,
    line_laid: bool,
}

impl Excitation {
    /// Settings taken from `config`, source off, phase zero.
    pub fn new(config: &SolverConfig) -> Self {
        Self {
            active: false,
            position: config.source_position,
            radius: config.source_radius,
            amplitude: config.source_amplitude,
            amplitude_range: config.source_amplitude_range,
            persist: config.persistence_default,
            phase: 0.0,
            increment: config.phase_increment,
            increment_range: config.phase_increment_range,
            line_laid: false,
        }
    }

    /// Whether the point source is laid every tick.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Turn the point source on or off. A change restarts the phase at zero.
    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            self.phase = 0.0;
        }
        self.active = active;
    }

    /// Move the point source.
    pub fn move_to(&mut self, position: Point2) {
        self.position = position;
    }

    /// Current amplitude.
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Set the amplitude, clamped into range. Returns `true` if clamped.
    pub fn set_amplitude(&mut self, amplitude: f32) -> bool {
        self.amplitude = self.amplitude_range.clamp(amplitude);
        warn_if_clamped("source amplitude", amplitude, self.amplitude)
    }

    /// Nudge the amplitude by `steps` increments.
    pub fn nudge_amplitude(&mut self, steps: i32) {
        self.amplitude = self.amplitude_range.nudge(self.amplitude, steps);
    }

    /// Persistence factor applied to the map when the source is laid.
    pub fn persist(&self) -> f32 {
        self.persist
    }

    /// Hold old sources at full strength, or drop them on the next lay.
    pub fn set_persistence(&mut self, persist: bool) {
        self.persist = if persist { 1.0 } else { 0.0 };
    }

    /// Current global phase in radians, in `[0, 2π]`.
    pub fn phase(&self) -> f32 {
        self.phase as f32
    }

    /// Phase advance per tick.
    pub fn increment(&self) -> f32 {
        self.increment
    }

    /// Set the phase increment, clamped into range. Returns `true` if clamped.
    pub fn set_increment(&mut self, increment: f32) -> bool {
        self.increment = self.increment_range.clamp(increment);
        warn_if_clamped("phase increment", increment, self.increment)
    }

    /// Nudge the phase increment by `steps` increments.
    pub fn nudge_increment(&mut self, steps: i32) {
        self.increment = self.increment_range.nudge(self.increment, steps);
    }

    /// Advance the phase clock by one tick and return the new phase.
    pub fn advance_phase(&mut self) -> f32 {
        self.phase = (self.phase + f64::from(self.increment)).rem_euclid(TAU);
        self.phase as f32
    }

    /// The point source as laid this tick.
    pub fn point_source(&self) -> PointSource {
        PointSource {
            center: self.position,
            radius: self.radius,
            amplitude: self.amplitude,
            phase_offset: 0.0,
        }
    }

    /// Footprint radius shared by point and line sources.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Record that a line source now sits in the map.
    ///
    /// Line sources are held at full strength, so persistence is forced on.
    pub fn mark_line_laid(&mut self) {
        self.line_laid = true;
        self.persist = 1.0;
    }

    /// Switch to the bar source and return the points to lay.
    ///
    /// Points are spaced [`BAR_SPACING`] apart along `y = BAR_Y`, starting
    /// one spacing right of [`BAR_X_START`] and stepping until the previous
    /// point has passed [`BAR_X_END`]. The amplitude drops to the range
    /// minimum, persistence is forced on and the point source is switched
    /// on at the last bar point.
    pub fn bar_sources(&mut self) -> Vec<PointSource> {
        self.amplitude = self.amplitude_range.min;
        self.persist = 1.0;
        let mut points = Vec::new();
        let mut k = 0u32;
        loop {
            let prev = BAR_X_START + k as f32 * BAR_SPACING;
            if prev >= BAR_X_END {
                break;
            }
            k += 1;
            points.push(PointSource {
                center: Point2::new(BAR_X_START + k as f32 * BAR_SPACING, BAR_Y),
                radius: BAR_RADIUS,
                amplitude: self.amplitude,
                phase_offset: 0.0,
            });
        }
        if let Some(last) = points.last() {
            self.position = last.center;
        }
        self.set_active(true);
        points
    }

    /// Record that the map has been cleared.
    pub fn mark_cleared(&mut self) {
        self.line_laid = false;
    }

    /// Whether the map must be injected into the field this tick.
    pub fn injects(&self) -> bool {
        self.active || self.line_laid
    }
}

fn warn_if_clamped(what: &str, requested: f32, got: f32) -> bool {
    let clamped = requested != got;
    if clamped {
        log::warn!("{what} {requested} clamped to {got}");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excitation() -> Excitation {
        Excitation::new(&SolverConfig::default())
    }

    #[test]
    fn toggling_restarts_phase() {
        let mut e = excitation();
        e.advance_phase();
        e.advance_phase();
        assert!((e.phase() - 1.2).abs() < 1e-6);
        e.set_active(true);
        assert_eq!(e.phase(), 0.0);
        e.advance_phase();
        e.set_active(true);
        assert!((e.phase() - 0.6).abs() < 1e-6);
        e.set_active(false);
        assert_eq!(e.phase(), 0.0);
    }

    #[test]
    fn phase_clock_holds_frequency_over_long_runs() {
        let mut e = excitation();
        let step = f64::from(e.increment());
        for n in 1..=1_000_000u64 {
            let phase = e.advance_phase();
            if n % 50_000 == 0 {
                let exact = (n as f64 * step).sin();
                assert!(
                    (f64::from(phase).sin() - exact).abs() < 1e-5,
                    "tick {n}: phase {phase}"
                );
                assert!((0.0..=std::f32::consts::TAU).contains(&phase));
            }
        }
    }

    #[test]
    fn amplitude_is_clamped_and_nudged() {
        let mut e = excitation();
        assert!(e.set_amplitude(9.0));
        assert_eq!(e.amplitude(), 2.0);
        assert!(!e.set_amplitude(0.5));
        e.nudge_amplitude(2);
        assert!((e.amplitude() - 0.6).abs() < 1e-6);
        e.nudge_amplitude(-100);
        assert_eq!(e.amplitude(), 0.01);
    }

    #[test]
    fn increment_is_clamped_and_nudged() {
        let mut e = excitation();
        assert!(e.set_increment(0.0));
        assert_eq!(e.increment(), 0.1);
        e.nudge_increment(20);
        assert!((e.increment() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn persistence_flag_maps_to_factor() {
        let mut e = excitation();
        assert_eq!(e.persist(), 0.0);
        e.set_persistence(true);
        assert_eq!(e.persist(), 1.0);
        e.set_persistence(false);
        assert_eq!(e.persist(), 0.0);
    }

    #[test]
    fn line_source_injects_without_point_source() {
        let mut e = excitation();
        assert!(!e.injects());
        e.mark_line_laid();
        assert!(e.injects());
        assert_eq!(e.persist(), 1.0);
        e.mark_cleared();
        assert!(!e.injects());
    }

    #[test]
    fn bar_spans_the_row_at_minimum_strength() {
        let mut e = excitation();
        e.set_persistence(false);
        let bar = e.bar_sources();
        assert_eq!(bar.len(), 34);
        assert!((bar[0].center.x - (BAR_X_START + BAR_SPACING)).abs() < 1e-6);
        assert!(bar.last().unwrap().center.x > BAR_X_END);
        assert!(bar.windows(2).all(|w| (w[1].center.x - w[0].center.x - BAR_SPACING).abs() < 1e-5));
        assert!(bar.iter().all(|p| p.center.y == BAR_Y && p.radius == BAR_RADIUS));
        assert!(bar.iter().all(|p| p.amplitude == SolverConfig::default().source_amplitude_range.min));
        assert_eq!(e.amplitude(), SolverConfig::default().source_amplitude_range.min);
        assert_eq!(e.persist(), 1.0);
        assert!(e.is_active());
        assert_eq!(e.point_source().center, bar.last().unwrap().center);
    }
}
