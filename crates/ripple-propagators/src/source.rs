//! Persistent source map and monochromatic injection.
//!
//! Sources are laid into the accessory grid once, as a standing
//! amplitude map, and the field pass adds `amplitude * sin(phase)` to
//! every cell each tick. Laying a new source never lowers an existing
//! amplitude below its decayed value: the stronger of the two wins.

use ripple_arena::{BufferPair, Dispatch};
use ripple_core::{AccessoryCell, FieldCell, KernelError, Point2};
use ripple_space::{falloff, Circle, Segment, FOOTPRINT_THRESHOLD};

/// A circular source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointSource {
    /// Centre in normalized coordinates.
    pub center: Point2,
    /// Footprint radius in normalized units.
    pub radius: f32,
    /// Peak amplitude.
    pub amplitude: f32,
    /// Phase offset recorded alongside the amplitude.
    pub phase_offset: f32,
}

/// A source swept along a segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSource {
    /// The segment the source follows.
    pub segment: Segment,
    /// Half-width of the footprint in normalized units.
    pub radius: f32,
    /// Peak amplitude.
    pub amplitude: f32,
}

/// Writes the source map and injects it into the field.
#[derive(Clone, Copy, Debug, Default)]
pub struct SourceInjector;

impl SourceInjector {
    /// Create an injector.
    pub fn new() -> Self {
        Self
    }

    /// Decay the whole map by `persist` and max-hold `source` into it.
    ///
    /// Every cell becomes `amplitude * persist`; cells inside the
    /// footprint then take `max(that, weight * source.amplitude)`.
    /// `persist` is clamped to `[0, 1]`, NaN counts as `0`. Calling with
    /// zero amplitude and zero persistence clears the map.
    pub fn update_persistent_map(
        &self,
        accessory: &mut BufferPair<AccessoryCell>,
        source: &PointSource,
        persist: f32,
        dispatch: Dispatch,
    ) {
        let persist = clamp_persist(persist);
        let circle = Circle::new(source.center, source.radius);
        let extent = accessory.extent();
        accessory.pass(dispatch, |acc, x, y| {
            let weight = circle.weight_at(extent.cell_center(x, y));
            max_hold(acc.at(x, y), persist, weight, source.amplitude, source.phase_offset)
        });
        log::trace!(
            "source map updated at ({:.3}, {:.3}) amplitude {:.3} persist {:.2}",
            source.center.x,
            source.center.y,
            source.amplitude,
            persist
        );
    }

    /// Max-hold a line source into the map without decaying existing sources.
    pub fn lay_line_source(
        &self,
        accessory: &mut BufferPair<AccessoryCell>,
        line: &LineSource,
        dispatch: Dispatch,
    ) {
        let radius = Circle::new(line.segment.start, line.radius).radius();
        let extent = accessory.extent();
        accessory.pass(dispatch, |acc, x, y| {
            let d = line.segment.distance_to(extent.cell_center(x, y));
            max_hold(acc.at(x, y), 1.0, falloff(d / radius), line.amplitude, 0.0)
        });
        log::debug!(
            "line source laid over length {:.3} amplitude {:.3}",
            line.segment.length(),
            line.amplitude
        );
    }

    /// Remove every source, point and line alike.
    pub fn clear(&self, accessory: &mut BufferPair<AccessoryCell>, dispatch: Dispatch) {
        accessory.pass(dispatch, |acc, x, y| acc.at(x, y).with_source_cleared());
    }

    /// Add `amplitude * sin(phase)` to `ez` of every cell.
    pub fn apply_to_field(
        &self,
        field: &mut BufferPair<FieldCell>,
        accessory: &BufferPair<AccessoryCell>,
        phase: f32,
        dispatch: Dispatch,
    ) -> Result<(), KernelError> {
        let expected = field.extent().cell_count();
        let found = accessory.extent().cell_count();
        if expected != found {
            return Err(KernelError::ExtentMismatch { expected, found });
        }
        let drive = phase.sin();
        let acc = accessory.read();
        field.pass(dispatch, |f, x, y| {
            let mut cell = f.at(x, y);
            cell.ez += acc.at(x, y).source_amplitude * drive;
            cell
        });
        Ok(())
    }
}

fn clamp_persist(persist: f32) -> f32 {
    if persist.is_nan() {
        0.0
    } else {
        persist.clamp(0.0, 1.0)
    }
}

#[inline]
fn max_hold(cell: AccessoryCell, persist: f32, weight: f32, amplitude: f32, phase_offset: f32) -> AccessoryCell {
    let decayed = cell.source_amplitude * persist;
    let mut out = AccessoryCell {
        source_amplitude: decayed,
        ..cell
    };
    if weight > FOOTPRINT_THRESHOLD {
        let fresh = weight * amplitude;
        if fresh > decayed {
            out.source_amplitude = fresh;
            out.source_phase_offset = phase_offset;
        }
    }
    out
}
