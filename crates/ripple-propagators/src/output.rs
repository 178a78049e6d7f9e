//! The frame published to the rendering collaborator.
//!
//! A frame holds one scalar per cell for the selected channel plus a
//! surface normal per cell, derived from forward differences of that
//! scalar. Magnetic channels are divided by the free-space impedance so
//! they share the range of `ez`.

use rayon::prelude::*;
use ripple_arena::{BufferPair, Dispatch};
use ripple_core::{FieldCell, OutputChannel, FREE_SPACE_IMPEDANCE};
use ripple_space::GridExtent;

/// Horizontal components of the unit surface normal at a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Normal {
    /// x component.
    pub x: f32,
    /// z component.
    pub z: f32,
}

/// Scalar value of `cell` on `channel`.
#[inline]
pub fn channel_value(cell: &FieldCell, channel: OutputChannel) -> f32 {
    match channel {
        OutputChannel::E => cell.ez,
        OutputChannel::Hx => cell.hx / FREE_SPACE_IMPEDANCE,
        OutputChannel::Hy => cell.hy / FREE_SPACE_IMPEDANCE,
        OutputChannel::HMagnitude => (cell.hx * cell.hx + cell.hy * cell.hy).sqrt() / FREE_SPACE_IMPEDANCE,
    }
}

/// Published output of one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    extent: GridExtent,
    channel: OutputChannel,
    values: Vec<f32>,
    normals: Vec<Normal>,
}

impl Frame {
    /// An all-zero frame for `extent`.
    pub fn new(extent: GridExtent, channel: OutputChannel) -> Self {
        let n = extent.cell_count();
        Self {
            extent,
            channel,
            values: vec![0.0; n],
            normals: vec![Normal::default(); n],
        }
    }

    /// Refill the frame from the current field on `channel`.
    pub fn capture(&mut self, field: &BufferPair<FieldCell>, channel: OutputChannel, dispatch: Dispatch) {
        self.extent = field.extent();
        self.channel = channel;
        let view = field.read();
        let cells = view.cells();
        self.values.resize(cells.len(), 0.0);
        self.normals.resize(cells.len(), Normal::default());

        match dispatch {
            Dispatch::Parallel => self
                .values
                .par_iter_mut()
                .zip(cells.par_iter())
                .for_each(|(v, c)| *v = channel_value(c, channel)),
            Dispatch::Sequential => self
                .values
                .iter_mut()
                .zip(cells.iter())
                .for_each(|(v, c)| *v = channel_value(c, channel)),
        }

        let extent = self.extent;
        let values = &self.values;
        let width = extent.width() as usize;
        let fill_row = |y: usize, row: &mut [Normal]| {
            for (x, n) in row.iter_mut().enumerate() {
                *n = surface_normal(values, &extent, x as u32, y as u32);
            }
        };
        match dispatch {
            Dispatch::Parallel => self
                .normals
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| fill_row(y, row)),
            Dispatch::Sequential => self
                .normals
                .chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| fill_row(y, row)),
        }
    }

    /// Grid extent of the frame.
    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    /// Channel the values were taken from.
    pub fn channel(&self) -> OutputChannel {
        self.channel
    }

    /// One value per cell, row-major.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// One normal per cell, row-major.
    pub fn normals(&self) -> &[Normal] {
        &self.normals
    }

    /// Value at `(x, y)`, or `None` outside the grid.
    pub fn value_at(&self, x: u32, y: u32) -> Option<f32> {
        self.extent
            .checked_index(x, y)
            .ok()
            .map(|i| self.values[i])
    }

    /// Largest absolute value in the frame.
    pub fn peak_abs(&self) -> f32 {
        self.values.iter().fold(0.0f32, |m, v| m.max(v.abs()))
    }
}

/// `normalize(cross(dy, dx))` with `dx = (1/w, ds/dx, 0)` and
/// `dy = (0, ds/dy, 1/h)`, edge differences clamped to zero.
fn surface_normal(values: &[f32], extent: &GridExtent, x: u32, y: u32) -> Normal {
    let here = values[extent.index(x, y)];
    let up = values[extent.index(x, (y + 1).min(extent.height() - 1))];
    let right = values[extent.index((x + 1).min(extent.width() - 1), y)];
    let a = up - here;
    let b = right - here;
    let sx = 1.0 / extent.width() as f32;
    let sy = 1.0 / extent.height() as f32;
    let (nx, ny, nz) = (-sy * b, sx * sy, -a * sx);
    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    Normal {
        x: nx / len,
        z: nz / len,
    }
}
