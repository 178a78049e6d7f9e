//! Grid extent: dimensions, indexing, and normalized coordinates.

use crate::error::SpaceError;
use ripple_core::{CellRect, Point2};

/// Dimensions of a row-major 2D grid.
///
/// Cell `(x, y)` lives at linear index `y * width + x`. In normalized
/// coordinates the grid spans `[-1, 1]` on both axes and a cell centre is
/// at `((x + 0.5) / width * 2 - 1, (y + 0.5) / height * 2 - 1)`.
///
/// # Examples
///
/// ```
/// use ripple_space::GridExtent;
///
/// let e = GridExtent::new(4, 2).unwrap();
/// assert_eq!(e.cell_count(), 8);
/// assert_eq!(e.index(3, 1), 7);
/// assert_eq!(e.coords(7), (3, 1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridExtent {
    width: u32,
    height: u32,
}

impl GridExtent {
    /// Create an extent. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptyExtent { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Linear index of `(x, y)`. The caller guarantees the cell is inside.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Cell coordinates of a linear index.
    #[inline]
    pub fn coords(&self, index: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((index % w) as u32, (index / w) as u32)
    }

    /// Whether `(x, y)` is inside the grid.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Bounds-checked linear index.
    pub fn checked_index(&self, x: u32, y: u32) -> Result<usize, SpaceError> {
        if self.contains(x, y) {
            Ok(self.index(x, y))
        } else {
            Err(SpaceError::CellOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Normalized coordinates of the centre of cell `(x, y)`.
    #[inline]
    pub fn cell_center(&self, x: u32, y: u32) -> Point2 {
        Point2 {
            x: (x as f32 + 0.5) / self.width as f32 * 2.0 - 1.0,
            y: (y as f32 + 0.5) / self.height as f32 * 2.0 - 1.0,
        }
    }

    /// Cell pitch in normalized units on each axis.
    pub fn cell_pitch(&self) -> Point2 {
        Point2 {
            x: 2.0 / self.width as f32,
            y: 2.0 / self.height as f32,
        }
    }

    /// The cell containing a normalized point, if the point is inside the domain.
    pub fn cell_at(&self, p: Point2) -> Option<(u32, u32)> {
        if !p.is_finite() {
            return None;
        }
        let fx = ((p.x + 1.0) * 0.5 * self.width as f32).floor();
        let fy = ((p.y + 1.0) * 0.5 * self.height as f32).floor();
        if fx < 0.0 || fy < 0.0 || fx >= self.width as f32 || fy >= self.height as f32 {
            return None;
        }
        Some((fx as u32, fy as u32))
    }

    /// Check that a rectangle is well formed and lies inside the grid.
    pub fn check_rect(&self, rect: &CellRect) -> Result<(), SpaceError> {
        if !rect.is_well_formed() {
            return Err(SpaceError::InvalidRect {
                reason: format!(
                    "inverted bounds x {}..={} y {}..={}",
                    rect.x_min, rect.x_max, rect.y_min, rect.y_max
                ),
            });
        }
        if !self.contains(rect.x_max, rect.y_max) {
            return Err(SpaceError::InvalidRect {
                reason: format!(
                    "corner ({}, {}) outside {}x{} grid",
                    rect.x_max, rect.y_max, self.width, self.height
                ),
            });
        }
        Ok(())
    }
}
