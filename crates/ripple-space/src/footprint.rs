//! Smoothed circular footprints and the shapes a write can target.

use crate::extent::GridExtent;
use ripple_core::{CellRect, Point2};
use smallvec::SmallVec;

/// A cell is inside a circular footprint when its falloff weight exceeds this.
pub const FOOTPRINT_THRESHOLD: f32 = 5e-6;

/// Smallest radius a [`Circle`] will hold. Keeps the distance ratio finite.
pub const MIN_RADIUS_FLOOR: f32 = 1e-6;

/// Smoothed-volume falloff: `exp(-(1.5 t)^6)`.
///
/// Exactly `1` at the centre, about `0.84` at half the radius, then
/// drops steeply and is below [`FOOTPRINT_THRESHOLD`] just past `t = 1`.
#[inline]
pub fn falloff(t: f32) -> f32 {
    let u = 1.5 * t;
    (-(u.powi(6))).exp()
}

/// A circle in normalized domain coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    center: Point2,
    radius: f32,
}

impl Circle {
    /// Create a circle. Non-positive or non-finite radii are raised to
    /// [`MIN_RADIUS_FLOOR`].
    pub fn new(center: Point2, radius: f32) -> Self {
        let radius = if radius.is_finite() {
            radius.max(MIN_RADIUS_FLOOR)
        } else {
            MIN_RADIUS_FLOOR
        };
        Self { center, radius }
    }

    /// Centre of the circle.
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Radius of the circle.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Falloff weight of `p` relative to this circle.
    #[inline]
    pub fn weight_at(&self, p: Point2) -> f32 {
        falloff(p.distance(self.center) / self.radius)
    }

    /// Whether `p` lies inside the footprint.
    #[inline]
    pub fn covers(&self, p: Point2) -> bool {
        self.weight_at(p) > FOOTPRINT_THRESHOLD
    }
}

/// Union of up to a few circles, rasterized together.
///
/// A moving obstacle paints the union of its old and new positions so
/// that fast motion leaves no gap between frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Footprint {
    circles: SmallVec<[Circle; 2]>,
}

impl Footprint {
    /// A footprint of one circle.
    pub fn single(circle: Circle) -> Self {
        let mut circles = SmallVec::new();
        circles.push(circle);
        Self { circles }
    }

    /// The union of two circles.
    pub fn union(a: Circle, b: Circle) -> Self {
        let mut circles = SmallVec::new();
        circles.push(a);
        if b != a {
            circles.push(b);
        }
        Self { circles }
    }

    /// The circles making up this footprint.
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    /// Largest falloff weight of `p` over all circles.
    pub fn weight_at(&self, p: Point2) -> f32 {
        self.circles
            .iter()
            .map(|c| c.weight_at(p))
            .fold(0.0, f32::max)
    }

    /// Whether any circle covers `p`.
    pub fn covers(&self, p: Point2) -> bool {
        self.circles.iter().any(|c| c.covers(p))
    }
}

impl From<Circle> for Footprint {
    fn from(circle: Circle) -> Self {
        Self::single(circle)
    }
}

/// A region of cells targeted by a write.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Inclusive axis-aligned rectangle of cells.
    Rect(CellRect),
    /// Smoothed circular footprint, evaluated at cell centres.
    Footprint(Footprint),
}

impl Shape {
    /// Whether cell `(x, y)` belongs to the shape.
    #[inline]
    pub fn covers(&self, extent: &GridExtent, x: u32, y: u32) -> bool {
        match self {
            Shape::Rect(rect) => rect.contains(x, y),
            Shape::Footprint(fp) => fp.covers(extent.cell_center(x, y)),
        }
    }
}

impl From<CellRect> for Shape {
    fn from(rect: CellRect) -> Self {
        Shape::Rect(rect)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Footprint(Footprint::single(circle))
    }
}

impl From<Footprint> for Shape {
    fn from(fp: Footprint) -> Self {
        Shape::Footprint(fp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falloff_shape() {
        assert_eq!(falloff(0.0), 1.0);
        assert!((falloff(0.5) - (-(0.75f32.powi(6))).exp()).abs() < 1e-6);
        assert!(falloff(0.5) > 0.8 && falloff(0.5) < 0.9);
        assert!(falloff(1.0) > FOOTPRINT_THRESHOLD);
        assert!(falloff(1.05) < FOOTPRINT_THRESHOLD);
        assert!(falloff(2.0) < 1e-30);
    }

    #[test]
    fn degenerate_radius_is_floored() {
        let c = Circle::new(Point2::default(), 0.0);
        assert_eq!(c.radius(), MIN_RADIUS_FLOOR);
        assert!(c.weight_at(Point2::default()).is_finite());
        let n = Circle::new(Point2::default(), f32::NAN);
        assert_eq!(n.radius(), MIN_RADIUS_FLOOR);
        let neg = Circle::new(Point2::default(), -3.0);
        assert_eq!(neg.radius(), MIN_RADIUS_FLOOR);
    }

    #[test]
    fn circle_covers_center_not_far() {
        let c = Circle::new(Point2::new(0.2, 0.2), 0.1);
        assert!(c.covers(Point2::new(0.2, 0.2)));
        assert!(c.covers(Point2::new(0.28, 0.2)));
        assert!(!c.covers(Point2::new(0.35, 0.2)));
    }

    #[test]
    fn union_covers_both() {
        let a = Circle::new(Point2::new(-0.5, 0.0), 0.1);
        let b = Circle::new(Point2::new(0.5, 0.0), 0.1);
        let fp = Footprint::union(a, b);
        assert_eq!(fp.circles().len(), 2);
        assert!(fp.covers(Point2::new(-0.5, 0.0)));
        assert!(fp.covers(Point2::new(0.5, 0.0)));
        assert!(!fp.covers(Point2::new(0.0, 0.0)));
    }

    #[test]
    fn union_of_identical_circles_collapses() {
        let a = Circle::new(Point2::new(0.0, 0.0), 0.1);
        assert_eq!(Footprint::union(a, a).circles().len(), 1);
    }

    #[test]
    fn rect_shape_uses_cells() {
        let e = GridExtent::new(8, 8).unwrap();
        let s: Shape = CellRect::new(1, 1, 2, 2).into();
        assert!(s.covers(&e, 1, 2));
        assert!(!s.covers(&e, 3, 2));
    }
}
