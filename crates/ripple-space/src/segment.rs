//! Line segments in normalized coordinates.

use ripple_core::Point2;

/// A straight segment between two points.
///
/// # Examples
///
/// ```
/// use ripple_core::Point2;
/// use ripple_space::Segment;
///
/// let s = Segment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
/// assert_eq!(s.distance_to(Point2::new(0.5, 0.25)), 0.25);
/// assert_eq!(s.distance_to(Point2::new(2.0, 0.0)), 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// First endpoint.
    pub start: Point2,
    /// Second endpoint.
    pub end: Point2,
}

impl Segment {
    /// Construct a segment.
    pub const fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Length of the segment.
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Closest point of the segment to `p`.
    pub fn closest_point(&self, p: Point2) -> Point2 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len2 = dx * dx + dy * dy;
        if len2 <= 0.0 {
            return self.start;
        }
        let t = ((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / len2;
        self.start.lerp(self.end, t.clamp(0.0, 1.0))
    }

    /// Euclidean distance from `p` to the segment.
    pub fn distance_to(&self, p: Point2) -> f32 {
        p.distance(self.closest_point(p))
    }
}
