//! Classification of the outermost ring of cells.

use crate::extent::GridExtent;

/// One of the four grid edges.
///
/// Only cells strictly between two corners are classified; the four
/// corner cells belong to no edge and keep their interior update.
///
/// # Examples
///
/// ```
/// use ripple_space::{Edge, GridExtent};
///
/// let e = GridExtent::new(4, 4).unwrap();
/// assert_eq!(Edge::classify(&e, 0, 1), Some(Edge::Left));
/// assert_eq!(Edge::classify(&e, 3, 2), Some(Edge::Right));
/// assert_eq!(Edge::classify(&e, 0, 0), None);
/// assert_eq!(Edge::classify(&e, 1, 1), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Column `x == 0`.
    Left,
    /// Column `x == width - 1`.
    Right,
    /// Row `y == 0`.
    Bottom,
    /// Row `y == height - 1`.
    Top,
}

impl Edge {
    /// All four edges.
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Bottom, Edge::Top];

    /// Which edge `(x, y)` lies on, or `None` for interior and corner cells.
    pub fn classify(extent: &GridExtent, x: u32, y: u32) -> Option<Edge> {
        let (w, h) = (extent.width(), extent.height());
        if w < 3 || h < 3 {
            return None;
        }
        let inner_x = x > 0 && x < w - 1;
        let inner_y = y > 0 && y < h - 1;
        match (x, y) {
            (0, _) if inner_y => Some(Edge::Left),
            (_, _) if x == w - 1 && inner_y => Some(Edge::Right),
            (_, 0) if inner_x => Some(Edge::Bottom),
            (_, _) if y == h - 1 && inner_x => Some(Edge::Top),
            _ => None,
        }
    }

    /// Unit step from a cell on this edge toward the interior.
    pub fn inward(self) -> (i32, i32) {
        match self {
            Edge::Left => (1, 0),
            Edge::Right => (-1, 0),
            Edge::Bottom => (0, 1),
            Edge::Top => (0, -1),
        }
    }

    /// Unit step along this edge.
    pub fn tangent(self) -> (i32, i32) {
        match self {
            Edge::Left | Edge::Right => (0, 1),
            Edge::Bottom | Edge::Top => (1, 0),
        }
    }
}
