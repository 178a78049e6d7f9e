//! The two movable obstacles and their per-tick trails.
//!
//! Each obstacle remembers where it was when the last trail was painted.
//! A tick paints the union of the old and new footprints, then commits
//! the new position as the old one. Obstacle 0 is the eraser and paints
//! the background value; obstacle 1 is the writer and paints the mode
//! value, after the eraser so that it wins where they overlap.

use ripple_core::{MaterialMode, MaterialProperty, ObstacleId, Point2, PEC, VACUUM};
use ripple_space::Circle;
use smallvec::SmallVec;

/// Distance moved per tick during a join, as a fraction of the radius.
pub const JOIN_STEP_FRACTION: f32 = 0.4;

/// Below this separation the join snaps the rest of the way.
pub const JOIN_SNAP_DISTANCE: f32 = 0.1;

/// Below this separation the join is finished.
pub const JOIN_DONE_DISTANCE: f32 = 0.005;

/// One obstacle: a circle plus the circle last painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    center: Point2,
    radius: f32,
    painted: Circle,
}

impl Obstacle {
    fn new(center: Point2, radius: f32) -> Self {
        Self {
            center,
            radius,
            painted: Circle::new(center, radius),
        }
    }

    /// Current centre.
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Current radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Current footprint.
    pub fn circle(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }
}

/// A pending paint: the old and new footprint and the value to write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trail {
    /// Footprint at the previous commit.
    pub old: Circle,
    /// Current footprint.
    pub new: Circle,
    /// Property painted.
    pub property: MaterialProperty,
    /// Value painted.
    pub value: f32,
}

/// An in-progress join: `mover` walks toward the other obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Join {
    mover: usize,
}

impl Join {
    /// The obstacle that moves.
    pub fn mover(&self) -> ObstacleId {
        ObstacleId(self.mover as u8)
    }
}

/// Both obstacles, their radius floor and any running join.
#[derive(Clone, Debug, PartialEq)]
pub struct ObstacleSet {
    obstacles: [Obstacle; 2],
    min_radius: f32,
    join: Option<Join>,
}

impl ObstacleSet {
    /// Place both obstacles with `radius`, clamped into the domain.
    pub fn new(centers: [Point2; 2], radius: f32, min_radius: f32) -> Self {
        let radius = radius.max(min_radius);
        let obstacles = centers.map(|c| Obstacle::new(clamp_center(c, radius), radius));
        Self {
            obstacles,
            min_radius,
            join: None,
        }
    }

    /// Obstacle `id`, if it exists.
    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        id.slot().map(|i| &self.obstacles[i])
    }

    /// Both obstacles in id order.
    pub fn all(&self) -> &[Obstacle; 2] {
        &self.obstacles
    }

    /// The running join, if any.
    pub fn join(&self) -> Option<Join> {
        self.join
    }

    /// Move obstacle `slot`. The centre is clamped to `[r - 1, 1 - r]`
    /// on both axes so that the obstacle stays inside the domain.
    pub fn move_to(&mut self, slot: usize, center: Point2) {
        let o = &mut self.obstacles[slot];
        o.center = clamp_center(center, o.radius);
    }

    /// Resize obstacle `slot`, flooring the radius at `min_radius`.
    ///
    /// Returns `true` when the requested radius had to be clamped.
    pub fn resize(&mut self, slot: usize, radius: f32) -> bool {
        let clamped = radius < self.min_radius;
        let o = &mut self.obstacles[slot];
        o.radius = radius.max(self.min_radius);
        o.center = clamp_center(o.center, o.radius);
        if clamped {
            log::warn!(
                "obstacle {slot} radius {radius} clamped to {}",
                self.min_radius
            );
        }
        clamped
    }

    /// Restore both radii to `radius`.
    pub fn reset_radii(&mut self, radius: f32) {
        for slot in 0..self.obstacles.len() {
            self.resize(slot, radius);
        }
    }

    /// Start walking one obstacle toward the other.
    ///
    /// With `toward_first` the second obstacle moves.
    pub fn start_join(&mut self, toward_first: bool) {
        let mover = usize::from(toward_first);
        self.join = Some(Join { mover });
        log::debug!("join started, obstacle {mover} moving");
    }

    /// Stop any running join.
    pub fn cancel_join(&mut self) {
        self.join = None;
    }

    /// Advance the running join by one tick.
    ///
    /// The mover steps `0.4 * radius` along the line to the other
    /// centre. Once the gap is under [`JOIN_SNAP_DISTANCE`] it covers
    /// the whole gap, and once under [`JOIN_DONE_DISTANCE`] the join
    /// ends without moving.
    pub fn step_join(&mut self) {
        let Some(join) = self.join else {
            return;
        };
        let target = self.obstacles[1 - join.mover].center;
        let mover = &mut self.obstacles[join.mover];
        let gap = mover.center.distance(target);
        if gap < JOIN_DONE_DISTANCE {
            self.join = None;
            log::debug!("join finished");
            return;
        }
        let step = if gap < JOIN_SNAP_DISTANCE {
            gap
        } else {
            JOIN_STEP_FRACTION * mover.radius
        };
        mover.center = mover.center.lerp(target, (step / gap).min(1.0));
    }

    /// Trails to paint for `mode`, eraser first. Line-source mode paints nothing.
    pub fn trails(&self, mode: MaterialMode, dielectric_paint: f32) -> SmallVec<[Trail; 2]> {
        let (property, background, paint) = match mode {
            MaterialMode::Pec => (MaterialProperty::MaterialFlag, VACUUM, PEC),
            MaterialMode::Dielectric => (MaterialProperty::Dielectric, 1.0, dielectric_paint),
            MaterialMode::LineSource => return SmallVec::new(),
        };
        self.obstacles
            .iter()
            .zip([background, paint])
            .map(|(o, value)| Trail {
                old: o.painted,
                new: o.circle(),
                property,
                value,
            })
            .collect()
    }

    /// Record the current footprints as painted.
    pub fn commit(&mut self) {
        for o in &mut self.obstacles {
            o.painted = o.circle();
        }
    }
}

fn clamp_center(c: Point2, radius: f32) -> Point2 {
    let lo = radius - 1.0;
    let hi = 1.0 - radius;
    if lo > hi {
        return Point2::new(0.0, 0.0);
    }
    Point2::new(c.x.clamp(lo, hi), c.y.clamp(lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> ObstacleSet {
        ObstacleSet::new([Point2::new(-0.4, 0.2), Point2::new(0.4, 0.2)], 0.125, 0.001)
    }

    #[test]
    fn centres_are_clamped_into_domain() {
        let mut s = set();
        s.move_to(0, Point2::new(-5.0, 0.99));
        let c = s.all()[0].center();
        assert_eq!(c, Point2::new(-0.875, 0.875));
    }

    #[test]
    fn radius_is_floored() {
        let mut s = set();
        assert!(s.resize(1, -3.0));
        assert_eq!(s.all()[1].radius(), 0.001);
        assert!(!s.resize(1, 0.3));
        assert_eq!(s.all()[1].radius(), 0.3);
        s.reset_radii(0.125);
        assert!(s.all().iter().all(|o| o.radius() == 0.125));
    }

    #[test]
    fn growing_radius_pulls_centre_inward() {
        let mut s = set();
        s.move_to(0, Point2::new(0.85, 0.0));
        s.resize(0, 0.5);
        assert_eq!(s.all()[0].center().x, 0.5);
    }

    #[test]
    fn join_walks_then_snaps_then_ends() {
        let mut s = set();
        s.start_join(false);
        let start = s.all()[0].center();
        s.step_join();
        let moved = s.all()[0].center();
        assert!((start.distance(moved) - 0.05).abs() < 1e-6);
        assert_eq!(s.join().map(|j| j.mover()), Some(ObstacleId::FIRST));

        let mut ticks = 0;
        while s.join().is_some() {
            s.step_join();
            ticks += 1;
            assert!(ticks < 100, "join never finished");
        }
        let gap = s.all()[0].center().distance(s.all()[1].center());
        assert!(gap < JOIN_DONE_DISTANCE);
        // the target never moves
        assert_eq!(s.all()[1].center(), Point2::new(0.4, 0.2));
    }

    #[test]
    fn join_toward_first_moves_second() {
        let mut s = set();
        s.start_join(true);
        s.step_join();
        assert_eq!(s.all()[0].center(), Point2::new(-0.4, 0.2));
        assert!(s.all()[1].center().x < 0.4);
    }

    #[test]
    fn trails_pair_eraser_with_writer() {
        let mut s = set();
        let t = s.trails(MaterialMode::Pec, 3.0);
        assert_eq!(t.len(), 2);
        assert_eq!(t[0].value, VACUUM);
        assert_eq!(t[1].value, PEC);
        assert_eq!(t[0].old, t[0].new);

        s.move_to(1, Point2::new(0.5, 0.5));
        let t = s.trails(MaterialMode::Dielectric, 3.0);
        assert_eq!(t[1].property, MaterialProperty::Dielectric);
        assert_eq!(t[1].value, 3.0);
        assert_eq!(t[1].old.center(), Point2::new(0.4, 0.2));
        assert_eq!(t[1].new.center(), Point2::new(0.5, 0.5));

        s.commit();
        let t = s.trails(MaterialMode::Dielectric, 3.0);
        assert_eq!(t[1].old, t[1].new);
        assert!(s.trails(MaterialMode::LineSource, 3.0).is_empty());
    }
}
