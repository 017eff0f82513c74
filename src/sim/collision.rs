//! Axis-aligned bounds and overlap queries
//!
//! Every entity derives its box from its logical position on demand, so a box
//! can never lag behind a move or a frame change.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of `size` centered on `center`
    #[inline]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Whether `point` lies inside the box (edges inclusive)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Play area `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a point into the play area
    #[inline]
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.clamp(0.0, self.width), pos.y.clamp(0.0, self.height))
    }

    /// Whether a point is inside the play area (edges inclusive)
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

/// Index of the first box in `boxes` overlapping `target` (collection order)
pub fn first_overlap<I>(target: &Aabb, boxes: I) -> Option<usize>
where
    I: IntoIterator<Item = Aabb>,
{
    boxes.into_iter().position(|b| b.overlaps(target))
}

/// Index of the point nearest to `origin`
pub fn nearest<I>(origin: Vec2, points: I) -> Option<usize>
where
    I: IntoIterator<Item = Vec2>,
{
    points
        .into_iter()
        .enumerate()
        .map(|(i, p)| (i, p.distance_squared(origin)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_and_touching_edges() {
        let a = Aabb::from_center(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::from_center(Vec2::new(9.0, 0.0), Vec2::new(10.0, 10.0));
        let c = Aabb::from_center(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Sharing an edge is not a hit
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_from_center_roundtrip() {
        let b = Aabb::from_center(Vec2::new(5.0, 7.0), Vec2::new(4.0, 6.0));
        assert_eq!(b.center(), Vec2::new(5.0, 7.0));
        assert_eq!(b.size(), Vec2::new(4.0, 6.0));
        assert!(b.contains(Vec2::new(3.0, 4.0)));
        assert!(!b.contains(Vec2::new(2.9, 4.0)));
    }

    #[test]
    fn test_first_overlap_is_collection_order() {
        let target = Aabb::from_center(Vec2::ZERO, Vec2::splat(10.0));
        let boxes = [
            Aabb::from_center(Vec2::new(100.0, 0.0), Vec2::splat(10.0)),
            Aabb::from_center(Vec2::new(4.0, 0.0), Vec2::splat(10.0)),
            Aabb::from_center(Vec2::new(0.0, 0.0), Vec2::splat(10.0)),
        ];
        // Index 2 is closer, but index 1 comes first
        assert_eq!(first_overlap(&target, boxes), Some(1));
        assert_eq!(first_overlap(&target, std::iter::empty::<Aabb>()), None);
    }

    #[test]
    fn test_nearest() {
        let points = [Vec2::new(10.0, 0.0), Vec2::new(-3.0, 0.0), Vec2::new(0.0, 5.0)];
        assert_eq!(nearest(Vec2::ZERO, points), Some(1));
        assert_eq!(nearest(Vec2::ZERO, std::iter::empty::<Vec2>()), None);
    }

    #[test]
    fn test_arena_clamp() {
        let arena = Arena::new(100.0, 50.0);
        assert_eq!(arena.clamp(Vec2::new(-5.0, 60.0)), Vec2::new(0.0, 50.0));
        assert!(arena.contains(Vec2::new(100.0, 0.0)));
        assert!(!arena.contains(Vec2::new(100.1, 0.0)));
    }
}
