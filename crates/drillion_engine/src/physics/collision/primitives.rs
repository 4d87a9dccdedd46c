//! Primitive collision volumes
//!
//! Axis-aligned bounding boxes used by the broad phase.

use crate::foundation::math::Vec2;

/// Axis-aligned bounding box given by its min and max corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl Default for Aabb2 {
    fn default() -> Self {
        Self::cleared()
    }
}

impl Aabb2 {
    /// Create a box from its corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// An empty box (min = +inf, max = -inf) ready for [`add_point`](Self::add_point)
    pub fn cleared() -> Self {
        Self {
            min: Vec2::new(f32::INFINITY, f32::INFINITY),
            max: Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Create the smallest box containing all `points`
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec2>) -> Self {
        let mut aabb = Self::cleared();
        for point in points {
            aabb.add_point(*point);
        }
        aabb
    }

    /// Reset to the empty box
    pub fn clear(&mut self) {
        *self = Self::cleared();
    }

    /// Grow the box to contain `point`
    pub fn add_point(&mut self, point: Vec2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// True if no point has been added since the last clear
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Strict overlap test: boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Aabb2) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Strict containment: points on the boundary are outside
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.min.x < point.x && point.x < self.max.x && self.min.y < point.y && point.y < self.max.y
    }

    /// Center of the box
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Width and height
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleared_box_accumulates_points() {
        let mut aabb = Aabb2::cleared();
        assert!(aabb.is_empty());

        aabb.add_point(Vec2::new(1.0, -2.0));
        aabb.add_point(Vec2::new(-3.0, 4.0));

        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, Vec2::new(-3.0, -2.0));
        assert_eq!(aabb.max, Vec2::new(1.0, 4.0));
        assert_eq!(aabb.center(), Vec2::new(-1.0, 1.0));
        assert_eq!(aabb.size(), Vec2::new(4.0, 6.0));
    }

    #[test]
    fn test_intersects_is_strict() {
        let a = Aabb2::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let touching = Aabb2::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        let overlapping = Aabb2::new(Vec2::new(0.5, 0.5), Vec2::new(2.0, 2.0));

        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }

    #[test]
    fn test_point_box_inside_larger_box() {
        let block = Aabb2::new(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        let bullet = Aabb2::from_points(&[Vec2::zeros()]);

        assert!(block.intersects(&bullet));
        assert!(block.contains_point(Vec2::zeros()));
        assert!(!block.contains_point(Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_empty_box_intersects_nothing() {
        let empty = Aabb2::cleared();
        let block = Aabb2::new(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        assert!(!empty.intersects(&block));
        assert!(!block.intersects(&empty));
    }
}
