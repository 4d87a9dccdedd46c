//! Convex polygons and the separating-edge intersection test
//!
//! Polygons are wound **counter-clockwise** (y axis up). With that winding a
//! point `p` lies strictly inside the directed edge `e1 -> e2` when
//! `cross(p - e1, e2 - e1) < 0`. A polygon is separated from another when one
//! of its edges has no vertex of the other strictly inside it.
//!
//! Touching polygons (shared edge or vertex) are reported as not intersecting.

use super::primitives::Aabb2;
use crate::foundation::math::{utils::cross, Transform2, Vec2};

/// Ordered list of vertices forming a convex polygon
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon2 {
    vertices: Vec<Vec2>,
}

impl Polygon2 {
    /// Create a polygon from its vertices, in the given order
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    /// Create a polygon from `(x, y)` pairs
    pub fn from_points(points: &[(f32, f32)]) -> Self {
        Self::new(points.iter().map(|&(x, y)| Vec2::new(x, y)).collect())
    }

    /// Axis-aligned rectangle, wound counter-clockwise
    pub fn rectangle(min: Vec2, max: Vec2) -> Self {
        Self::new(vec![
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, max.y),
        ])
    }

    /// Vertices in winding order
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True for a polygon without vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Directed edges, closing back to the first vertex
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let count = self.vertices.len();
        (0..count).map(move |i| (self.vertices[i], self.vertices[(i + 1) % count]))
    }

    /// Signed area, positive for counter-clockwise polygons
    pub fn signed_area(&self) -> f32 {
        0.5 * self.edges().map(|(p1, p2)| cross(p1, p2)).sum::<f32>()
    }

    /// True unless the polygon is wound clockwise. Degenerate polygons
    /// (points, segments) count as counter-clockwise.
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() >= 0.0
    }

    /// Reverse the vertex order of a clockwise polygon
    pub fn normalize_winding(&mut self) {
        if !self.is_counter_clockwise() {
            self.vertices.reverse();
        }
    }

    /// Bounding box of the vertices
    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_points(&self.vertices)
    }

    /// Write `transform` applied to this polygon into `out`, rebuilding
    /// `bounds` from scratch.
    ///
    /// Mirroring transforms would flip the winding, so the output order is
    /// reversed for them to keep `out` counter-clockwise.
    pub fn transform_into(&self, transform: &Transform2, out: &mut Polygon2, bounds: &mut Aabb2) {
        out.vertices.clear();
        bounds.clear();
        for vertex in &self.vertices {
            let world = transform.transform_point(*vertex);
            out.vertices.push(world);
            bounds.add_point(world);
        }
        if transform.determinant() < 0.0 {
            out.vertices.reverse();
        }
    }

    /// True if `point` is strictly inside every edge
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.has_extent() && self.edges().all(|(e1, e2)| Self::edge_contains_point(e1, e2, point))
    }

    /// True if some edge of `self` has no vertex of `other` strictly inside it.
    ///
    /// Zero-length edges never separate, which lets single-point polygons
    /// (bullets) be tested against solid shapes.
    pub fn separating_axis_present(&self, other: &Polygon2) -> bool {
        self.edges()
            .filter(|(e1, e2)| e1 != e2)
            .any(|(e1, e2)| {
                !other
                    .vertices
                    .iter()
                    .any(|&point| Self::edge_contains_point(e1, e2, point))
            })
    }

    /// Convex polygon overlap test, applied symmetrically.
    ///
    /// Empty polygons never intersect, nor do two polygons that both lack a
    /// non-degenerate edge (two points).
    pub fn intersects(&self, other: &Polygon2) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        if !self.has_extent() && !other.has_extent() {
            return false;
        }
        !self.separating_axis_present(other) && !other.separating_axis_present(self)
    }

    fn has_extent(&self) -> bool {
        self.edges().any(|(e1, e2)| e1 != e2)
    }

    fn edge_contains_point(e1: Vec2, e2: Vec2, point: Vec2) -> bool {
        cross(point - e1, e2 - e1) < 0.0
    }
}

impl From<Vec<Vec2>> for Polygon2 {
    fn from(vertices: Vec<Vec2>) -> Self {
        Self::new(vertices)
    }
}
