use std::ops::Index;

use crate::geometry::{EPSILON, FloatType, WorldPoint, WorldVector};

#[derive(Clone, Debug, PartialEq)]
pub struct Triangle<Point>([Point; 3]);

impl<Point> Triangle<Point> {
    pub fn new(a: Point, b: Point, c: Point) -> Triangle<Point> {
        Triangle([a, b, c])
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = &'a Point> {
        self.0.iter()
    }
}

impl<Point> Index<usize> for Triangle<Point> {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Triangle<WorldPoint> {
    /// Returns the edge vectors opposite to each vertex, running around the triangle:
    /// `[p3 - p2, p1 - p3, p2 - p1]`.
    pub fn edges(&self) -> [WorldVector; 3] {
        [self[2] - self[1], self[0] - self[2], self[1] - self[0]]
    }

    /// Returns a normal vector of the triangle, not normalized.
    /// Its length is twice the area of the triangle.
    pub fn normal(&self) -> WorldVector {
        let [e1, e2, _] = self.edges();
        e1.cross(&e2)
    }

    pub fn is_degenerate(&self) -> bool {
        self.normal().norm() < EPSILON
    }

    /// Barycentric coordinates of a point lying in the plane of the triangle,
    /// computed as ratios of signed sub-triangle areas to the area of the whole triangle.
    /// Returns `None` for degenerate triangles.
    pub fn barycentric(&self, point: &WorldPoint) -> Option<BarycentricCoordinates> {
        let normal = self.normal();
        let doubled_area = normal.norm();
        if doubled_area < EPSILON {
            return None;
        }
        let unit_normal = normal / doubled_area;

        let edges = self.edges();
        // Each edge is paired with the vertex it ends at; the sub triangle
        // (edge, point) is the one opposite to the remaining vertex.
        let weight = |edge: &WorldVector, end: &WorldPoint| {
            edge.cross(&(point - end)).dot(&unit_normal) / doubled_area
        };

        Some(BarycentricCoordinates {
            weights: [
                weight(&edges[0], &self[2]),
                weight(&edges[1], &self[0]),
                weight(&edges[2], &self[1]),
            ],
        })
    }
}

/// Weights of the three triangle vertices, summing to one.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BarycentricCoordinates {
    pub weights: [FloatType; 3],
}

impl BarycentricCoordinates {
    /// True if all weights are at least `-tolerance`.
    pub fn is_inside(&self, tolerance: FloatType) -> bool {
        self.weights.iter().all(|w| *w >= -tolerance)
    }
}
