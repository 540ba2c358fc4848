//! The triangle mesh grown by the Expanding Polytope Algorithm.
//!
//! Triangles are stored in an arena and refer to each other by index. A triangle is never
//! freed individually: it is marked obsolete once it leaves the polytope, and only the
//! arena's allocation cursor can move backward, when a speculative expansion is undone.

use crate::math::{Point, Real, Vector};
use crate::query::gjk::CSOPoint;
use crate::query::{PenetrationError, TopologyError};
use alloc::vec::Vec;
use core::ops::Index;

use super::options::DEFAULT_MAX_TRIANGLES;

/// The index of a triangle in a [`TriangleMesh`].
pub type TriangleId = usize;

/// Index of the edge following `i` along the boundary of a triangle.
#[inline]
pub(crate) fn circ_next(i: usize) -> usize {
    (i + 1) % 3
}

/// Index of the edge preceding `i` along the boundary of a triangle.
#[inline]
pub(crate) fn circ_prev(i: usize) -> usize {
    (i + 2) % 3
}

/// A directed edge of a triangle.
///
/// The edge `index` of a triangle goes from its vertex `index` to its vertex `index + 1`
/// (modulo 3).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    /// The triangle this edge belongs to.
    pub triangle: TriangleId,
    /// The local index of this edge, in `0..3`.
    pub index: usize,
}

impl Edge {
    /// Creates the edge `index` of `triangle`.
    #[inline]
    pub fn new(triangle: TriangleId, index: usize) -> Self {
        Self { triangle, index }
    }
}

/// A triangular face of the polytope, with the projection of the origin onto its plane.
///
/// The projection is stored as unnormalized barycentric coordinates `(λ1, λ2)` with
/// respect to `(p1 - p0, p2 - p0)` and their common denominator `det`, so that the same
/// coordinates can be applied to the vertices of either original shape.
#[derive(Copy, Clone, Debug)]
pub struct Triangle {
    indices: [usize; 3],
    adj: [Option<Edge>; 3],
    obsolete: bool,
    det: Real,
    lambda1: Real,
    lambda2: Real,
    closest: Vector<Real>,
    dist2: Real,
}

impl Triangle {
    /// Builds the triangle with the vertices `indices` of `vertices`.
    ///
    /// Returns `None` if the three vertices are affinely dependent (`det <= 0`).
    pub fn new(vertices: &[CSOPoint], indices: [usize; 3]) -> Option<Self> {
        let p0 = vertices[indices[0]].point.coords;
        let v1 = vertices[indices[1]].point.coords - p0;
        let v2 = vertices[indices[2]].point.coords - p0;

        let v1dv1 = v1.norm_squared();
        let v1dv2 = v1.dot(&v2);
        let v2dv2 = v2.norm_squared();
        let p0dv1 = p0.dot(&v1);
        let p0dv2 = p0.dot(&v2);

        // Gram determinant, non-negative up to rounding.
        let det = v1dv1 * v2dv2 - v1dv2 * v1dv2;

        if det <= 0.0 {
            return None;
        }

        let lambda1 = p0dv2 * v1dv2 - p0dv1 * v2dv2;
        let lambda2 = p0dv1 * v1dv2 - p0dv2 * v1dv1;
        let closest = p0 + (v1 * lambda1 + v2 * lambda2) / det;

        Some(Self {
            indices,
            adj: [None; 3],
            obsolete: false,
            det,
            lambda1,
            lambda2,
            closest,
            dist2: closest.norm_squared(),
        })
    }

    /// The indices of the vertices of this triangle.
    #[inline]
    pub fn indices(&self) -> [usize; 3] {
        self.indices
    }

    /// The edge glued to the edge `i` of this triangle, if any.
    #[inline]
    pub fn adj(&self, i: usize) -> Option<Edge> {
        self.adj[i]
    }

    /// Has this triangle been removed from the polytope?
    #[inline]
    pub fn is_obsolete(&self) -> bool {
        self.obsolete
    }

    /// The Gram determinant of the edges `(p1 - p0, p2 - p0)`.
    #[inline]
    pub fn det(&self) -> Real {
        self.det
    }

    /// The unnormalized barycentric coordinates `(λ1, λ2)` of the closest point.
    #[inline]
    pub fn lambdas(&self) -> (Real, Real) {
        (self.lambda1, self.lambda2)
    }

    /// The point of this triangle's plane closest to the origin.
    #[inline]
    pub fn closest(&self) -> &Vector<Real> {
        &self.closest
    }

    /// The squared distance between the origin and this triangle's plane.
    #[inline]
    pub fn dist2(&self) -> Real {
        self.dist2
    }

    /// Does the projection of the origin lie inside of this triangle (boundary included)?
    #[inline]
    pub fn is_closest_internal(&self) -> bool {
        self.lambda1 >= 0.0 && self.lambda2 >= 0.0 && self.lambda1 + self.lambda2 <= self.det
    }

    /// Is `point` strictly on the outer side of this triangle's plane?
    #[inline]
    pub fn is_visible_from(&self, point: &Point<Real>) -> bool {
        let lever = point.coords - self.closest;
        self.closest.dot(&lever) > 0.0
    }

    /// Applies the barycentric coordinates of the closest point to another set of vertices.
    pub fn interpolate(&self, pts: [&Point<Real>; 3]) -> Point<Real> {
        let p0 = *pts[0];
        p0 + ((pts[1] - p0) * self.lambda1 + (pts[2] - p0) * self.lambda2) / self.det
    }

    /// The points of both original shapes matching the closest point of this triangle.
    pub fn closest_points(&self, vertices: &[CSOPoint]) -> (Point<Real>, Point<Real>) {
        let [a, b, c] = self.indices.map(|i| &vertices[i]);
        (
            self.interpolate([&a.orig1, &b.orig1, &c.orig1]),
            self.interpolate([&a.orig2, &b.orig2, &c.orig2]),
        )
    }
}

/// A fixed-capacity arena of triangles glued along their edges.
#[derive(Clone, Debug)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    capacity: usize,
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TRIANGLES)
    }
}

impl TriangleMesh {
    /// Creates an empty mesh able to hold `capacity` triangles.
    pub fn new(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Removes every triangle and sets the capacity of this mesh.
    pub fn reset(&mut self, capacity: usize) {
        self.triangles.clear();
        self.capacity = capacity;
    }

    /// The maximum number of triangles of this mesh.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The index the next allocated triangle will get.
    #[inline]
    pub fn free(&self) -> TriangleId {
        self.triangles.len()
    }

    /// Forgets every triangle allocated at or after `cursor`.
    pub fn truncate(&mut self, cursor: TriangleId) {
        self.triangles.truncate(cursor);
    }

    /// All the triangles allocated so far, obsolete ones included.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Allocates the triangle `(i0, i1, i2)`.
    ///
    /// Returns `Ok(None)` without consuming any slot if the triangle is degenerate, and an
    /// error if the arena is full.
    pub fn new_triangle(
        &mut self,
        vertices: &[CSOPoint],
        i0: usize,
        i1: usize,
        i2: usize,
    ) -> Result<Option<TriangleId>, PenetrationError> {
        if self.triangles.len() >= self.capacity {
            log::warn!(
                "EPA triangle capacity of {} exhausted before convergence.",
                self.capacity
            );
            return Err(PenetrationError::TriangleCapacity {
                capacity: self.capacity,
            });
        }

        Ok(Triangle::new(vertices, [i0, i1, i2]).map(|triangle| {
            self.triangles.push(triangle);
            self.triangles.len() - 1
        }))
    }

    /// Marks a triangle as removed from (or restored into) the polytope.
    #[inline]
    pub fn set_obsolete(&mut self, id: TriangleId, obsolete: bool) {
        self.triangles[id].obsolete = obsolete;
    }

    /// The index of the vertex an edge starts from.
    #[inline]
    pub fn source(&self, edge: Edge) -> usize {
        self.triangles[edge.triangle].indices[edge.index]
    }

    /// The index of the vertex an edge ends at.
    #[inline]
    pub fn target(&self, edge: Edge) -> usize {
        self.triangles[edge.triangle].indices[circ_next(edge.index)]
    }

    /// Can these two edges be glued together, i.e., are they the same segment traversed in
    /// opposite directions?
    #[inline]
    pub fn are_opposite(&self, edge0: Edge, edge1: Edge) -> bool {
        self.source(edge0) == self.target(edge1) && self.target(edge0) == self.source(edge1)
    }

    /// Glues two edges to each other.
    ///
    /// Returns `false` and leaves the mesh unchanged if the edges are not opposite.
    pub fn link(&mut self, edge0: Edge, edge1: Edge) -> bool {
        if !self.are_opposite(edge0, edge1) {
            return false;
        }

        self.triangles[edge0.triangle].adj[edge0.index] = Some(edge1);
        self.triangles[edge1.triangle].adj[edge1.index] = Some(edge0);
        true
    }

    /// Makes `edge0` point to `edge1` without updating `edge1`.
    pub fn half_link(&mut self, edge0: Edge, edge1: Edge) {
        debug_assert!(self.are_opposite(edge0, edge1));
        self.triangles[edge0.triangle].adj[edge0.index] = Some(edge1);
    }

    /// Checks that the live triangles form a closed, connected, edge-linked 2-manifold.
    pub fn check_topology(&self) -> Result<(), TopologyError> {
        let mut live = 0;

        for (i, triangle) in self.triangles.iter().enumerate() {
            if triangle.obsolete {
                continue;
            }

            live += 1;

            for k in 0..3 {
                let adj = triangle.adj[k].ok_or(TopologyError::Dangling {
                    triangle: i,
                    edge: k,
                })?;
                let neighbor = &self.triangles[adj.triangle];

                if neighbor.obsolete {
                    return Err(TopologyError::ObsoleteNeighbor {
                        triangle: i,
                        edge: k,
                        neighbor: adj.triangle,
                    });
                }

                if neighbor.adj[adj.index] != Some(Edge::new(i, k)) {
                    return Err(TopologyError::OneWayLink {
                        triangle: i,
                        edge: k,
                    });
                }

                if !self.are_opposite(Edge::new(i, k), adj) {
                    return Err(TopologyError::MismatchedEndpoints {
                        triangle: i,
                        edge: k,
                    });
                }

                for l in 0..k {
                    if triangle.adj[l].map(|e| e.triangle) == Some(adj.triangle) {
                        return Err(TopologyError::RepeatedNeighbor {
                            triangle: i,
                            neighbor: adj.triangle,
                        });
                    }
                }
            }
        }

        let Some(start) = self.triangles.iter().position(|t| !t.obsolete) else {
            return Ok(());
        };

        let mut visited = alloc::vec![false; self.triangles.len()];
        let mut stack = alloc::vec![start];
        let mut reached = 0;
        visited[start] = true;

        while let Some(id) = stack.pop() {
            reached += 1;

            for adj in self.triangles[id].adj.iter().flatten() {
                if !visited[adj.triangle] {
                    visited[adj.triangle] = true;
                    stack.push(adj.triangle);
                }
            }
        }

        if reached != live {
            return Err(TopologyError::Disconnected { reached, live });
        }

        Ok(())
    }
}

impl Index<TriangleId> for TriangleMesh {
    type Output = Triangle;

    #[inline]
    fn index(&self, id: TriangleId) -> &Triangle {
        &self.triangles[id]
    }
}
