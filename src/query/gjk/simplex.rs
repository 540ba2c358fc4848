use crate::math::Real;
use crate::query::gjk::CSOPoint;
use arrayvec::ArrayVec;

/// The simplex handed over by a GJK intersection test.
///
/// This is the only thing the penetration depth query needs from GJK: the last simplex
/// it built (one to four points of the Minkowski difference, which enclose the origin when
/// the shapes overlap) and the largest squared norm of the vertices it has seen.
pub trait InitialSimplex {
    /// The vertices of the simplex. Only the first four points are considered.
    fn points(&self) -> &[CSOPoint];

    /// The largest squared norm among the Minkowski difference vertices seen by GJK.
    ///
    /// This scales the absolute tolerance of the penetration depth query, so it has the
    /// same units as the squared distances the query compares.
    fn max_vertex(&self) -> Real;
}

/// A simplex with at most four vertices, tracking the squared norm of its largest vertex.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Simplex {
    points: ArrayVec<CSOPoint, 4>,
    max_vertex: Real,
}

impl Simplex {
    /// Creates an empty simplex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simplex from up to four points.
    ///
    /// Returns `None` if more than four points are given.
    pub fn from_points(points: &[CSOPoint]) -> Option<Self> {
        let mut result = Self::new();

        for pt in points {
            if !result.push(*pt) {
                return None;
            }
        }

        Some(result)
    }

    /// Overrides the largest squared vertex norm, e.g., with the one tracked by GJK over
    /// all its iterations instead of only the final simplex vertices.
    pub fn with_max_vertex(mut self, max_vertex: Real) -> Self {
        self.max_vertex = max_vertex;
        self
    }

    /// Adds a vertex to this simplex.
    ///
    /// Returns `false` (and leaves the simplex unchanged) if it already has four vertices.
    pub fn push(&mut self, pt: CSOPoint) -> bool {
        if self.points.try_push(pt).is_err() {
            return false;
        }

        self.max_vertex = self.max_vertex.max(pt.point.coords.norm_squared());
        true
    }

    /// Removes every vertex of this simplex.
    pub fn clear(&mut self) {
        self.points.clear();
        self.max_vertex = 0.0;
    }

    /// The number of vertices of this simplex.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Is this simplex empty?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The i-th vertex of this simplex.
    pub fn point(&self, i: usize) -> &CSOPoint {
        &self.points[i]
    }
}

impl InitialSimplex for Simplex {
    fn points(&self) -> &[CSOPoint] {
        &self.points
    }

    fn max_vertex(&self) -> Real {
        self.max_vertex
    }
}
