//! Three-dimensional penetration depth queries using the Expanding Polytope Algorithm.

use crate::math::{Isometry, Point, Real, Rotation, Vector};
use crate::query::gjk::{CSOPoint, ConstantOrigin, InitialSimplex};
use crate::query::PenetrationError;
use crate::shape::SupportMap;
use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Ordering;
use na::{RealField, Unit};
use num::Bounded;

use super::mesh::{Edge, TriangleId, TriangleMesh};
use super::options::EpaOptions;
use super::silhouette::SilhouetteWalker;
use super::Penetration;

/// Faces and gluing of the initial tetrahedron.
const TETRAHEDRON_FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];
const TETRAHEDRON_LINKS: [((usize, usize), (usize, usize)); 6] = [
    ((0, 0), (1, 2)),
    ((0, 1), (3, 2)),
    ((0, 2), (2, 0)),
    ((1, 0), (2, 2)),
    ((1, 1), (3, 0)),
    ((2, 1), (3, 1)),
];

/// Faces and gluing of the double pyramid built on a triangle.
const HEXAHEDRON_FACES: [[usize; 3]; 6] = [
    [0, 1, 3],
    [1, 2, 3],
    [2, 0, 3],
    [0, 2, 4],
    [2, 1, 4],
    [1, 0, 4],
];
const HEXAHEDRON_LINKS: [((usize, usize), (usize, usize)); 9] = [
    ((0, 1), (1, 2)),
    ((1, 1), (2, 2)),
    ((2, 1), (0, 2)),
    ((0, 0), (5, 0)),
    ((1, 0), (4, 0)),
    ((2, 0), (3, 0)),
    ((3, 1), (4, 2)),
    ((4, 1), (5, 2)),
    ((5, 1), (3, 2)),
];

#[derive(Copy, Clone, Debug, PartialEq)]
struct Candidate {
    id: TriangleId,
    neg_dist2: Real,
}

impl Candidate {
    fn dist2(&self) -> Real {
        -self.neg_dist2
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        if self.neg_dist2 < other.neg_dist2 {
            Ordering::Less
        } else if self.neg_dist2 > other.neg_dist2 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Which vertex of a tetrahedron lies on the wrong side of the origin, if any.
///
/// For each face, the origin and the opposite vertex must be strictly separated by the
/// plane through the origin parallel to the face. This is equivalent to the origin being
/// strictly inside of the tetrahedron. Returns the index of the first vertex whose
/// opposite face fails the test, or `None` if the origin is inside.
fn bad_vertex(pts: &[Point<Real>; 4]) -> Option<usize> {
    let [p1, p2, p3, p4] = pts.map(|p| p.coords);
    let same_side = |n: Vector<Real>, a: &Vector<Real>, b: &Vector<Real>| {
        (n.dot(a) > 0.0) == (n.dot(b) > 0.0)
    };

    if same_side((p2 - p1).cross(&(p3 - p1)), &p1, &p4) {
        return Some(3);
    }

    if same_side((p4 - p2).cross(&(p3 - p2)), &p2, &p1) {
        return Some(0);
    }

    if same_side((p4 - p3).cross(&(p1 - p3)), &p3, &p2) {
        return Some(1);
    }

    if same_side((p2 - p4).cross(&(p1 - p4)), &p4, &p3) {
        return Some(2);
    }

    None
}

/// The Expanding Polytope Algorithm in 3D.
///
/// This structure computes the penetration depth between two convex shapes when they are
/// overlapping, starting from the simplex a GJK intersection test ended with.
///
/// # How it works
///
/// EPA maintains a convex polytope, inside the Minkowski difference of both shapes, that
/// encloses the origin. Its faces whose closest point to the origin lies inside of them are
/// kept in a priority queue. The algorithm iteratively:
///
/// 1. Pops the face closest to the origin.
/// 2. Computes the support point of the Minkowski difference toward that face.
/// 3. Stops if that point is not significantly farther than the face.
/// 4. Otherwise removes every face visible from the new point and closes the hole with a
///    fan of triangles joining the new point to the boundary of the removed region.
///
/// Each popped face also tightens an upper bound of the squared penetration depth, so the
/// search ends as soon as no queued face can beat it.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use pendepth3d::math::{Isometry, Point, Real, Vector};
/// use pendepth3d::query::epa::{Epa, EpaOptions};
/// use pendepth3d::query::gjk::{CSOPoint, Simplex};
/// use pendepth3d::shape::SupportMap;
///
/// struct Cube(Real);
///
/// impl SupportMap for Cube {
///     fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
///         Point::from(dir.map(|x| self.0.copysign(x)))
///     }
/// }
///
/// let pos12 = Isometry::translation(1.75, 0.0, 0.0);
/// let (cube1, cube2) = (Cube(1.0), Cube(1.0));
/// let dirs = [
///     Vector::new(1.0, 1.0, 1.0),
///     Vector::new(1.0, -1.0, -1.0),
///     Vector::new(-1.0, 1.0, -1.0),
///     Vector::new(-1.0, -1.0, 1.0),
/// ];
/// let points = dirs.map(|dir| CSOPoint::from_shapes(&pos12, &cube1, &cube2, &dir));
/// let simplex = Simplex::from_points(&points).unwrap();
///
/// // The same workspace can be reused for many queries.
/// let mut epa = Epa::with_options(EpaOptions::default());
/// let penetration = epa
///     .closest_points(&pos12, &cube1, &cube2, &simplex)
///     .expect("the query converged")
///     .expect("the cubes are penetrating");
/// assert!((penetration.depth() - 0.25).abs() < 1.0e-4);
/// # }
/// ```
///
/// # Failure cases
///
/// The query returns `Ok(None)` when there is no penetration to report: a touching
/// contact, or an initial simplex too degenerate to build a polytope around the origin.
/// It returns a [`PenetrationError`] when the capacities configured in [`EpaOptions`] are
/// exhausted before convergence.
#[derive(Clone, Debug, Default)]
pub struct Epa {
    options: EpaOptions,
    vertices: Vec<CSOPoint>,
    mesh: TriangleMesh,
    walker: SilhouetteWalker,
    heap: BinaryHeap<Candidate>,
}

impl Epa {
    /// Creates a new instance of the 3D Expanding Polytope Algorithm with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new instance of the 3D Expanding Polytope Algorithm.
    pub fn with_options(options: EpaOptions) -> Self {
        Self {
            options,
            mesh: TriangleMesh::new(options.max_triangles),
            ..Self::default()
        }
    }

    /// The options used by the next queries.
    pub fn options(&self) -> &EpaOptions {
        &self.options
    }

    /// Replaces the options used by the next queries.
    pub fn set_options(&mut self, options: EpaOptions) {
        self.options = options;
    }

    /// The polytope built by the last query.
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// The support points computed by the last query.
    pub fn vertices(&self) -> &[CSOPoint] {
        &self.vertices
    }

    fn reset(&mut self) {
        self.vertices.clear();
        self.mesh.reset(self.options.max_triangles);
        self.heap.clear();
    }

    /// Projects the origin onto the boundary of the given shape.
    ///
    /// The origin is expected to be inside of `g`, which is positioned by `m`. The simplex
    /// must enclose the origin in the Minkowski difference between `g` (in its local-space)
    /// and the origin (in the local-space of `g`).
    ///
    /// Returns the projected point, expressed in the local-space of `g`.
    pub fn project_origin<G, S>(
        &mut self,
        m: &Isometry<Real>,
        g: &G,
        simplex: &S,
    ) -> Result<Option<Point<Real>>, PenetrationError>
    where
        G: ?Sized + SupportMap,
        S: ?Sized + InitialSimplex,
    {
        Ok(self
            .closest_points(&m.inverse(), g, &ConstantOrigin, simplex)?
            .map(|penetration| penetration.point1))
    }

    /// Computes the penetration vector and contact points of two overlapping shapes.
    ///
    /// `pos12` places `g2` in the local-space of `g1`, and every returned quantity is
    /// expressed in the local-space of `g1`. The `simplex` vertices must be points of the
    /// Minkowski difference `g1 - pos12 * g2` expressed in that same frame, as built by
    /// [`CSOPoint::from_shapes`].
    ///
    /// Returns:
    /// - `Ok(Some(penetration))` with the smallest vector found that separates the shapes
    ///   once `g2` is moved along it.
    /// - `Ok(None)` if there is no penetration depth to report.
    /// - `Err(_)` if the configured capacities were exhausted before convergence.
    pub fn closest_points<G1, G2, S>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        simplex: &S,
    ) -> Result<Option<Penetration>, PenetrationError>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
        S: ?Sized + InitialSimplex,
    {
        self.reset();

        for pt in simplex.points().iter().take(4) {
            let _ = self.push_vertex(*pt)?;
        }

        /*
         * Initialization.
         */
        let built = match self.vertices.len() {
            // Touching contact: the shapes collide but do not penetrate.
            0 | 1 => return Ok(None),
            2 => self.init_from_segment(pos12, g1, g2)?,
            3 => self.init_from_triangle(pos12, g1, g2)?,
            _ => self.init_from_tetrahedron(pos12, g1, g2)?,
        };

        if !built {
            return Ok(None);
        }

        if self.heap.is_empty() {
            log::debug!(
                "Hit unexpected state in EPA: failed to project the origin on the initial polytope."
            );
            return Ok(None);
        }

        let tolerance = self.options.absolute_tolerance(simplex.max_vertex());
        let mut upper2 = <Real as Bounded>::max_value();
        let mut best = None;

        /*
         * Run the expansion.
         */
        while let Some(candidate) = self.heap.pop() {
            if !self.mesh[candidate.id].is_obsolete() {
                let id = candidate.id;
                let triangle = self.mesh[id];
                let closest = *triangle.closest();
                best = Some(id);

                let index = self.push_vertex(CSOPoint::from_shapes(pos12, g1, g2, &closest))?;
                let support = self.vertices[index].point;
                let far_dist = support.coords.dot(&closest);

                debug_assert!(
                    far_dist > 0.0,
                    "The support mapping returned a point behind the polytope."
                );

                if far_dist <= 0.0 {
                    log::debug!(
                        "Hit unexpected state in EPA: support point {} is not beyond face {}.",
                        index,
                        id
                    );
                    return Ok(None);
                }

                upper2 = upper2.min(far_dist * far_dist / triangle.dist2());

                let error = far_dist - triangle.dist2();
                let already_known = triangle
                    .indices()
                    .iter()
                    .any(|i| self.vertices[*i].point == support);

                if error <= (self.options.rel_error * far_dist).max(tolerance) || already_known {
                    break;
                }

                let first = self.mesh.free();

                match self.walker.expand(&mut self.mesh, &self.vertices, id, index) {
                    Ok(true) => {}
                    // Numerically stuck: this face is as good as it gets.
                    Ok(false) => break,
                    Err(err) => {
                        if err == PenetrationError::BrokenTopology {
                            log::warn!("EPA failed to expand face {}: {}.", id, err);
                        }
                        return Err(err);
                    }
                }

                for new_id in first..self.mesh.free() {
                    self.add_candidate(new_id, upper2);
                }
            }

            match self.heap.peek() {
                Some(top) if top.dist2() <= upper2 => {}
                _ => break,
            }
        }

        let Some(id) = best else {
            return Ok(None);
        };

        let triangle = &self.mesh[id];
        let (point1, point2) = triangle.closest_points(&self.vertices);

        Ok(Some(Penetration {
            vector: *triangle.closest(),
            point1,
            point2,
        }))
    }

    fn push_vertex(&mut self, pt: CSOPoint) -> Result<usize, PenetrationError> {
        if self.vertices.len() >= self.options.max_support_points {
            log::warn!(
                "EPA support point capacity of {} exhausted before convergence.",
                self.options.max_support_points
            );
            return Err(PenetrationError::SupportPointCapacity {
                capacity: self.options.max_support_points,
            });
        }

        self.vertices.push(pt);
        Ok(self.vertices.len() - 1)
    }

    fn add_candidate(&mut self, id: TriangleId, upper2: Real) {
        let triangle = &self.mesh[id];

        if triangle.is_closest_internal() && triangle.dist2() <= upper2 {
            self.heap.push(Candidate {
                id,
                neg_dist2: -triangle.dist2(),
            });
        }
    }

    /// Blows a segment up into a tetrahedron, by adding three support points around it.
    fn init_from_segment<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
    ) -> Result<bool, PenetrationError>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let Some(dir) = Unit::try_new(self.vertices[1] - self.vertices[0], 0.0) else {
            return Ok(false);
        };

        let rot = Rotation::from_axis_angle(&dir, Real::two_pi() / 3.0);
        let aux1 = dir.cross(&Vector::<Real>::ith(dir.iamin(), 1.0));
        let aux2 = rot * aux1;
        let aux3 = rot * aux2;

        for aux in [aux1, aux2, aux3] {
            let _ = self.push_vertex(CSOPoint::from_shapes(pos12, g1, g2, &aux))?;
        }

        let [y0, y1, y2, y3, y4] = [0, 1, 2, 3, 4].map(|i| self.vertices[i].point);

        if bad_vertex(&[y0, y2, y3, y4]).is_none() {
            self.vertices[1] = self.vertices[4];
        } else if bad_vertex(&[y1, y2, y3, y4]).is_none() {
            self.vertices[0] = self.vertices[4];
        } else {
            // The origin is not inside of the initial polytope.
            return Ok(false);
        }

        self.vertices.truncate(4);
        self.init_from_tetrahedron(pos12, g1, g2)
    }

    fn init_from_tetrahedron<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
    ) -> Result<bool, PenetrationError>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let pts = [0, 1, 2, 3].map(|i| self.vertices[i].point);

        if let Some(bad) = bad_vertex(&pts) {
            if bad < 3 {
                self.vertices[bad] = self.vertices[3];
            }

            self.vertices.truncate(3);
            return self.init_from_triangle(pos12, g1, g2);
        }

        self.build_polytope(&TETRAHEDRON_FACES, &TETRAHEDRON_LINKS)
    }

    /// Blows a triangle up into a double pyramid, with one support point on each side.
    fn init_from_triangle<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
    ) -> Result<bool, PenetrationError>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let n = (self.vertices[1] - self.vertices[0]).cross(&(self.vertices[2] - self.vertices[0]));

        if n.norm_squared() == 0.0 {
            return Ok(false);
        }

        self.vertices.truncate(3);
        let _ = self.push_vertex(CSOPoint::from_shapes(pos12, g1, g2, &n))?;
        let _ = self.push_vertex(CSOPoint::from_shapes(pos12, g1, g2, &-n))?;

        self.build_polytope(&HEXAHEDRON_FACES, &HEXAHEDRON_LINKS)
    }

    /// Allocates the given faces, glues them, and queues them as candidates.
    ///
    /// Returns `Ok(false)` if a face is degenerate or has the origin on its plane.
    fn build_polytope(
        &mut self,
        faces: &[[usize; 3]],
        links: &[((usize, usize), (usize, usize))],
    ) -> Result<bool, PenetrationError> {
        for &[i0, i1, i2] in faces {
            match self.mesh.new_triangle(&self.vertices, i0, i1, i2)? {
                Some(id) if self.mesh[id].dist2() > 0.0 => {}
                _ => return Ok(false),
            }
        }

        for &((f0, e0), (f1, e1)) in links {
            if !self.mesh.link(Edge::new(f0, e0), Edge::new(f1, e1)) {
                log::warn!(
                    "EPA failed to glue the initial polytope: edge {} of face {} and edge {} of face {} do not match.",
                    e0,
                    f0,
                    e1,
                    f1
                );
                return Err(PenetrationError::BrokenTopology);
            }
        }

        for id in 0..faces.len() {
            self.add_candidate(id, <Real as Bounded>::max_value());
        }

        Ok(true)
    }
}
