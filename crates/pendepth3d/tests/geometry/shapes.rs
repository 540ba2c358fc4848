//! Support mapped shapes used by the tests.

use pendepth3d::math::{Isometry, Point, Real, Vector};
use pendepth3d::query::gjk::{CSOPoint, Simplex};
use pendepth3d::shape::SupportMap;

/// A ball centered at the origin.
pub struct Ball {
    pub radius: Real,
}

impl Ball {
    pub fn new(radius: Real) -> Self {
        Self { radius }
    }
}

impl SupportMap for Ball {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        Point::from(dir.normalize() * self.radius)
    }
}

/// An axis-aligned box centered at the origin.
pub struct Cuboid {
    pub half_extents: Vector<Real>,
}

impl Cuboid {
    pub fn new(half_extents: Vector<Real>) -> Self {
        Self { half_extents }
    }
}

impl SupportMap for Cuboid {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        Point::from(self.half_extents.zip_map(dir, |h, d| h.copysign(d)))
    }
}

/// The convex hull of a set of points.
pub struct ConvexPoints {
    pub points: Vec<Point<Real>>,
}

impl SupportMap for ConvexPoints {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let mut best = self.points[0];

        for pt in &self.points[1..] {
            if pt.coords.dot(dir) > best.coords.dot(dir) {
                best = *pt;
            }
        }

        best
    }
}

/// Directions toward the vertices of a regular tetrahedron.
pub fn tetrahedron_dirs() -> [Vector<Real>; 4] {
    [
        Vector::new(1.0, 1.0, 1.0),
        Vector::new(1.0, -1.0, -1.0),
        Vector::new(-1.0, 1.0, -1.0),
        Vector::new(-1.0, -1.0, 1.0),
    ]
}

/// The simplex made of the CSO support points along the given directions.
pub fn simplex_along<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    dirs: &[Vector<Real>],
) -> Simplex
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let points: Vec<_> = dirs
        .iter()
        .map(|dir| CSOPoint::from_shapes(pos12, g1, g2, dir))
        .collect();
    Simplex::from_points(&points).expect("at most four directions")
}
