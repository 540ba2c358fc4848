use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::SupportMap;
use core::ops::Sub;

/// A point of the Minkowski difference of two shapes, also called their
/// Configuration-Space Obstacle (CSO).
///
/// Besides the point itself, the two support points it was computed from are kept so that
/// any barycentric combination of CSO points can be mapped back onto each shape.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CSOPoint {
    /// The point of the Minkowski difference, `orig1 - orig2`.
    pub point: Point<Real>,
    /// The support point on the first shape.
    pub orig1: Point<Real>,
    /// The support point on the second shape.
    pub orig2: Point<Real>,
}

impl CSOPoint {
    /// Builds the CSO point `orig1 - orig2`.
    pub fn new(orig1: Point<Real>, orig2: Point<Real>) -> Self {
        CSOPoint {
            point: Point::from(orig1 - orig2),
            orig1,
            orig2,
        }
    }

    /// The support point of the Minkowski difference of `g1` and `g2` in the direction `dir`.
    ///
    /// `g2` is placed in the local-space of `g1` by `pos12`. The direction and the
    /// resulting points are expressed in the local-space of `g1`.
    pub fn from_shapes<G1, G2>(pos12: &Isometry<Real>, g1: &G1, g2: &G2, dir: &Vector<Real>) -> Self
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        CSOPoint::new(
            g1.local_support_point(dir),
            g2.support_point(pos12, &-*dir),
        )
    }
}

impl Sub<CSOPoint> for CSOPoint {
    type Output = Vector<Real>;

    #[inline]
    fn sub(self, rhs: CSOPoint) -> Vector<Real> {
        self.point - rhs.point
    }
}
