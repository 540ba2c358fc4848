use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::SupportMap;

/// A support mapping that is a single point.
///
/// Pairing a shape with a `ConstantPoint` turns the penetration depth query into the
/// projection of that point onto the boundary of the shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConstantPoint(pub Point<Real>);

impl SupportMap for ConstantPoint {
    #[inline]
    fn support_point(&self, m: &Isometry<Real>, _: &Vector<Real>) -> Point<Real> {
        m * self.0
    }

    #[inline]
    fn local_support_point(&self, _: &Vector<Real>) -> Point<Real> {
        self.0
    }
}

/// A support mapping that is the point at (0.0, 0.0, 0.0).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConstantOrigin;

impl SupportMap for ConstantOrigin {
    #[inline]
    fn support_point(&self, m: &Isometry<Real>, _: &Vector<Real>) -> Point<Real> {
        m.translation.vector.into()
    }

    #[inline]
    fn local_support_point(&self, _: &Vector<Real>) -> Point<Real> {
        Point::origin()
    }
}
