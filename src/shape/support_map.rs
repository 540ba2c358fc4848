//! Traits for support mapping based shapes.

use crate::math::{Isometry, Point, Real, Vector};
use alloc::boxed::Box;

/// Traits of convex shapes representable by a support mapping function.
///
/// The support mapping of a convex shape associates a direction `dir` with the point
/// of the shape maximizing the dot product with `dir`. Implementations must be
/// deterministic, and for any point `x` of the shape:
///
/// `support(dir).dot(dir) >= x.dot(dir)`
///
/// The penetration depth computation relies on this to grow its polytope outward.
/// Directions passed to [`SupportMap::local_support_point`] are never zero but are
/// not normalized.
pub trait SupportMap {
    /// Evaluates the support function of this shape in its local-space.
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real>;

    /// Evaluates the support function of this shape transformed by `transform`.
    ///
    /// Both `dir` and the returned point are expressed in the frame `transform` maps to.
    fn support_point(&self, transform: &Isometry<Real>, dir: &Vector<Real>) -> Point<Real> {
        let local_dir = transform.inverse_transform_vector(dir);
        transform * self.local_support_point(&local_dir)
    }
}

impl<S: ?Sized + SupportMap> SupportMap for &S {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        (**self).local_support_point(dir)
    }
}

impl<S: ?Sized + SupportMap> SupportMap for Box<S> {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        (**self).local_support_point(dir)
    }
}
