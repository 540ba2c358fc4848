//! The EPA algorithm for penetration depth computation.
//!
//! The polytope grown by the algorithm is a [`TriangleMesh`]: an arena of triangles glued
//! along their edges, which must stay a closed 2-manifold around the origin. Faces seen
//! from a new support point are replaced by the [`SilhouetteWalker`].

pub use self::epa3::Epa;
pub use self::mesh::{Edge, Triangle, TriangleId, TriangleMesh};
pub use self::options::{EpaOptions, DEFAULT_MAX_SUPPORT_POINTS, DEFAULT_MAX_TRIANGLES};
pub use self::silhouette::SilhouetteWalker;

use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use crate::query::gjk::InitialSimplex;
use crate::query::PenetrationError;
use crate::shape::SupportMap;

mod epa3;
mod mesh;
mod options;
mod silhouette;

/// The result of a penetration depth query.
///
/// Every field is expressed in the local-space of the first shape.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Penetration {
    /// The point of the Minkowski difference boundary closest to the origin.
    ///
    /// Translating the second shape by this vector brings both shapes in contact.
    pub vector: Vector<Real>,
    /// The contact point on the first shape.
    pub point1: Point<Real>,
    /// The contact point on the second shape.
    pub point2: Point<Real>,
}

impl Penetration {
    /// The penetration depth, i.e., the length of the penetration vector.
    #[inline]
    pub fn depth(&self) -> Real {
        self.vector.norm()
    }

    /// The direction of the penetration vector, pointing from the second shape toward the
    /// first one.
    ///
    /// Returns `None` if the penetration depth is zero.
    #[inline]
    pub fn normal(&self) -> Option<UnitVector<Real>> {
        UnitVector::try_new(self.vector, 0.0)
    }
}

/// Computes the penetration vector and contact points of two overlapping shapes.
///
/// This runs a fresh [`Epa`] workspace. Repeated queries should keep their own workspace
/// around and call [`Epa::closest_points`] instead.
///
/// See [`Epa::closest_points`] for the meaning of the arguments and of the result.
pub fn penetration_depth<G1, G2, S>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    simplex: &S,
    options: EpaOptions,
) -> Result<Option<Penetration>, PenetrationError>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
    S: ?Sized + InitialSimplex,
{
    Epa::with_options(options).closest_points(pos12, g1, g2, simplex)
}
