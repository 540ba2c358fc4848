use crate::math::{Real, DEFAULT_EPSILON};

/// The default number of support points a penetration depth query may create.
pub const DEFAULT_MAX_SUPPORT_POINTS: usize = 100;
/// The default number of triangles a penetration depth query may create.
pub const DEFAULT_MAX_TRIANGLES: usize = 200;

/// Accuracy and capacity settings of the [`Epa`](super::Epa) penetration depth query.
///
/// The expansion stops as soon as the gap between the closest face of the polytope and
/// the support point found beyond it satisfies:
///
/// `far_dist - dist2 <= max(rel_error * far_dist, tol_error * max_vertex)`
///
/// where `dist2` is the squared distance from the origin to the face, `far_dist` the
/// projection of the new support point onto the face's closest point, and `max_vertex`
/// the largest squared vertex norm reported by GJK. Since `dist2 <= depth² <= far_dist² / dist2`,
/// the reported depth then underestimates the exact one by a factor of at most `1 - rel_error`.
///
/// The capacities bound the work done by one query: exhausting either of them yields a
/// [`PenetrationError`](crate::query::PenetrationError) instead of an imprecise result.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EpaOptions {
    /// The relative error tolerated on the penetration depth.
    ///
    /// Every halving of this error roughly doubles the number of triangles the query needs.
    pub rel_error: Real,
    /// The absolute tolerance, relative to the largest squared vertex norm seen by GJK.
    pub tol_error: Real,
    /// The maximum number of support points, including the ones of the initial simplex.
    pub max_support_points: usize,
    /// The maximum number of triangles allocated by one query.
    pub max_triangles: usize,
}

impl Default for EpaOptions {
    fn default() -> Self {
        Self {
            rel_error: 1.0e-2,
            tol_error: DEFAULT_EPSILON,
            max_support_points: DEFAULT_MAX_SUPPORT_POINTS,
            max_triangles: DEFAULT_MAX_TRIANGLES,
        }
    }
}

impl EpaOptions {
    /// Sets the relative error tolerated on the penetration depth.
    pub fn with_rel_error(mut self, rel_error: Real) -> Self {
        self.rel_error = rel_error;
        self
    }

    /// Sets the absolute tolerance multiplier.
    pub fn with_tol_error(mut self, tol_error: Real) -> Self {
        self.tol_error = tol_error;
        self
    }

    /// Sets the support point and triangle capacities.
    pub fn with_capacities(mut self, max_support_points: usize, max_triangles: usize) -> Self {
        self.max_support_points = max_support_points;
        self.max_triangles = max_triangles;
        self
    }

    /// The absolute tolerance for a GJK run whose largest squared vertex norm is `max_vertex`.
    #[inline]
    pub fn absolute_tolerance(&self, max_vertex: Real) -> Real {
        self.tol_error * max_vertex
    }
}
