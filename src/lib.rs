/*!
pendepth
========

**pendepth** computes the penetration depth between two overlapping 3-dimensional
convex shapes with the Expanding Polytope Algorithm (EPA).

The shapes are only known through their support mapping (see [`shape::SupportMap`]).
The query starts from a simplex of the Minkowski difference that encloses the origin,
typically produced by a GJK intersection test, and returns the penetration vector
together with one contact point on each shape:

```
# #[cfg(feature = "f32")] {
use pendepth3d::math::{Isometry, Point, Real, Vector};
use pendepth3d::query::gjk::{CSOPoint, Simplex};
use pendepth3d::query::{self, epa::EpaOptions};
use pendepth3d::shape::SupportMap;

struct Ball(Real);

impl SupportMap for Ball {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        Point::from(dir.normalize() * self.0)
    }
}

let pos12 = Isometry::translation(1.5, 0.0, 0.0);
let (ball1, ball2) = (Ball(1.0), Ball(1.0));
let simplex = Simplex::from_points(&[
    CSOPoint::from_shapes(&pos12, &ball1, &ball2, &Vector::x()),
    CSOPoint::from_shapes(&pos12, &ball1, &ball2, &-Vector::x()),
])
.unwrap();

let penetration = query::penetration_depth(&pos12, &ball1, &ball2, &simplex, EpaOptions::default())
    .expect("the query converged")
    .expect("the balls are penetrating");
assert!((penetration.depth() - 0.5).abs() < 1.0e-2);
# }
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unused_qualifications)]

#[cfg(all(feature = "f32", feature = "f64"))]
core::compile_error!("The `f32` and `f64` features are mutually exclusive.");

extern crate alloc;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod query;
pub mod shape;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Isometry3, Point3, UnitQuaternion, UnitVector3, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;

    /// The transformation matrix type.
    pub use Isometry3 as Isometry;

    /// The rotation type.
    pub type Rotation<N> = UnitQuaternion<N>;
}
