//! The boundary with the GJK intersection test.
//!
//! GJK itself is not part of this crate: it only has to hand over the simplex it ended
//! with, through the [`InitialSimplex`] trait.

pub use self::cso_point::CSOPoint;
pub use self::simplex::{InitialSimplex, Simplex};
pub use self::special_support_maps::{ConstantOrigin, ConstantPoint};

mod cso_point;
mod simplex;
mod special_support_maps;
