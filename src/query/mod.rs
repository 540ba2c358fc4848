//! Non-persistent geometric queries.
//!
//! The main entry point is [`query::penetration_depth()`](penetration_depth) which computes
//! the penetration vector and contact points of two overlapping convex shapes. Repeated
//! queries should keep an [`epa::Epa`] workspace around instead, to reuse its buffers.

pub use self::epa::{penetration_depth, Penetration};
pub use self::error::{PenetrationError, TopologyError};

pub mod epa;
mod error;
pub mod gjk;
