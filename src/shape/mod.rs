//! Shapes understood by the penetration depth queries.
//!
//! Concrete shapes live outside of this crate: anything implementing [`SupportMap`]
//! can take part in a query.

#[doc(inline)]
pub use self::support_map::SupportMap;

mod support_map;
