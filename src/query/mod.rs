//! Non-persistent geometric queries.
//!
//! * [`Splitter`] is the line features are cut along.
//! * [`SplitPrimitive`] is the single-geometry split operation; [`PlanarSplit`]
//!   implements it for [`Geometry`](crate::shape::Geometry).
//! * [`intersection_test_geometry_splitter`] (and the other functions of the
//!   [`details`] module) determine if a shape and a splitter intersect.

pub use self::intersection_test::intersection_test_geometry_splitter;
pub use self::split::{
    InvalidSplitter, PlanarSplit, SplitOutput, SplitPrimitive, SplitPrimitiveError,
    SplitTolerances, Splitter,
};

mod intersection_test;
mod split;

/// Queries dedicated to specific pairs of shapes.
pub mod details {
    pub use super::intersection_test::*;
}
