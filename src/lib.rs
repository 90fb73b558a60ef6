/*!
cleave
========

**cleave** splits 2-dimensional vector features along a user-drawn line.

The heart of the crate is the [`partition`] module: given one feature's
geometry (possibly multipart) and a [`Splitter`](query::Splitter), it decides
which sub-parts must be cut, delegates the actual cut to a
[`SplitPrimitive`](query::SplitPrimitive), and redistributes the pieces
between the geometry kept by the original feature and the geometries of new
features. Ambiguous multipart cuts are resolved through a
[`PartDecisionSource`](partition::PartDecisionSource).

The [`editing`] module drives a whole batch of features against a
[`FeatureStore`](editing::FeatureStore): candidate lookup, edit-command
scope, attribute defaults with split provenance, and topological points.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(feature = "f32", feature = "f64"))]
core::compile_error!("The `f32` and `f64` features are mutually exclusive.");

extern crate alloc;

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod editing;
pub mod feature;
pub mod partition;
pub mod query;
pub mod shape;
pub mod utils;

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
    pub use na::{Point2, Vector2};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 2;

    /// The point type.
    pub use Point2 as Point;

    /// The vector type.
    pub use Vector2 as Vector;
}

pub use crate::partition::partition;
