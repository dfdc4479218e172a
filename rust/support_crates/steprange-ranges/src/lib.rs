//! Lazily derived sequences described by chains of stops and steps.
//!
//! A [`Range`] is an ordered chain of [`Point`]s. Each point is either a
//! [`PointKind::Stop`], which always stands for its own value, or a
//! [`PointKind::Step`], which, paired with an adjacent step, expands into the
//! run of integers between the two. A point may carry a [`Source`], in which
//! case its value is an index into that source and every derived position is
//! resolved through it.
//!
//! # Key Types
//!
//! - [`Point`] - A single stop or step with an optional indirection source
//! - [`Range`] - A chain of points, iterated through [`RangeIter`]
//! - [`NumberRange`] - The half-open integer run `start..end` in either direction
//! - [`Source`] - Integer-indexed lookup used for indirection
//! - [`DerivationLimits`] - Bounds enforced by the checked materialization paths
//!
//! # Example
//!
//! ```
//! use steprange_ranges::{NumberRange, Range};
//! use steprange_common::Value;
//!
//! let descending = NumberRange::new(3, 0);
//! assert_eq!(descending.ints().collect::<Vec<_>>(), vec![3, 2, 1]);
//!
//! let mut chain = Range::new();
//! chain.append_stop("head").append_step(0).append_step(2);
//! assert_eq!(
//!     chain.collect(),
//!     vec![Some(Value::from("head")), Some(Value::Int(0)), Some(Value::Int(1))]
//! );
//! ```

pub mod limits;
pub mod number_range;
pub mod point;
pub mod range;
pub mod source;

pub use limits::DerivationLimits;
pub use number_range::NumberRange;
pub use point::{Point, PointKind};
pub use range::{Range, RangeIter, Scan};
pub use source::{SharedSource, Source};
