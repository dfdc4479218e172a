//! # steprange: lazy stop/step ranges and zip-longest aggregation
//!
//! A sequence is described as a chain of typed points. A *stop* stands for
//! its own value; two adjacent *steps* stand for the half-open run of
//! integers between them. Any point may index into an external source, in
//! which case the values it contributes are looked up in that source.
//! Sequences are derived lazily and can be iterated any number of times.
//!
//! A [`zip::Container`] gathers such sequences together with plain values and
//! iterators and zips them into rows as long as the longest input, padding
//! the rest with `None`.
//!
//! ## Module Organization
//!
//! * [`common`] - The [`Value`] model and the error types
//! * [`ranges`] - Points, ranges, number ranges, sources and derivation limits
//! * [`zip`] - The zip-longest container
//!
//! ## Example
//!
//! ```
//! use steprange::{Container, NumberRange, Value};
//!
//! assert_eq!(NumberRange::new(5, 1).ints().collect::<Vec<_>>(), vec![5, 4, 3, 2]);
//!
//! let mut container = Container::new();
//! container
//!     .add_number_range(1, 4)
//!     .add_sources([Value::from("a"), Value::from("b")]);
//! container.zip();
//! assert_eq!(
//!     container.to_json().unwrap(),
//!     serde_json::json!([[1, "a", "b"], [2, null, null], [3, null, null]])
//! );
//! ```
//!
//! ## Errors
//!
//! The range and zip operations themselves never fail: out-of-range lookups
//! and exhausted sources resolve to `None`. Errors are reserved for invalid
//! [`DerivationLimits`] and for the checked paths
//! ([`Range::try_collect`], [`Container::try_zip`]) refusing oversized input.

pub use steprange_common as common;
pub use steprange_ranges as ranges;
pub use steprange_zip as zip;

pub use steprange_common::{
    Result, Value,
    error::{Error, ErrorKind},
};
pub use steprange_ranges::{
    DerivationLimits, NumberRange, Point, PointKind, Range, RangeIter, Scan, SharedSource, Source,
};
pub use steprange_zip::{Container, Row, ZipSource};
