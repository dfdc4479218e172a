//! Row-major zip-longest over heterogeneous sources.
//!
//! A [`Container`] collects sources of different shapes (ranges, points,
//! plain values, iterators), drains each into a concrete sequence and zips
//! them into rows as long as the longest source. Short sources are padded
//! with `None`.

pub mod container;
pub mod zip_source;

pub use container::{Container, Row};
pub use zip_source::{Concrete, ZipSource};
