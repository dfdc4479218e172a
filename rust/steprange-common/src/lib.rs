//! Core definitions (error types and the value model), relied upon by all steprange-* crates.

pub mod error;
pub mod result;
pub mod value;

pub use result::Result;
pub use value::Value;
