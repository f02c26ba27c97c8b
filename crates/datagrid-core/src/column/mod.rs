//! Column definitions
//!
//! A [`Column`] names the row key a grid reads, how the raw value is
//! normalized for filtering and sorting ([`ColumnType`]), and how it is
//! presented.

pub mod base;
pub mod types;

pub use base::Column;
pub use types::{ColumnType, DEFAULT_DATE_FORMATS};
