//! Core types for datagrid
//!
//! This crate holds the vocabulary shared by the filter engine, the
//! pagination adapters and the renderers:
//!
//! - [`Value`] and [`Row`]: raw records as delivered by a data source
//! - [`Comparable`]: a value after column-type normalization
//! - [`Column`] and [`ColumnType`]: how a row key is normalized and displayed
//! - [`FilterOperator`]: the closed set of filter comparisons
//! - [`GridSettings`]: TOML-loadable defaults

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod error;
pub mod operator;
pub mod row;
pub mod settings;
pub mod value;

// Re-exports for convenience
pub use column::{Column, ColumnType};
pub use error::{CoreError, Result};
pub use operator::FilterOperator;
pub use row::Row;
pub use settings::GridSettings;
pub use value::{Comparable, Value};
