//! Column filter evaluation for datagrid
//!
//! A [`FilterSpec`] pairs a [`Column`](datagrid_core::Column) with a
//! [`FilterOperator`] and one or more operands. It decides per row whether
//! the column value satisfies the condition ([`FilterSpec::apply_filter`])
//! and can be compiled into a SQL condition ([`FilterSpec::to_sql`]) for
//! query-backed sources.
//!
//! ## Operand semantics
//!
//! - `Between` is a joint check of an inclusive range and is never split
//!   into per-operand checks.
//! - Positive operators include a row when any operand matches.
//! - Negative operators exclude a row when any operand is matched by their
//!   positive counterpart.
//!
//! ## Example
//!
//! ```rust
//! use datagrid_core::{Column, ColumnType, Row};
//! use datagrid_filters::{FilterSet, FilterSpec};
//!
//! let age = Column::new("age", "Age").with_type(ColumnType::number());
//! let filters = FilterSet::new().with(FilterSpec::parse(age, "18 <> 65").unwrap());
//!
//! assert!(filters.apply(&Row::from([("age", 30)])));
//! assert!(!filters.apply(&Row::from([("age", 70)])));
//! ```

pub mod engine;
pub mod error;
pub mod set;
pub mod spec;
pub mod sql;

pub use datagrid_core::FilterOperator;
pub use error::{FilterError, FilterResult};
pub use set::FilterSet;
pub use spec::FilterSpec;
pub use sql::SqlCondition;
