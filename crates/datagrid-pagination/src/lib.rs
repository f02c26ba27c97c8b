//! Pagination for datagrid
//!
//! Rows reach a grid through a [`PageSource`], which serves a slice of rows
//! (`get_items(offset, limit)`) and a total (`count()`):
//!
//! - [`ArrayAdapter`] slices rows already in memory.
//! - [`QueryAdapter`] runs a [`SelectQuery`] against SQLite with `sqlx`.
//!
//! A query adapter picks its [`PaginationStrategy`] once, from the query's
//! [`QueryShape`]:
//!
//! | Shape | Strategy |
//! |---|---|
//! | `HAVING` or `DISTINCT` | [`SafeStrategy`]: count and slice through a subquery |
//! | anything else | [`FastStrategy`]: count and slice directly |
//!
//! [`Paginator`] turns any source into 1-based numbered [`Page`]s.

pub mod adapter;
pub mod error;
pub mod page;
pub mod query;
pub mod shape;
pub mod strategy;

pub use adapter::{ArrayAdapter, PageSource, QueryAdapter};
pub use error::{PaginationError, Result};
pub use page::{Page, PageParam, Paginator};
pub use query::SelectQuery;
pub use shape::{select_strategy, QueryShape, StrategyKind};
pub use strategy::{FastStrategy, PaginationStrategy, SafeStrategy};
