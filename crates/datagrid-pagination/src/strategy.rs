//! Fast and safe pagination strategies for SQL selects

use crate::adapter::PageSource;
use crate::error::Result;
use crate::query::{fetch_count, fetch_rows, SelectQuery};
use crate::shape::StrategyKind;
use async_trait::async_trait;
use datagrid_core::{Row, Value};
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

/// A way of counting and slicing a query
///
/// Both operations re-query the database on every call. Only the choice
/// of strategy is fixed.
pub trait PaginationStrategy: PageSource {
	/// The technique this strategy uses
	fn kind(&self) -> StrategyKind;
}

fn limit_params(mut params: Vec<Value>, offset: usize, limit: usize) -> Vec<Value> {
	params.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
	params.push(Value::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));
	params
}

/// Counts and slices directly on the query
///
/// Correct as long as the query has no `HAVING` and is not `DISTINCT`.
/// The count drops the select list and ordering; for grouped queries it
/// counts the groups.
#[derive(Debug, Clone)]
pub struct FastStrategy {
	pool: SqlitePool,
	query: Arc<SelectQuery>,
}

impl FastStrategy {
	/// Creates the strategy for a query
	pub fn new(pool: SqlitePool, query: Arc<SelectQuery>) -> Self {
		Self { pool, query }
	}

	/// The `COUNT(*)` statement and its parameters
	pub fn count_sql(&self) -> (String, Vec<Value>) {
		let (from_where, params) = self.query.render_from_where();
		if self.query.shape().has_group_by {
			let mut inner = format!("SELECT 1 {}", from_where);
			self.query.push_group_by(&mut inner);
			(format!("SELECT COUNT(*) FROM ({}) AS grouped", inner), params)
		} else {
			(format!("SELECT COUNT(*) {}", from_where), params)
		}
	}

	/// The page statement; its last two parameters are limit and offset
	pub fn items_sql(&self, offset: usize, limit: usize) -> (String, Vec<Value>) {
		let (select, params) = self.query.render(true);
		(
			format!("{} LIMIT ? OFFSET ?", select),
			limit_params(params, offset, limit),
		)
	}
}

#[async_trait]
impl PageSource for FastStrategy {
	async fn get_items(&self, offset: usize, limit: usize) -> Result<Vec<Row>> {
		if limit == 0 {
			return Ok(Vec::new());
		}
		let (sql, params) = self.items_sql(offset, limit);
		fetch_rows(&self.pool, &sql, &params).await
	}

	async fn count(&self) -> Result<usize> {
		let (sql, params) = self.count_sql();
		fetch_count(&self.pool, &sql, &params).await
	}
}

impl PaginationStrategy for FastStrategy {
	fn kind(&self) -> StrategyKind {
		StrategyKind::Fast
	}
}

/// Counts and slices through a subquery wrapping the full select
///
/// Issues a separate count query and page query, both of which stay
/// correct when `HAVING` or `DISTINCT` change the number of result rows.
#[derive(Debug, Clone)]
pub struct SafeStrategy {
	pool: SqlitePool,
	query: Arc<SelectQuery>,
}

impl SafeStrategy {
	/// Creates the strategy for a query
	pub fn new(pool: SqlitePool, query: Arc<SelectQuery>) -> Self {
		Self { pool, query }
	}

	/// The `COUNT(*)` statement and its parameters
	pub fn count_sql(&self) -> (String, Vec<Value>) {
		let (select, params) = self.query.render(false);
		(format!("SELECT COUNT(*) FROM ({}) AS counted", select), params)
	}

	/// The page statement; its last two parameters are limit and offset
	pub fn items_sql(&self, offset: usize, limit: usize) -> (String, Vec<Value>) {
		let (select, params) = self.query.render(true);
		(
			format!("SELECT * FROM ({}) AS paged LIMIT ? OFFSET ?", select),
			limit_params(params, offset, limit),
		)
	}
}

#[async_trait]
impl PageSource for SafeStrategy {
	async fn get_items(&self, offset: usize, limit: usize) -> Result<Vec<Row>> {
		if limit == 0 {
			return Ok(Vec::new());
		}
		let (sql, params) = self.items_sql(offset, limit);
		fetch_rows(&self.pool, &sql, &params).await
	}

	async fn count(&self) -> Result<usize> {
		let (sql, params) = self.count_sql();
		fetch_count(&self.pool, &sql, &params).await
	}
}

impl PaginationStrategy for SafeStrategy {
	fn kind(&self) -> StrategyKind {
		StrategyKind::Safe
	}
}
