//! Page sources: the uniform items/count contract and its adapters

use crate::error::Result;
use crate::query::SelectQuery;
use crate::shape::{select_strategy, StrategyKind};
use crate::strategy::{FastStrategy, PaginationStrategy, SafeStrategy};
use async_trait::async_trait;
use datagrid_core::Row;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

/// Anything that can serve a slice of rows and a total count
///
/// `get_items(offset, limit)` returns at most `limit` rows starting at the
/// 0-based `offset`, in the source's order. A `limit` of 0 yields no rows.
#[async_trait]
pub trait PageSource: Send + Sync {
	/// Fetches up to `limit` rows starting at `offset`
	async fn get_items(&self, offset: usize, limit: usize) -> Result<Vec<Row>>;

	/// Total number of rows, ignoring offset and limit
	async fn count(&self) -> Result<usize>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for Box<S> {
	async fn get_items(&self, offset: usize, limit: usize) -> Result<Vec<Row>> {
		(**self).get_items(offset, limit).await
	}

	async fn count(&self) -> Result<usize> {
		(**self).count().await
	}
}

/// Page source over a SQL select
///
/// The strategy is chosen from the query shape when the adapter is built
/// and never changes afterwards, so `count` and `get_items` always agree.
///
/// # Examples
///
/// ```no_run
/// use datagrid_pagination::{PageSource, QueryAdapter, SelectQuery, StrategyKind};
/// use sqlx::sqlite::SqlitePoolOptions;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = SqlitePoolOptions::new().connect("sqlite::memory:").await?;
/// let adapter = QueryAdapter::new(pool, SelectQuery::table("users").distinct());
/// assert_eq!(adapter.strategy_kind(), StrategyKind::Safe);
///
/// let total = adapter.count().await?;
/// let first_ten = adapter.get_items(0, 10).await?;
/// # Ok(())
/// # }
/// ```
pub struct QueryAdapter {
	strategy: Box<dyn PaginationStrategy>,
}

impl QueryAdapter {
	/// Inspects the query and resolves its pagination strategy
	pub fn new(pool: SqlitePool, query: SelectQuery) -> Self {
		let shape = query.shape();
		let kind = select_strategy(&shape);
		tracing::debug!("Selected {} pagination strategy for {:?}", kind, shape);

		let query = Arc::new(query);
		let strategy: Box<dyn PaginationStrategy> = match kind {
			StrategyKind::Fast => Box::new(FastStrategy::new(pool, query)),
			StrategyKind::Safe => Box::new(SafeStrategy::new(pool, query)),
		};
		Self { strategy }
	}

	/// The strategy resolved at construction
	pub fn strategy_kind(&self) -> StrategyKind {
		self.strategy.kind()
	}

	/// The resolved strategy
	pub fn strategy(&self) -> &dyn PaginationStrategy {
		self.strategy.as_ref()
	}
}

impl std::fmt::Debug for QueryAdapter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("QueryAdapter")
			.field("strategy", &self.strategy_kind())
			.finish()
	}
}

#[async_trait]
impl PageSource for QueryAdapter {
	async fn get_items(&self, offset: usize, limit: usize) -> Result<Vec<Row>> {
		self.strategy.get_items(offset, limit).await
	}

	async fn count(&self) -> Result<usize> {
		self.strategy.count().await
	}
}

/// Page source over rows already in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayAdapter {
	rows: Vec<Row>,
}

impl ArrayAdapter {
	/// Wraps a list of rows
	pub fn new(rows: Vec<Row>) -> Self {
		Self { rows }
	}

	/// The wrapped rows
	pub fn rows(&self) -> &[Row] {
		&self.rows
	}
}

impl From<Vec<Row>> for ArrayAdapter {
	fn from(rows: Vec<Row>) -> Self {
		Self::new(rows)
	}
}

#[async_trait]
impl PageSource for ArrayAdapter {
	async fn get_items(&self, offset: usize, limit: usize) -> Result<Vec<Row>> {
		Ok(self.rows.iter().skip(offset).take(limit).cloned().collect())
	}

	async fn count(&self) -> Result<usize> {
		Ok(self.rows.len())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use datagrid_core::Value;
	use rstest::rstest;

	fn numbered(n: usize) -> ArrayAdapter {
		(0..n)
			.map(|i| Row::new().with("n", i as i64))
			.collect::<Vec<_>>()
			.into()
	}

	#[rstest]
	#[case(0, 5, 5)]
	#[case(10, 5, 2)]
	#[case(12, 5, 0)]
	#[case(40, 5, 0)]
	#[case(3, 0, 0)]
	#[tokio::test]
	async fn test_array_slice_length(#[case] offset: usize, #[case] limit: usize, #[case] expected: usize) {
		let adapter = numbered(12);
		assert_eq!(adapter.get_items(offset, limit).await.unwrap().len(), expected);
		assert_eq!(adapter.count().await.unwrap(), 12);
	}

	#[rstest]
	#[tokio::test]
	async fn test_array_keeps_order() {
		let items = numbered(12).get_items(4, 3).await.unwrap();
		let ns: Vec<_> = items.iter().map(|row| row.get("n").cloned()).collect();
		assert_eq!(
			ns,
			vec![
				Some(Value::Integer(4)),
				Some(Value::Integer(5)),
				Some(Value::Integer(6))
			]
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_boxed_source_delegates() {
		let boxed: Box<dyn PageSource> = Box::new(numbered(3));
		assert_eq!(boxed.count().await.unwrap(), 3);
		assert_eq!(boxed.get_items(1, 10).await.unwrap().len(), 2);
	}
}
