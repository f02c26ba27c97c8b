//! Query shape inspection and strategy selection
//!
//! The selector only sees a [`QueryShape`], never SQL. The data source
//! computes the shape from its own query description.

use std::fmt;

/// Structural facts about a query that affect pagination correctness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryShape {
	/// The query has a `HAVING` clause
	pub has_having: bool,
	/// The query is `SELECT DISTINCT`
	pub is_distinct: bool,
	/// The query groups rows with `GROUP BY`
	pub has_group_by: bool,
}

impl QueryShape {
	/// Shape of a plain select
	pub fn plain() -> Self {
		Self::default()
	}

	/// Marks the shape as having a `HAVING` clause
	pub fn with_having(mut self, has_having: bool) -> Self {
		self.has_having = has_having;
		self
	}

	/// Marks the shape as distinct
	pub fn with_distinct(mut self, is_distinct: bool) -> Self {
		self.is_distinct = is_distinct;
		self
	}

	/// Marks the shape as grouped
	pub fn with_group_by(mut self, has_group_by: bool) -> Self {
		self.has_group_by = has_group_by;
		self
	}
}

/// Which pagination technique serves a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
	/// Count and slice directly on the query
	Fast,
	/// Count and slice through a wrapping subquery
	Safe,
}

impl StrategyKind {
	/// Lowercase name of the strategy
	pub fn as_str(&self) -> &'static str {
		match self {
			StrategyKind::Fast => "fast",
			StrategyKind::Safe => "safe",
		}
	}
}

impl fmt::Display for StrategyKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Picks the pagination strategy for a query shape
///
/// `HAVING` or `DISTINCT` requires [`StrategyKind::Safe`]. Everything else,
/// grouped queries included, uses [`StrategyKind::Fast`].
///
/// # Examples
///
/// ```
/// use datagrid_pagination::{select_strategy, QueryShape, StrategyKind};
///
/// assert_eq!(select_strategy(&QueryShape::plain()), StrategyKind::Fast);
/// assert_eq!(
/// 	select_strategy(&QueryShape::plain().with_distinct(true)),
/// 	StrategyKind::Safe
/// );
/// ```
pub fn select_strategy(shape: &QueryShape) -> StrategyKind {
	if shape.has_having || shape.is_distinct {
		StrategyKind::Safe
	} else {
		StrategyKind::Fast
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(false, false, false, StrategyKind::Fast)]
	#[case(false, false, true, StrategyKind::Fast)]
	#[case(true, false, false, StrategyKind::Safe)]
	#[case(false, true, false, StrategyKind::Safe)]
	#[case(true, true, true, StrategyKind::Safe)]
	fn test_select_strategy(
		#[case] has_having: bool,
		#[case] is_distinct: bool,
		#[case] has_group_by: bool,
		#[case] expected: StrategyKind,
	) {
		let shape = QueryShape::plain()
			.with_having(has_having)
			.with_distinct(is_distinct)
			.with_group_by(has_group_by);
		assert_eq!(select_strategy(&shape), expected);
	}

	#[rstest]
	fn test_kind_display() {
		assert_eq!(StrategyKind::Fast.to_string(), "fast");
		assert_eq!(StrategyKind::Safe.to_string(), "safe");
	}
}
