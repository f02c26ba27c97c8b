//! Sorting configuration and in-memory row sorting

use datagrid_core::{Column, Comparable, Row, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	/// Ascending order
	Ascending,
	/// Descending order
	Descending,
}

impl SortDirection {
	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}

	/// Parses a sort direction from a query parameter
	///
	/// `"name"` sorts ascending and `"-name"` descending.
	pub fn parse_from_query(s: &str) -> (Self, &str) {
		if let Some(field) = s.strip_prefix('-') {
			(Self::Descending, field)
		} else {
			(Self::Ascending, s)
		}
	}

	/// Returns true for [`SortDirection::Descending`]
	pub fn is_descending(&self) -> bool {
		*self == Self::Descending
	}

	/// `"asc"` or `"desc"`
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Ascending => "asc",
			Self::Descending => "desc",
		}
	}
}

/// The column a grid is sorted by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
	/// Unique id of the sorted column
	pub column: String,
	/// Direction of the sort
	pub direction: SortDirection,
}

impl SortConfig {
	/// Creates a sort on a column
	pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
		Self {
			column: column.into(),
			direction,
		}
	}

	/// Parses `"name"` / `"-name"`; blank input means no sort
	///
	/// # Examples
	///
	/// ```
	/// use datagrid_tables::{SortConfig, SortDirection};
	///
	/// let sort = SortConfig::parse("-created").unwrap();
	/// assert_eq!(sort.column, "created");
	/// assert_eq!(sort.direction, SortDirection::Descending);
	/// assert!(SortConfig::parse("  ").is_none());
	/// ```
	pub fn parse(param: &str) -> Option<Self> {
		let (direction, column) = SortDirection::parse_from_query(param.trim());
		let column = column.trim();
		if column.is_empty() {
			None
		} else {
			Some(Self::new(column, direction))
		}
	}
}

impl fmt::Display for SortConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.direction.is_descending() {
			f.write_str("-")?;
		}
		f.write_str(&self.column)
	}
}

/// Sorts rows by a column's normalized values
///
/// The sort is stable and puts nulls first in ascending order.
pub fn sort_rows(rows: Vec<Row>, column: &Column, direction: SortDirection) -> Vec<Row> {
	let mut keyed: Vec<(Comparable, Row)> = rows
		.into_iter()
		.map(|row| {
			let key = match row.get(column.unique_id()) {
				Some(value) => column.normalize(value),
				None => column.normalize(&Value::Null),
			};
			(key, row)
		})
		.collect();
	keyed.sort_by(|(a, _), (b, _)| match direction {
		SortDirection::Ascending => a.sort_cmp(b),
		SortDirection::Descending => b.sort_cmp(a),
	});
	keyed.into_iter().map(|(_, row)| row).collect()
}
