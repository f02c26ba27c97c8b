//! Several column filters applied together

use crate::spec::FilterSpec;
use datagrid_core::Row;

/// A conjunction of column filters
///
/// A row passes when every filter passes. Setting a filter for a column
/// that already has one replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
	filters: Vec<FilterSpec>,
}

impl FilterSet {
	/// Creates an empty set; it accepts every row
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a filter, replacing any filter on the same column
	pub fn set(&mut self, filter: FilterSpec) {
		let column = filter.column().unique_id().to_string();
		self.remove(&column);
		self.filters.push(filter);
	}

	/// Adds a filter, builder style
	pub fn with(mut self, filter: FilterSpec) -> Self {
		self.set(filter);
		self
	}

	/// Removes the filter on a column, returning it
	pub fn remove(&mut self, column: &str) -> Option<FilterSpec> {
		let index = self
			.filters
			.iter()
			.position(|f| f.column().unique_id() == column)?;
		Some(self.filters.remove(index))
	}

	/// Removes every filter
	pub fn clear(&mut self) {
		self.filters.clear();
	}

	/// Returns the filter on a column
	pub fn get(&self, column: &str) -> Option<&FilterSpec> {
		self.filters
			.iter()
			.find(|f| f.column().unique_id() == column)
	}

	/// Number of filters
	pub fn len(&self) -> usize {
		self.filters.len()
	}

	/// Returns true when no filter is set
	pub fn is_empty(&self) -> bool {
		self.filters.is_empty()
	}

	/// Iterates over the filters in insertion order
	pub fn iter(&self) -> impl Iterator<Item = &FilterSpec> {
		self.filters.iter()
	}

	/// Returns true when the row passes every filter
	pub fn apply(&self, row: &Row) -> bool {
		self.filters.iter().all(|filter| filter.apply_filter(row))
	}

	/// Keeps the rows that pass every filter, preserving order
	pub fn filter_rows(&self, rows: impl IntoIterator<Item = Row>) -> Vec<Row> {
		rows.into_iter().filter(|row| self.apply(row)).collect()
	}
}

impl FromIterator<FilterSpec> for FilterSet {
	fn from_iter<I: IntoIterator<Item = FilterSpec>>(iter: I) -> Self {
		let mut set = FilterSet::new();
		for filter in iter {
			set.set(filter);
		}
		set
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use datagrid_core::{Column, ColumnType, Value};

	fn rows() -> Vec<Row> {
		vec![
			Row::new().with("name", "Alice").with("age", 31),
			Row::new().with("name", "Bob").with("age", 17),
			Row::new().with("name", "Alina").with("age", 12),
		]
	}

	#[test]
	fn test_empty_set_accepts_everything() {
		assert_eq!(FilterSet::new().filter_rows(rows()).len(), 3);
	}

	#[test]
	fn test_filters_combine_with_and() {
		let name = Column::new("name", "Name");
		let age = Column::new("age", "Age").with_type(ColumnType::number());
		let set = FilterSet::new()
			.with(FilterSpec::parse(name, "al%").unwrap())
			.with(FilterSpec::parse(age, ">=18").unwrap());

		let kept = set.filter_rows(rows());
		assert_eq!(kept.len(), 1);
		assert_eq!(kept[0].get("name"), Some(&Value::from("Alice")));
	}

	#[test]
	fn test_set_replaces_filter_on_same_column() {
		let name = Column::new("name", "Name");
		let mut set = FilterSet::new();
		set.set(FilterSpec::parse(name.clone(), "Bob").unwrap());
		set.set(FilterSpec::parse(name, "Ali").unwrap());

		assert_eq!(set.len(), 1);
		assert_eq!(set.filter_rows(rows()).len(), 2);
		assert!(set.remove("name").is_some());
		assert!(set.is_empty());
	}
}
