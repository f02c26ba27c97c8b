//! Column definition and builder

use super::types::ColumnType;
use crate::operator::FilterOperator;
use crate::value::{Comparable, Value};

/// A grid column definition
///
/// Each column is responsible for:
/// - Providing a stable unique id, used as the row lookup key
/// - Providing the header label
/// - Normalizing raw values before they are filtered or sorted
/// - Rendering raw values for display and export
/// - Specifying if the column is sortable, filterable or hidden
///
/// # Example
///
/// ```rust
/// use datagrid_core::column::{Column, ColumnType};
///
/// let age = Column::new("age", "Age")
///     .with_type(ColumnType::number())
///     .sortable(true)
///     .css_classes("text-right");
///
/// assert_eq!(age.unique_id(), "age");
/// assert!(age.is_sortable());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
	unique_id: String,
	label: String,
	column_type: ColumnType,
	sortable: bool,
	filterable: bool,
	hidden: bool,
	css_classes: String,
	filter_default_operator: Option<FilterOperator>,
}

impl Column {
	/// Creates a new text column
	pub fn new(unique_id: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			unique_id: unique_id.into(),
			label: label.into(),
			column_type: ColumnType::Text,
			sortable: true,
			filterable: true,
			hidden: false,
			css_classes: String::new(),
			filter_default_operator: None,
		}
	}

	/// Sets the column type
	pub fn with_type(mut self, column_type: ColumnType) -> Self {
		self.column_type = column_type;
		self
	}

	/// Sets whether this column is sortable
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Sets whether this column is filterable
	pub fn filterable(mut self, filterable: bool) -> Self {
		self.filterable = filterable;
		self
	}

	/// Hides the column from rendered output; it can still be filtered
	pub fn hidden(mut self, hidden: bool) -> Self {
		self.hidden = hidden;
		self
	}

	/// Sets CSS classes for this column
	pub fn css_classes(mut self, css_classes: impl Into<String>) -> Self {
		self.css_classes = css_classes.into();
		self
	}

	/// Overrides the operator used when a filter expression has none
	pub fn filter_default_operator(mut self, operator: FilterOperator) -> Self {
		self.filter_default_operator = Some(operator);
		self
	}

	/// Row lookup key
	pub fn unique_id(&self) -> &str {
		&self.unique_id
	}

	/// Header text
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Column type
	pub fn column_type(&self) -> &ColumnType {
		&self.column_type
	}

	/// Returns whether this column can be sorted
	pub fn is_sortable(&self) -> bool {
		self.sortable
	}

	/// Returns whether this column can be filtered
	pub fn is_filterable(&self) -> bool {
		self.filterable
	}

	/// Returns whether this column is left out of rendered output
	pub fn is_hidden(&self) -> bool {
		self.hidden
	}

	/// CSS classes applied to cells in this column
	pub fn css_class_list(&self) -> &str {
		&self.css_classes
	}

	/// Operator applied to filter expressions without an explicit one
	pub fn default_filter_operator(&self) -> FilterOperator {
		self.filter_default_operator
			.unwrap_or_else(|| self.column_type.default_operator())
	}

	/// Normalizes a raw value through the column type
	pub fn normalize(&self, value: &Value) -> Comparable {
		self.column_type.normalize(value)
	}

	/// Renders a raw value through the column type
	pub fn render(&self, value: &Value) -> String {
		self.column_type.display(value)
	}
}
