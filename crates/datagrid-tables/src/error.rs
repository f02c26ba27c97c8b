//! Error types for grids and renderers

use datagrid_filters::FilterError;
use datagrid_pagination::PaginationError;
use thiserror::Error;

/// Errors raised while configuring, loading or rendering a grid
#[derive(Debug, Error)]
pub enum TableError {
	/// The grid has no column with this id
	#[error("Unknown column: {0}")]
	UnknownColumn(String),

	/// The column exists but does not accept filters
	#[error("Column is not filterable: {0}")]
	NotFilterable(String),

	/// The column exists but does not accept sorting
	#[error("Column is not sortable: {0}")]
	NotSortable(String),

	/// A request parameter could not be understood
	#[error("Invalid parameter: {0}")]
	InvalidParameter(String),

	/// Filter expression error
	#[error(transparent)]
	Filter(#[from] FilterError),

	/// Pagination or database error
	#[error(transparent)]
	Pagination(#[from] PaginationError),

	/// CSV writing error
	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	/// JSON serialization error
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// Output sink error
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

/// Result type for grid operations
pub type Result<T> = std::result::Result<T, TableError>;
