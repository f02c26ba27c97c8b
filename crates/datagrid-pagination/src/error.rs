use datagrid_filters::FilterError;
use thiserror::Error;

/// Errors raised while paginating
#[derive(Debug, Error)]
pub enum PaginationError {
	/// The requested page or page size cannot be served
	#[error("Invalid page: {0}")]
	InvalidPage(String),

	/// A filter could not be compiled to SQL
	#[error(transparent)]
	Filter(#[from] FilterError),

	/// The database rejected or failed a query; never retried
	#[error("Database error: {0}")]
	Database(#[from] sqlx::Error),
}

/// Result type for pagination operations
pub type Result<T> = std::result::Result<T, PaginationError>;
