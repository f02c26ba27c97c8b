use datagrid_core::{CoreError, FilterOperator};
use thiserror::Error;

/// Errors raised while building a filter
#[derive(Debug, Error)]
pub enum FilterError {
	/// A filter parameter was not recognized or not accepted
	#[error("Invalid filter parameter: {0}")]
	InvalidParameter(String),

	/// A filter was built without any operand
	#[error("Filter on column '{column}' has no operand")]
	EmptyOperands { column: String },

	/// `BETWEEN` needs exactly a lower and an upper bound
	#[error("BETWEEN filter on column '{column}' needs exactly 2 operands, got {got}")]
	BetweenArity { column: String, got: usize },

	/// The filter has no SQL form that agrees with its row evaluation
	#[error("Filter '{operator}' on column '{column}' cannot be compiled to SQL")]
	UnsupportedSql {
		column: String,
		operator: FilterOperator,
	},

	/// Operator names and other core values that failed to parse
	#[error(transparent)]
	Core(#[from] CoreError),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
