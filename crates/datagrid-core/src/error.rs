//! Error type for core datagrid types

use thiserror::Error;

/// Errors raised by core datagrid types
#[derive(Debug, Error)]
pub enum CoreError {
	/// A value passed to a constructor or setter was rejected
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	/// Settings could not be parsed
	#[error("Configuration error: {0}")]
	Config(#[from] toml::de::Error),

	/// Settings file could not be read
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
