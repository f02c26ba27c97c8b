//! Grid settings
//!
//! Settings are plain serde structs with defaults for every field, so a
//! TOML file only needs to name what it overrides:
//!
//! ```toml
//! default_per_page = 50
//! csv_delimiter = ";"
//! ```

use crate::column::DEFAULT_DATE_FORMATS;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by every grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
	/// Rows per page when a request does not ask for a size
	pub default_per_page: usize,
	/// Upper bound for a requested page size
	pub max_per_page: usize,
	/// Field delimiter for CSV export
	pub csv_delimiter: char,
	/// Whether CSV export starts with a header row
	pub csv_include_headers: bool,
	/// chrono formats tried when parsing date filter input
	pub date_formats: Vec<String>,
	/// Title of print-friendly output
	pub print_title: String,
}

impl Default for GridSettings {
	fn default() -> Self {
		Self {
			default_per_page: 25,
			max_per_page: 1000,
			csv_delimiter: ',',
			csv_include_headers: true,
			date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
			print_title: "Data".to_string(),
		}
	}
}

impl GridSettings {
	/// Parses and validates settings from TOML text
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let settings: GridSettings = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Reads, parses and validates a TOML settings file
	pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)?;
		tracing::debug!("Loaded grid settings from {}", path.display());
		Self::from_toml_str(&source)
	}

	/// Checks cross-field constraints
	pub fn validate(&self) -> Result<()> {
		if self.default_per_page == 0 {
			return Err(CoreError::InvalidArgument(
				"default_per_page must be greater than zero".to_string(),
			));
		}
		if self.max_per_page < self.default_per_page {
			return Err(CoreError::InvalidArgument(format!(
				"max_per_page ({}) is smaller than default_per_page ({})",
				self.max_per_page, self.default_per_page
			)));
		}
		if !self.csv_delimiter.is_ascii() {
			return Err(CoreError::InvalidArgument(format!(
				"csv_delimiter must be an ASCII character, got '{}'",
				self.csv_delimiter
			)));
		}
		Ok(())
	}

	/// Clamps a requested page size into `1..=max_per_page`
	pub fn clamp_per_page(&self, requested: Option<usize>) -> usize {
		requested
			.unwrap_or(self.default_per_page)
			.clamp(1, self.max_per_page)
	}
}
