//! CSV export

use super::{ExportFormat, Renderer};
use crate::error::{Result, TableError};
use crate::grid::GridPage;
use csv::WriterBuilder;
use datagrid_core::GridSettings;
use std::io::Write;

/// Writes grid rows as CSV
///
/// Hidden columns are skipped and cells are rendered through their column
/// type, so an export reads like the on-screen grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvExporter {
	delimiter: u8,
	include_headers: bool,
}

impl Default for CsvExporter {
	fn default() -> Self {
		Self {
			delimiter: b',',
			include_headers: true,
		}
	}
}

impl CsvExporter {
	/// Creates an exporter writing comma-separated values with a header row
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an exporter from grid settings
	pub fn from_settings(settings: &GridSettings) -> Result<Self> {
		let delimiter = u8::try_from(settings.csv_delimiter).map_err(|_| {
			TableError::InvalidParameter(format!(
				"csv_delimiter '{}' is not a single byte",
				settings.csv_delimiter
			))
		})?;
		Ok(Self {
			delimiter,
			include_headers: settings.csv_include_headers,
		})
	}

	/// Sets the field delimiter
	pub fn delimiter(mut self, delimiter: u8) -> Self {
		self.delimiter = delimiter;
		self
	}

	/// Sets whether a header row of column labels is written
	pub fn include_headers(mut self, include_headers: bool) -> Self {
		self.include_headers = include_headers;
		self
	}

	/// Writes the page to any output
	pub fn write_to<W: Write>(&self, page: &GridPage, output: W) -> Result<()> {
		let mut writer = WriterBuilder::new()
			.delimiter(self.delimiter)
			.from_writer(output);

		if self.include_headers {
			writer.write_record(page.visible_columns().map(|column| column.label()))?;
		}
		for row in page.rows() {
			writer.write_record(page.cells(row))?;
		}
		writer.flush()?;
		Ok(())
	}
}

impl Renderer for CsvExporter {
	fn format(&self) -> ExportFormat {
		ExportFormat::Csv
	}

	fn render(&self, page: &GridPage) -> Result<Vec<u8>> {
		let mut output = Vec::new();
		self.write_to(page, &mut output)?;
		Ok(output)
	}
}
