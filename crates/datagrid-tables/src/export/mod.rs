//! Renderers turning a loaded [`GridPage`] into an output format

pub mod csv;
pub mod html;
pub mod jqgrid;
pub mod print;

use crate::error::Result;
use crate::grid::GridPage;

pub use self::csv::CsvExporter;
pub use html::HtmlTableRenderer;
pub use jqgrid::{JqGridPayload, JqGridRenderer, JqGridRow};
pub use print::PrintRenderer;

/// Output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
	/// Comma-separated values
	Csv,
	/// jqGrid JSON payload
	JqGrid,
	/// HTML table fragment
	Html,
	/// Standalone print-friendly HTML document
	Print,
}

impl ExportFormat {
	/// File extension for this format
	pub fn extension(&self) -> &'static str {
		match self {
			ExportFormat::Csv => "csv",
			ExportFormat::JqGrid => "json",
			ExportFormat::Html | ExportFormat::Print => "html",
		}
	}

	/// MIME type for this format
	pub fn mime_type(&self) -> &'static str {
		match self {
			ExportFormat::Csv => "text/csv",
			ExportFormat::JqGrid => "application/json",
			ExportFormat::Html | ExportFormat::Print => "text/html; charset=utf-8",
		}
	}
}

/// Something that renders a grid page to bytes
pub trait Renderer {
	/// The format produced
	fn format(&self) -> ExportFormat;

	/// Renders a page
	fn render(&self, page: &GridPage) -> Result<Vec<u8>>;
}

/// Escapes text for HTML element content and attribute values
pub(crate) fn escape_html(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(c),
		}
	}
	escaped
}
