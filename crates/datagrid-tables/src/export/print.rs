//! Print-friendly HTML documents

use super::html::HtmlTableRenderer;
use super::{escape_html, ExportFormat, Renderer};
use crate::error::Result;
use crate::grid::GridPage;
use datagrid_core::GridSettings;

const PRINT_STYLE: &str = "body { font-family: sans-serif; font-size: 10pt; }\n\
table { border-collapse: collapse; width: 100%; }\n\
th, td { border: 1px solid #999; padding: 2px 4px; text-align: left; }\n\
thead { display: table-header-group; }\n\
tr { page-break-inside: avoid; }\n";

/// Renders a standalone HTML document meant for printing
///
/// Pair it with [`Grid::load_all`](crate::Grid::load_all) to print every
/// filtered row rather than one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintRenderer {
	title: String,
	table: HtmlTableRenderer,
}

impl PrintRenderer {
	/// Creates a renderer with a document title
	pub fn new(title: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			table: HtmlTableRenderer::new(),
		}
	}

	/// Creates a renderer titled from settings
	pub fn from_settings(settings: &GridSettings) -> Self {
		Self::new(settings.print_title.clone())
	}

	/// Renders the document
	pub fn to_html(&self, page: &GridPage) -> String {
		let title = escape_html(&self.title);
		let rows = page.rows().len();
		let noun = if rows == 1 { "row" } else { "rows" };
		format!(
			"<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
			 <style>\n{style}</style>\n</head>\n<body>\n<h1>{title}</h1>\n{table}\
			 <p class=\"datagrid-footer\">{rows} {noun}</p>\n</body>\n</html>\n",
			title = title,
			style = PRINT_STYLE,
			table = self.table.to_html(page),
			rows = rows,
			noun = noun,
		)
	}
}

impl Renderer for PrintRenderer {
	fn format(&self) -> ExportFormat {
		ExportFormat::Print
	}

	fn render(&self, page: &GridPage) -> Result<Vec<u8>> {
		Ok(self.to_html(page).into_bytes())
	}
}
