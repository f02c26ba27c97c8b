//! HTML table rendering

use super::{escape_html, ExportFormat, Renderer};
use crate::error::Result;
use crate::grid::GridPage;
use crate::sort::SortDirection;
use std::fmt::Write;

/// Renders a page as a `<table>` fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTableRenderer {
	table_class: String,
}

impl Default for HtmlTableRenderer {
	fn default() -> Self {
		Self {
			table_class: "datagrid".to_string(),
		}
	}
}

impl HtmlTableRenderer {
	/// Creates a renderer using the `datagrid` table class
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the CSS class of the `<table>` element
	pub fn table_class(mut self, table_class: impl Into<String>) -> Self {
		self.table_class = table_class.into();
		self
	}

	/// Renders the table markup
	pub fn to_html(&self, page: &GridPage) -> String {
		let mut html = String::new();
		// writing to a String cannot fail
		let _ = self.write_table(page, &mut html);
		html
	}

	fn write_table(&self, page: &GridPage, html: &mut String) -> std::fmt::Result {
		writeln!(html, "<table class=\"{}\">", escape_html(&self.table_class))?;
		html.push_str("<thead>\n<tr>");
		for column in page.visible_columns() {
			let sorted = page
				.sort()
				.filter(|sort| sort.column == column.unique_id())
				.map(|sort| sort.direction);
			html.push_str("<th");
			write_class(html, column.css_class_list())?;
			write!(html, " data-column=\"{}\"", escape_html(column.unique_id()))?;
			if let Some(direction) = sorted {
				let aria = match direction {
					SortDirection::Ascending => "ascending",
					SortDirection::Descending => "descending",
				};
				write!(html, " aria-sort=\"{}\"", aria)?;
			}
			write!(html, ">{}</th>", escape_html(column.label()))?;
		}
		html.push_str("</tr>\n</thead>\n<tbody>\n");

		for row in page.rows() {
			html.push_str("<tr>");
			for (column, cell) in page.visible_columns().zip(page.cells(row)) {
				html.push_str("<td");
				write_class(html, column.css_class_list())?;
				write!(html, ">{}</td>", escape_html(&cell))?;
			}
			html.push_str("</tr>\n");
		}
		html.push_str("</tbody>\n</table>\n");
		Ok(())
	}
}

fn write_class(html: &mut String, classes: &str) -> std::fmt::Result {
	if classes.trim().is_empty() {
		return Ok(());
	}
	write!(html, " class=\"{}\"", escape_html(classes.trim()))
}

impl Renderer for HtmlTableRenderer {
	fn format(&self) -> ExportFormat {
		ExportFormat::Html
	}

	fn render(&self, page: &GridPage) -> Result<Vec<u8>> {
		Ok(self.to_html(page).into_bytes())
	}
}
