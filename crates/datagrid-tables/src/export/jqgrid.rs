//! jqGrid JSON payloads

use super::{ExportFormat, Renderer};
use crate::error::Result;
use crate::grid::GridPage;
use datagrid_core::Value;
use serde::{Deserialize, Serialize};

/// One row as jqGrid expects it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JqGridRow {
	/// Row identifier
	pub id: Value,
	/// Rendered cells of the visible columns
	pub cell: Vec<String>,
}

/// The JSON document answering a jqGrid data request
///
/// ```json
/// { "page": 2, "total": 5, "records": 23, "rows": [ { "id": 6, "cell": ["..."] } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JqGridPayload {
	/// Current page number
	pub page: usize,
	/// Total number of pages
	pub total: usize,
	/// Total number of records
	pub records: usize,
	/// Rows of the current page
	pub rows: Vec<JqGridRow>,
}

impl JqGridPayload {
	/// Builds the payload for a page
	pub fn from_page(page: &GridPage) -> Self {
		let rows = page
			.rows()
			.iter()
			.enumerate()
			.map(|(index, row)| JqGridRow {
				id: page.row_id(index, row),
				cell: page.cells(row),
			})
			.collect();
		Self {
			page: page.page().number,
			total: page.page().num_pages,
			records: page.page().count,
			rows,
		}
	}
}

/// Renders pages as jqGrid JSON
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JqGridRenderer;

impl JqGridRenderer {
	/// Renders the payload as a JSON value
	pub fn to_json(&self, page: &GridPage) -> Result<serde_json::Value> {
		Ok(serde_json::to_value(JqGridPayload::from_page(page))?)
	}
}

impl Renderer for JqGridRenderer {
	fn format(&self) -> ExportFormat {
		ExportFormat::JqGrid
	}

	fn render(&self, page: &GridPage) -> Result<Vec<u8>> {
		Ok(serde_json::to_vec(&JqGridPayload::from_page(page))?)
	}
}
