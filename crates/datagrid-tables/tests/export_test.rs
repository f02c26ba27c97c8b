
use datagrid_core::{Column, GridSettings, Row, Value};
use datagrid_pagination::Page;
use datagrid_tables::{
	CsvExporter, ExportFormat, Grid, GridPage, HtmlTableRenderer, JqGridPayload, JqGridRenderer,
	PrintRenderer, Renderer,
};
use fixtures::*;
use rstest::*;
use std::io::Read;

#[rstest]
#[tokio::test]
async fn test_csv_export_quotes_and_skips_hidden_columns(users_grid: Grid) {
	let page = users_grid.load_all().await.unwrap();
	let exporter = CsvExporter::new();
	assert_eq!(exporter.format(), ExportFormat::Csv);

	let output = String::from_utf8(exporter.render(&page).unwrap()).unwrap();
	let lines: Vec<&str> = output.lines().collect();
	assert_eq!(lines.len(), 6);
	assert_eq!(lines[0], "ID,Name,E-Mail,Age,Active,Status,Created");
	assert_eq!(lines[4], "4,Dana & Co,\"dana, jr@example.org\",28,Yes,Inactive,2024-04-05");
	assert_eq!(lines[5], "5,Eve,eve@gmail.com,,No,Active,2024-05-01");
	assert!(!output.contains("x1"));
}

#[rstest]
#[tokio::test]
async fn test_csv_export_to_file_with_settings(users_grid: Grid) {
	let settings = GridSettings::from_toml_str(
		r#"
		csv_delimiter = ";"
		csv_include_headers = false
		"#,
	)
	.unwrap();
	let exporter = CsvExporter::from_settings(&settings).unwrap();
	let page = users_grid.load().await.unwrap();

	let mut file = tempfile::NamedTempFile::new().unwrap();
	exporter.write_to(&page, file.as_file_mut()).unwrap();

	let mut written = String::new();
	std::fs::File::open(file.path())
		.unwrap()
		.read_to_string(&mut written)
		.unwrap();
	assert_eq!(
		written.lines().next(),
		Some("1;Alice;alice@example.com;31;Yes;Active;2024-01-15")
	);
	assert_eq!(written.lines().count(), 5);
}

#[rstest]
#[tokio::test]
async fn test_jqgrid_payload(users_grid: Grid) {
	let mut grid = users_grid;
	grid.set_per_page(Some(2));
	grid.set_page(2);
	let page = grid.load().await.unwrap();

	let json = JqGridRenderer.to_json(&page).unwrap();
	assert_eq!(json["page"], 2);
	assert_eq!(json["total"], 3);
	assert_eq!(json["records"], 5);
	assert_eq!(json["rows"][0]["id"], 3);
	assert_eq!(json["rows"][0]["cell"][1], "Charlie");
	assert_eq!(json["rows"][1]["cell"][5], "Inactive");

	let bytes = JqGridRenderer.render(&page).unwrap();
	let payload: JqGridPayload = serde_json::from_slice(&bytes).unwrap();
	assert_eq!(payload.rows.len(), 2);
}

#[rstest]
fn test_jqgrid_ids_fall_back_to_position() {
	let rows = vec![Row::new().with("name", "a"), Row::new().with("name", "b")];
	let page = GridPage::new(
		vec![Column::new("name", "Name")],
		Page::new(rows, 3, 3, 12, 5),
		None,
	);
	let payload = JqGridPayload::from_page(&page);
	assert_eq!(payload.rows[0].id, Value::Integer(11));
	assert_eq!(payload.rows[1].id, Value::Integer(12));
}

#[rstest]
#[tokio::test]
async fn test_html_table_marks_sort_and_escapes(users_grid: Grid) {
	let mut grid = users_grid;
	grid.set_sort("-age").unwrap();
	let page = grid.load().await.unwrap();
	let html = HtmlTableRenderer::new().to_html(&page);

	assert!(html.starts_with("<table class=\"datagrid\">"));
	assert!(html.contains("<th data-column=\"age\" aria-sort=\"descending\">Age</th>"));
	assert!(html.contains("<th class=\"text-bold\" data-column=\"name\">Name</th>"));
	assert!(html.contains("<td class=\"text-bold\">Dana &amp; Co</td>"));
	assert!(!html.contains("Internal"));
	assert_eq!(html.matches("<tr>").count(), 6);
}

#[rstest]
#[tokio::test]
async fn test_print_document(users_grid: Grid) {
	let settings = GridSettings {
		print_title: "Users <all>".to_string(),
		..GridSettings::default()
	};
	let page = users_grid.load_all().await.unwrap();
	let renderer = PrintRenderer::from_settings(&settings);
	let html = String::from_utf8(renderer.render(&page).unwrap()).unwrap();

	assert!(html.starts_with("<!DOCTYPE html>"));
	assert!(html.contains("<title>Users &lt;all&gt;</title>"));
	assert!(html.contains("<h1>Users &lt;all&gt;</h1>"));
	assert!(html.contains("<p class=\"datagrid-footer\">5 rows</p>"));
	assert_eq!(renderer.format().mime_type(), "text/html; charset=utf-8");
}
