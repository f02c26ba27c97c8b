//! Grids: columns, a data source and the request state that shapes a page

use crate::error::{Result, TableError};
use crate::sort::{sort_rows, SortConfig};
use datagrid_core::{Column, ColumnType, GridSettings, Row, Value};
use datagrid_filters::sql::quote_identifier;
use datagrid_filters::{FilterSet, FilterSpec};
use datagrid_pagination::{
	ArrayAdapter, Page, PageParam, PageSource, Paginator, QueryAdapter, SelectQuery,
};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;
use std::collections::HashMap;

/// Where a grid's rows come from
#[derive(Debug, Clone)]
pub enum GridSource {
	/// Rows already in memory; filtered and sorted in process
	Array(Vec<Row>),
	/// A select run against SQLite; filters and sorting become SQL
	Query {
		/// Connection pool
		pool: SqlitePool,
		/// The base select
		query: SelectQuery,
	},
}

impl From<Vec<Row>> for GridSource {
	fn from(rows: Vec<Row>) -> Self {
		GridSource::Array(rows)
	}
}

/// Request parameters understood by [`Grid::apply_params`]
///
/// Deserializes from a query string or JSON body. `page` may be a number
/// or text:
///
/// ```
/// use datagrid_pagination::PageParam;
/// use datagrid_tables::GridParams;
///
/// let params: GridParams = serde_json::from_str(
/// 	r#"{"page": "2", "sort": "-age", "filters": {"email": "gmail"}}"#,
/// ).unwrap();
/// assert_eq!(params.page, Some(PageParam::from("2")));
/// assert_eq!(params.per_page, None);
///
/// let params: GridParams = serde_json::from_str(r#"{"page": 2, "per_page": 10}"#).unwrap();
/// assert_eq!(params.page, Some(PageParam::Number(2)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
	/// 1-based page number or `"last"`
	pub page: Option<PageParam>,
	/// Requested page size
	pub per_page: Option<usize>,
	/// `"column"` or `"-column"`
	pub sort: Option<String>,
	/// Filter expressions keyed by column id; blank input clears the filter
	pub filters: HashMap<String, String>,
}

/// One loaded page of a grid, ready for rendering
#[derive(Debug, Clone)]
pub struct GridPage {
	columns: Vec<Column>,
	page: Page<Row>,
	sort: Option<SortConfig>,
}

impl GridPage {
	/// Creates a grid page
	pub fn new(columns: Vec<Column>, page: Page<Row>, sort: Option<SortConfig>) -> Self {
		Self { columns, page, sort }
	}

	/// Every column, hidden ones included
	pub fn columns(&self) -> &[Column] {
		&self.columns
	}

	/// Columns that renderers output
	pub fn visible_columns(&self) -> impl Iterator<Item = &Column> {
		self.columns.iter().filter(|column| !column.is_hidden())
	}

	/// The rows of this page
	pub fn rows(&self) -> &[Row] {
		&self.page.object_list
	}

	/// Pagination details
	pub fn page(&self) -> &Page<Row> {
		&self.page
	}

	/// The sort applied, if any
	pub fn sort(&self) -> Option<&SortConfig> {
		self.sort.as_ref()
	}

	/// Rendered cells of a row, one per visible column
	pub fn cells(&self, row: &Row) -> Vec<String> {
		self.visible_columns()
			.map(|column| match row.get(column.unique_id()) {
				Some(value) => column.render(value),
				None => String::new(),
			})
			.collect()
	}

	/// Identifier of the row at `index` on this page
	///
	/// Uses the row's `id` value when present, otherwise the 1-based
	/// position of the row in the whole result.
	pub fn row_id(&self, index: usize, row: &Row) -> Value {
		match row.get("id") {
			Some(id) if !id.is_null() => id.clone(),
			_ => {
				let position = self.page.start_index().max(1) + index;
				Value::Integer(i64::try_from(position).unwrap_or(i64::MAX))
			}
		}
	}
}

/// A data grid
///
/// # Examples
///
/// ```
/// use datagrid_core::{Column, ColumnType, Row};
/// use datagrid_tables::{Grid, GridSource};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let rows = vec![
/// 	Row::new().with("name", "Alice").with("age", 31),
/// 	Row::new().with("name", "Bob").with("age", 17),
/// ];
/// let mut grid = Grid::new(GridSource::Array(rows))
/// 	.column(Column::new("name", "Name"))
/// 	.column(Column::new("age", "Age").with_type(ColumnType::number()));
///
/// grid.set_filter_input("age", ">=18").unwrap();
/// let page = grid.load().await.unwrap();
/// assert_eq!(page.rows().len(), 1);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
	columns: Vec<Column>,
	settings: GridSettings,
	source: GridSource,
	sort: Option<SortConfig>,
	filters: FilterSet,
	page: usize,
	per_page: usize,
}

impl Grid {
	/// Creates a grid with default settings
	pub fn new(source: GridSource) -> Self {
		Self::with_settings(source, GridSettings::default())
	}

	/// Creates a grid with the given settings
	pub fn with_settings(source: GridSource, settings: GridSettings) -> Self {
		let per_page = settings.clamp_per_page(None);
		Self {
			columns: Vec::new(),
			settings,
			source,
			sort: None,
			filters: FilterSet::new(),
			page: 1,
			per_page,
		}
	}

	/// Adds a column, builder style
	pub fn column(mut self, column: Column) -> Self {
		self.add_column(column);
		self
	}

	/// Adds a column
	///
	/// Date/time columns declared without formats use the configured ones.
	pub fn add_column(&mut self, column: Column) {
		let column = match column.column_type() {
			ColumnType::DateTime { formats } if formats.is_empty() => {
				let formats = self.settings.date_formats.clone();
				column.with_type(ColumnType::DateTime { formats })
			}
			_ => column,
		};
		self.columns.push(column);
	}

	/// The grid's columns
	pub fn columns(&self) -> &[Column] {
		&self.columns
	}

	/// Looks up a column by id
	pub fn get_column(&self, unique_id: &str) -> Option<&Column> {
		self.columns.iter().find(|c| c.unique_id() == unique_id)
	}

	/// The grid's settings
	pub fn settings(&self) -> &GridSettings {
		&self.settings
	}

	/// The active filters
	pub fn filters(&self) -> &FilterSet {
		&self.filters
	}

	/// The active sort
	pub fn sort(&self) -> Option<&SortConfig> {
		self.sort.as_ref()
	}

	/// The requested page number
	pub fn page_number(&self) -> usize {
		self.page
	}

	/// The page size
	pub fn per_page(&self) -> usize {
		self.per_page
	}

	fn require_column(&self, unique_id: &str) -> Result<&Column> {
		self.get_column(unique_id)
			.ok_or_else(|| TableError::UnknownColumn(unique_id.to_string()))
	}

	/// Parses and sets a filter expression for a column
	///
	/// # Errors
	/// `UnknownColumn` or `NotFilterable` for a column that cannot be
	/// filtered. `Filter` for a malformed expression, or `UnsupportedSql`
	/// when a query-backed grid cannot run the filter in SQL.
	pub fn set_filter_input(&mut self, unique_id: &str, input: &str) -> Result<()> {
		let spec = self.parse_filter(unique_id, input)?;
		self.filters.set(spec);
		Ok(())
	}

	/// Sets a prepared filter
	pub fn set_filter(&mut self, spec: FilterSpec) -> Result<()> {
		self.check_filter(&spec)?;
		self.filters.set(spec);
		Ok(())
	}

	fn parse_filter(&self, unique_id: &str, input: &str) -> Result<FilterSpec> {
		let column = self.require_column(unique_id)?;
		if !column.is_filterable() {
			return Err(TableError::NotFilterable(unique_id.to_string()));
		}
		let spec = FilterSpec::parse(column.clone(), input)?;
		self.check_filter(&spec)?;
		Ok(spec)
	}

	fn check_filter(&self, spec: &FilterSpec) -> Result<()> {
		let column = self.require_column(spec.column().unique_id())?;
		if !column.is_filterable() {
			return Err(TableError::NotFilterable(column.unique_id().to_string()));
		}
		if matches!(self.source, GridSource::Query { .. }) {
			spec.to_sql()?;
		}
		Ok(())
	}

	/// Drops the filter on a column
	pub fn remove_filter(&mut self, unique_id: &str) -> Option<FilterSpec> {
		self.filters.remove(unique_id)
	}

	/// Sorts by `"column"` or `"-column"`; blank input clears the sort
	pub fn set_sort(&mut self, param: &str) -> Result<()> {
		self.sort = self.parse_sort(param)?;
		Ok(())
	}

	fn parse_sort(&self, param: &str) -> Result<Option<SortConfig>> {
		let Some(sort) = SortConfig::parse(param) else {
			return Ok(None);
		};
		let column = self.require_column(&sort.column)?;
		if !column.is_sortable() {
			return Err(TableError::NotSortable(sort.column));
		}
		Ok(Some(sort))
	}

	/// Selects a 1-based page; numbers past the end load the last page
	pub fn set_page(&mut self, page: usize) {
		self.page = page.max(1);
	}

	/// Sets the page size, clamped to the configured maximum
	pub fn set_per_page(&mut self, per_page: Option<usize>) {
		self.per_page = self.settings.clamp_per_page(per_page);
	}

	/// Applies request parameters
	///
	/// Every parameter is checked before any is applied, so nothing is
	/// changed when one is rejected. Page numbers start at 1: `0` is
	/// rejected like any other invalid page.
	pub fn apply_params(&mut self, params: &GridParams) -> Result<()> {
		let page = params
			.page
			.as_ref()
			.map(|page| {
				page.resolve()
					.map_err(|_| TableError::InvalidParameter(format!("page '{}'", page)))
			})
			.transpose()?;
		let sort = params
			.sort
			.as_deref()
			.map(|sort| self.parse_sort(sort))
			.transpose()?;
		let mut filters = self.filters.clone();
		for (column, input) in &params.filters {
			if input.trim().is_empty() {
				self.require_column(column)?;
				filters.remove(column);
			} else {
				filters.set(self.parse_filter(column, input)?);
			}
		}

		if let Some(page) = page {
			self.set_page(page);
		}
		if params.per_page.is_some() {
			self.set_per_page(params.per_page);
		}
		if let Some(sort) = sort {
			self.sort = sort;
		}
		self.filters = filters;
		Ok(())
	}

	fn prepared_rows(&self, rows: &[Row]) -> Vec<Row> {
		let filtered = self.filters.filter_rows(rows.iter().cloned());
		let sort_column = self
			.sort
			.as_ref()
			.and_then(|sort| Some((self.get_column(&sort.column)?, sort.direction)));
		match sort_column {
			Some((column, direction)) => sort_rows(filtered, column, direction),
			None => filtered,
		}
	}

	fn prepared_query(&self, query: &SelectQuery) -> Result<SelectQuery> {
		let query = query.clone().filter_set(&self.filters)?;
		Ok(match &self.sort {
			Some(sort) => query.order_by_first(
				quote_identifier(&sort.column),
				sort.direction.is_descending(),
			),
			None => query,
		})
	}

	fn page_source(&self) -> Result<Box<dyn PageSource>> {
		Ok(match &self.source {
			GridSource::Array(rows) => Box::new(ArrayAdapter::new(self.prepared_rows(rows))),
			GridSource::Query { pool, query } => Box::new(QueryAdapter::new(
				pool.clone(),
				self.prepared_query(query)?,
			)),
		})
	}

	/// Loads the requested page
	pub async fn load(&self) -> Result<GridPage> {
		tracing::debug!(
			"Loading grid page {} ({} per page, {} filters, sort {:?})",
			self.page,
			self.per_page,
			self.filters.len(),
			self.sort.as_ref().map(ToString::to_string)
		);
		let paginator = Paginator::new(self.page_source()?, self.per_page)?;
		let page = paginator.page(self.page).await?;
		Ok(GridPage::new(self.columns.clone(), page, self.sort.clone()))
	}

	/// Loads every filtered row as a single page, for export
	pub async fn load_all(&self) -> Result<GridPage> {
		let source = self.page_source()?;
		let count = source.count().await?;
		let rows = source.get_items(0, count).await?;
		tracing::debug!("Loaded all {} grid rows", rows.len());
		let page = Page::new(rows, 1, usize::from(count > 0), count, count.max(1));
		Ok(GridPage::new(self.columns.clone(), page, self.sort.clone()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn grid() -> Grid {
		Grid::new(GridSource::Array(Vec::new()))
			.column(Column::new("name", "Name"))
			.column(Column::new("secret", "Secret").filterable(false).sortable(false))
	}

	#[rstest]
	fn test_filter_input_checks_column() {
		let mut grid = grid();
		assert!(matches!(
			grid.set_filter_input("missing", "x"),
			Err(TableError::UnknownColumn(_))
		));
		assert!(matches!(
			grid.set_filter_input("secret", "x"),
			Err(TableError::NotFilterable(_))
		));
		assert!(matches!(
			grid.set_filter_input("name", "   "),
			Err(TableError::Filter(_))
		));
		grid.set_filter_input("name", "al%").unwrap();
		assert_eq!(grid.filters().len(), 1);
	}

	#[rstest]
	fn test_sort_checks_column() {
		let mut grid = grid();
		assert!(matches!(grid.set_sort("-secret"), Err(TableError::NotSortable(_))));
		assert!(matches!(grid.set_sort("nope"), Err(TableError::UnknownColumn(_))));
		grid.set_sort("-name").unwrap();
		assert_eq!(grid.sort().map(ToString::to_string).as_deref(), Some("-name"));
		grid.set_sort("").unwrap();
		assert!(grid.sort().is_none());
	}

	#[rstest]
	#[case(Some(0), 1)]
	#[case(Some(40), 40)]
	#[case(Some(5000), 1000)]
	#[case(None, 25)]
	fn test_per_page_is_clamped(#[case] requested: Option<usize>, #[case] expected: usize) {
		let mut grid = grid();
		grid.set_per_page(requested);
		assert_eq!(grid.per_page(), expected);
	}

	#[rstest]
	fn test_rejected_params_change_nothing() {
		let mut grid = grid();
		let params = GridParams {
			page: Some(PageParam::Number(3)),
			sort: Some("name".to_string()),
			filters: HashMap::from([("secret".to_string(), "x".to_string())]),
			..GridParams::default()
		};
		assert!(grid.apply_params(&params).is_err());
		assert_eq!(grid.page_number(), 1);
		assert!(grid.sort().is_none());
	}

	#[rstest]
	fn test_accepted_params_apply_together() {
		let mut grid = grid();
		grid.set_filter_input("name", "Bob").unwrap();
		let params = GridParams {
			page: Some(PageParam::from("4")),
			per_page: Some(10),
			sort: Some("-name".to_string()),
			filters: HashMap::from([("name".to_string(), String::new())]),
		};
		grid.apply_params(&params).unwrap();
		assert_eq!(grid.page_number(), 4);
		assert_eq!(grid.per_page(), 10);
		assert_eq!(grid.sort().map(ToString::to_string).as_deref(), Some("-name"));
		assert!(grid.filters().is_empty());
	}

	#[rstest]
	#[case(PageParam::Number(0))]
	#[case(PageParam::from("0"))]
	#[case(PageParam::from("two"))]
	fn test_page_zero_is_rejected_like_the_paginator(#[case] page: PageParam) {
		let mut grid = grid();
		let params = GridParams {
			page: Some(page),
			..GridParams::default()
		};
		assert!(matches!(
			grid.apply_params(&params),
			Err(TableError::InvalidParameter(_))
		));
		assert_eq!(grid.page_number(), 1);
	}

	#[rstest]
	fn test_date_columns_receive_configured_formats() {
		let mut settings = GridSettings::default();
		settings.date_formats = vec!["%d/%m/%Y".to_string()];
		let grid = Grid::with_settings(GridSource::Array(Vec::new()), settings).column(
			Column::new("created", "Created").with_type(ColumnType::DateTime { formats: Vec::new() }),
		);
		assert_eq!(
			grid.columns()[0].column_type(),
			&ColumnType::DateTime {
				formats: vec!["%d/%m/%Y".to_string()]
			}
		);
	}
}
