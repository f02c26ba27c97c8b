//! # datagrid
//!
//! Server-side data grids: given rows from an in-memory list or a SQL
//! query, apply column filters, sorting and pagination, then render the
//! page as an HTML table, CSV, a print-friendly document or jqGrid JSON.
//!
//! ## Feature Flags
//!
//! - `filters` - filter expressions and their evaluation
//! - `pagination` - page sources, fast/safe strategy selection, SQLite queries
//! - `tables` - grids and renderers
//! - `full` (default) - everything
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "tables")]
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! use datagrid::prelude::*;
//!
//! let rows = vec![
//! 	Row::new().with("email", "a@gmail.com").with("age", 31),
//! 	Row::new().with("email", "b@yahoo.com").with("age", 45),
//! 	Row::new().with("email", "c@gmail.com").with("age", 17),
//! ];
//! let mut grid = Grid::new(GridSource::Array(rows))
//! 	.column(Column::new("email", "E-Mail"))
//! 	.column(Column::new("age", "Age").with_type(ColumnType::number()));
//!
//! grid.set_filter_input("email", "gmail")?;
//! grid.set_sort("-age")?;
//!
//! let page = grid.load().await?;
//! let csv = CsvExporter::new().render(&page)?;
//! assert_eq!(
//! 	String::from_utf8(csv).unwrap(),
//! 	"E-Mail,Age\na@gmail.com,31\nc@gmail.com,17\n"
//! );
//! # Ok::<(), datagrid::tables::TableError>(())
//! # }).unwrap();
//! ```

pub use datagrid_core as core;
#[cfg(feature = "filters")]
pub use datagrid_filters as filters;
#[cfg(feature = "pagination")]
pub use datagrid_pagination as pagination;
#[cfg(feature = "tables")]
pub use datagrid_tables as tables;

// Re-export core types
pub use datagrid_core::{Column, ColumnType, Comparable, CoreError, GridSettings, Row, Value};
#[cfg(feature = "filters")]
pub use datagrid_filters::{FilterError, FilterOperator, FilterSet, FilterSpec};
#[cfg(feature = "pagination")]
pub use datagrid_pagination::{
	ArrayAdapter, Page, PageParam, PageSource, PaginationError, Paginator, QueryAdapter, QueryShape,
	SelectQuery, StrategyKind, select_strategy,
};
#[cfg(feature = "tables")]
pub use datagrid_tables::{
	CsvExporter, ExportFormat, Grid, GridPage, GridParams, GridSource, HtmlTableRenderer,
	JqGridRenderer, PrintRenderer, Renderer, SortConfig, SortDirection, TableError,
};

/// Everything needed to build and render a grid
pub mod prelude {
	pub use datagrid_core::{Column, ColumnType, GridSettings, Row, Value};
	#[cfg(feature = "filters")]
	pub use datagrid_filters::{FilterOperator, FilterSet, FilterSpec};
	#[cfg(feature = "pagination")]
	pub use datagrid_pagination::{PageSource, Paginator, SelectQuery};
	#[cfg(feature = "tables")]
	pub use datagrid_tables::{
		CsvExporter, Grid, GridParams, GridSource, HtmlTableRenderer, JqGridRenderer,
		PrintRenderer, Renderer,
	};
}
