//! Data grids for datagrid
//!
//! A [`Grid`] combines column definitions, a data source and the state of
//! one request (sort, filters, page) and loads a [`GridPage`]. Renderers in
//! [`export`] turn that page into CSV, jqGrid JSON, an HTML table or a
//! print-friendly document.
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[Grid] --> B[Columns]
//!     A --> C[GridSource]
//!     A --> D[SortConfig]
//!     A --> E[FilterSet]
//!     C --> F[ArrayAdapter]
//!     C --> G[QueryAdapter]
//!     A --> H[GridPage]
//!     H --> I[CsvExporter]
//!     H --> J[JqGridRenderer]
//!     H --> K[HtmlTableRenderer]
//!     H --> L[PrintRenderer]
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod export;
pub mod grid;
pub mod sort;

// Re-exports for convenience
pub use error::{Result, TableError};
pub use export::{
	CsvExporter, ExportFormat, HtmlTableRenderer, JqGridPayload, JqGridRenderer, PrintRenderer,
	Renderer,
};
pub use grid::{Grid, GridPage, GridParams, GridSource};
pub use sort::{SortConfig, SortDirection};
