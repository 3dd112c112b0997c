//! # gsheet-reader-core
//!
//! Grid model and the spreadsheet-to-record pipeline for gsheet-reader.
//!
//! This crate is source-agnostic: it takes a [`Grid`] of cells (text plus
//! formatting) and produces typed [`Record`]s:
//! - [`pivot`] - lazy row/column transposition
//! - [`RecordShape`] - declarative target schema and header validation
//! - [`HighlightRule`] - per-row highlight flags from background color
//! - [`RecordMapper`] - row-to-record coercion
//! - [`Pipeline`] - the staged run tying them together
//!
//! ## Example
//!
//! ```rust
//! use gsheet_reader_core::{grid_to_records, Cell, Grid, RecordShape};
//!
//! let grid = Grid::new(vec![
//!     vec![Cell::text("Name"), Cell::text("Number")],
//!     vec![Cell::text("Alice").with_red(0.8), Cell::text("1").with_red(0.8)],
//!     vec![Cell::text("Bob"), Cell::text("2")],
//! ]);
//!
//! let records = grid_to_records(grid, &RecordShape::default()).unwrap();
//! let json = serde_json::to_string(&records).unwrap();
//! assert_eq!(
//!     json,
//!     r#"[{"Name":"Alice","Number":1,"IsHighlighted":true},{"Name":"Bob","Number":2,"IsHighlighted":false}]"#
//! );
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod highlight;
pub mod pipeline;
pub mod pivot;
pub mod record;
pub mod schema;

// Re-exports for convenience
pub use cell::{Cell, CellFormat, Color};
pub use error::{Error, Result};
pub use grid::{Grid, Row};
pub use highlight::{HighlightRule, HIGHLIGHT_RED, RED_TOLERANCE};
pub use pipeline::{grid_to_records, Pipeline, PipelineState, Stage};
pub use pivot::transpose;
pub use record::{FieldValue, MergedCell, Record, RecordMapper};
pub use schema::{FieldSource, FieldSpec, FieldType, RecordShape};
