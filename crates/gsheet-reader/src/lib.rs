//! # gsheet-reader
//!
//! Read a single Google Sheet into a validated, strongly-typed sequence of
//! records ready to be written out as JSON.
//!
//! ## Features
//!
//! - Declarative record shapes checked against the sheet's header row
//! - Row highlight detection from cell background color
//! - Typed coercion of cell text (integers, floats, booleans, enums)
//! - Google Sheets API v4 source, or a saved API response (`google` feature)
//!
//! ## Example
//!
//! ```rust
//! use gsheet_reader::prelude::*;
//!
//! let grid = Grid::new(vec![
//!     vec![Cell::text("Name"), Cell::text("Number")],
//!     vec![Cell::text("Alice").with_red(0.8), Cell::text("42").with_red(0.8)],
//! ]);
//!
//! let records = grid_to_records(grid, &RecordShape::default()).unwrap();
//! assert_eq!(records[0].get("Number"), Some(&FieldValue::Integer(42)));
//! ```

pub mod prelude;

// Re-export core types
pub use gsheet_reader_core::{
    grid_to_records,
    transpose,
    // Cell and grid types
    Cell,
    CellFormat,
    Color,
    // Error types
    Error,
    FieldSource,
    FieldSpec,
    FieldType,
    FieldValue,
    Grid,
    // Highlight detection
    HighlightRule,
    MergedCell,
    // Pipeline
    Pipeline,
    PipelineState,
    Record,
    RecordMapper,
    // Schema types
    RecordShape,
    Result,
    Row,
    Stage,
    HIGHLIGHT_RED,
    RED_TOLERANCE,
};

// Re-export the Google Sheets source
#[cfg(feature = "google")]
pub use gsheet_reader_google::{
    load_grid, load_spreadsheet, parse_spreadsheet, Credentials, ServiceAccountKey, SheetsClient,
    SheetsError, SheetsOptions, SheetsResult, Spreadsheet, DEFAULT_BASE_URL,
    SHEETS_READONLY_SCOPE,
};
