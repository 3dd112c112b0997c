//! Prelude module for convenient imports
//!
//! ```rust
//! use gsheet_reader::prelude::*;
//! ```

pub use crate::{
    grid_to_records, Cell, Color, Error, FieldSpec, FieldType, FieldValue, Grid, HighlightRule,
    Pipeline, Record, RecordShape, Result,
};

#[cfg(feature = "google")]
pub use crate::{load_grid, Credentials, SheetsClient, SheetsError, SheetsOptions};
