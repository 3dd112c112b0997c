//! # gsheet-reader-google
//!
//! Google Sheets API v4 source for gsheet-reader.
//!
//! Fetches a spreadsheet with its grid data (cell text and effective
//! formatting) and converts the first sheet into a core [`Grid`]. A response
//! saved to disk can be loaded the same way for offline runs.
//!
//! Requests are authorized with an API key, an access token, or a
//! service-account key file that is exchanged for a read-only token.
//!
//! [`Grid`]: gsheet_reader_core::Grid

mod api;
mod auth;
mod client;
mod error;
mod options;

pub use api::{
    parse_spreadsheet, ApiCellFormat, CellData, ColorStyle, GridData, Properties, RowData, Sheet,
    Spreadsheet, FIELDS,
};
pub use auth::{
    AssertionClaims, ServiceAccountKey, JWT_BEARER_GRANT, SHEETS_READONLY_SCOPE,
};
pub use client::{load_grid, load_spreadsheet, SheetsClient};
pub use error::{SheetsError, SheetsResult};
pub use options::{Credentials, SheetsOptions, DEFAULT_BASE_URL};
