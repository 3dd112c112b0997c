//! Google Sheets source error types

use thiserror::Error;

/// Result type for Google Sheets operations
pub type SheetsResult<T> = std::result::Result<T, SheetsError>;

/// Errors that can occur while fetching or decoding a spreadsheet
#[derive(Debug, Error)]
pub enum SheetsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Sheets API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body is not a spreadsheet document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Spreadsheet id is empty or has characters the API never issues
    #[error("Invalid spreadsheet id: {0:?}")]
    InvalidSpreadsheetId(String),

    /// The document has no sheet or no grid data
    #[error("Spreadsheet has no grid data (was includeGridData set?)")]
    NoGridData,

    /// Service-account assertion could not be signed
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// The token endpoint refused the service-account assertion
    #[error("Token exchange failed with {status}: {body}")]
    TokenExchange { status: u16, body: String },
}
