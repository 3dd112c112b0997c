//! Google Sheets connection options

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{SheetsError, SheetsResult};

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// How requests are authorized
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// API key, sent as the `key` query parameter (public sheets only)
    ApiKey(String),
    /// OAuth 2.0 access token, sent as a bearer header
    AccessToken(String),
    /// Service-account key file, exchanged for a read-only access token
    ServiceAccountKey(PathBuf),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Credentials::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
            Credentials::ServiceAccountKey(path) => {
                f.debug_tuple("ServiceAccountKey").field(path).finish()
            }
        }
    }
}

/// Options for fetching a spreadsheet
#[derive(Debug, Clone)]
pub struct SheetsOptions {
    /// Spreadsheet id, as found in the sheet's URL
    pub spreadsheet_id: String,
    /// Request authorization
    pub credentials: Credentials,
    /// API endpoint (default: [`DEFAULT_BASE_URL`])
    pub base_url: String,
    /// Whole-request timeout (default: 30 seconds)
    pub timeout: Duration,
}

impl SheetsOptions {
    /// Create options for a spreadsheet, checking the id
    pub fn new<S: Into<String>>(spreadsheet_id: S, credentials: Credentials) -> SheetsResult<Self> {
        let spreadsheet_id = spreadsheet_id.into();
        let valid = !spreadsheet_id.is_empty()
            && spreadsheet_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SheetsError::InvalidSpreadsheetId(spreadsheet_id));
        }

        Ok(SheetsOptions {
            spreadsheet_id,
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        })
    }

    /// Builder: use a different endpoint
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builder: set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of the `spreadsheets.get` resource
    pub fn spreadsheet_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}",
            self.base_url.trim_end_matches('/'),
            self.spreadsheet_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spreadsheet_url() {
        let options = SheetsOptions::new("1AbC_d-9", Credentials::ApiKey("k".into()))
            .unwrap()
            .with_base_url("http://localhost:8080/");
        assert_eq!(
            options.spreadsheet_url(),
            "http://localhost:8080/v4/spreadsheets/1AbC_d-9"
        );
    }

    #[test]
    fn test_rejects_bad_ids() {
        for id in ["", "a/b", "id?x=1", "has space"] {
            assert!(
                matches!(
                    SheetsOptions::new(id, Credentials::ApiKey("k".into())),
                    Err(SheetsError::InvalidSpreadsheetId(_))
                ),
                "{id:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let debug = format!("{:?}", Credentials::AccessToken("secret".into()));
        assert!(!debug.contains("secret"));
    }
}
