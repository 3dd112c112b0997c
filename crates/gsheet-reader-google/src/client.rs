//! Blocking Sheets API client

use std::fs;
use std::path::Path;

use reqwest::blocking::{Client, RequestBuilder};

use gsheet_reader_core::Grid;

use crate::api::{parse_spreadsheet, Spreadsheet, FIELDS};
use crate::auth::ServiceAccountKey;
use crate::error::{SheetsError, SheetsResult};
use crate::options::{Credentials, SheetsOptions};

/// Fetches one spreadsheet's grid data
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: Client,
    options: SheetsOptions,
}

impl SheetsClient {
    /// Create a client for the given options
    pub fn new(options: SheetsOptions) -> SheetsResult<Self> {
        let http = Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("gsheet-reader/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(SheetsClient { http, options })
    }

    /// Options this client was built with
    pub fn options(&self) -> &SheetsOptions {
        &self.options
    }

    /// Build the `spreadsheets.get` request without sending it
    ///
    /// With a service-account key this first exchanges the key for an access
    /// token, so it talks to the token endpoint.
    pub fn request(&self) -> SheetsResult<RequestBuilder> {
        let request = self
            .http
            .get(self.options.spreadsheet_url())
            .query(&[("includeGridData", "true"), ("fields", FIELDS)]);

        Ok(match &self.options.credentials {
            Credentials::ApiKey(key) => request.query(&[("key", key)]),
            Credentials::AccessToken(token) => request.bearer_auth(token),
            Credentials::ServiceAccountKey(path) => {
                let key = ServiceAccountKey::from_file(path)?;
                let token = key.fetch_access_token(&self.http)?;
                request.bearer_auth(token)
            }
        })
    }

    /// Fetch the spreadsheet document
    pub fn fetch(&self) -> SheetsResult<Spreadsheet> {
        tracing::info!("Fetching spreadsheet {}", self.options.spreadsheet_id);

        let response = self.request()?.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SheetsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text()?;
        tracing::debug!("Received {} bytes", body.len());
        parse_spreadsheet(&body)
    }

    /// Fetch the spreadsheet and return its first grid
    pub fn fetch_grid(&self) -> SheetsResult<Grid> {
        let doc = self.fetch()?;
        if let Some(title) = doc.title() {
            tracing::info!("Loaded spreadsheet \"{}\"", title);
        }
        doc.first_grid()
    }
}

/// Read a saved `spreadsheets.get` response from disk
pub fn load_spreadsheet<P: AsRef<Path>>(path: P) -> SheetsResult<Spreadsheet> {
    let json = fs::read_to_string(path)?;
    parse_spreadsheet(&json)
}

/// Read a saved response and return its first grid
pub fn load_grid<P: AsRef<Path>>(path: P) -> SheetsResult<Grid> {
    load_spreadsheet(path)?.first_grid()
}
