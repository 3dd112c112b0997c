//! Service-account login
//!
//! A service-account key file is turned into an access token with the OAuth
//! 2.0 JWT bearer grant: an RS256-signed assertion naming the account, the
//! read-only Sheets scope and the token endpoint is posted to that endpoint.

use std::fs;
use std::path::Path;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::blocking::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{SheetsError, SheetsResult};

/// Read-only Sheets scope
pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Grant type of the JWT bearer flow
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Lifetime of a signed assertion; Google caps it at one hour
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// The fields of a downloaded service-account key file that login needs
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

/// Claims of the signed assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ServiceAccountKey {
    /// Read a key file as downloaded from the Cloud console
    pub fn from_file<P: AsRef<Path>>(path: P) -> SheetsResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse a key file's JSON
    pub fn from_json(json: &str) -> SheetsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Claims for an assertion issued at `iat` (Unix seconds)
    pub fn claims(&self, iat: i64) -> AssertionClaims {
        AssertionClaims {
            iss: self.client_email.clone(),
            scope: SHEETS_READONLY_SCOPE.to_string(),
            aud: self.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        }
    }

    /// Sign an assertion issued at `iat` (Unix seconds)
    pub fn assertion(&self, iat: i64) -> SheetsResult<String> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())?;
        Ok(jsonwebtoken::encode(&header, &self.claims(iat), &key)?)
    }

    /// Build the token request without sending it
    pub fn token_request(&self, http: &Client, iat: i64) -> SheetsResult<RequestBuilder> {
        let assertion = self.assertion(iat)?;
        Ok(http.post(&self.token_uri).form(&[
            ("grant_type", JWT_BEARER_GRANT),
            ("assertion", assertion.as_str()),
        ]))
    }

    /// Exchange the key for an access token
    pub fn fetch_access_token(&self, http: &Client) -> SheetsResult<String> {
        tracing::info!("Requesting access token for {}", self.client_email);

        // Back-date slightly so a fast local clock does not make iat "future"
        let iat = (Utc::now() - Duration::seconds(30)).timestamp();
        let response = self.token_request(http, iat)?.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SheetsError::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json()?;
        Ok(token.access_token)
    }
}
