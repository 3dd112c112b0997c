//! Tests for service-account key login

use std::path::{Path, PathBuf};

use gsheet_reader_google::{
    AssertionClaims, ServiceAccountKey, SheetsError, SHEETS_READONLY_SCOPE,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use pretty_assertions::assert_eq;
use reqwest::blocking::Client;

const ISSUED_AT: i64 = 1_700_000_000;

fn fixture_path(filename: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

fn fixture_key() -> ServiceAccountKey {
    ServiceAccountKey::from_file(fixture_path("service-account.json"))
        .expect("Failed to load key fixture")
}

fn decode(assertion: &str) -> AssertionClaims {
    let pem = std::fs::read(fixture_path("service-account.pub.pem")).unwrap();
    let key = DecodingKey::from_rsa_pem(&pem).unwrap();
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&["https://oauth2.googleapis.com/token"]);
    // The fixed issue time is long past
    validation.validate_exp = false;
    jsonwebtoken::decode::<AssertionClaims>(assertion, &key, &validation)
        .expect("Assertion should verify against the public key")
        .claims
}

fn form_pairs(body: &[u8]) -> Vec<(String, String)> {
    std::str::from_utf8(body)
        .unwrap()
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_load_key_file() {
    let key = fixture_key();
    assert_eq!(
        key.client_email,
        "reader@gsheet-reader-test.iam.gserviceaccount.com"
    );
    assert_eq!(key.private_key_id.as_deref(), Some("0123456789abcdef"));
    assert_eq!(key.token_uri, "https://oauth2.googleapis.com/token");
}

#[test]
fn test_assertion_is_signed_for_readonly_scope() {
    let key = fixture_key();
    let assertion = key.assertion(ISSUED_AT).unwrap();

    let header = jsonwebtoken::decode_header(&assertion).unwrap();
    assert_eq!(header.alg, Algorithm::RS256);
    assert_eq!(header.kid.as_deref(), Some("0123456789abcdef"));

    assert_eq!(
        decode(&assertion),
        AssertionClaims {
            iss: "reader@gsheet-reader-test.iam.gserviceaccount.com".into(),
            scope: SHEETS_READONLY_SCOPE.into(),
            aud: "https://oauth2.googleapis.com/token".into(),
            iat: ISSUED_AT,
            exp: ISSUED_AT + 3600,
        }
    );
}

#[test]
fn test_token_request_posts_jwt_bearer_grant() {
    let key = fixture_key();
    let request = key
        .token_request(&Client::new(), ISSUED_AT)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(request.method(), &reqwest::Method::POST);
    assert_eq!(request.url().as_str(), "https://oauth2.googleapis.com/token");
    assert_eq!(
        request
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/x-www-form-urlencoded")
    );

    let body = request.body().and_then(|b| b.as_bytes()).unwrap();
    let pairs = form_pairs(body);
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].0, "grant_type");
    assert_eq!(
        pairs[0].1,
        "urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"
    );
    assert_eq!(pairs[1].0, "assertion");

    let claims = decode(&pairs[1].1);
    assert_eq!(claims.scope, SHEETS_READONLY_SCOPE);
    assert_eq!(claims.iss, key.client_email);
}

#[test]
fn test_key_file_without_private_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key.json");
    std::fs::write(&path, r#"{"client_email": "a@b.iam.gserviceaccount.com"}"#).unwrap();

    assert!(matches!(
        ServiceAccountKey::from_file(&path),
        Err(SheetsError::Json(_))
    ));
}
