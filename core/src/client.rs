//! Stateless HTTP request builder and response parser for the accounts API.
//!
//! # Design
//! `AccountClient` holds only a `base_url` and carries no mutable state between
//! calls. Each REST operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Account, StatusPatch};

/// Bytes escaped in an id so it stays a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Synchronous, stateless client for the accounts API.
#[derive(Debug, Clone)]
pub struct AccountClient {
    base_url: String,
}

impl AccountClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_accounts(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/accounts", self.base_url))
    }

    pub fn build_create_account(&self, account: &Account) -> Result<HttpRequest, ApiError> {
        let path = format!("{}/accounts", self.base_url);
        self.json_request(HttpMethod::Post, path, account)
    }

    pub fn build_get_account(&self, id: &str) -> Result<HttpRequest, ApiError> {
        let path = self.account_path(id)?;
        Ok(self.request(HttpMethod::Get, path))
    }

    pub fn build_replace_account(&self, id: &str, account: &Account) -> Result<HttpRequest, ApiError> {
        let path = self.account_path(id)?;
        self.json_request(HttpMethod::Put, path, account)
    }

    pub fn build_patch_status(&self, id: &str, patch: &StatusPatch) -> Result<HttpRequest, ApiError> {
        let path = self.account_path(id)?;
        self.json_request(HttpMethod::Patch, path, patch)
    }

    pub fn build_delete_account(&self, id: &str) -> Result<HttpRequest, ApiError> {
        let path = self.account_path(id)?;
        Ok(self.request(HttpMethod::Delete, path))
    }

    /// An empty or `null` body is read as an empty list.
    pub fn parse_list_accounts(&self, response: HttpResponse) -> Result<Vec<Account>, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let accounts: Option<Vec<Account>> = decode(&response.body)?;
        Ok(accounts.unwrap_or_default())
    }

    pub fn parse_create_account(&self, response: HttpResponse) -> Result<Account, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_get_account(&self, response: HttpResponse) -> Result<Account, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_replace_account(&self, response: HttpResponse) -> Result<Account, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_patch_status(&self, response: HttpResponse) -> Result<Account, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// The body is ignored; some backends echo the deleted account.
    pub fn parse_delete_account(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn account_path(&self, id: &str) -> Result<String, ApiError> {
        if id.is_empty() {
            return Err(ApiError::MissingId);
        }
        Ok(format!("{}/accounts/{}", self.base_url, utf8_percent_encode(id, PATH_SEGMENT)))
    }

    fn request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<T: Serialize>(&self, method: HttpMethod, path: String, payload: &T) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::from_status(response.status, response.body.clone()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
