//! The transport contract the synchronizers talk to, and its HTTP
//! implementation.
//!
//! # Design
//! `AccountApi` is object safe so synchronizers can take an
//! `Arc<dyn AccountApi>` and tests can hand in an in-memory fake.
//! `RemoteAccountApi` pairs the stateless `AccountClient` with a blocking
//! `ureq` agent; every round-trip runs on tokio's blocking pool so the
//! calling task is never parked on the network. No retries, no deadline.

use async_trait::async_trait;
use tracing::debug;

use crate::client::AccountClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Account, StatusPatch};

/// One method per REST operation on `/accounts`.
#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Account>, ApiError>;

    /// The server assigns the id of the returned account.
    async fn create(&self, account: &Account) -> Result<Account, ApiError>;

    async fn fetch_one(&self, id: &str) -> Result<Account, ApiError>;

    /// Full update: every field is overwritten.
    async fn replace(&self, id: &str, account: &Account) -> Result<Account, ApiError>;

    async fn patch_status(&self, id: &str, patch: StatusPatch) -> Result<Account, ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// `AccountApi` over real HTTP.
#[derive(Clone)]
pub struct RemoteAccountApi {
    client: AccountClient,
    agent: ureq::Agent,
}

impl RemoteAccountApi {
    pub fn new(base_url: &str) -> Self {
        // 4xx/5xx come back as data so `AccountClient` does the classification.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            client: AccountClient::new(base_url),
            agent,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.base_url)
    }

    pub fn client(&self) -> &AccountClient {
        &self.client
    }

    async fn roundtrip(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute(&agent, request))
            .await
            .map_err(|e| ApiError::TransportUnavailable(e.to_string()))?
    }
}

#[async_trait]
impl AccountApi for RemoteAccountApi {
    async fn list(&self) -> Result<Vec<Account>, ApiError> {
        let response = self.roundtrip(self.client.build_list_accounts()).await?;
        self.client.parse_list_accounts(response)
    }

    async fn create(&self, account: &Account) -> Result<Account, ApiError> {
        let request = self.client.build_create_account(account)?;
        let response = self.roundtrip(request).await?;
        self.client.parse_create_account(response)
    }

    async fn fetch_one(&self, id: &str) -> Result<Account, ApiError> {
        let request = self.client.build_get_account(id)?;
        let response = self.roundtrip(request).await?;
        self.client.parse_get_account(response)
    }

    async fn replace(&self, id: &str, account: &Account) -> Result<Account, ApiError> {
        let request = self.client.build_replace_account(id, account)?;
        let response = self.roundtrip(request).await?;
        self.client.parse_replace_account(response)
    }

    async fn patch_status(&self, id: &str, patch: StatusPatch) -> Result<Account, ApiError> {
        let request = self.client.build_patch_status(id, &patch)?;
        let response = self.roundtrip(request).await?;
        self.client.parse_patch_status(response)
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let request = self.client.build_delete_account(id)?;
        let response = self.roundtrip(request).await?;
        self.client.parse_delete_account(response)
    }
}

/// Execute an `HttpRequest` with ureq and return an `HttpResponse`.
///
/// Only failures where no response arrived are errors here; status codes are
/// left for the parser.
pub fn execute(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    debug!(method = %request.method, path = %request.path, "sending request");

    let HttpRequest {
        method,
        path,
        headers,
        body,
    } = request;

    let result = match method {
        HttpMethod::Get | HttpMethod::Delete => {
            let mut builder = if method == HttpMethod::Get {
                agent.get(&path)
            } else {
                agent.delete(&path)
            };
            for (key, value) in &headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            builder.call()
        }
        HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
            let mut builder = match method {
                HttpMethod::Post => agent.post(&path),
                HttpMethod::Put => agent.put(&path),
                _ => agent.patch(&path),
            };
            for (key, value) in &headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            match body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };

    let mut response = result.map_err(|e| ApiError::TransportUnavailable(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::TransportUnavailable(e.to_string()))?;

    debug!(method = %method, path = %path, status, "received response");

    Ok(HttpResponse { status, headers, body })
}
