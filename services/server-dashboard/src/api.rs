//! Server API collaborator and its REST implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::envelope::ResponseEnvelope;
use crate::io::{HttpClient, HttpResponse};
use crate::server::{ServerForm, StatusFilter};
use crate::store::filter_envelope;
use crate::{DashboardError, Result};

/// The requests the dashboard issues against the server backend
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ServerApi: Send + Sync {
    /// Fetch the full server list (`data.servers`)
    async fn list(&self) -> Result<ResponseEnvelope>;

    /// Re-check one server by IP address (`data.server`)
    async fn ping(&self, ip_address: &str) -> Result<ResponseEnvelope>;

    /// Create a server from the form values (`data.server`)
    async fn save(&self, form: &ServerForm) -> Result<ResponseEnvelope>;

    /// Fetch one server by id (`data.server`)
    async fn get(&self, id: i64) -> Result<ResponseEnvelope>;

    /// Delete one server by id
    async fn delete(&self, id: i64) -> Result<ResponseEnvelope>;

    /// Restrict `envelope` to the servers matching `filter`.
    ///
    /// Computed locally unless an implementation asks the backend.
    async fn filter(
        &self,
        filter: StatusFilter,
        envelope: &ResponseEnvelope,
    ) -> Result<ResponseEnvelope> {
        Ok(filter_envelope(envelope, filter))
    }
}

/// `ServerApi` over the backend's `/server` REST endpoints
pub struct RestServerApi {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for RestServerApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestServerApi")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl RestServerApi {
    pub fn new(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        tracing::debug!("Created RestServerApi for {}", base_url);
        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/server/{}", self.base_url, path)
    }
}

fn decode(response: HttpResponse) -> Result<ResponseEnvelope> {
    if !response.is_success() {
        tracing::debug!("API error {}: {}", response.status, response.body);
        return Err(DashboardError::Api {
            status_code: response.status,
        });
    }
    Ok(serde_json::from_str(&response.body)?)
}

#[async_trait]
impl ServerApi for RestServerApi {
    async fn list(&self) -> Result<ResponseEnvelope> {
        decode(self.http.get(&self.url("list")).await?)
    }

    async fn ping(&self, ip_address: &str) -> Result<ResponseEnvelope> {
        decode(self.http.get(&self.url(&format!("ping/{}", ip_address))).await?)
    }

    async fn save(&self, form: &ServerForm) -> Result<ResponseEnvelope> {
        let body = serde_json::to_value(form)?;
        decode(self.http.post_json(&self.url("save"), &body).await?)
    }

    async fn get(&self, id: i64) -> Result<ResponseEnvelope> {
        decode(self.http.get(&self.url(&format!("get/{}", id))).await?)
    }

    async fn delete(&self, id: i64) -> Result<ResponseEnvelope> {
        decode(self.http.delete(&self.url(&format!("delete/{}", id))).await?)
    }
}
