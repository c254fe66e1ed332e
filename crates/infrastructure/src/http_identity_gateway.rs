use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;
use url::Url;
use venue_application::IdentityGateway;
use venue_core::{AppError, AppResult};

const ADMIN_ROLE: &str = "admin";
const BODY_SNIPPET_LIMIT: usize = 256;

/// Connection settings for the identity service.
#[derive(Debug, Clone)]
pub struct IdentityGatewayConfig {
    /// Base URL that endpoint paths are appended to. May carry a path prefix.
    pub base_url: Url,
    /// Client-side timeout applied to every request.
    pub timeout: Duration,
}

/// Identity gateway backed by the identity service's HTTP API.
#[derive(Clone)]
pub struct HttpIdentityGateway {
    http_client: reqwest::Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct ProfileResponse {
    roles: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct AssignedLocationsResponse {
    location_ids: Option<Vec<String>>,
}

impl HttpIdentityGateway {
    /// Builds a gateway with its own HTTP client.
    pub fn new(config: IdentityGatewayConfig) -> AppResult<Self> {
        if config.base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "identity service url '{}' cannot be used as a base url",
                config.base_url
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| {
                AppError::Internal(format!("failed to build identity service client: {error}"))
            })?;

        Ok(Self {
            http_client,
            base_url: config.base_url,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Internal(format!(
                    "identity service url '{}' cannot be used as a base url",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn get(&self, url: Url, credential: &str) -> AppResult<(StatusCode, Vec<u8>)> {
        debug!(url = %url, "calling identity service");

        let response = self
            .http_client
            .get(url.clone())
            .bearer_auth(credential)
            .send()
            .await
            .map_err(|error| {
                AppError::Internal(format!("identity service request to {url} failed: {error}"))
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to read identity service response from {url}: {error}"
            ))
        })?;

        debug!(url = %url, status = %status, "identity service responded");
        Ok((status, body.to_vec()))
    }
}

fn unexpected_status(status: StatusCode, body: &[u8]) -> AppError {
    let snippet: String = String::from_utf8_lossy(body)
        .chars()
        .take(BODY_SNIPPET_LIMIT)
        .collect();

    AppError::Internal(format!(
        "identity service returned status {status}: {snippet}"
    ))
}

#[async_trait]
impl IdentityGateway for HttpIdentityGateway {
    async fn is_admin(&self, _caller_id: &str, credential: &str) -> AppResult<bool> {
        let url = self.endpoint(&["profile"])?;
        let (status, body) = self.get(url, credential).await?;

        if status != StatusCode::OK {
            return Err(unexpected_status(status, &body));
        }

        let profile: ProfileResponse = serde_json::from_slice(&body).map_err(|error| {
            AppError::Internal(format!("failed to decode identity profile: {error}"))
        })?;

        Ok(profile
            .roles
            .unwrap_or_default()
            .iter()
            .any(|role| role == ADMIN_ROLE))
    }

    async fn assigned_location_ids(
        &self,
        caller_id: &str,
        credential: &str,
    ) -> AppResult<Vec<String>> {
        let url = self.endpoint(&["users", caller_id, "locations"])?;
        let (status, body) = self.get(url, credential).await?;

        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if status != StatusCode::OK {
            return Err(unexpected_status(status, &body));
        }

        let assignments: AssignedLocationsResponse =
            serde_json::from_slice(&body).map_err(|error| {
                AppError::Internal(format!("failed to decode assigned locations: {error}"))
            })?;

        Ok(assignments.location_ids.unwrap_or_default())
    }
}
