use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{AccessToken, CredentialError, TokenCredential};

const NAME: &str = "ManagedIdentityCredential";

pub const IMDS_ENDPOINT: &str = "http://169.254.169.254/metadata/identity/oauth2/token";
const IMDS_API_VERSION: &str = "2018-02-01";
const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Token from the Azure instance metadata service (system- or user-assigned identity).
#[derive(Debug, Clone)]
pub struct ManagedIdentityCredential {
    endpoint: String,
    client_id: Option<String>,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ImdsTokenResponse {
    access_token: String,
}

impl ManagedIdentityCredential {
    /// System-assigned identity, or the user-assigned one named by `AZURE_CLIENT_ID`.
    pub fn from_env() -> Result<Self, CredentialError> {
        let client_id = std::env::var(super::environment::CLIENT_ID_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty());
        Self::with_endpoint(IMDS_ENDPOINT, client_id)
    }

    /// NOTE: Primarily used for testing with mock servers.
    pub fn with_endpoint(
        endpoint: &str,
        client_id: Option<String>,
    ) -> Result<Self, CredentialError> {
        let http = reqwest::Client::builder()
            .connect_timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| CredentialError::Failed {
                credential: NAME,
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            client_id,
            http,
        })
    }

    fn query<'a>(&'a self, resource: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut query = vec![("api-version", IMDS_API_VERSION), ("resource", resource)];
        if let Some(client_id) = &self.client_id {
            query.push(("client_id", client_id.as_str()));
        }
        query
    }
}

#[async_trait]
impl TokenCredential for ManagedIdentityCredential {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn get_token(&self, resource: &str) -> Result<AccessToken, CredentialError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&self.query(resource))
            .header("Metadata", "true")
            .send()
            .await
            .map_err(|e| CredentialError::Unavailable {
                credential: NAME,
                reason: format!("instance metadata service unreachable: {}", e.without_url()),
            })?;

        let status = response.status();

        // IMDS answers 400 when no identity is assigned to the host
        if status.as_u16() == 400 || status.as_u16() == 404 {
            return Err(CredentialError::Unavailable {
                credential: NAME,
                reason: format!("no managed identity assigned ({})", status.as_u16()),
            });
        }

        if !status.is_success() {
            return Err(CredentialError::Failed {
                credential: NAME,
                reason: format!("instance metadata service returned {}", status.as_u16()),
            });
        }

        let token: ImdsTokenResponse =
            response.json().await.map_err(|e| CredentialError::Failed {
                credential: NAME,
                reason: format!("failed to parse token response: {}", e.without_url()),
            })?;

        Ok(AccessToken::new(token.access_token))
    }
}
