use async_trait::async_trait;
use serde::Deserialize;

use super::{AccessToken, CredentialError, TokenCredential, scope_for_resource};

const NAME: &str = "EnvironmentCredential";
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

pub const TENANT_ID_VAR: &str = "AZURE_TENANT_ID";
pub const CLIENT_ID_VAR: &str = "AZURE_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "AZURE_CLIENT_SECRET";
pub const AUTHORITY_HOST_VAR: &str = "AZURE_AUTHORITY_HOST";

#[derive(Clone)]
struct ClientSecret {
    tenant_id: String,
    client_id: String,
    secret: String,
}

/// Service principal client-credentials grant configured through `AZURE_*` variables.
#[derive(Clone)]
pub struct EnvironmentCredential {
    settings: Result<ClientSecret, String>,
    authority_host: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

impl EnvironmentCredential {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// NOTE: `lookup` stands in for the process environment in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| format!("{key} is not set"))
        };

        let settings = var(TENANT_ID_VAR).and_then(|tenant_id| {
            let client_id = var(CLIENT_ID_VAR)?;
            let secret = var(CLIENT_SECRET_VAR)?;
            Ok(ClientSecret {
                tenant_id,
                client_id,
                secret,
            })
        });

        let authority_host = lookup(AUTHORITY_HOST_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHORITY_HOST.to_string());

        Self {
            settings,
            authority_host: authority_host.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.settings.is_ok()
    }

    pub fn authority_host(&self) -> &str {
        &self.authority_host
    }

    fn token_url(&self, tenant_id: &str) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.authority_host, tenant_id)
    }
}

#[async_trait]
impl TokenCredential for EnvironmentCredential {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn get_token(&self, resource: &str) -> Result<AccessToken, CredentialError> {
        let settings = self
            .settings
            .as_ref()
            .map_err(|reason| CredentialError::Unavailable {
                credential: NAME,
                reason: reason.clone(),
            })?;

        let scope = scope_for_resource(resource);
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", settings.client_id.as_str()),
            ("client_secret", settings.secret.as_str()),
            ("scope", scope.as_str()),
        ];

        let response = self
            .http
            .post(self.token_url(&settings.tenant_id))
            .form(&form)
            .send()
            .await
            .map_err(|e| CredentialError::Failed {
                credential: NAME,
                reason: format!("token request failed: {}", e.without_url()),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| CredentialError::Failed {
            credential: NAME,
            reason: format!("failed to read token response: {}", e.without_url()),
        })?;

        if !status.is_success() {
            let reason = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) if !err.error.is_empty() => {
                    format!("{} ({}): {}", err.error, status.as_u16(), err.error_description)
                }
                _ => format!("token endpoint returned {}", status.as_u16()),
            };
            return Err(CredentialError::Failed {
                credential: NAME,
                reason,
            });
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| CredentialError::Failed {
                credential: NAME,
                reason: format!("failed to parse token response: {}", e),
            })?;

        Ok(AccessToken::new(token.access_token))
    }
}

impl std::fmt::Debug for EnvironmentCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("EnvironmentCredential");
        if let Ok(settings) = &self.settings {
            debug
                .field("tenant_id", &settings.tenant_id)
                .field("client_id", &settings.client_id);
        }
        debug
            .field("client_secret", &"[REDACTED]")
            .field("authority_host", &self.authority_host)
            .finish()
    }
}
