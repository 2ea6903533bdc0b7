//! Bearer token acquisition for Azure Resource Manager.
//!
//! Sources are tried in a fixed order: service principal from the environment, managed
//! identity, then the Azure CLI login cache. The first one that produces a token wins; a
//! source that is configured but rejected stops the chain.

mod azure_cli;
mod environment;
mod managed_identity;

pub use azure_cli::{AzureCliCredential, default_subscription};
pub use environment::EnvironmentCredential;
pub use managed_identity::ManagedIdentityCredential;

use async_trait::async_trait;
use thiserror::Error;

/// Token audience of the public-cloud management endpoint.
pub const ARM_RESOURCE: &str = "https://management.azure.com/";

/// Token audience for a management endpoint, e.g. `https://management.chinacloudapi.cn/`.
pub fn resource_for_endpoint(endpoint: &str) -> String {
    format!("{}/", endpoint.trim_end_matches('/'))
}

/// OAuth2 v2 scope form of a resource audience.
pub fn scope_for_resource(resource: &str) -> String {
    format!("{}/.default", resource.trim_end_matches('/'))
}

#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(secret: String) -> Self {
        Self(secret)
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// SECURITY: Error messages must NEVER contain secrets or tokens.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The source is not configured on this machine (missing env vars, no IMDS, no az).
    #[error("{credential} unavailable: {reason}")]
    Unavailable {
        credential: &'static str,
        reason: String,
    },

    /// The source is configured but refused to issue a token.
    #[error("{credential} failed: {reason}")]
    Failed {
        credential: &'static str,
        reason: String,
    },

    #[error("no usable credential source found [{}]", summarize(.0))]
    Exhausted(Vec<CredentialError>),
}

fn summarize(attempts: &[CredentialError]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[async_trait]
pub trait TokenCredential: Send + Sync {
    fn name(&self) -> &'static str;

    /// Token for `resource`, the audience URI of the management endpoint.
    async fn get_token(&self, resource: &str) -> Result<AccessToken, CredentialError>;
}

/// Ordered chain of credential sources.
pub struct DefaultCredentialChain {
    sources: Vec<Box<dyn TokenCredential>>,
}

impl DefaultCredentialChain {
    pub fn new(sources: Vec<Box<dyn TokenCredential>>) -> Self {
        Self { sources }
    }

    /// Environment, managed identity, Azure CLI.
    pub fn from_env() -> Result<Self, CredentialError> {
        Ok(Self::new(vec![
            Box::new(EnvironmentCredential::from_env()),
            Box::new(ManagedIdentityCredential::from_env()?),
            Box::new(AzureCliCredential::new()),
        ]))
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }
}

#[async_trait]
impl TokenCredential for DefaultCredentialChain {
    fn name(&self) -> &'static str {
        "DefaultCredentialChain"
    }

    async fn get_token(&self, resource: &str) -> Result<AccessToken, CredentialError> {
        let mut attempts = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            match source.get_token(resource).await {
                Ok(token) => {
                    tracing::info!(credential = source.name(), "access token acquired");
                    return Ok(token);
                }
                Err(err @ CredentialError::Unavailable { .. }) => {
                    tracing::debug!(credential = source.name(), error = %err, "credential source skipped");
                    attempts.push(err);
                }
                Err(err) => {
                    // Never fall through to a different identity
                    tracing::warn!(credential = source.name(), error = %err, "credential source rejected");
                    attempts.push(err);
                    break;
                }
            }
        }

        Err(CredentialError::Exhausted(attempts))
    }
}
