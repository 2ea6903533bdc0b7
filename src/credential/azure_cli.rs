use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use super::{AccessToken, CredentialError, TokenCredential};

const NAME: &str = "AzureCliCredential";

/// Reuses the login cached by `az login`.
#[derive(Debug, Clone)]
pub struct AzureCliCredential {
    program: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliToken {
    access_token: String,
}

impl Default for AzureCliCredential {
    fn default() -> Self {
        Self::new()
    }
}

impl AzureCliCredential {
    pub fn new() -> Self {
        let program = if cfg!(windows) { "az.cmd" } else { "az" };
        Self::with_program(program)
    }

    /// NOTE: Lets tests substitute the `az` binary.
    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<String, CredentialError> {
        tracing::debug!(program = %self.program, ?args, "running Azure CLI");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| CredentialError::Unavailable {
                credential: NAME,
                reason: if e.kind() == std::io::ErrorKind::NotFound {
                    format!("'{}' not found on PATH", self.program)
                } else {
                    format!("failed to run '{}': {}", self.program, e)
                },
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::trace!(code = ?output.status.code(), %stderr, "Azure CLI failed");

            if stderr.contains("az login") {
                return Err(CredentialError::Unavailable {
                    credential: NAME,
                    reason: "not logged in, run 'az login'".to_string(),
                });
            }
            return Err(CredentialError::Failed {
                credential: NAME,
                reason: if stderr.is_empty() {
                    format!("'{}' exited with {}", self.program, output.status)
                } else {
                    stderr
                },
            });
        }

        String::from_utf8(output.stdout).map_err(|e| CredentialError::Failed {
            credential: NAME,
            reason: format!("invalid UTF-8 in CLI output: {}", e),
        })
    }

    /// Subscription currently selected with `az account set`.
    pub async fn default_subscription(&self) -> Result<String, CredentialError> {
        let stdout = self
            .run(&["account", "show", "--query", "id", "--output", "tsv"])
            .await?;
        parse_subscription_id(&stdout)
    }
}

#[async_trait]
impl TokenCredential for AzureCliCredential {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn get_token(&self, resource: &str) -> Result<AccessToken, CredentialError> {
        let stdout = self
            .run(&[
                "account",
                "get-access-token",
                "--resource",
                resource,
                "--output",
                "json",
            ])
            .await?;
        parse_access_token(&stdout)
    }
}

/// Default subscription of the local Azure CLI login.
pub async fn default_subscription() -> Result<String, CredentialError> {
    AzureCliCredential::new().default_subscription().await
}

fn parse_access_token(stdout: &str) -> Result<AccessToken, CredentialError> {
    let token: CliToken = serde_json::from_str(stdout).map_err(|e| CredentialError::Failed {
        credential: NAME,
        reason: format!("unexpected get-access-token output: {}", e),
    })?;

    if token.access_token.is_empty() {
        return Err(CredentialError::Failed {
            credential: NAME,
            reason: "get-access-token returned an empty token".to_string(),
        });
    }

    Ok(AccessToken::new(token.access_token))
}

fn parse_subscription_id(stdout: &str) -> Result<String, CredentialError> {
    let id = stdout.trim();
    if id.is_empty() {
        return Err(CredentialError::Unavailable {
            credential: NAME,
            reason: "no default subscription selected".to_string(),
        });
    }
    Ok(id.to_string())
}
