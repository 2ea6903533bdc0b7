use thiserror::Error;

use crate::azure::ArmError;
use crate::credential::CredentialError;

#[derive(Debug, Error)]
pub enum HunterError {
    #[error("authentication failed: {0}")]
    Authentication(#[from] CredentialError),

    #[error("resource access failed: {0}")]
    ResourceAccess(#[from] ArmError),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HunterError {
    /// Troubleshooting advice shown on stderr after a fatal error.
    pub fn hint(&self) -> &'static str {
        match self {
            HunterError::Authentication(_) => {
                "Tips:\n \
                 - Ensure a credential source is available:\n   \
                   * az login\n   \
                   * or a managed identity on the host\n   \
                   * or AZURE_TENANT_ID, AZURE_CLIENT_ID and AZURE_CLIENT_SECRET\n"
            }
            HunterError::ResourceAccess(_) => {
                "Tips:\n \
                 - Verify the subscription ID is correct.\n \
                 - The identity needs at least the Reader role on the subscription.\n"
            }
            HunterError::Configuration(_) => {
                "Tips:\n \
                 - Pass --subscription-id or set AZURE_SUBSCRIPTION_ID,\n   \
                   or select a default with 'az account set --subscription <id>'.\n"
            }
            HunterError::Io(_) => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_configuration_error_display() {
        let err = HunterError::Configuration("missing subscription".to_string());
        assert_eq!(err.to_string(), "configuration error: missing subscription");
    }

    #[test]
    fn test_credential_error_from_conversion() {
        let cred_err = CredentialError::Exhausted(Vec::new());
        let err: HunterError = cred_err.into();
        assert!(matches!(err, HunterError::Authentication(_)));
        assert!(err.to_string().starts_with("authentication failed: no usable credential"));
        assert!(err.hint().contains("az login"));
    }

    #[test]
    fn test_arm_error_from_conversion() {
        let arm_err = ArmError::Api {
            collection: "managed disks".to_string(),
            status: 404,
            code: "SubscriptionNotFound".to_string(),
            message: "not found".to_string(),
        };
        let err: HunterError = arm_err.into();
        assert!(matches!(err, HunterError::ResourceAccess(_)));
        assert!(err.to_string().contains("404 SubscriptionNotFound"));
        assert!(err.hint().contains("Reader role"));
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: HunterError = io_err.into();
        assert!(matches!(err, HunterError::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
        assert!(err.hint().is_empty());
    }
}
