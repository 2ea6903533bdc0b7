use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use super::ArmError;
use super::types::{
    ArmErrorBody, ArmPage, DISKS_API_VERSION, ManagedDisk, PUBLIC_IPS_API_VERSION,
    PublicIpAddress,
};
use crate::credential::AccessToken;

pub const ARM_ENDPOINT: &str = "https://management.azure.com";

const DISKS_COLLECTION: &str = "managed disks";
const PUBLIC_IPS_COLLECTION: &str = "public IP addresses";

#[derive(Clone)]
pub struct ArmClient {
    client: reqwest::Client,
    base_url: String,
}

impl ArmClient {
    pub fn new(token: &AccessToken) -> Result<Self, ArmError> {
        Self::with_base_url(token, ARM_ENDPOINT)
    }

    /// NOTE: Used for sovereign clouds and for testing with mock servers.
    pub fn with_base_url(token: &AccessToken, base_url: &str) -> Result<Self, ArmError> {
        let mut header_value = HeaderValue::from_str(&format!("Bearer {}", token.secret()))
            .map_err(|_| ArmError::InvalidToken)?;
        header_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ArmError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.base_url
    }

    pub async fn list_disks(&self, subscription_id: &str) -> Result<Vec<ManagedDisk>, ArmError> {
        let url = format!(
            "{}/subscriptions/{}/providers/Microsoft.Compute/disks?api-version={}",
            self.base_url, subscription_id, DISKS_API_VERSION
        );
        let disks = self.fetch_all_pages(DISKS_COLLECTION, url).await?;
        tracing::debug!(count = disks.len(), "managed disks listed");
        Ok(disks)
    }

    pub async fn list_public_ips(
        &self,
        subscription_id: &str,
    ) -> Result<Vec<PublicIpAddress>, ArmError> {
        let url = format!(
            "{}/subscriptions/{}/providers/Microsoft.Network/publicIPAddresses?api-version={}",
            self.base_url, subscription_id, PUBLIC_IPS_API_VERSION
        );
        let ips = self.fetch_all_pages(PUBLIC_IPS_COLLECTION, url).await?;
        tracing::debug!(count = ips.len(), "public IP addresses listed");
        Ok(ips)
    }

    /// Walks an ARM list operation by following `nextLink` until it runs out.
    pub async fn fetch_all_pages<T>(
        &self,
        collection: &str,
        first_url: String,
    ) -> Result<Vec<T>, ArmError>
    where
        T: DeserializeOwned,
    {
        let mut all_results = Vec::new();
        let mut url = first_url;
        let mut page = 1u32;

        loop {
            tracing::trace!(collection, page, "fetching page");
            let response = self.client.get(&url).send().await?;
            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                return Err(api_error(collection, status.as_u16(), &body));
            }

            let parsed: ArmPage<T> =
                serde_json::from_str(&body).map_err(|e| ArmError::Parse {
                    collection: collection.to_string(),
                    message: e.to_string(),
                })?;

            let next = parsed.next().map(str::to_string);
            all_results.extend(parsed.value);

            match next {
                Some(next) if next == url => {
                    return Err(ArmError::PaginationLoop {
                        collection: collection.to_string(),
                    });
                }
                Some(next) => {
                    url = next;
                    page += 1;
                }
                None => break,
            }
        }

        Ok(all_results)
    }
}

fn api_error(collection: &str, status: u16, body: &str) -> ArmError {
    let (code, message) = match serde_json::from_str::<ArmErrorBody>(body) {
        Ok(parsed) => (parsed.error.code, parsed.error.message),
        Err(_) => (String::new(), body.trim().to_string()),
    };

    ArmError::Api {
        collection: collection.to_string(),
        status,
        code: if code.is_empty() {
            "Unknown".to_string()
        } else {
            code
        },
        message: if message.is_empty() {
            "no error details returned".to_string()
        } else {
            message
        },
    }
}

impl std::fmt::Debug for ArmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArmClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(value: &str) -> AccessToken {
        AccessToken::new(value.to_string())
    }

    #[test]
    fn test_client_creation() {
        let client = ArmClient::new(&token("test_token"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_debug_does_not_expose_token() {
        let client = ArmClient::new(&token("super_secret_token_12345")).unwrap();
        let debug_output = format!("{:?}", client);

        assert!(debug_output.contains("[REDACTED]"));
        assert!(
            !debug_output.contains("super_secret_token_12345"),
            "Debug output must NOT contain the actual token"
        );
    }

    #[test]
    fn test_invalid_token_rejected() {
        let result = ArmClient::new(&token("bad\ntoken"));
        assert!(matches!(result, Err(ArmError::InvalidToken)));
    }

    #[test]
    fn test_api_base_url() {
        let client = ArmClient::new(&token("test_token")).unwrap();
        assert_eq!(client.api_base(), "https://management.azure.com");
    }

    #[test]
    fn test_api_base_url_trailing_slash_trimmed() {
        let client =
            ArmClient::with_base_url(&token("t"), "https://management.usgovcloudapi.net/")
                .unwrap();
        assert_eq!(client.api_base(), "https://management.usgovcloudapi.net");
    }

    #[test]
    fn test_api_error_from_arm_body() {
        let body = r#"{"error":{"code":"SubscriptionNotFound","message":"The subscription 'x' could not be found."}}"#;
        let err = api_error(DISKS_COLLECTION, 404, body);
        match err {
            ArmError::Api {
                status,
                code,
                message,
                ..
            } => {
                assert_eq!(status, 404);
                assert_eq!(code, "SubscriptionNotFound");
                assert!(message.contains("could not be found"));
            }
            other => panic!("expected ArmError::Api, got {other:?}"),
        }
    }

    #[test]
    fn test_api_error_from_plain_body() {
        let err = api_error(PUBLIC_IPS_COLLECTION, 502, "Bad Gateway\n");
        assert_eq!(
            err.to_string(),
            "public IP addresses request failed (502 Unknown): Bad Gateway"
        );
    }

    #[test]
    fn test_api_error_from_empty_body() {
        let err = api_error(DISKS_COLLECTION, 401, "");
        assert!(err.to_string().contains("no error details returned"));
    }
}
