use std::io::Write;

use crate::azure::{ARM_ENDPOINT, ArmClient};
use crate::credential::{self, TokenCredential};
use crate::error::HunterError;
use crate::filter::find_idle;
use crate::output::{Report, ReportFormat};
use crate::pricing::PricingModel;

#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Falls back to the Azure CLI default subscription when unset.
    pub subscription_id: Option<String>,
    pub pricing: PricingModel,
    pub format: ReportFormat,
    pub management_endpoint: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            subscription_id: None,
            pricing: PricingModel::default(),
            format: ReportFormat::default(),
            management_endpoint: ARM_ENDPOINT.to_string(),
        }
    }
}

/// Authenticates, lists both collections and keeps the idle resources.
///
/// Every call is awaited in turn; any failure aborts the scan without a partial report.
pub async fn scan(
    config: &ScanConfig,
    credential: &dyn TokenCredential,
) -> Result<Report, HunterError> {
    if !config.management_endpoint.starts_with("https://")
        && !config.management_endpoint.starts_with("http://")
    {
        return Err(HunterError::Configuration(format!(
            "management endpoint must be an http(s) URL, got '{}'",
            config.management_endpoint
        )));
    }

    let resource = credential::resource_for_endpoint(&config.management_endpoint);
    let token = credential.get_token(&resource).await?;
    let subscription_id = resolve_subscription(config.subscription_id.as_deref()).await?;
    tracing::info!(subscription_id = %subscription_id, "scanning subscription");

    let client = ArmClient::with_base_url(&token, &config.management_endpoint)?;

    let disks = client.list_disks(&subscription_id).await?;
    tracing::info!(count = disks.len(), "managed disks discovered");

    let public_ips = client.list_public_ips(&subscription_id).await?;
    tracing::info!(count = public_ips.len(), "public IP addresses discovered");

    let idle = find_idle(&disks, &public_ips, &config.pricing);
    tracing::info!(count = idle.len(), "idle resources found");

    Ok(Report::new(subscription_id, idle, config.pricing))
}

/// Runs [`scan`] and writes the rendered report to `out`.
///
/// Nothing is written unless the whole scan succeeded.
pub async fn run<W: Write>(
    config: &ScanConfig,
    credential: &dyn TokenCredential,
    out: &mut W,
) -> Result<Report, HunterError> {
    let report = scan(config, credential).await?;
    out.write_all(report.render(config.format).as_bytes())?;
    out.flush()?;
    Ok(report)
}

async fn resolve_subscription(explicit: Option<&str>) -> Result<String, HunterError> {
    if let Some(id) = explicit.map(str::trim).filter(|id| !id.is_empty()) {
        return Ok(id.to_string());
    }

    tracing::debug!("no subscription id given, asking the Azure CLI");
    credential::default_subscription().await.map_err(|e| {
        HunterError::Configuration(format!(
            "no subscription id given and no Azure CLI default available ({e})"
        ))
    })
}
