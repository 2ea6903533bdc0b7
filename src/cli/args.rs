use clap::Parser;

use crate::azure::ARM_ENDPOINT;
use crate::output::ReportFormat;
use crate::pricing::{
    DEFAULT_DISK_RATE_PER_GB_MONTH, DEFAULT_PUBLIC_IP_RATE_MONTH, PricingModel, parse_rate,
};
use crate::scan::ScanConfig;

/// Find unattached Azure managed disks and public IP addresses (zombies) and estimate
/// what they cost per month.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub scan: ScanArgs,
}

#[derive(clap::Args, Debug)]
pub struct ScanArgs {
    /// Subscription to scan; defaults to the Azure CLI's current subscription
    #[arg(long, env = "AZURE_SUBSCRIPTION_ID")]
    pub subscription_id: Option<String>,

    /// Estimated USD per provisioned disk GB per month
    #[arg(
        long,
        env = "ZOMBIE_HUNTER_DISK_RATE",
        default_value_t = DEFAULT_DISK_RATE_PER_GB_MONTH,
        value_parser = parse_rate
    )]
    pub disk_rate: f64,

    /// Estimated USD per public IP address per month
    #[arg(
        long,
        env = "ZOMBIE_HUNTER_IP_RATE",
        default_value_t = DEFAULT_PUBLIC_IP_RATE_MONTH,
        value_parser = parse_rate
    )]
    pub ip_rate: f64,

    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    pub format: ReportFormat,

    #[arg(
        long,
        env = "AZURE_RESOURCE_MANAGER_ENDPOINT",
        default_value = ARM_ENDPOINT,
        hide = true
    )]
    pub management_endpoint: String,
}

impl ScanArgs {
    pub fn into_config(self) -> ScanConfig {
        ScanConfig {
            subscription_id: self.subscription_id,
            pricing: PricingModel::new(self.disk_rate, self.ip_rate),
            format: self.format,
            management_endpoint: self.management_endpoint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_VARS: [&str; 4] = [
        "AZURE_SUBSCRIPTION_ID",
        "ZOMBIE_HUNTER_DISK_RATE",
        "ZOMBIE_HUNTER_IP_RATE",
        "AZURE_RESOURCE_MANAGER_ENDPOINT",
    ];

    /// Parses with the given variables set and every other scan variable cleared.
    fn parse_with_env(args: &[&str], env: &[(&str, &str)]) -> Result<Cli, clap::Error> {
        let backup: Vec<(&str, Option<String>)> = ENV_VARS
            .iter()
            .map(|key| (*key, std::env::var(key).ok()))
            .collect();

        unsafe {
            for key in ENV_VARS {
                std::env::remove_var(key);
            }
            for (key, value) in env {
                std::env::set_var(key, value);
            }
        }

        let result = Cli::try_parse_from(args);

        unsafe {
            for (key, value) in backup {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }

        result
    }

    #[test]
    #[serial]
    fn test_no_flags_uses_defaults() {
        let cli = parse_with_env(&["zombie-hunter"], &[]).unwrap();
        let config = cli.scan.into_config();

        assert_eq!(config.subscription_id, None);
        assert_eq!(config.pricing, PricingModel::default());
        assert_eq!(config.format, ReportFormat::Table);
        assert_eq!(config.management_endpoint, "https://management.azure.com");
    }

    #[test]
    #[serial]
    fn test_subscription_from_flag() {
        let cli = parse_with_env(
            &["zombie-hunter", "--subscription-id", "sub-from-flag"],
            &[],
        )
        .unwrap();
        assert_eq!(cli.scan.subscription_id, Some("sub-from-flag".to_string()));
    }

    #[test]
    #[serial]
    fn test_subscription_from_env_var_fallback() {
        let cli = parse_with_env(&["zombie-hunter"], &[("AZURE_SUBSCRIPTION_ID", "sub-from-env")])
            .unwrap();
        assert_eq!(cli.scan.subscription_id, Some("sub-from-env".to_string()));
    }

    #[test]
    #[serial]
    fn test_cli_flag_takes_precedence_over_env() {
        let cli = parse_with_env(
            &["zombie-hunter", "--subscription-id=cli-sub"],
            &[("AZURE_SUBSCRIPTION_ID", "env-sub")],
        )
        .unwrap();
        assert_eq!(cli.scan.subscription_id, Some("cli-sub".to_string()));
    }

    #[test]
    #[serial]
    fn test_rates_from_flags_and_env() {
        let cli = parse_with_env(
            &["zombie-hunter", "--disk-rate", "0.12"],
            &[("ZOMBIE_HUNTER_IP_RATE", "4.5")],
        )
        .unwrap();
        let config = cli.scan.into_config();
        assert_eq!(config.pricing, PricingModel::new(0.12, 4.5));
    }

    #[test]
    #[serial]
    fn test_negative_rate_rejected() {
        let result = parse_with_env(&["zombie-hunter", "--disk-rate=-1"], &[]);
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_tree_format_flag() {
        let cli = parse_with_env(&["zombie-hunter", "--format", "tree"], &[]).unwrap();
        assert_eq!(cli.scan.format, ReportFormat::Tree);
    }

    #[test]
    #[serial]
    fn test_unknown_format_rejected() {
        let result = parse_with_env(&["zombie-hunter", "--format", "json"], &[]);
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_management_endpoint_from_env() {
        let cli = parse_with_env(
            &["zombie-hunter"],
            &[(
                "AZURE_RESOURCE_MANAGER_ENDPOINT",
                "https://management.chinacloudapi.cn",
            )],
        )
        .unwrap();
        assert_eq!(
            cli.scan.management_endpoint,
            "https://management.chinacloudapi.cn"
        );
    }
}
