//! Monthly cost estimates for idle resources.
//!
//! Disks are priced by provisioned size, public IPs at a flat monthly rate. Both rates
//! are rough list-price placeholders meant to be overridden per tenant.

/// USD per provisioned GB per month.
pub const DEFAULT_DISK_RATE_PER_GB_MONTH: f64 = 1.50;
/// USD per public IP per month (0.005/h over 730h).
pub const DEFAULT_PUBLIC_IP_RATE_MONTH: f64 = 3.65;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingModel {
    pub disk_rate_per_gb_month: f64,
    pub public_ip_rate_month: f64,
}

impl Default for PricingModel {
    fn default() -> Self {
        Self {
            disk_rate_per_gb_month: DEFAULT_DISK_RATE_PER_GB_MONTH,
            public_ip_rate_month: DEFAULT_PUBLIC_IP_RATE_MONTH,
        }
    }
}

impl PricingModel {
    pub fn new(disk_rate_per_gb_month: f64, public_ip_rate_month: f64) -> Self {
        Self {
            disk_rate_per_gb_month,
            public_ip_rate_month,
        }
    }

    pub fn disk_cost(&self, size_gb: u64) -> f64 {
        size_gb as f64 * self.disk_rate_per_gb_month
    }

    pub fn public_ip_cost(&self) -> f64 {
        self.public_ip_rate_month
    }
}

/// Parses a non-negative, finite rate for the CLI.
pub fn parse_rate(input: &str) -> Result<f64, String> {
    let rate: f64 = input
        .trim()
        .parse()
        .map_err(|_| format!("'{input}' is not a number"))?;

    if !rate.is_finite() || rate < 0.0 {
        return Err(format!("rate must be a non-negative number, got '{input}'"));
    }
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates() {
        let pricing = PricingModel::default();
        assert_eq!(pricing.disk_rate_per_gb_month, 1.50);
        assert_eq!(pricing.public_ip_rate_month, 3.65);
    }

    #[test]
    fn test_disk_cost_scales_with_size() {
        let pricing = PricingModel::new(0.10, 3.65);
        assert!((pricing.disk_cost(128) - 12.8).abs() < 1e-9);
        assert_eq!(pricing.disk_cost(0), 0.0);
    }

    #[test]
    fn test_public_ip_cost_is_flat() {
        let pricing = PricingModel::new(1.50, 4.0);
        assert_eq!(pricing.public_ip_cost(), 4.0);
    }

    #[test]
    fn test_parse_rate_valid() {
        assert_eq!(parse_rate("1.5"), Ok(1.5));
        assert_eq!(parse_rate(" 0 "), Ok(0.0));
    }

    #[test]
    fn test_parse_rate_invalid() {
        assert!(parse_rate("abc").is_err());
        assert!(parse_rate("-1").is_err());
        assert!(parse_rate("NaN").is_err());
        assert!(parse_rate("inf").is_err());
    }
}
