//! Human-readable report of idle resources.

mod table;
mod tree;

use crate::pricing::PricingModel;
use crate::resource::{IdleResource, ResourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Bordered table, most expensive first
    #[default]
    Table,
    /// Resources grouped by resource group
    Tree,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    subscription_id: String,
    resources: Vec<IdleResource>,
    pricing: PricingModel,
}

impl Report {
    /// Orders resources by estimated waste, highest first.
    pub fn new(
        subscription_id: impl Into<String>,
        mut resources: Vec<IdleResource>,
        pricing: PricingModel,
    ) -> Self {
        resources.sort_by(|a, b| {
            b.monthly_cost
                .total_cmp(&a.monthly_cost)
                .then_with(|| a.name.cmp(&b.name))
        });

        Self {
            subscription_id: subscription_id.into(),
            resources,
            pricing,
        }
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn resources(&self) -> &[IdleResource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn count(&self, kind: ResourceKind) -> usize {
        self.resources.iter().filter(|r| r.kind == kind).count()
    }

    pub fn total_monthly_cost(&self) -> f64 {
        self.resources.iter().map(|r| r.monthly_cost).sum()
    }

    pub fn render(&self, format: ReportFormat) -> String {
        if self.is_empty() {
            return format!(
                "No zombies detected. Good job!\nTotal estimated monthly waste: {}\n",
                format_money(0.0)
            );
        }

        let body = match format {
            ReportFormat::Table => table::render(&self.resources),
            ReportFormat::Tree => tree::render(&self.subscription_id, &self.resources),
        };

        let mut out = body.trim_end().to_string();
        out.push_str("\n\n");
        out.push_str(&format!(
            "Total estimated monthly waste: {} (disk rate: ${:.2}/GB-month, public IP rate: ${:.2}/month)\n",
            format_money(self.total_monthly_cost()),
            self.pricing.disk_rate_per_gb_month,
            self.pricing.public_ip_rate_month,
        ));
        out.push_str(&format!(
            "Idle managed disks: {}, idle public IPs: {}\n",
            self.count(ResourceKind::ManagedDisk),
            self.count(ResourceKind::PublicIp),
        ));
        out
    }
}

/// `1234.5` renders as `$1,234.50`.
pub fn format_money(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, cents) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}
