pub const UNKNOWN_RESOURCE_GROUP: &str = "Unknown";
pub const UNNAMED: &str = "Unnamed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    ManagedDisk,
    PublicIp,
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::ManagedDisk => "Managed Disk",
            ResourceKind::PublicIp => "Public IP",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A provisioned resource with nothing attached to it, priced for the report.
#[derive(Debug, Clone, PartialEq)]
pub struct IdleResource {
    pub kind: ResourceKind,
    pub resource_id: String,
    pub name: String,
    pub resource_group: String,
    pub region: String,
    /// Disk size or IP allocation method.
    pub details: String,
    pub monthly_cost: f64,
}

impl IdleResource {
    pub fn new(
        kind: ResourceKind,
        resource_id: &str,
        name: Option<&str>,
        region: &str,
        details: String,
        monthly_cost: f64,
    ) -> Self {
        Self {
            kind,
            resource_id: resource_id.to_string(),
            name: name
                .filter(|n| !n.is_empty())
                .unwrap_or(UNNAMED)
                .to_string(),
            resource_group: resource_group_from_id(resource_id),
            region: region.to_string(),
            details,
            monthly_cost,
        }
    }
}

/// Resource group segment of an ARM resource id.
///
/// `/subscriptions/<sub>/resourceGroups/<rg>/providers/...` yields `<rg>`; the segment
/// name is matched case-insensitively since ARM is not consistent about it.
pub fn resource_group_from_id(resource_id: &str) -> String {
    let parts: Vec<&str> = resource_id.trim_matches('/').split('/').collect();

    parts
        .windows(2)
        .find(|pair| pair[0].eq_ignore_ascii_case("resourceGroups") && !pair[1].is_empty())
        .map(|pair| pair[1].to_string())
        .unwrap_or_else(|| UNKNOWN_RESOURCE_GROUP.to_string())
}
