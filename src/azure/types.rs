use serde::Deserialize;

pub const DISKS_API_VERSION: &str = "2023-04-02";
pub const PUBLIC_IPS_API_VERSION: &str = "2023-09-01";

/// One page of an ARM list operation.
#[derive(Debug, Deserialize)]
pub struct ArmPage<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "nextLink", default)]
    pub next_link: Option<String>,
}

impl<T> ArmPage<T> {
    /// Continuation URL, treating an empty string as the last page.
    pub fn next(&self) -> Option<&str> {
        self.next_link.as_deref().filter(|link| !link.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct ArmErrorBody {
    pub error: ArmErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ArmErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Sku {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubResource {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedDisk {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: String,
    /// Resource id of the VM the disk is attached to.
    #[serde(default)]
    pub managed_by: Option<String>,
    #[serde(default)]
    pub sku: Option<Sku>,
    #[serde(default)]
    pub properties: DiskProperties,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskProperties {
    #[serde(rename = "diskSizeGB", default)]
    pub disk_size_gb: Option<u64>,
    // NOTE: Attached, Unattached, Reserved, ActiveSAS, ...
    #[serde(default)]
    pub disk_state: Option<String>,
}

impl ManagedDisk {
    pub fn size_gb(&self) -> u64 {
        self.properties.disk_size_gb.unwrap_or(0)
    }

    pub fn sku_name(&self) -> Option<&str> {
        self.sku.as_ref().and_then(|s| s.name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PublicIpAddress {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub sku: Option<Sku>,
    #[serde(default)]
    pub properties: PublicIpProperties,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicIpProperties {
    #[serde(rename = "publicIPAllocationMethod", default)]
    pub allocation_method: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    /// NIC or load balancer frontend ip configuration the address is bound to.
    #[serde(default)]
    pub ip_configuration: Option<SubResource>,
}

impl PublicIpAddress {
    pub fn allocation_method(&self) -> &str {
        self.properties.allocation_method.as_deref().unwrap_or("Unknown")
    }
}
