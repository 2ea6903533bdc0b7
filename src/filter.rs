use crate::azure::{ManagedDisk, PublicIpAddress};
use crate::pricing::PricingModel;
use crate::resource::{IdleResource, ResourceKind};

/// Whether a resource is billed without anything using it.
///
/// A missing attachment field counts as idle, never as an error.
pub trait Idle {
    fn is_idle(&self) -> bool;
}

impl Idle for ManagedDisk {
    fn is_idle(&self) -> bool {
        self.managed_by
            .as_deref()
            .is_none_or(|owner| owner.trim().is_empty())
    }
}

impl Idle for PublicIpAddress {
    fn is_idle(&self) -> bool {
        self.properties
            .ip_configuration
            .as_ref()
            .is_none_or(|config| config.id.trim().is_empty())
    }
}

pub fn idle_disk(disk: &ManagedDisk, pricing: &PricingModel) -> IdleResource {
    let size_gb = disk.size_gb();
    let details = match disk.sku_name() {
        Some(sku) => format!("{} GB {}", size_gb, sku),
        None => format!("{} GB", size_gb),
    };

    IdleResource::new(
        ResourceKind::ManagedDisk,
        &disk.id,
        disk.name.as_deref(),
        &disk.location,
        details,
        pricing.disk_cost(size_gb),
    )
}

pub fn idle_public_ip(ip: &PublicIpAddress, pricing: &PricingModel) -> IdleResource {
    let details = match &ip.properties.ip_address {
        Some(address) => format!("{} {}", ip.allocation_method(), address),
        None => ip.allocation_method().to_string(),
    };

    IdleResource::new(
        ResourceKind::PublicIp,
        &ip.id,
        ip.name.as_deref(),
        &ip.location,
        details,
        pricing.public_ip_cost(),
    )
}

/// Keeps the idle disks and addresses, priced, disks first in listing order.
pub fn find_idle(
    disks: &[ManagedDisk],
    public_ips: &[PublicIpAddress],
    pricing: &PricingModel,
) -> Vec<IdleResource> {
    let idle_disks = disks
        .iter()
        .filter(|disk| disk.is_idle())
        .map(|disk| idle_disk(disk, pricing));

    let idle_ips = public_ips
        .iter()
        .filter(|ip| ip.is_idle())
        .map(|ip| idle_public_ip(ip, pricing));

    idle_disks.chain(idle_ips).collect()
}
