mod client;
mod error;
mod types;

pub use client::{ARM_ENDPOINT, ArmClient};
pub use error::ArmError;
pub use types::{
    ArmErrorBody, ArmErrorDetail, ArmPage, DISKS_API_VERSION, DiskProperties, ManagedDisk,
    PUBLIC_IPS_API_VERSION, PublicIpAddress, PublicIpProperties, Sku, SubResource,
};
