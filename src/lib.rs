//! zombie-hunter - idle Azure resource finder
//!
//! A library for discovering unattached managed disks and unassociated public IP
//! addresses in an Azure subscription and estimating what they cost per month.

pub mod azure;
pub mod cli;
pub mod credential;
pub mod filter;
pub mod output;
pub mod pricing;
pub mod resource;
pub mod scan;

mod error;

pub use azure::{ArmClient, ArmError, ManagedDisk, PublicIpAddress};
pub use credential::{AccessToken, CredentialError, DefaultCredentialChain, TokenCredential};
pub use error::HunterError;
pub use filter::{Idle, find_idle};
pub use output::{Report, ReportFormat, format_money};
pub use pricing::PricingModel;
pub use resource::{IdleResource, ResourceKind};
pub use scan::{ScanConfig, run, scan};
