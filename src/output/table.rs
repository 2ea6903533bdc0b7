use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format_money;
use crate::resource::IdleResource;

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Resource Group")]
    resource_group: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Details")]
    details: String,
    #[tabled(rename = "Est. Monthly Cost")]
    monthly_cost: String,
}

impl From<&IdleResource> for Row {
    fn from(resource: &IdleResource) -> Self {
        Self {
            kind: resource.kind.to_string(),
            name: resource.name.clone(),
            resource_group: resource.resource_group.clone(),
            region: resource.region.clone(),
            details: resource.details.clone(),
            monthly_cost: format_money(resource.monthly_cost),
        }
    }
}

pub fn render(resources: &[IdleResource]) -> String {
    let rows = resources.iter().map(Row::from);
    Table::new(rows).with(Style::ascii()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceKind;

    #[test]
    fn test_render_has_headers_and_rows() {
        let resources = vec![IdleResource {
            kind: ResourceKind::ManagedDisk,
            resource_id: "/subscriptions/s/resourceGroups/rg-data/providers/Microsoft.Compute/disks/orphan".to_string(),
            name: "orphan".to_string(),
            resource_group: "rg-data".to_string(),
            region: "westeurope".to_string(),
            details: "128 GB Premium_LRS".to_string(),
            monthly_cost: 192.0,
        }];

        let text = render(&resources);
        for header in ["Type", "Name", "Resource Group", "Region", "Details", "Est. Monthly Cost"] {
            assert!(text.contains(header), "missing header {header}");
        }
        assert!(text.contains("Managed Disk"));
        assert!(text.contains("128 GB Premium_LRS"));
        assert!(text.contains("$192.00"));
        assert!(text.starts_with('+'));
    }
}
