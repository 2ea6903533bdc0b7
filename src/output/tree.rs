use std::collections::BTreeMap;

use termtree::Tree;

use super::format_money;
use crate::resource::IdleResource;

/// subscription → resource group (with subtotal) → resource
pub fn render(subscription_id: &str, resources: &[IdleResource]) -> String {
    let mut groups: BTreeMap<&str, Vec<&IdleResource>> = BTreeMap::new();
    for resource in resources {
        groups
            .entry(resource.resource_group.as_str())
            .or_default()
            .push(resource);
    }

    let mut root = Tree::new(format!("subscription {}", subscription_id));
    for (group, members) in groups {
        let subtotal: f64 = members.iter().map(|r| r.monthly_cost).sum();
        let mut node = Tree::new(format!("{} ({})", group, format_money(subtotal)));

        for resource in members {
            node.push(Tree::new(format!(
                "{}: {} [{}, {}] {}",
                resource.kind,
                resource.name,
                resource.region,
                resource.details,
                format_money(resource.monthly_cost)
            )));
        }
        root.push(node);
    }

    root.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceKind;

    fn idle(kind: ResourceKind, name: &str, group: &str, cost: f64) -> IdleResource {
        IdleResource {
            kind,
            resource_id: String::new(),
            name: name.to_string(),
            resource_group: group.to_string(),
            region: "eastus".to_string(),
            details: "d".to_string(),
            monthly_cost: cost,
        }
    }

    #[test]
    fn test_render_groups_by_resource_group() {
        let resources = vec![
            idle(ResourceKind::ManagedDisk, "disk-a", "rg-b", 10.0),
            idle(ResourceKind::PublicIp, "pip-a", "rg-a", 3.65),
            idle(ResourceKind::ManagedDisk, "disk-b", "rg-b", 5.0),
        ];

        let text = render("sub1", &resources);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "subscription sub1");
        assert!(lines[1].contains("rg-a ($3.65)"));
        assert!(lines[2].contains("Public IP: pip-a [eastus, d] $3.65"));
        assert!(lines[3].contains("rg-b ($15.00)"));
        assert!(text.contains("Managed Disk: disk-a"));
        assert!(text.contains("Managed Disk: disk-b"));
        assert_eq!(lines.len(), 6);
    }
}
