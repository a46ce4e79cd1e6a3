//! Resource planning for the review page
//!
//! Merges the resource catalog with the names the backend previews for a host
//! name, then splits the result into required and optional groups.

use crate::platform::api::types::{
    PublishKind, ResourceCatalogItem, ResourcePreview, ResourceSelection,
};
use crate::wizard::directory::DirectoryClient;
use crate::wizard::error::{WizardError, WizardResult};
use std::collections::{BTreeSet, HashMap};

/// Placeholder name for a catalog item the preview did not cover
pub fn unresolved_name(key: &str) -> String {
    format!("UNKNOWN NAME FOR {}", key)
}

/// A contiguous run of review-list rows sharing a heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanGroup {
    pub key: &'static str,
    pub name: &'static str,
    pub start_index: usize,
    pub count: usize,
}

/// Required and optional resources for one host name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePlan {
    required: Vec<ResourceSelection>,
    optional: Vec<ResourceSelection>,
}

impl ResourcePlan {
    pub fn required(&self) -> &[ResourceSelection] {
        &self.required
    }

    pub fn optional(&self) -> &[ResourceSelection] {
        &self.optional
    }

    /// Required rows followed by optional rows, in review-list order
    pub fn items(&self) -> impl Iterator<Item = &ResourceSelection> {
        self.required.iter().chain(self.optional.iter())
    }

    /// Review-list headings over `items()`
    pub fn groups(&self) -> Vec<PlanGroup> {
        vec![
            PlanGroup {
                key: "required",
                name: "Required",
                start_index: 0,
                count: self.required.len(),
            },
            PlanGroup {
                key: "optional",
                name: "Optional",
                start_index: self.required.len(),
                count: self.optional.len(),
            },
        ]
    }

    /// True if any row carries a placeholder name
    pub fn has_unresolved(&self) -> bool {
        self.items().any(|s| !s.resolved)
    }

    /// Whether the resource with `key` will be provisioned
    pub fn is_enabled(&self, key: &str) -> Option<bool> {
        self.items().find(|s| s.key() == key).map(|s| s.enabled)
    }

    /// Enable or disable an optional resource
    ///
    /// Required resources stay enabled; asking to disable one is an error.
    pub fn set_enabled(&mut self, key: &str, enabled: bool) -> WizardResult<()> {
        if self.required.iter().any(|s| s.key() == key) {
            if enabled {
                return Ok(());
            }
            return Err(WizardError::RequiredResource(key.to_string()));
        }

        let selection = self
            .optional
            .iter_mut()
            .find(|s| s.key() == key)
            .ok_or_else(|| WizardError::UnknownResource(key.to_string()))?;
        selection.enabled = enabled;
        Ok(())
    }

    /// Flip an optional resource; returns the new state
    pub fn toggle(&mut self, key: &str) -> WizardResult<bool> {
        let current = self
            .is_enabled(key)
            .ok_or_else(|| WizardError::UnknownResource(key.to_string()))?;
        self.set_enabled(key, !current)?;
        Ok(!current)
    }

    /// Replace the optional selection with exactly `keys`
    pub fn select_optional(&mut self, keys: &BTreeSet<String>) {
        for selection in &mut self.optional {
            selection.enabled = keys.contains(&selection.item.key);
        }
    }

    /// Keys of every resource that will be provisioned
    pub fn selected_keys(&self) -> BTreeSet<String> {
        self.items()
            .filter(|s| s.enabled)
            .map(|s| s.item.key.clone())
            .collect()
    }

    /// Required resources followed by enabled optional ones
    pub fn selected(&self) -> Vec<ResourceSelection> {
        self.required
            .iter()
            .chain(self.optional.iter().filter(|s| s.enabled))
            .cloned()
            .collect()
    }
}

/// Merge previews into the catalog and partition by the required flag
///
/// Pure and order preserving: the same inputs always produce the same plan.
pub fn merge_previews(
    catalog: &[ResourceCatalogItem],
    previews: &[ResourcePreview],
) -> ResourcePlan {
    let mut by_key: HashMap<&str, &ResourcePreview> = HashMap::new();
    for preview in previews {
        // first preview wins on duplicate keys
        by_key.entry(preview.key.as_str()).or_insert(preview);
    }

    let mut required = Vec::new();
    let mut optional = Vec::new();

    for item in catalog {
        let (name, icon, resolved) = match by_key.get(item.key.as_str()) {
            Some(preview) => (preview.name.clone(), preview.icon.clone(), true),
            None => (unresolved_name(&item.key), None, false),
        };
        let selection = ResourceSelection {
            item: item.clone(),
            name,
            icon,
            enabled: true,
            resolved,
        };
        if selection.is_required() {
            required.push(selection);
        } else {
            optional.push(selection);
        }
    }

    ResourcePlan { required, optional }
}

/// Fetch previews for `host_name` and build the plan
///
/// A failed preview call does not fail the plan; every row gets a
/// placeholder name instead.
pub async fn plan(
    directory: &dyn DirectoryClient,
    host_name: &str,
    publish_kind: PublishKind,
    catalog: &[ResourceCatalogItem],
) -> ResourcePlan {
    let previews = match directory.preview_names(host_name, publish_kind).await {
        Ok(previews) => previews,
        Err(e) => {
            log::warn!("Failed to preview resource names for '{}': {}", host_name, e);
            Vec::new()
        }
    };

    let plan = merge_previews(catalog, &previews);
    log::debug!(
        "Planned {} required and {} optional resources for '{}'",
        plan.required.len(),
        plan.optional.len(),
        host_name
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(key: &str, required: bool) -> ResourceCatalogItem {
        ResourceCatalogItem {
            key: key.to_string(),
            text: key.to_uppercase(),
            tier: "S1".to_string(),
            group: None,
            description: String::new(),
            required,
        }
    }

    fn preview(key: &str, name: &str) -> ResourcePreview {
        ResourcePreview {
            key: key.to_string(),
            name: name.to_string(),
            icon: Some(format!("https://icons/{}.svg", key)),
        }
    }

    #[test]
    fn test_contoso_scenario() {
        let catalog = vec![item("kv", true), item("app", false)];
        let previews = vec![preview("kv", "kv-contoso"), preview("app", "app-contoso")];

        let plan = merge_previews(&catalog, &previews);

        assert_eq!(plan.required().len(), 1);
        assert_eq!(plan.required()[0].key(), "kv");
        assert_eq!(plan.required()[0].name, "kv-contoso");
        assert_eq!(plan.optional().len(), 1);
        assert_eq!(plan.optional()[0].key(), "app");
        assert_eq!(plan.optional()[0].name, "app-contoso");
        assert!(plan.optional()[0].enabled);
    }

    #[test]
    fn test_missing_preview_gets_placeholder() {
        let catalog = vec![item("kv", true), item("cosmos", false)];
        let plan = merge_previews(&catalog, &[preview("kv", "kv-x")]);

        let cosmos = &plan.optional()[0];
        assert_eq!(cosmos.name, "UNKNOWN NAME FOR cosmos");
        assert!(!cosmos.resolved);
        assert!(cosmos.icon.is_none());
        assert!(plan.has_unresolved());
    }

    #[test]
    fn test_catalog_order_preserved_within_partitions() {
        let catalog = vec![
            item("a", false),
            item("b", true),
            item("c", false),
            item("d", true),
        ];
        let plan = merge_previews(&catalog, &[]);

        let required: Vec<_> = plan.required().iter().map(|s| s.key()).collect();
        let optional: Vec<_> = plan.optional().iter().map(|s| s.key()).collect();
        assert_eq!(required, vec!["b", "d"]);
        assert_eq!(optional, vec!["a", "c"]);
    }

    #[test]
    fn test_groups_span_items() {
        let catalog = vec![item("a", true), item("b", false), item("c", false)];
        let plan = merge_previews(&catalog, &[]);
        let groups = plan.groups();

        assert_eq!(groups[0].start_index, 0);
        assert_eq!(groups[0].count, 1);
        assert_eq!(groups[1].key, "optional");
        assert_eq!(groups[1].start_index, 1);
        assert_eq!(groups[1].count, 2);
        assert_eq!(plan.items().count(), 3);
    }

    #[test]
    fn test_required_cannot_be_disabled() {
        let catalog = vec![item("kv", true), item("app", false)];
        let mut plan = merge_previews(&catalog, &[]);

        assert!(matches!(
            plan.set_enabled("kv", false),
            Err(WizardError::RequiredResource(_))
        ));
        assert!(plan.toggle("kv").is_err());
        assert_eq!(plan.is_enabled("kv"), Some(true));

        plan.select_optional(&BTreeSet::new());
        assert_eq!(plan.is_enabled("kv"), Some(true));
    }

    #[test]
    fn test_toggle_optional() {
        let catalog = vec![item("kv", true), item("app", false), item("ai", false)];
        let mut plan = merge_previews(&catalog, &[]);

        assert!(!plan.toggle("app").unwrap());
        let selected: Vec<_> = plan.selected().iter().map(|s| s.key().to_string()).collect();
        assert_eq!(selected, vec!["kv", "ai"]);

        assert!(plan.toggle("app").unwrap());
        assert_eq!(plan.selected_keys().len(), 3);
    }

    #[test]
    fn test_unknown_resource() {
        let mut plan = merge_previews(&[item("kv", true)], &[]);
        assert!(matches!(
            plan.set_enabled("nope", true),
            Err(WizardError::UnknownResource(_))
        ));
    }

    #[test]
    fn test_duplicate_preview_keys_first_wins() {
        let catalog = vec![item("kv", true)];
        let previews = vec![preview("kv", "first"), preview("kv", "second")];
        let plan = merge_previews(&catalog, &previews);
        assert_eq!(plan.required()[0].name, "first");
    }
}
