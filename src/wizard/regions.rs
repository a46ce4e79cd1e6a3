//! Language-understanding (LUIS) region tables
//!
//! Authoring is only offered in a few regions; prediction endpoints are
//! available far more widely. A deploy region outside the authoring set needs
//! a separate LUIS region chosen for it.

use crate::platform::api::types::DeployLocation;

/// A LUIS region option
#[derive(Debug, Clone)]
pub struct LuisRegion {
    /// Region name as used in resource requests (e.g., "westus")
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Geographic area
    pub geography: &'static str,
}

// =============================================================================
// Authoring
// =============================================================================

/// Regions that host LUIS authoring resources
pub static LUIS_AUTHORING_REGIONS: &[LuisRegion] = &[
    LuisRegion { id: "westus", name: "West US", geography: "Americas" },
    LuisRegion { id: "westeurope", name: "West Europe", geography: "Europe" },
    LuisRegion { id: "australiaeast", name: "Australia East", geography: "Asia Pacific" },
];

// =============================================================================
// Prediction
// =============================================================================

/// Regions that host LUIS prediction endpoints
pub static LUIS_PREDICTION_REGIONS: &[LuisRegion] = &[
    // Americas
    LuisRegion { id: "brazilsouth", name: "Brazil South", geography: "Americas" },
    LuisRegion { id: "canadacentral", name: "Canada Central", geography: "Americas" },
    LuisRegion { id: "centralus", name: "Central US", geography: "Americas" },
    LuisRegion { id: "eastus", name: "East US", geography: "Americas" },
    LuisRegion { id: "eastus2", name: "East US 2", geography: "Americas" },
    LuisRegion { id: "northcentralus", name: "North Central US", geography: "Americas" },
    LuisRegion { id: "southcentralus", name: "South Central US", geography: "Americas" },
    LuisRegion { id: "westcentralus", name: "West Central US", geography: "Americas" },
    LuisRegion { id: "westus", name: "West US", geography: "Americas" },
    LuisRegion { id: "westus2", name: "West US 2", geography: "Americas" },
    // Europe
    LuisRegion { id: "francecentral", name: "France Central", geography: "Europe" },
    LuisRegion { id: "northeurope", name: "North Europe", geography: "Europe" },
    LuisRegion { id: "switzerlandnorth", name: "Switzerland North", geography: "Europe" },
    LuisRegion { id: "uksouth", name: "UK South", geography: "Europe" },
    LuisRegion { id: "westeurope", name: "West Europe", geography: "Europe" },
    // Asia Pacific
    LuisRegion { id: "australiaeast", name: "Australia East", geography: "Asia Pacific" },
    LuisRegion { id: "centralindia", name: "Central India", geography: "Asia Pacific" },
    LuisRegion { id: "eastasia", name: "East Asia", geography: "Asia Pacific" },
    LuisRegion { id: "japaneast", name: "Japan East", geography: "Asia Pacific" },
    LuisRegion { id: "japanwest", name: "Japan West", geography: "Asia Pacific" },
    LuisRegion { id: "koreacentral", name: "Korea Central", geography: "Asia Pacific" },
    LuisRegion { id: "southeastasia", name: "Southeast Asia", geography: "Asia Pacific" },
];

// =============================================================================
// Helper Functions
// =============================================================================

/// Authoring region ids, in table order
pub fn authoring_region_ids() -> Vec<String> {
    LUIS_AUTHORING_REGIONS
        .iter()
        .map(|r| r.id.to_string())
        .collect()
}

/// Look up a region in either table by id
pub fn find_region(id: &str) -> Option<&'static LuisRegion> {
    LUIS_AUTHORING_REGIONS
        .iter()
        .chain(LUIS_PREDICTION_REGIONS.iter())
        .find(|r| r.id == id)
}

/// True when the deploy location can host LUIS authoring itself
pub fn supports_luis(location: &DeployLocation, luis_regions: &[String]) -> bool {
    luis_regions.iter().any(|r| *r == location.name)
}

/// Format region for display: "West US (westus)"
pub fn format_region_display(region: &LuisRegion) -> String {
    format!("{} ({})", region.name, region.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(name: &str) -> DeployLocation {
        DeployLocation {
            id: format!("/subscriptions/s/locations/{}", name),
            name: name.to_string(),
            display_name: name.to_string(),
        }
    }

    #[test]
    fn test_authoring_regions_are_prediction_regions() {
        for region in LUIS_AUTHORING_REGIONS {
            assert!(
                LUIS_PREDICTION_REGIONS.iter().any(|p| p.id == region.id),
                "{} missing from prediction table",
                region.id
            );
        }
    }

    #[test]
    fn test_supports_luis() {
        let regions = authoring_region_ids();
        assert!(supports_luis(&location("westus"), &regions));
        assert!(!supports_luis(&location("eastus"), &regions));
        assert!(!supports_luis(&location("westus"), &[]));
    }

    #[test]
    fn test_find_region_and_display() {
        let region = find_region("japaneast").unwrap();
        assert_eq!(format_region_display(region), "Japan East (japaneast)");
        assert!(find_region("mars-north").is_none());
    }
}
