//! API types for the publish management API
//!
//! These types mirror the backend DTOs for subscriptions, resource groups,
//! deploy locations and the provisioning resource catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generic API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericResponse<T> {
    /// The response data
    pub data: T,
}

/// API error response format
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: Option<String>,
    /// Detailed error message
    pub message: Option<String>,
}

impl ApiErrorResponse {
    /// Get the error message, preferring `message` over `error`
    pub fn get_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

/// Which publish target the resources are provisioned for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PublishKind {
    /// Bot hosted on an App Service web app
    #[default]
    #[serde(rename = "azurePublish")]
    AzurePublish,
    /// Bot hosted on Azure Functions
    #[serde(rename = "azureFunctionsPublish")]
    AzureFunctionsPublish,
}

impl PublishKind {
    /// Returns the wire identifier for this publish kind
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishKind::AzurePublish => "azurePublish",
            PublishKind::AzureFunctionsPublish => "azureFunctionsPublish",
        }
    }

    /// Returns the human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PublishKind::AzurePublish => "Azure Web App",
            PublishKind::AzureFunctionsPublish => "Azure Functions",
        }
    }
}

impl fmt::Display for PublishKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "azurepublish" | "webapp" | "azure-publish" => Ok(PublishKind::AzurePublish),
            "azurefunctionspublish" | "functions" | "azure-functions-publish" => {
                Ok(PublishKind::AzureFunctionsPublish)
            }
            _ => Err(format!(
                "Invalid publish kind: '{}'. Valid options: azurePublish, azureFunctionsPublish",
                s
            )),
        }
    }
}

/// Cloud subscription the resources are billed to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Subscription identifier (GUID)
    pub subscription_id: String,
    /// Display name shown to the user
    pub display_name: String,
    /// Owning tenant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    /// Subscription state (e.g., "Enabled")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Existing resource group within a subscription
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    /// Resource group name, unique within the subscription
    pub name: String,
    /// Region the group lives in
    pub location: String,
    /// Full resource identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Region resources can be deployed to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeployLocation {
    /// Full location identifier
    pub id: String,
    /// Short programmatic name (e.g., "westus")
    pub name: String,
    /// Human-readable name (e.g., "West US")
    pub display_name: String,
}

/// A resource type the publish target may provision
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCatalogItem {
    /// Catalog key, unique within the catalog
    pub key: String,
    /// Resource type label (e.g., "Azure Web App")
    #[serde(default)]
    pub text: String,
    /// Pricing tier label
    #[serde(default)]
    pub tier: String,
    /// Logical group the resource belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// What the resource is used for
    #[serde(default)]
    pub description: String,
    /// Required resources are always provisioned
    pub required: bool,
}

/// Server-computed concrete name for a catalog item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePreview {
    /// Catalog key this preview belongs to
    pub key: String,
    /// Concrete resource name derived from the host name
    pub name: String,
    /// Icon URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A catalog item with its planned name, as shown on the review page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSelection {
    /// The catalog entry
    #[serde(flatten)]
    pub item: ResourceCatalogItem,
    /// Planned resource name
    pub name: String,
    /// Icon URL from the preview
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Whether the resource will be provisioned
    pub enabled: bool,
    /// False when no preview matched and the name is a placeholder
    #[serde(default = "default_true")]
    pub resolved: bool,
}

fn default_true() -> bool {
    true
}

impl ResourceSelection {
    /// Catalog key of the underlying item
    pub fn key(&self) -> &str {
        &self.item.key
    }

    /// Whether the underlying item is required
    pub fn is_required(&self) -> bool {
        self.item.required
    }
}

/// Payload sent to start provisioning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionRequest {
    /// Subscription to bill the resources to
    pub subscription: Subscription,
    /// Name of the new resource group
    pub hostname: String,
    /// Deploy region
    pub location: DeployLocation,
    /// Region for the language understanding resources
    pub luis_location: String,
    /// Publish target kind
    #[serde(rename = "type")]
    pub publish_kind: PublishKind,
    /// Required resources followed by enabled optional ones
    pub external_resources: Vec<ResourceSelection>,
}

/// Handle for a provisioning job started by the gateway
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionJob {
    /// Job identifier for status polling
    pub id: String,
    /// Initial job status reported by the backend
    #[serde(default)]
    pub status: Option<String>,
}

/// Signed-in user shown in the wizard footer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// Display name
    pub name: String,
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
