//! Read contract the wizard consumes to populate its choices
//!
//! Implementations own no wizard state. Every call may fail; the controller
//! treats a failed read as an empty list.

use crate::platform::api::types::{
    DeployLocation, PublishKind, ResourceCatalogItem, ResourceGroup, ResourcePreview,
    Subscription,
};
use crate::platform::api::Result;
use async_trait::async_trait;

/// Source of subscriptions, regions and the resource catalog
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Subscriptions visible to the signed-in account
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>>;

    /// Existing resource groups in a subscription
    async fn list_resource_groups(&self, subscription_id: &str) -> Result<Vec<ResourceGroup>>;

    /// Regions the subscription can deploy to
    async fn list_locations(&self, subscription_id: &str) -> Result<Vec<DeployLocation>>;

    /// Regions with native language-understanding authoring support
    async fn list_luis_regions(&self) -> Result<Vec<String>>;

    /// Resource types the publish target can provision
    async fn list_resource_catalog(
        &self,
        project_id: &str,
        publish_kind: PublishKind,
    ) -> Result<Vec<ResourceCatalogItem>>;

    /// Concrete resource names derived from a host name
    async fn preview_names(
        &self,
        host_name: &str,
        publish_kind: PublishKind,
    ) -> Result<Vec<ResourcePreview>>;
}
