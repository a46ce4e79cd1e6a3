//! In-memory collaborators for driving the wizard in tests

#![allow(dead_code)]

use async_trait::async_trait;
use bot_provision::platform::api::types::{
    DeployLocation, ProvisionJob, ProvisionRequest, PublishKind, ResourceCatalogItem,
    ResourceGroup, ResourcePreview, Subscription,
};
use bot_provision::platform::api::{PlatformApiError, Result};
use bot_provision::wizard::{DirectoryClient, SubmissionGateway, WizardContext, WizardController};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub fn subscription(id: &str) -> Subscription {
    Subscription {
        subscription_id: id.to_string(),
        display_name: format!("Subscription {}", id),
        tenant_id: None,
        state: Some("Enabled".to_string()),
    }
}

pub fn group(name: &str) -> ResourceGroup {
    ResourceGroup {
        name: name.to_string(),
        location: "westus".to_string(),
        id: None,
    }
}

pub fn location(name: &str) -> DeployLocation {
    DeployLocation {
        id: format!("/locations/{}", name),
        name: name.to_string(),
        display_name: name.to_uppercase(),
    }
}

pub fn catalog_item(key: &str, required: bool) -> ResourceCatalogItem {
    ResourceCatalogItem {
        key: key.to_string(),
        text: key.to_uppercase(),
        tier: "Standard".to_string(),
        group: None,
        description: String::new(),
        required,
    }
}

pub fn preview(key: &str, name: &str) -> ResourcePreview {
    ResourcePreview {
        key: key.to_string(),
        name: name.to_string(),
        icon: None,
    }
}

/// Scope lists served for one subscription
#[derive(Debug, Clone, Default)]
pub struct FakeScope {
    pub groups: Vec<ResourceGroup>,
    pub locations: Vec<DeployLocation>,
}

/// Directory backed by fixed data
#[derive(Debug, Clone, Default)]
pub struct FakeDirectory {
    pub subscriptions: Vec<Subscription>,
    pub scopes: HashMap<String, FakeScope>,
    pub luis_regions: Vec<String>,
    pub catalog: Vec<ResourceCatalogItem>,
    /// `None` makes the preview call fail
    pub previews: Option<Vec<ResourcePreview>>,
}

impl FakeDirectory {
    /// Two subscriptions; `sub-a` offers westus/eastus, `sub-b` only northeurope
    pub fn contoso() -> Self {
        let mut scopes = HashMap::new();
        scopes.insert(
            "sub-a".to_string(),
            FakeScope {
                groups: vec![group("existing-rg")],
                locations: vec![location("westus"), location("eastus")],
            },
        );
        scopes.insert(
            "sub-b".to_string(),
            FakeScope {
                groups: Vec::new(),
                locations: vec![location("northeurope")],
            },
        );

        Self {
            subscriptions: vec![subscription("sub-a"), subscription("sub-b")],
            scopes,
            luis_regions: vec!["westus".to_string()],
            catalog: vec![catalog_item("kv", true), catalog_item("app", false)],
            previews: Some(vec![preview("kv", "kv-contoso"), preview("app", "app-contoso")]),
        }
    }

    fn scope(&self, subscription_id: &str) -> Result<&FakeScope> {
        self.scopes
            .get(subscription_id)
            .ok_or_else(|| PlatformApiError::NotFound(subscription_id.to_string()))
    }
}

#[async_trait]
impl DirectoryClient for FakeDirectory {
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        Ok(self.subscriptions.clone())
    }

    async fn list_resource_groups(&self, subscription_id: &str) -> Result<Vec<ResourceGroup>> {
        Ok(self.scope(subscription_id)?.groups.clone())
    }

    async fn list_locations(&self, subscription_id: &str) -> Result<Vec<DeployLocation>> {
        Ok(self.scope(subscription_id)?.locations.clone())
    }

    async fn list_luis_regions(&self) -> Result<Vec<String>> {
        Ok(self.luis_regions.clone())
    }

    async fn list_resource_catalog(
        &self,
        _project_id: &str,
        _publish_kind: PublishKind,
    ) -> Result<Vec<ResourceCatalogItem>> {
        Ok(self.catalog.clone())
    }

    async fn preview_names(
        &self,
        _host_name: &str,
        _publish_kind: PublishKind,
    ) -> Result<Vec<ResourcePreview>> {
        self.previews.clone().ok_or(PlatformApiError::ServerError {
            status: 500,
            message: "preview unavailable".to_string(),
        })
    }
}

/// Gateway that records every dispatch
#[derive(Debug, Default)]
pub struct RecordingGateway {
    pub provisions: Mutex<Vec<(String, ProvisionRequest)>>,
    pub saved: Mutex<Vec<(String, serde_json::Value)>>,
    pub fail: AtomicBool,
}

impl RecordingGateway {
    pub fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn dispatch_count(&self) -> usize {
        self.provisions.lock().unwrap().len() + self.saved.lock().unwrap().len()
    }
}

#[async_trait]
impl SubmissionGateway for RecordingGateway {
    async fn start_provision(
        &self,
        project_id: &str,
        request: &ProvisionRequest,
    ) -> Result<ProvisionJob> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PlatformApiError::RateLimited);
        }
        let mut provisions = self.provisions.lock().unwrap();
        provisions.push((project_id.to_string(), request.clone()));
        Ok(ProvisionJob {
            id: format!("job-{}", provisions.len()),
            status: Some("Queued".to_string()),
        })
    }

    async fn save_publish_config(&self, project_id: &str, config: &serde_json::Value) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PlatformApiError::RateLimited);
        }
        self.saved
            .lock()
            .unwrap()
            .push((project_id.to_string(), config.clone()));
        Ok(())
    }
}

pub fn wizard_with(
    directory: FakeDirectory,
    gateway: Arc<RecordingGateway>,
) -> WizardController {
    WizardController::new(
        WizardContext::new("bot-1", PublishKind::AzurePublish),
        Arc::new(directory),
        gateway,
    )
}
