//! Provisioning wizard state machine
//!
//! Two pages, `Configure` and `Review`, and two flows on the configure page:
//! creating new resources or importing an existing publish configuration.
//!
//! Remote reads never fail the wizard. A failed fetch is logged and leaves
//! the dependent list empty, which the front end shows as loading/empty.
//! Actions whose required fields are invalid are refused with
//! [`WizardError::ActionDisabled`] and never reach the gateway.
//!
//! Subscription changes are keyed by a generation counter: results fetched
//! for an older selection are dropped by [`WizardController::apply_scope`].
//! Until the current subscription's lists are applied, Next and Done stay
//! disabled so a region picked under the previous subscription is never sent.

use crate::platform::api::types::{
    DeployLocation, ProvisionJob, ProvisionRequest, ResourceCatalogItem, ResourceGroup,
    Subscription,
};
use crate::wizard::context::WizardContext;
use crate::wizard::directory::DirectoryClient;
use crate::wizard::error::{WizardAction, WizardError, WizardResult};
use crate::wizard::gateway::SubmissionGateway;
use crate::wizard::planner::{self, ResourcePlan};
use crate::wizard::regions::supports_luis;
use crate::wizard::selection::SelectionState;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Wizard page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPage {
    Configure,
    Review,
}

impl WizardPage {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardPage::Configure => "configure",
            WizardPage::Review => "review",
        }
    }

    /// Dialog title for the page
    pub fn title(&self) -> &'static str {
        match self {
            WizardPage::Configure => "Configure resources",
            WizardPage::Review => "Review + Create",
        }
    }

    /// Explanatory text under the title
    pub fn sub_text(&self) -> &'static str {
        match self {
            WizardPage::Configure => {
                "Your bot resources will be created in this Azure destination. \
                 If you already have assets created then select import."
            }
            WizardPage::Review => {
                "Please review the resources that will be created for your bot. \
                 Once these resources are provisioned, they will be available in your Azure profile."
            }
        }
    }
}

/// Path chosen on the configure page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardFlow {
    /// Create new Azure resources
    #[default]
    Create,
    /// Import existing Azure resources
    Import,
}

impl WizardFlow {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardFlow::Create => "create",
            WizardFlow::Import => "import",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardFlow::Create => "Create new Azure resources",
            WizardFlow::Import => "Import existing Azure resources",
        }
    }
}

/// Lifecycle of one wizard session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardStatus {
    Open,
    /// Provisioning was dispatched
    Provisioned(ProvisionJob),
    /// An existing configuration was saved
    Imported,
    /// Dismissed without submitting
    Cancelled,
}

/// Disabled flags for the footer actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionState {
    pub next_disabled: bool,
    pub done_disabled: bool,
    pub save_disabled: bool,
}

/// Ticket for the fetches triggered by a subscription choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRequest {
    pub generation: u64,
    pub subscription_id: String,
}

/// Lists that depend on the selected subscription
#[derive(Debug, Clone, Default)]
pub struct SubscriptionScope {
    pub generation: u64,
    pub subscription_id: String,
    pub resource_groups: Vec<ResourceGroup>,
    pub locations: Vec<DeployLocation>,
    pub luis_locations: Vec<String>,
}

/// A dispatched provisioning request and the job it started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub request: ProvisionRequest,
    pub job: ProvisionJob,
}

#[derive(Debug, Clone, Default)]
struct ImportState {
    config: Option<serde_json::Value>,
    error: Option<String>,
}

/// Fetch the subscription-dependent lists for `request`
///
/// Each list is fetched independently; a failure leaves only that list empty.
pub async fn fetch_scope(directory: &dyn DirectoryClient, request: ScopeRequest) -> SubscriptionScope {
    let id = request.subscription_id.as_str();
    let (groups, locations, luis) = tokio::join!(
        directory.list_resource_groups(id),
        directory.list_locations(id),
        directory.list_luis_regions(),
    );

    let resource_groups = groups.unwrap_or_else(|e| {
        log::warn!("Failed to load resource groups for {}: {}", id, e);
        Vec::new()
    });
    let locations = locations.unwrap_or_else(|e| {
        log::warn!("Failed to load locations for {}: {}", id, e);
        Vec::new()
    });
    let luis_locations = luis.unwrap_or_else(|e| {
        log::warn!("Failed to load LUIS regions: {}", e);
        Vec::new()
    });

    SubscriptionScope {
        generation: request.generation,
        subscription_id: request.subscription_id,
        resource_groups,
        locations,
        luis_locations,
    }
}

/// Owns the state of one provisioning wizard session
pub struct WizardController {
    context: WizardContext,
    directory: Arc<dyn DirectoryClient>,
    gateway: Arc<dyn SubmissionGateway>,
    page: WizardPage,
    flow: WizardFlow,
    status: WizardStatus,
    subscriptions: Vec<Subscription>,
    resource_groups: Vec<ResourceGroup>,
    locations: Vec<DeployLocation>,
    luis_locations: Vec<String>,
    catalog: Vec<ResourceCatalogItem>,
    selection: SelectionState,
    plan: Option<ResourcePlan>,
    import: ImportState,
    scope_generation: u64,
    /// Set from a subscription choice until its lists are applied
    scope_pending: bool,
}

impl WizardController {
    pub fn new(
        context: WizardContext,
        directory: Arc<dyn DirectoryClient>,
        gateway: Arc<dyn SubmissionGateway>,
    ) -> Self {
        Self {
            context,
            directory,
            gateway,
            page: WizardPage::Configure,
            flow: WizardFlow::Create,
            status: WizardStatus::Open,
            subscriptions: Vec::new(),
            resource_groups: Vec::new(),
            locations: Vec::new(),
            luis_locations: Vec::new(),
            catalog: Vec::new(),
            selection: SelectionState::new(),
            plan: None,
            import: ImportState::default(),
            scope_generation: 0,
            scope_pending: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn context(&self) -> &WizardContext {
        &self.context
    }

    pub fn page(&self) -> WizardPage {
        self.page
    }

    pub fn flow(&self) -> WizardFlow {
        self.flow
    }

    pub fn status(&self) -> &WizardStatus {
        &self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == WizardStatus::Open
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn resource_groups(&self) -> &[ResourceGroup] {
        &self.resource_groups
    }

    pub fn locations(&self) -> &[DeployLocation] {
        &self.locations
    }

    pub fn luis_locations(&self) -> &[String] {
        &self.luis_locations
    }

    pub fn catalog(&self) -> &[ResourceCatalogItem] {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Plan computed on Next; `None` outside the review page
    pub fn plan(&self) -> Option<&ResourcePlan> {
        self.plan.as_ref()
    }

    pub fn import_config(&self) -> Option<&serde_json::Value> {
        self.import.config.as_ref()
    }

    pub fn import_error(&self) -> Option<&str> {
        self.import.error.as_deref()
    }

    /// True while the lists for the chosen subscription have not arrived
    pub fn is_scope_pending(&self) -> bool {
        self.scope_pending
    }

    /// Shared handle to the directory, for fetching outside a `&mut` borrow
    pub fn directory(&self) -> Arc<dyn DirectoryClient> {
        Arc::clone(&self.directory)
    }

    // =========================================================================
    // Derived flags
    // =========================================================================

    /// Subscription chosen, host name present and not colliding
    pub fn is_valid(&self) -> bool {
        self.selection.is_valid()
    }

    /// True when the chosen region lacks LUIS authoring and a separate LUIS
    /// region must be picked
    pub fn luis_prompt_required(&self) -> bool {
        match self.selection.location() {
            Some(location) => {
                !self.luis_locations.is_empty()
                    && !supports_luis(location, &self.luis_locations)
            }
            None => false,
        }
    }

    /// Everything the provisioning request needs is present
    pub fn can_submit(&self) -> bool {
        self.is_valid()
            && self.selection.location().is_some()
            && (!self.luis_prompt_required() || self.selection.luis_location().is_some())
    }

    pub fn action_state(&self) -> ActionState {
        let open = self.is_open();
        let configure = self.page == WizardPage::Configure;
        let settled = !self.scope_pending;
        ActionState {
            next_disabled: !(open
                && settled
                && configure
                && self.flow == WizardFlow::Create
                && self.is_valid()),
            done_disabled: !(open
                && settled
                && self.page == WizardPage::Review
                && self.plan.is_some()
                && self.can_submit()),
            save_disabled: !(open
                && configure
                && self.flow == WizardFlow::Import
                && self.import.config.is_some()
                && self.import.error.is_none()),
        }
    }

    // =========================================================================
    // Configure page
    // =========================================================================

    /// Load subscriptions and the resource catalog
    pub async fn open(&mut self) -> WizardResult<()> {
        self.ensure_open()?;
        log::info!(
            "{} for project {} ({})",
            self.page.title(),
            self.context.project_id,
            self.context.publish_kind
        );

        let directory = Arc::clone(&self.directory);
        let (subscriptions, catalog) = tokio::join!(
            directory.list_subscriptions(),
            directory.list_resource_catalog(&self.context.project_id, self.context.publish_kind),
        );

        self.subscriptions = subscriptions.unwrap_or_else(|e| {
            log::warn!("Failed to load subscriptions: {}", e);
            Vec::new()
        });
        self.catalog = catalog.unwrap_or_else(|e| {
            log::warn!("Failed to load resource catalog: {}", e);
            Vec::new()
        });
        log::debug!(
            "Loaded {} subscriptions and {} catalog items",
            self.subscriptions.len(),
            self.catalog.len()
        );
        Ok(())
    }

    pub fn choose_flow(&mut self, flow: WizardFlow) -> WizardResult<()> {
        self.ensure_configure()?;
        self.flow = flow;
        Ok(())
    }

    /// Record a subscription choice and invalidate its dependent lists
    ///
    /// The returned ticket must be fetched with [`fetch_scope`] and handed
    /// back to [`apply_scope`](Self::apply_scope).
    pub fn select_subscription(&mut self, subscription_id: &str) -> WizardResult<ScopeRequest> {
        self.ensure_configure()?;
        let subscription = self
            .subscriptions
            .iter()
            .find(|s| s.subscription_id == subscription_id)
            .cloned()
            .ok_or_else(|| WizardError::UnknownSubscription(subscription_id.to_string()))?;

        self.selection.set_subscription(subscription);
        self.scope_generation += 1;
        self.scope_pending = true;
        self.resource_groups.clear();
        self.locations.clear();
        self.luis_locations.clear();

        Ok(ScopeRequest {
            generation: self.scope_generation,
            subscription_id: subscription_id.to_string(),
        })
    }

    /// Commit fetched lists if they still belong to the current subscription
    ///
    /// Returns `false` when the scope is stale and was discarded.
    pub fn apply_scope(&mut self, scope: SubscriptionScope) -> bool {
        let current = self
            .selection
            .subscription()
            .map(|s| s.subscription_id.as_str());
        if !self.is_open()
            || scope.generation != self.scope_generation
            || current != Some(scope.subscription_id.as_str())
        {
            log::debug!(
                "Discarding stale scope for {} (generation {}, current {})",
                scope.subscription_id,
                scope.generation,
                self.scope_generation
            );
            return false;
        }

        self.scope_pending = false;
        self.resource_groups = scope.resource_groups;
        self.locations = scope.locations;
        self.luis_locations = scope.luis_locations;

        let location_gone = self
            .selection
            .location()
            .is_some_and(|l| !self.locations.iter().any(|n| n.id == l.id));
        if location_gone {
            log::debug!("Selected location not offered by new subscription, clearing");
            self.selection.clear_location();
        }

        let luis_gone = self
            .selection
            .luis_location()
            .is_some_and(|l| !self.luis_locations.iter().any(|n| n == l));
        if luis_gone {
            self.selection.clear_luis_location();
        }

        self.selection.revalidate_host_name(&self.resource_groups);
        true
    }

    /// Select a subscription and load its lists in one step
    pub async fn change_subscription(&mut self, subscription_id: &str) -> WizardResult<bool> {
        let request = self.select_subscription(subscription_id)?;
        let directory = Arc::clone(&self.directory);
        let scope = fetch_scope(directory.as_ref(), request).await;
        Ok(self.apply_scope(scope))
    }

    pub fn set_host_name(&mut self, name: &str) -> WizardResult<()> {
        self.ensure_configure()?;
        self.selection.set_host_name(name, &self.resource_groups);
        Ok(())
    }

    /// Select a deploy region by id or short name
    pub fn select_location(&mut self, key: &str) -> WizardResult<()> {
        self.ensure_configure()?;
        let location = self
            .locations
            .iter()
            .find(|l| l.id == key || l.name == key)
            .cloned()
            .ok_or_else(|| WizardError::UnknownLocation(key.to_string()))?;

        // LUIS prompt is skipped for natively supported regions
        if supports_luis(&location, &self.luis_locations) {
            self.selection.clear_luis_location();
        }
        self.selection.set_location(location);
        Ok(())
    }

    pub fn select_luis_location(&mut self, region: &str) -> WizardResult<()> {
        self.ensure_configure()?;
        if !self.luis_locations.iter().any(|l| l == region) {
            return Err(WizardError::UnknownLuisLocation(region.to_string()));
        }
        self.selection.set_luis_location(region.to_string());
        Ok(())
    }

    /// Advance from configure to review, computing the resource plan
    pub async fn next(&mut self) -> WizardResult<()> {
        self.ensure_configure()?;
        self.ensure_flow(WizardFlow::Create)?;
        if self.action_state().next_disabled {
            return Err(WizardError::ActionDisabled(WizardAction::Next));
        }

        let directory = Arc::clone(&self.directory);
        let plan = planner::plan(
            directory.as_ref(),
            self.selection.host_name(),
            self.context.publish_kind,
            &self.catalog,
        )
        .await;

        if plan.has_unresolved() {
            log::warn!("Some resource names could not be previewed");
        }
        self.plan = Some(plan);
        self.page = WizardPage::Review;
        log::info!("{}", self.page.title());
        Ok(())
    }

    // =========================================================================
    // Import flow
    // =========================================================================

    /// Store the configuration produced by the editor, clearing its error
    pub fn set_import_config(&mut self, config: serde_json::Value) -> WizardResult<()> {
        self.ensure_configure()?;
        self.ensure_flow(WizardFlow::Import)?;
        self.import.config = Some(config);
        self.import.error = None;
        Ok(())
    }

    /// Record a schema or parse error reported by the editor
    pub fn flag_import_error(&mut self, message: impl Into<String>) -> WizardResult<()> {
        self.ensure_configure()?;
        self.ensure_flow(WizardFlow::Import)?;
        self.import.error = Some(message.into());
        Ok(())
    }

    /// Parse JSON text as the import configuration
    ///
    /// Only syntax is checked. A parse failure is flagged and returned.
    pub fn load_import_text(&mut self, text: &str) -> WizardResult<()> {
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => self.set_import_config(value),
            Err(e) => {
                let message = e.to_string();
                self.flag_import_error(message.clone())?;
                Err(WizardError::InvalidImport(message))
            }
        }
    }

    /// Persist the imported configuration and close
    pub async fn save(&mut self) -> WizardResult<()> {
        self.ensure_configure()?;
        self.ensure_flow(WizardFlow::Import)?;
        if self.action_state().save_disabled {
            return Err(WizardError::ActionDisabled(WizardAction::Save));
        }
        let config = self
            .import
            .config
            .clone()
            .ok_or(WizardError::ActionDisabled(WizardAction::Save))?;

        self.gateway
            .save_publish_config(&self.context.project_id, &config)
            .await?;
        log::info!("Saved publish configuration for {}", self.context.project_id);
        self.finish(WizardStatus::Imported);
        Ok(())
    }

    // =========================================================================
    // Review page
    // =========================================================================

    pub fn set_resource_enabled(&mut self, key: &str, enabled: bool) -> WizardResult<()> {
        self.plan_mut()?.set_enabled(key, enabled)
    }

    pub fn toggle_resource(&mut self, key: &str) -> WizardResult<bool> {
        self.plan_mut()?.toggle(key)
    }

    /// Enable exactly the given optional resources
    pub fn select_optional_resources(&mut self, keys: &BTreeSet<String>) -> WizardResult<()> {
        self.plan_mut()?.select_optional(keys);
        Ok(())
    }

    /// Build the request `done()` would dispatch
    pub fn build_request(&self) -> WizardResult<ProvisionRequest> {
        let disabled = || WizardError::ActionDisabled(WizardAction::Done);
        if self.action_state().done_disabled {
            return Err(disabled());
        }

        let plan = self.plan.as_ref().ok_or_else(disabled)?;
        let subscription = self.selection.subscription().cloned().ok_or_else(disabled)?;
        let location = self.selection.location().cloned().ok_or_else(disabled)?;
        let luis_location = self.selection.effective_luis_location().ok_or_else(disabled)?;

        Ok(ProvisionRequest {
            subscription,
            hostname: self.selection.host_name().to_string(),
            location,
            luis_location,
            publish_kind: self.context.publish_kind,
            external_resources: plan.selected(),
        })
    }

    /// Dispatch provisioning and close
    ///
    /// On a gateway failure the wizard stays on the review page so the user
    /// can retry.
    pub async fn done(&mut self) -> WizardResult<Submission> {
        self.ensure_open()?;
        if self.page != WizardPage::Review {
            return Err(WizardError::WrongPage { expected: "review" });
        }
        let request = self.build_request()?;

        let job = self
            .gateway
            .start_provision(&self.context.project_id, &request)
            .await?;
        log::info!(
            "Provisioning {} resources into '{}' (job {})",
            request.external_resources.len(),
            request.hostname,
            job.id
        );
        self.finish(WizardStatus::Provisioned(job.clone()));
        Ok(Submission { request, job })
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Review goes back to configure keeping the form; configure dismisses
    pub fn back(&mut self) -> WizardResult<()> {
        self.ensure_open()?;
        match self.page {
            WizardPage::Review => {
                self.plan = None;
                self.page = WizardPage::Configure;
            }
            WizardPage::Configure => self.finish(WizardStatus::Cancelled),
        }
        Ok(())
    }

    pub fn cancel(&mut self) {
        if self.is_open() {
            self.finish(WizardStatus::Cancelled);
        }
    }

    fn finish(&mut self, status: WizardStatus) {
        self.status = status;
        self.page = WizardPage::Configure;
        self.flow = WizardFlow::Create;
        self.subscriptions.clear();
        self.resource_groups.clear();
        self.locations.clear();
        self.luis_locations.clear();
        self.catalog.clear();
        self.selection = SelectionState::new();
        self.plan = None;
        self.import = ImportState::default();
        // in-flight scopes become stale
        self.scope_generation += 1;
        self.scope_pending = false;
    }

    fn ensure_open(&self) -> WizardResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(WizardError::Closed)
        }
    }

    fn ensure_configure(&self) -> WizardResult<()> {
        self.ensure_open()?;
        if self.page != WizardPage::Configure {
            return Err(WizardError::WrongPage { expected: "configure" });
        }
        Ok(())
    }

    fn ensure_flow(&self, flow: WizardFlow) -> WizardResult<()> {
        if self.flow != flow {
            return Err(WizardError::WrongFlow {
                expected: flow.as_str(),
            });
        }
        Ok(())
    }

    fn plan_mut(&mut self) -> WizardResult<&mut ResourcePlan> {
        self.ensure_open()?;
        if self.page != WizardPage::Review {
            return Err(WizardError::WrongPage { expected: "review" });
        }
        self.plan
            .as_mut()
            .ok_or(WizardError::WrongPage { expected: "review" })
    }
}
