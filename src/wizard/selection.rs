//! In-progress form choices for the create flow
//!
//! Holds what the user picked on the configure page and derives whether the
//! page is complete enough to move on.

use crate::platform::api::types::{DeployLocation, ResourceGroup, Subscription};

/// Error shown under the host-name field when it names an existing group
pub const HOST_NAME_TAKEN: &str = "this resource group already exists";

/// Current subscription, host name and region choices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    subscription: Option<Subscription>,
    host_name: String,
    host_name_error: String,
    location: Option<DeployLocation>,
    luis_location: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscription(&self) -> Option<&Subscription> {
        self.subscription.as_ref()
    }

    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    /// Inline error for the host-name field; empty when the name is usable
    pub fn host_name_error(&self) -> &str {
        &self.host_name_error
    }

    pub fn location(&self) -> Option<&DeployLocation> {
        self.location.as_ref()
    }

    /// Explicitly chosen LUIS region, if any
    pub fn luis_location(&self) -> Option<&str> {
        self.luis_location.as_deref()
    }

    /// Subscription chosen, host name present and not colliding
    pub fn is_valid(&self) -> bool {
        self.subscription.is_some()
            && !self.host_name.is_empty()
            && self.host_name_error.is_empty()
    }

    pub fn set_subscription(&mut self, subscription: Subscription) {
        self.subscription = Some(subscription);
    }

    /// Store a new host name and check it against the existing groups
    ///
    /// A colliding name is kept but flagged; the flag clears only once a
    /// non-colliding name is entered.
    pub fn set_host_name(&mut self, name: &str, existing: &[ResourceGroup]) {
        self.host_name = name.to_string();
        self.revalidate_host_name(existing);
    }

    /// Re-run the collision check, e.g. after a fresh resource-group list
    pub fn revalidate_host_name(&mut self, existing: &[ResourceGroup]) {
        if existing.iter().any(|g| g.name == self.host_name) {
            self.host_name_error = HOST_NAME_TAKEN.to_string();
        } else {
            self.host_name_error.clear();
        }
    }

    pub fn set_location(&mut self, location: DeployLocation) {
        self.location = Some(location);
    }

    pub fn clear_location(&mut self) {
        self.location = None;
    }

    pub fn set_luis_location(&mut self, region: String) {
        self.luis_location = Some(region);
    }

    pub fn clear_luis_location(&mut self) {
        self.luis_location = None;
    }

    /// LUIS region sent with the request: explicit choice, else the deploy
    /// region's own name
    pub fn effective_luis_location(&self) -> Option<String> {
        self.luis_location
            .clone()
            .or_else(|| self.location.as_ref().map(|l| l.name.clone()))
    }
}
