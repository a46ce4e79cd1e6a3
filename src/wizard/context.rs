//! Session context handed to the wizard at construction

use crate::platform::api::types::{CurrentUser, PublishKind};

/// Everything the wizard needs to know about who is provisioning what
///
/// Built once by the caller (from the persisted session and stored
/// credentials) and owned by the controller for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardContext {
    /// Bot project the resources are provisioned for
    pub project_id: String,
    /// Publish target kind
    pub publish_kind: PublishKind,
    /// Management API bearer token
    pub access_token: Option<String>,
    /// Directory graph token, forwarded for app registration
    pub graph_token: Option<String>,
    /// Signed-in user, if known
    pub current_user: Option<CurrentUser>,
}

impl WizardContext {
    /// Context with no credentials attached
    pub fn new(project_id: impl Into<String>, publish_kind: PublishKind) -> Self {
        Self {
            project_id: project_id.into(),
            publish_kind,
            access_token: None,
            graph_token: None,
            current_user: None,
        }
    }

    /// Attach the management and graph tokens
    pub fn with_tokens(mut self, access_token: Option<String>, graph_token: Option<String>) -> Self {
        self.access_token = access_token;
        self.graph_token = graph_token;
        self
    }

    /// Attach the signed-in user
    pub fn with_user(mut self, user: Option<CurrentUser>) -> Self {
        self.current_user = user;
        self
    }

    /// Footer label: the user's name, or nothing when signed out
    pub fn user_label(&self) -> Option<&str> {
        self.current_user.as_ref().map(|u| u.name.as_str())
    }
}
