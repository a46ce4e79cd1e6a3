use crate::auth::credentials;
use crate::config::types::Config;
use crate::error::{ProvisionError, Result};
use crate::platform::api::types::PublishKind;
use crate::platform::api::ManagementApiClient;
use crate::platform::ProvisionSession;
use crate::wizard::WizardContext;
use std::time::Duration;

/// Load the persisted session, falling back to an empty one
pub fn load_session() -> ProvisionSession {
    match ProvisionSession::load() {
        Ok(session) => session,
        Err(e) => {
            log::warn!("Ignoring unreadable session file: {}", e);
            ProvisionSession::default()
        }
    }
}

/// Build the wizard context from the command line, session and credentials
pub fn build_context(
    config: &Config,
    session: &ProvisionSession,
    project: Option<&str>,
    publish_kind: Option<PublishKind>,
) -> Result<WizardContext> {
    let project_id = session
        .resolve_project(project)
        .ok_or(ProvisionError::NoProject)?;
    let publish_kind =
        session.resolve_publish_kind(publish_kind, config.wizard.default_publish_kind);

    Ok(WizardContext::new(project_id, publish_kind)
        .with_tokens(credentials::get_access_token(), credentials::get_graph_token())
        .with_user(credentials::get_current_user()))
}

/// Management API client configured for `context`
pub fn build_client(config: &Config, context: &WizardContext) -> Result<ManagementApiClient> {
    let client = ManagementApiClient::new(
        config.api.url.clone(),
        Duration::from_secs(config.api.timeout_secs),
    )?
    .with_context(context)
    .with_luis_regions(config.wizard.luis_regions.clone());
    log::debug!("Using management API at {}", client.api_url());
    Ok(client)
}
