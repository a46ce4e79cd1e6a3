//! Crate-level error types

use crate::platform::api::PlatformApiError;
use crate::wizard::WizardError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by `prov-ctl` commands
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] PlatformApiError),

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A command needs a bot project and none was given or remembered
    #[error("No project selected - pass --project or run `prov-ctl project set <ID>`")]
    NoProject,

    /// Interactive prompt failed for a reason other than cancellation
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// A non-interactive option was missing or rejected
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authentication error: {0}")]
    Auth(String),
}

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    ParsingFailed(String),
}

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, ProvisionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::WizardAction;

    #[test]
    fn test_wrapped_errors_keep_their_message() {
        let api: ProvisionError = PlatformApiError::RateLimited.into();
        assert!(api.to_string().contains("Rate limit"));

        let wizard: ProvisionError = WizardError::ActionDisabled(WizardAction::Done).into();
        assert!(wizard.to_string().contains("'Done'"));

        let config: ProvisionError = ConfigError::ParsingFailed("bad".to_string()).into();
        assert!(config.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_no_project_hint() {
        assert!(ProvisionError::NoProject
            .to_string()
            .contains("prov-ctl project set"));
    }
}
