//! Errors raised by wizard transitions

use crate::platform::api::PlatformApiError;
use std::fmt;
use thiserror::Error;

/// User-facing wizard actions that can be disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Next,
    Done,
    Save,
}

impl fmt::Display for WizardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WizardAction::Next => "Next",
            WizardAction::Done => "Done",
            WizardAction::Save => "Save",
        };
        f.write_str(label)
    }
}

/// Errors from driving the wizard state machine
#[derive(Debug, Error)]
pub enum WizardError {
    /// The action's disabled flag is set; nothing was dispatched
    #[error("'{0}' is not available until the required fields are valid")]
    ActionDisabled(WizardAction),

    /// Operation belongs to another page
    #[error("Operation requires the {expected} page")]
    WrongPage { expected: &'static str },

    /// Operation belongs to the other flow
    #[error("Operation requires the {expected} flow")]
    WrongFlow { expected: &'static str },

    /// The wizard was already submitted or dismissed
    #[error("The wizard is closed")]
    Closed,

    #[error("Unknown subscription: {0}")]
    UnknownSubscription(String),

    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Unknown LUIS location: {0}")]
    UnknownLuisLocation(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Required resources are always provisioned
    #[error("Resource '{0}' is required and cannot be disabled")]
    RequiredResource(String),

    /// Import configuration failed syntax validation
    #[error("Invalid publish configuration: {0}")]
    InvalidImport(String),

    /// Submission gateway rejected the request
    #[error("Submission failed: {0}")]
    Gateway(#[from] PlatformApiError),
}

/// Result type alias for wizard operations
pub type WizardResult<T> = std::result::Result<T, WizardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_disabled_message() {
        let err = WizardError::ActionDisabled(WizardAction::Next);
        assert!(err.to_string().contains("'Next'"));
    }

    #[test]
    fn test_gateway_conversion() {
        let err: WizardError = PlatformApiError::RateLimited.into();
        assert!(matches!(err, WizardError::Gateway(PlatformApiError::RateLimited)));
    }
}
