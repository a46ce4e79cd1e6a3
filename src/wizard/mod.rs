//! Resource provisioning wizard
//!
//! The controller is a two-page state machine (configure, review) that
//! consumes a [`DirectoryClient`] for its choices and hands the finished
//! request to a [`SubmissionGateway`]. The orchestrator drives it with
//! terminal prompts.

pub mod context;
pub mod controller;
pub mod directory;
pub mod error;
pub mod gateway;
mod orchestrator;
pub mod planner;
pub mod regions;
mod render;
pub mod selection;

pub use context::WizardContext;
pub use controller::{
    fetch_scope, ActionState, ScopeRequest, Submission, SubscriptionScope, WizardController,
    WizardFlow, WizardPage, WizardStatus,
};
pub use directory::DirectoryClient;
pub use error::{WizardAction, WizardError, WizardResult};
pub use gateway::SubmissionGateway;
pub use orchestrator::{run_wizard, save_import, settle, submit_review, Attempt, WizardOutcome};
pub use planner::{merge_previews, PlanGroup, ResourcePlan};
pub use render::{display_plan, display_request_summary, display_step_header, status_indicator};
pub use selection::SelectionState;
