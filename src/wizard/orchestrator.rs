//! Interactive wizard - drives the controller with terminal prompts

use crate::wizard::controller::{Submission, WizardController, WizardFlow, WizardPage};
use crate::wizard::error::{WizardError, WizardResult};
use crate::wizard::regions;
use crate::wizard::render::{
    display_page_header, display_plan, display_request_summary, display_user,
    wizard_render_config,
};
use colored::Colorize;
use inquire::list_option::ListOption;
use inquire::{Confirm, InquireError, MultiSelect, Select, Text};
use std::collections::BTreeSet;

/// Result of running the interactive wizard
#[derive(Debug)]
pub enum WizardOutcome {
    /// Provisioning was dispatched
    Provisioned(Submission),
    /// An existing publish configuration was saved
    Imported,
    /// User cancelled the wizard
    Cancelled,
    /// An error occurred
    Error(String),
}

/// Why a prompt sequence stopped early
enum Stop {
    Cancelled,
    Failed(String),
}

impl From<InquireError> for Stop {
    fn from(e: InquireError) -> Self {
        match e {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => Stop::Cancelled,
            other => Stop::Failed(format!("Input error: {}", other)),
        }
    }
}

impl From<WizardError> for Stop {
    fn from(e: WizardError) -> Self {
        Stop::Failed(e.to_string())
    }
}

enum ReviewChoice {
    Done,
    Back,
}

/// Ways out of a subscription that offers no deploy regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegionRecovery {
    ChooseAgain,
    Cancel,
}

impl RegionRecovery {
    const ALL: [RegionRecovery; 2] = [RegionRecovery::ChooseAgain, RegionRecovery::Cancel];
}

impl std::fmt::Display for RegionRecovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionRecovery::ChooseAgain => write!(f, "Choose a subscription again"),
            RegionRecovery::Cancel => write!(f, "Cancel"),
        }
    }
}

/// Result of one Done or Save attempt
#[derive(Debug)]
pub enum Attempt<T> {
    /// The gateway accepted the request and the wizard closed
    Finished(T),
    /// The gateway failed but the wizard is still open; the user may retry
    Retry(String),
    /// Anything else ends the session
    Failed(String),
}

/// Classify a Done/Save result
///
/// Gateway failures are retryable only while the wizard is still open.
pub fn settle<T>(result: WizardResult<T>, still_open: bool) -> Attempt<T> {
    match result {
        Ok(value) => Attempt::Finished(value),
        Err(WizardError::Gateway(e)) if still_open => Attempt::Retry(e.to_string()),
        Err(e) => Attempt::Failed(e.to_string()),
    }
}

/// Press Done on the review page
pub async fn submit_review(controller: &mut WizardController) -> Attempt<Submission> {
    let result = controller.done().await;
    settle(result, controller.is_open())
}

/// Press Save on the import page
pub async fn save_import(controller: &mut WizardController) -> Attempt<()> {
    let result = controller.save().await;
    settle(result, controller.is_open())
}

/// Run the provisioning wizard against an already constructed controller
pub async fn run_wizard(controller: &mut WizardController) -> WizardOutcome {
    println!();
    println!(
        "{}",
        "═══════════════════════════════════════════════════════════════".bright_cyan()
    );
    println!(
        "{}",
        "                   Provision Azure Resources                   "
            .bright_cyan()
            .bold()
    );
    println!(
        "{}",
        "═══════════════════════════════════════════════════════════════".bright_cyan()
    );

    let result = drive(controller).await;
    match result {
        Ok(outcome) => outcome,
        Err(Stop::Cancelled) => {
            controller.cancel();
            println!("\n{}", "Wizard cancelled.".dimmed());
            WizardOutcome::Cancelled
        }
        Err(Stop::Failed(message)) => WizardOutcome::Error(message),
    }
}

async fn drive(controller: &mut WizardController) -> Result<WizardOutcome, Stop> {
    if let Err(e) = controller.open().await {
        return Ok(WizardOutcome::Error(e.to_string()));
    }

    display_page_header(1, WizardPage::Configure);
    display_user(controller.context());

    let flows = vec![WizardFlow::Create.label(), WizardFlow::Import.label()];
    let choice = Select::new("How do you want to set up resources?", flows)
        .with_render_config(wizard_render_config())
        .prompt()?;
    let flow = if choice == WizardFlow::Import.label() {
        WizardFlow::Import
    } else {
        WizardFlow::Create
    };
    controller.choose_flow(flow)?;

    match flow {
        WizardFlow::Import => import_flow(controller).await,
        WizardFlow::Create => create_flow(controller).await,
    }
}

// =============================================================================
// Import flow
// =============================================================================

async fn import_flow(controller: &mut WizardController) -> Result<WizardOutcome, Stop> {
    loop {
        let path = Text::new("Publish configuration file (JSON):")
            .with_help_message("Path to an existing publish profile")
            .prompt()?;

        let text = match std::fs::read_to_string(path.trim()) {
            Ok(text) => text,
            Err(e) => {
                println!("{} Could not read {}: {}", "✗".red(), path.trim(), e);
                continue;
            }
        };

        match controller.load_import_text(&text) {
            Ok(()) => break,
            Err(WizardError::InvalidImport(message)) => {
                println!("{} {}", "✗ Invalid configuration:".red(), message);
            }
            Err(e) => return Err(e.into()),
        }
    }

    loop {
        if !Confirm::new("Save this publish configuration?")
            .with_default(true)
            .prompt()?
        {
            return Err(Stop::Cancelled);
        }

        match save_import(controller).await {
            Attempt::Finished(()) => {
                println!("{} Publish configuration saved.", "✓".green());
                return Ok(WizardOutcome::Imported);
            }
            Attempt::Retry(message) => {
                println!("{} Saving failed: {}", "✗".red(), message);
            }
            Attempt::Failed(message) => return Err(Stop::Failed(message)),
        }
    }
}

// =============================================================================
// Create flow
// =============================================================================

async fn create_flow(controller: &mut WizardController) -> Result<WizardOutcome, Stop> {
    if controller.subscriptions().is_empty() {
        return Ok(WizardOutcome::Error(
            "No subscriptions available for the signed-in account.".to_string(),
        ));
    }

    'configure: loop {
        configure_page(controller).await?;
        controller.next().await?;

        if !review_page(controller)? {
            controller.back()?;
            continue;
        }

        loop {
            match review_action()? {
                ReviewChoice::Back => {
                    controller.back()?;
                    continue 'configure;
                }
                ReviewChoice::Done => match submit_review(controller).await {
                    Attempt::Finished(submission) => {
                        println!(
                            "\n{} Provisioning started (job {}).",
                            "✓".green(),
                            submission.job.id.cyan()
                        );
                        return Ok(WizardOutcome::Provisioned(submission));
                    }
                    Attempt::Retry(message) => {
                        println!("{} Provisioning failed: {}", "✗".red(), message);
                    }
                    Attempt::Failed(message) => return Err(Stop::Failed(message)),
                },
            }
        }
    }
}

async fn configure_page(controller: &mut WizardController) -> Result<(), Stop> {
    loop {
        choose_subscription(controller).await?;
        if !controller.locations().is_empty() {
            break;
        }

        println!(
            "{} No regions available for this subscription.",
            "⚠".yellow()
        );
        let choice = Select::new("What next?", RegionRecovery::ALL.to_vec())
            .with_render_config(wizard_render_config())
            .prompt()?;
        if choice == RegionRecovery::Cancel {
            return Err(Stop::Cancelled);
        }
    }

    // Host name
    loop {
        let current = controller.selection().host_name().to_string();
        let name = Text::new("Host name:")
            .with_default(&current)
            .with_placeholder("Name of your new resource group")
            .prompt()?;
        controller.set_host_name(name.trim())?;

        let error = controller.selection().host_name_error();
        if !error.is_empty() {
            println!("{} {}", "✗".red(), error.red());
        } else if controller.selection().host_name().is_empty() {
            println!("{} Host name is required.", "✗".red());
        } else {
            break;
        }
    }

    // Region
    let labels: Vec<String> = controller
        .locations()
        .iter()
        .map(|l| format!("{} ({})", l.display_name, l.name))
        .collect();
    let picked = Select::new("Location:", labels)
        .with_render_config(wizard_render_config())
        .raw_prompt()?;
    let id = controller.locations()[picked.index].id.clone();
    controller.select_location(&id)?;

    // LUIS region, only when the deploy region can't host authoring
    if controller.luis_prompt_required() {
        let options: Vec<String> = controller.luis_locations().to_vec();
        let labels: Vec<String> = options
            .iter()
            .map(|id| match regions::find_region(id) {
                Some(region) => regions::format_region_display(region),
                None => id.clone(),
            })
            .collect();
        let picked = Select::new("Location for LUIS:", labels)
            .with_render_config(wizard_render_config())
            .with_help_message("The selected region does not host LUIS authoring")
            .raw_prompt()?;
        controller.select_luis_location(&options[picked.index])?;
    }

    Ok(())
}

/// Pick a subscription and load its lists when they are not loaded yet
async fn choose_subscription(controller: &mut WizardController) -> Result<(), Stop> {
    let labels: Vec<String> = controller
        .subscriptions()
        .iter()
        .map(|s| format!("{} ({})", s.display_name, s.subscription_id))
        .collect();
    let start = controller
        .selection()
        .subscription()
        .and_then(|cur| {
            controller
                .subscriptions()
                .iter()
                .position(|s| s.subscription_id == cur.subscription_id)
        })
        .unwrap_or(0);
    let picked = Select::new("Subscription:", labels)
        .with_render_config(wizard_render_config())
        .with_starting_cursor(start)
        .raw_prompt()?;
    let subscription_id = controller.subscriptions()[picked.index]
        .subscription_id
        .clone();

    let already_loaded = controller
        .selection()
        .subscription()
        .is_some_and(|s| s.subscription_id == subscription_id)
        && !controller.locations().is_empty();
    if !already_loaded {
        println!("{} Loading resource groups and regions...", "→".cyan());
        controller.change_subscription(&subscription_id).await?;
    }

    Ok(())
}

/// Show the plan and let the user pick optional resources
///
/// Returns `false` when the request can't be built and the user has to go
/// back to the configure page.
fn review_page(controller: &mut WizardController) -> Result<bool, Stop> {
    display_page_header(2, WizardPage::Review);
    display_user(controller.context());

    let Some(plan) = controller.plan() else {
        return Err(Stop::Failed("No resource plan computed".to_string()));
    };
    display_plan(plan);

    let optional: Vec<(String, String)> = plan
        .optional()
        .iter()
        .map(|s| (s.key().to_string(), crate::wizard::render::resource_label(s)))
        .collect();

    if !optional.is_empty() {
        let labels: Vec<String> = optional.iter().map(|(_, l)| l.clone()).collect();
        let chosen = MultiSelect::new("Optional resources to create:", labels)
            .with_render_config(wizard_render_config())
            .with_all_selected_by_default()
            .with_help_message("Space to toggle, Enter to confirm")
            .raw_prompt()?;
        controller.select_optional_resources(&picked_keys(&optional, &chosen))?;
    }

    match controller.build_request() {
        Ok(request) => {
            display_request_summary(&request);
            Ok(true)
        }
        Err(_) => {
            println!(
                "{} Choose a region (and a LUIS region if asked) before creating resources.",
                "⚠".yellow()
            );
            Ok(false)
        }
    }
}

/// Map picked rows back to resource keys by position; labels may repeat
fn picked_keys(optional: &[(String, String)], picked: &[ListOption<String>]) -> BTreeSet<String> {
    picked
        .iter()
        .filter_map(|option| optional.get(option.index))
        .map(|(key, _)| key.clone())
        .collect()
}

fn review_action() -> Result<ReviewChoice, Stop> {
    let actions = vec!["Done", "Back"];
    let action = Select::new("Create these resources?", actions)
        .with_render_config(wizard_render_config())
        .prompt()?;
    Ok(if action == "Done" {
        ReviewChoice::Done
    } else {
        ReviewChoice::Back
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::api::PlatformApiError;

    #[test]
    fn test_gateway_failure_on_open_wizard_is_retryable() {
        let attempt: Attempt<()> = settle(Err(PlatformApiError::RateLimited.into()), true);
        assert!(matches!(attempt, Attempt::Retry(message) if message.contains("Rate limit")));
    }

    #[test]
    fn test_gateway_failure_on_closed_wizard_is_fatal() {
        let attempt: Attempt<()> = settle(Err(PlatformApiError::RateLimited.into()), false);
        assert!(matches!(attempt, Attempt::Failed(_)));
    }

    #[test]
    fn test_picked_keys_follow_row_index() {
        let optional = vec![
            ("app".to_string(), "App Service (contoso)".to_string()),
            ("bot".to_string(), "App Service (contoso)".to_string()),
            ("insights".to_string(), "Insights (contoso)".to_string()),
        ];
        let picked = vec![ListOption::new(1, "App Service (contoso)".to_string())];

        let keys = picked_keys(&optional, &picked);
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), vec!["bot".to_string()]);
    }

    #[test]
    fn test_disabled_action_is_not_retryable() {
        let attempt: Attempt<()> = settle(
            Err(WizardError::ActionDisabled(crate::wizard::WizardAction::Done)),
            true,
        );
        assert!(matches!(attempt, Attempt::Failed(_)));
        assert!(matches!(settle(Ok(7), true), Attempt::Finished(7)));
    }
}
