use crate::config::types::Config;
use crate::error::{ProvisionError, Result};
use crate::handlers::utils::{build_client, build_context, load_session};
use crate::platform::api::types::PublishKind;
use crate::wizard::{
    display_request_summary, run_wizard, Submission, WizardController, WizardOutcome,
};
use colored::Colorize;
use std::sync::Arc;

/// Destination for a provisioning run without prompts
#[derive(Debug, Clone, Default)]
pub struct UnattendedOptions {
    pub subscription: String,
    pub hostname: String,
    pub location: String,
    pub luis_location: Option<String>,
    /// Optional resource keys to leave disabled
    pub exclude: Vec<String>,
}

/// Command-line arguments of `prov-ctl provision`
#[derive(Debug, Clone, Default)]
pub struct ProvisionArgs {
    pub project: Option<String>,
    pub publish_kind: Option<PublishKind>,
    /// Set when `--yes` was given
    pub unattended: Option<UnattendedOptions>,
}

pub async fn handle_provision(config: &Config, args: ProvisionArgs, json: bool) -> Result<()> {
    let session = load_session();
    let context = build_context(config, &session, args.project.as_deref(), args.publish_kind)?;
    let client = Arc::new(build_client(config, &context)?);
    let mut controller = WizardController::new(context, client.clone(), client);

    let submission = match args.unattended {
        Some(options) => {
            let submission = run_unattended(&mut controller, &options).await?;
            if !json {
                println!(
                    "{} Provisioning started (job {}).",
                    "✓".green(),
                    submission.job.id.cyan()
                );
            }
            submission
        }
        None => match run_wizard(&mut controller).await {
            WizardOutcome::Provisioned(submission) => submission,
            WizardOutcome::Imported | WizardOutcome::Cancelled => return Ok(()),
            WizardOutcome::Error(message) => return Err(ProvisionError::Prompt(message)),
        },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&submission.request)?);
    }
    Ok(())
}

/// Drive the wizard from start to Done without prompting
///
/// Goes through the same controller transitions as the interactive flow,
/// so the same validation applies.
pub async fn run_unattended(
    controller: &mut WizardController,
    options: &UnattendedOptions,
) -> Result<Submission> {
    controller.open().await?;
    controller.change_subscription(&options.subscription).await?;

    controller.set_host_name(&options.hostname)?;
    let host_error = controller.selection().host_name_error();
    if !host_error.is_empty() {
        return Err(ProvisionError::InvalidInput(format!(
            "'{}': {}",
            options.hostname, host_error
        )));
    }

    controller.select_location(&options.location)?;
    match &options.luis_location {
        Some(region) => controller.select_luis_location(region)?,
        None if controller.luis_prompt_required() => {
            return Err(ProvisionError::InvalidInput(format!(
                "region '{}' has no LUIS authoring; pass --luis-location (one of: {})",
                options.location,
                controller.luis_locations().join(", ")
            )));
        }
        None => {}
    }

    controller.next().await?;
    for key in &options.exclude {
        controller.set_resource_enabled(key, false)?;
    }

    if let Ok(request) = controller.build_request() {
        log::info!(
            "Submitting {} resources for '{}'",
            request.external_resources.len(),
            request.hostname
        );
        if log::log_enabled!(log::Level::Info) {
            display_request_summary(&request);
        }
    }

    Ok(controller.done().await?)
}
