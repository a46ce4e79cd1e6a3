use crate::config::types::Config;
use crate::error::Result;
use crate::handlers::utils::{build_client, build_context, load_session};
use crate::wizard::{WizardController, WizardFlow};
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

/// Save an existing publish configuration through the import flow
pub async fn handle_import(config: &Config, file: &Path, project: Option<&str>) -> Result<()> {
    let text = std::fs::read_to_string(file)?;

    let session = load_session();
    let context = build_context(config, &session, project, None)?;
    let client = Arc::new(build_client(config, &context)?);
    let mut controller = WizardController::new(context, client.clone(), client);

    import_text(&mut controller, &text).await?;
    println!(
        "{} Imported publish configuration from {}",
        "✓".green(),
        file.display().to_string().cyan()
    );
    Ok(())
}

/// Run the import flow on an open controller with already-read JSON text
pub async fn import_text(controller: &mut WizardController, text: &str) -> Result<()> {
    controller.choose_flow(WizardFlow::Import)?;
    controller.load_import_text(text)?;
    controller.save().await?;
    Ok(())
}
