use crate::config::types::Config;
use crate::error::Result;
use crate::handlers::utils::{build_client, build_context, load_session};
use crate::platform::api::types::{PublishKind, ResourceSelection};
use crate::wizard::{display_plan, planner, DirectoryClient, ResourcePlan};
use colored::Colorize;

/// Print the resources that would be provisioned for `hostname`
pub async fn handle_plan(
    config: &Config,
    hostname: &str,
    project: Option<&str>,
    publish_kind: Option<PublishKind>,
    json: bool,
) -> Result<()> {
    let session = load_session();
    let context = build_context(config, &session, project, publish_kind)?;
    let client = build_client(config, &context)?;

    let plan = preview_plan(&client, &context.project_id, hostname, context.publish_kind).await?;

    if json {
        let items: Vec<&ResourceSelection> = plan.items().collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    println!(
        "\n{} {} ({})\n",
        "Resources for".bold(),
        hostname.cyan(),
        context.publish_kind.display_name()
    );
    if plan.items().next().is_none() {
        println!("  {}", "No resources in the catalog for this project.".dimmed());
        return Ok(());
    }
    display_plan(&plan);
    if plan.has_unresolved() {
        println!(
            "{} Some names could not be previewed and are shown as placeholders.",
            "⚠".yellow()
        );
    }
    Ok(())
}

/// Fetch the catalog and previews and build the plan
///
/// Unlike the wizard, a catalog failure here is an error: there is nothing
/// to show without it.
pub async fn preview_plan(
    directory: &dyn DirectoryClient,
    project_id: &str,
    hostname: &str,
    publish_kind: PublishKind,
) -> Result<ResourcePlan> {
    let catalog = directory
        .list_resource_catalog(project_id, publish_kind)
        .await?;
    Ok(planner::plan(directory, hostname, publish_kind, &catalog).await)
}
