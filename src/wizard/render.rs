//! Shared rendering utilities for wizard prompts

use crate::platform::api::types::{ProvisionRequest, ResourceSelection};
use crate::wizard::context::WizardContext;
use crate::wizard::controller::WizardPage;
use crate::wizard::planner::ResourcePlan;
use colored::Colorize;
use inquire::ui::{Color, IndexPrefix, RenderConfig, StyleSheet, Styled};

/// Get the standard render config for wizard prompts
pub fn wizard_render_config() -> RenderConfig<'static> {
    RenderConfig::default()
        .with_highlighted_option_prefix(Styled::new("▸ ").with_fg(Color::LightCyan))
        .with_option_index_prefix(IndexPrefix::Simple)
        .with_selected_option(Some(StyleSheet::new().with_fg(Color::LightCyan)))
        .with_scroll_up_prefix(Styled::new("▲ "))
        .with_scroll_down_prefix(Styled::new("▼ "))
}

/// Display a wizard step header box
pub fn display_step_header(step_number: u8, step_name: &str, description: &str) {
    let term_width = term_size::dimensions().map(|(w, _)| w).unwrap_or(80);
    let box_width = term_width.clamp(20, 70);
    let inner_width = box_width - 4;

    println!();
    let header = format!("─ Step {} · {} ", step_number, step_name);
    println!(
        "{}{}{}",
        "┌".bright_cyan(),
        header.bright_cyan(),
        "─".repeat(inner_width.saturating_sub(header.chars().count())).bright_cyan()
    );

    for line in textwrap::wrap(description, inner_width - 2) {
        println!("{}  {}", "│".dimmed(), line.white());
    }

    println!("{}{}", "└".dimmed(), "─".repeat(box_width - 1).dimmed());
    println!();
}

/// Display the title block for a page
pub fn display_page_header(step_number: u8, page: WizardPage) {
    display_step_header(step_number, page.title(), page.sub_text());
}

/// Signed-in user line shown under each page
pub fn display_user(context: &WizardContext) {
    if let Some(user) = context.user_label() {
        println!("  {} Signed in as {}", "●".green(), user.bold());
    }
}

/// Format a check mark (enabled) or hollow circle (disabled)
pub fn status_indicator(enabled: bool) -> String {
    if enabled {
        "✓".green().to_string()
    } else {
        "○".dimmed().to_string()
    }
}

/// Format a count badge
pub fn count_badge(count: usize, label: &str) -> String {
    if count > 0 {
        format!("{} {}", count.to_string().cyan(), label.dimmed())
    } else {
        format!("{} {}", "0".dimmed(), label.dimmed())
    }
}

/// One-line label for a resource row: "kv-contoso · Key Vault | Standard"
pub fn resource_label(selection: &ResourceSelection) -> String {
    let mut label = selection.name.clone();
    if !selection.item.text.is_empty() || !selection.item.tier.is_empty() {
        label.push_str(&format!(" · {} | {}", selection.item.text, selection.item.tier));
    }
    label
}

/// Print the review list grouped into required and optional resources
pub fn display_plan(plan: &ResourcePlan) {
    let items: Vec<&ResourceSelection> = plan.items().collect();
    for group in plan.groups() {
        println!(
            "  {} {}",
            group.name.bold(),
            format!("({})", group.count).dimmed()
        );
        for selection in &items[group.start_index..group.start_index + group.count] {
            let name = if selection.resolved {
                resource_label(selection).normal()
            } else {
                resource_label(selection).yellow()
            };
            println!("    {} {}", status_indicator(selection.enabled), name);
            if !selection.item.description.is_empty() {
                println!("        {}", selection.item.description.dimmed());
            }
        }
    }
    println!();
}

/// Print what is about to be provisioned
pub fn display_request_summary(request: &ProvisionRequest) {
    println!("  {} Subscription: {}", "│".dimmed(), request.subscription.display_name.cyan());
    println!("  {} Resource group: {}", "│".dimmed(), request.hostname.cyan());
    println!("  {} Region: {}", "│".dimmed(), request.location.display_name.cyan());
    println!("  {} LUIS region: {}", "│".dimmed(), request.luis_location.cyan());
    println!(
        "  {} Resources: {}",
        "│".dimmed(),
        count_badge(request.external_resources.len(), "to create")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::api::types::ResourceCatalogItem;

    fn selection(text: &str, tier: &str) -> ResourceSelection {
        ResourceSelection {
            item: ResourceCatalogItem {
                key: "kv".to_string(),
                text: text.to_string(),
                tier: tier.to_string(),
                group: None,
                description: String::new(),
                required: true,
            },
            name: "kv-contoso".to_string(),
            icon: None,
            enabled: true,
            resolved: true,
        }
    }

    #[test]
    fn test_resource_label() {
        assert_eq!(
            resource_label(&selection("Key Vault", "Standard")),
            "kv-contoso · Key Vault | Standard"
        );
        assert_eq!(resource_label(&selection("", "")), "kv-contoso");
    }
}
