use crate::wizard::regions::{LuisRegion, LUIS_AUTHORING_REGIONS, LUIS_PREDICTION_REGIONS};
use colored::Colorize;

pub fn handle_regions(json: bool) -> crate::Result<()> {
    if json {
        let value = serde_json::json!({
            "authoring": region_values(LUIS_AUTHORING_REGIONS),
            "prediction": region_values(LUIS_PREDICTION_REGIONS),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "LUIS authoring regions:".bold());
    print_table(LUIS_AUTHORING_REGIONS);
    println!("\n{}", "LUIS prediction regions:".bold());
    print_table(LUIS_PREDICTION_REGIONS);
    Ok(())
}

fn region_values(regions: &[LuisRegion]) -> Vec<serde_json::Value> {
    regions
        .iter()
        .map(|r| serde_json::json!({ "id": r.id, "name": r.name, "geography": r.geography }))
        .collect()
}

fn print_table(regions: &[LuisRegion]) {
    let mut geography = "";
    for (i, region) in regions.iter().enumerate() {
        if region.geography != geography {
            geography = region.geography;
            println!("  {}", geography.dimmed());
        }
        let last = regions
            .get(i + 1)
            .is_none_or(|next| next.geography != region.geography);
        let branch = if last { "└──" } else { "├──" };
        println!("  {} {:<20} {}", branch, region.id.cyan(), region.name);
    }
}
