use crate::cli::ProjectCommand;
use crate::error::Result;
use crate::handlers::utils::load_session;
use crate::platform::ProvisionSession;
use colored::Colorize;

pub fn handle_project(command: ProjectCommand, json: bool) -> Result<()> {
    match command {
        ProjectCommand::Set {
            id,
            name,
            publish_kind,
        } => {
            let session = ProvisionSession::with_project(id, name, publish_kind.map(Into::into));
            session.save()?;
            println!("{} Selected {}", "✓".green(), session.display_context().cyan());
        }
        ProjectCommand::Show => {
            let session = load_session();
            if json {
                println!("{}", serde_json::to_string_pretty(&session)?);
            } else {
                println!("{}", session.display_context());
                if let Some(kind) = session.publish_kind {
                    println!("  Publish target: {}", kind.display_name());
                }
            }
        }
        ProjectCommand::Clear => {
            let mut session = load_session();
            session.clear();
            session.save()?;
            println!("{} Project selection cleared.", "✓".green());
        }
    }
    Ok(())
}
