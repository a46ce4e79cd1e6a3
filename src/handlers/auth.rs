use crate::auth::credentials::{self, AuthStatus, NewCredentials};
use crate::cli::AuthCommand;
use crate::error::{ProvisionError, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;

pub fn handle_auth(command: AuthCommand) -> Result<()> {
    match command {
        AuthCommand::Login {
            token,
            graph_token,
            user,
            email,
            expires_in,
        } => {
            if token.trim().is_empty() {
                return Err(ProvisionError::Auth("token must not be empty".to_string()));
            }
            credentials::save_credentials(&NewCredentials {
                access_token: token.trim(),
                graph_token: graph_token.as_deref(),
                user_name: user.as_deref(),
                user_email: email.as_deref(),
                expires_in_secs: expires_in,
            })
            .map_err(|e| ProvisionError::Auth(e.to_string()))?;
            println!("{} Credentials saved.", "✓".green());
            Ok(())
        }
        AuthCommand::Logout => {
            credentials::clear_credentials().map_err(|e| ProvisionError::Auth(e.to_string()))?;
            println!("{} Logged out.", "✓".green());
            Ok(())
        }
        AuthCommand::Status => {
            println!("{}", describe_status(&credentials::get_auth_status()));
            Ok(())
        }
    }
}

fn describe_status(status: &AuthStatus) -> String {
    match status {
        AuthStatus::NotAuthenticated => format!(
            "{} Not logged in. Run `prov-ctl auth login --token <TOKEN>`.",
            "○".dimmed()
        ),
        AuthStatus::Expired => format!(
            "{} Stored credentials have expired. Run `prov-ctl auth login` again.",
            "⚠".yellow()
        ),
        AuthStatus::Authenticated { user, expires_at } => {
            let who = user
                .as_ref()
                .map(|u| match &u.email {
                    Some(email) if *email != u.name => format!(" as {} <{}>", u.name, email),
                    _ => format!(" as {}", u.name),
                })
                .unwrap_or_default();
            let until = expires_at
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs as i64, 0))
                .map(|t| format!(" (expires {})", t.format("%Y-%m-%d %H:%M UTC")))
                .unwrap_or_default();
            format!("{} Logged in{}{}", "✓".green(), who, until)
        }
    }
}
