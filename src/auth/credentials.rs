//! Credential storage and retrieval
//!
//! Stores management and graph tokens in ~/.botprov.toml

use crate::config::{load_global_config, save_global_config, types::ProvisionAuth};
use crate::platform::api::types::CurrentUser;
use anyhow::{Context, Result};
use std::time::{SystemTime, UNIX_EPOCH};

/// Tokens and user details to store
#[derive(Debug, Clone, Default)]
pub struct NewCredentials<'a> {
    pub access_token: &'a str,
    pub graph_token: Option<&'a str>,
    pub user_name: Option<&'a str>,
    pub user_email: Option<&'a str>,
    pub expires_in_secs: Option<u64>,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Save credentials to the global config file
pub fn save_credentials(new: &NewCredentials<'_>) -> Result<()> {
    let mut config = load_global_config();
    config.auth = build_auth(new, now_secs());
    save_global_config(&config).context("failed to write credentials")?;
    Ok(())
}

fn build_auth(new: &NewCredentials<'_>, now: u64) -> ProvisionAuth {
    ProvisionAuth {
        access_token: Some(new.access_token.to_string()),
        graph_token: new.graph_token.map(|s| s.to_string()),
        expires_at: new.expires_in_secs.map(|secs| now.saturating_add(secs)),
        user_name: new.user_name.map(|s| s.to_string()),
        user_email: new.user_email.map(|s| s.to_string()),
    }
}

fn is_expired(auth: &ProvisionAuth, now: u64) -> bool {
    auth.expires_at.is_some_and(|expires_at| now > expires_at)
}

/// Get the current access token if valid
pub fn get_access_token() -> Option<String> {
    let auth = load_global_config().auth;
    if is_expired(&auth, now_secs()) {
        return None;
    }
    auth.access_token
}

/// Get the graph token if the stored credentials are still valid
pub fn get_graph_token() -> Option<String> {
    let auth = load_global_config().auth;
    if is_expired(&auth, now_secs()) {
        return None;
    }
    auth.graph_token
}

/// Signed-in user recorded at login
pub fn get_current_user() -> Option<CurrentUser> {
    current_user_from(&load_global_config().auth)
}

fn current_user_from(auth: &ProvisionAuth) -> Option<CurrentUser> {
    let name = auth
        .user_name
        .clone()
        .or_else(|| auth.user_email.clone())?;
    Some(CurrentUser {
        name,
        email: auth.user_email.clone(),
    })
}

/// Get authentication status including expiry info
pub fn get_auth_status() -> AuthStatus {
    status_from(&load_global_config().auth, now_secs())
}

fn status_from(auth: &ProvisionAuth, now: u64) -> AuthStatus {
    match &auth.access_token {
        None => AuthStatus::NotAuthenticated,
        Some(_) if is_expired(auth, now) => AuthStatus::Expired,
        Some(_) => AuthStatus::Authenticated {
            user: current_user_from(auth),
            expires_at: auth.expires_at,
        },
    }
}

/// Clear stored credentials (logout)
pub fn clear_credentials() -> Result<()> {
    let mut config = load_global_config();
    config.auth = ProvisionAuth::default();
    save_global_config(&config).context("failed to clear credentials")?;
    Ok(())
}

/// Authentication status enum
#[derive(Debug, PartialEq, Eq)]
pub enum AuthStatus {
    NotAuthenticated,
    Expired,
    Authenticated {
        user: Option<CurrentUser>,
        expires_at: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_auth_sets_expiry() {
        let auth = build_auth(
            &NewCredentials {
                access_token: "tok",
                expires_in_secs: Some(60),
                ..Default::default()
            },
            1_000,
        );
        assert_eq!(auth.access_token.as_deref(), Some("tok"));
        assert_eq!(auth.expires_at, Some(1_060));
        assert!(auth.graph_token.is_none());
    }

    #[test]
    fn test_huge_expiry_saturates() {
        let auth = build_auth(
            &NewCredentials {
                access_token: "tok",
                expires_in_secs: Some(u64::MAX),
                ..Default::default()
            },
            1_000,
        );
        assert_eq!(auth.expires_at, Some(u64::MAX));
        assert!(!is_expired(&auth, 2_000));
    }

    #[test]
    fn test_status_transitions() {
        assert_eq!(
            status_from(&ProvisionAuth::default(), 0),
            AuthStatus::NotAuthenticated
        );

        let auth = ProvisionAuth {
            access_token: Some("tok".to_string()),
            expires_at: Some(100),
            user_email: Some("ada@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(status_from(&auth, 101), AuthStatus::Expired);
        match status_from(&auth, 50) {
            AuthStatus::Authenticated { user, expires_at } => {
                assert_eq!(expires_at, Some(100));
                assert_eq!(user.unwrap().name, "ada@example.com");
            }
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[test]
    fn test_current_user_prefers_name() {
        let auth = ProvisionAuth {
            user_name: Some("Ada".to_string()),
            user_email: Some("ada@example.com".to_string()),
            ..Default::default()
        };
        let user = current_user_from(&auth).unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));

        assert!(current_user_from(&ProvisionAuth::default()).is_none());
    }
}
