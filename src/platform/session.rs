//! Provisioning session state
//!
//! Remembers which bot project (and publish kind) the wizard provisions for,
//! across CLI invocations. Stored in `~/.botprov/session.json`.

use crate::platform::api::types::PublishKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Selected bot project for provisioning operations
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProvisionSession {
    /// Selected bot project id
    pub project_id: Option<String>,
    /// Human-readable project name
    pub project_name: Option<String>,
    /// Publish target kind last used for this project
    pub publish_kind: Option<PublishKind>,
    /// When the session was last updated
    pub last_updated: Option<DateTime<Utc>>,
}

impl ProvisionSession {
    /// Creates a new empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with a selected project
    pub fn with_project(
        project_id: String,
        project_name: Option<String>,
        publish_kind: Option<PublishKind>,
    ) -> Self {
        Self {
            project_id: Some(project_id),
            project_name,
            publish_kind,
            last_updated: Some(Utc::now()),
        }
    }

    /// Clears the selected project
    pub fn clear(&mut self) {
        self.project_id = None;
        self.project_name = None;
        self.publish_kind = None;
        self.last_updated = Some(Utc::now());
    }

    /// Returns true if a project is currently selected
    pub fn is_project_selected(&self) -> bool {
        self.project_id.is_some()
    }

    /// Project from the command line, else the remembered one
    pub fn resolve_project(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(|s| s.to_string())
            .or_else(|| self.project_id.clone())
    }

    /// Publish kind from the command line, else remembered, else `fallback`
    pub fn resolve_publish_kind(
        &self,
        explicit: Option<PublishKind>,
        fallback: PublishKind,
    ) -> PublishKind {
        explicit.or(self.publish_kind).unwrap_or(fallback)
    }

    /// Returns the path to the session file
    ///
    /// Location: `~/.botprov/session.json`
    pub fn session_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".botprov")
            .join("session.json")
    }

    /// Load session from disk
    ///
    /// Returns Default if the file doesn't exist.
    pub fn load() -> io::Result<Self> {
        Self::load_from(&Self::session_path())
    }

    pub fn load_from(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save session to disk
    ///
    /// Creates `~/.botprov/` if it doesn't exist.
    pub fn save(&self) -> io::Result<()> {
        self.save_to(&Self::session_path())
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Returns a display string for the current context
    ///
    /// Format: "[name (id)]", "[id]", or "[no project selected]"
    pub fn display_context(&self) -> String {
        match (&self.project_name, &self.project_id) {
            (Some(name), Some(id)) => format!("[{} ({})]", name, id),
            (None, Some(id)) => format!("[{}]", id),
            _ => "[no project selected]".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_session_is_empty() {
        let session = ProvisionSession::new();
        assert!(!session.is_project_selected());
        assert_eq!(session.display_context(), "[no project selected]");
    }

    #[test]
    fn test_with_project_and_clear() {
        let mut session = ProvisionSession::with_project(
            "proj-123".to_string(),
            Some("EchoBot".to_string()),
            Some(PublishKind::AzureFunctionsPublish),
        );
        assert!(session.is_project_selected());
        assert_eq!(session.display_context(), "[EchoBot (proj-123)]");

        session.clear();
        assert!(!session.is_project_selected());
        assert!(session.last_updated.is_some());
    }

    #[test]
    fn test_resolution_order() {
        let session = ProvisionSession::with_project(
            "saved".to_string(),
            None,
            Some(PublishKind::AzureFunctionsPublish),
        );
        assert_eq!(session.resolve_project(Some("flag")).as_deref(), Some("flag"));
        assert_eq!(session.resolve_project(None).as_deref(), Some("saved"));
        assert_eq!(
            session.resolve_publish_kind(None, PublishKind::AzurePublish),
            PublishKind::AzureFunctionsPublish
        );
        assert_eq!(
            session.resolve_publish_kind(Some(PublishKind::AzurePublish), PublishKind::AzurePublish),
            PublishKind::AzurePublish
        );
        assert_eq!(
            ProvisionSession::new().resolve_publish_kind(None, PublishKind::AzurePublish),
            PublishKind::AzurePublish
        );
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("session.json");

        let session = ProvisionSession::with_project(
            "proj-789".to_string(),
            Some("test-bot".to_string()),
            Some(PublishKind::AzurePublish),
        );
        session.save_to(&path).unwrap();

        let loaded = ProvisionSession::load_from(&path).unwrap();
        assert_eq!(loaded.project_id, session.project_id);
        assert_eq!(loaded.project_name, session.project_name);
        assert_eq!(loaded.publish_kind, session.publish_kind);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempdir().unwrap();
        let loaded = ProvisionSession::load_from(&temp_dir.path().join("absent.json")).unwrap();
        assert!(!loaded.is_project_selected());
    }
}
