pub mod types;

use crate::error::{ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".botprov.toml";

/// Environment variable overriding `[api] url`
pub const API_URL_ENV: &str = "BOTPROV_API_URL";

/// Get the global config file path (~/.botprov.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (project/.botprov.toml)
pub fn local_config_path(project_path: &Path) -> PathBuf {
    project_path.join(CONFIG_FILE_NAME)
}

/// Load configuration from an explicit file, the local directory, or the
/// global file, in that order; defaults when none exist
pub fn load_config(explicit: Option<&Path>) -> Result<types::Config> {
    let mut config = match explicit {
        // an explicitly named file must exist and parse
        Some(path) => read_config_file(path)?,
        None => load_implicit_config(),
    };

    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            config.api.url = url;
        }
    }
    Ok(config)
}

fn load_implicit_config() -> types::Config {
    let candidates = std::env::current_dir()
        .ok()
        .map(|dir| local_config_path(&dir))
        .into_iter()
        .chain(global_config_path());

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match read_config_file(&path) {
            Ok(config) => return config,
            Err(e) => log::warn!("Ignoring config {}: {}", path.display(), e),
        }
    }

    types::Config::default()
}

/// Read and parse one TOML config file
pub fn read_config_file(path: &Path) -> Result<types::Config> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::ParsingFailed(e.to_string()).into())
}

/// Load only the global config file, ignoring local overrides
pub fn load_global_config() -> types::Config {
    global_config_path()
        .filter(|p| p.exists())
        .and_then(|p| read_config_file(&p).ok())
        .unwrap_or_default()
}

/// Save configuration to the global config file
pub fn save_global_config(config: &types::Config) -> Result<()> {
    if let Some(path) = global_config_path() {
        save_config_to(config, &path)?;
    }
    Ok(())
}

pub fn save_config_to(config: &types::Config, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::ParsingFailed(e.to_string()))?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");

        let mut config = types::Config::default();
        config.api.timeout_secs = 5;
        config.auth.user_name = Some("Ada".to_string());
        save_config_to(&config, &path).unwrap();

        let loaded = read_config_file(&path).unwrap();
        assert_eq!(loaded.api.timeout_secs, 5);
        assert_eq!(loaded.auth.user_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(read_config_file(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[api\nurl = ").unwrap();

        let err = read_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_local_config_path() {
        let path = local_config_path(Path::new("/tmp/bot"));
        assert_eq!(path, PathBuf::from("/tmp/bot/.botprov.toml"));
    }
}
