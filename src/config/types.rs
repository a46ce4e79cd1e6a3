use crate::platform::api::types::PublishKind;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub auth: ProvisionAuth,
}

/// Management API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the publish management API
    #[serde(default = "default_api_url")]
    pub url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    crate::platform::api::client::DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Wizard defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WizardConfig {
    /// Publish kind used when neither the CLI nor the session names one
    #[serde(default)]
    pub default_publish_kind: PublishKind,
    /// Override for the LUIS authoring region list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub luis_regions: Vec<String>,
}

/// Stored credentials for the management API
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProvisionAuth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_token: Option<String>,
    /// Unix timestamp (seconds) after which the tokens are rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.url, "http://localhost:5000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.wizard.default_publish_kind, PublishKind::AzurePublish);
        assert!(config.auth.access_token.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [api]
            url = "https://publish.example.com"

            [wizard]
            default_publish_kind = "azureFunctionsPublish"
            luis_regions = ["westus"]
            "#,
        )
        .unwrap();
        assert_eq!(config.api.url, "https://publish.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(
            config.wizard.default_publish_kind,
            PublishKind::AzureFunctionsPublish
        );
        assert_eq!(config.wizard.luis_regions, vec!["westus"]);
    }

    #[test]
    fn test_round_trip_skips_empty_auth() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(!text.contains("access_token"));
        assert!(text.contains("[api]"));
    }
}
