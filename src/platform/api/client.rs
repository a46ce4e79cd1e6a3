//! Management API client
//!
//! Provides authenticated access to the publish management API that lists
//! subscriptions, resource groups and regions, previews resource names, and
//! starts provisioning jobs.

use super::error::{PlatformApiError, Result};
use super::types::{
    ApiErrorResponse, DeployLocation, GenericResponse, ProvisionJob, ProvisionRequest,
    PublishKind, ResourceCatalogItem, ResourceGroup, ResourcePreview, Subscription,
};
use crate::wizard::context::WizardContext;
use crate::wizard::directory::DirectoryClient;
use crate::wizard::gateway::SubmissionGateway;
use crate::wizard::regions;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Default API URL (local authoring server)
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Header carrying the directory graph token
const GRAPH_TOKEN_HEADER: &str = "X-Graph-Token";

/// User agent for API requests
const USER_AGENT: &str = concat!("bot-provision/", env!("CARGO_PKG_VERSION"));

/// Client for the publish management API
pub struct ManagementApiClient {
    /// HTTP client with configured timeout and headers
    http_client: Client,
    /// Base API URL
    api_url: String,
    /// Bearer token for management calls
    access_token: Option<String>,
    /// Graph token forwarded for app registration
    graph_token: Option<String>,
    /// Regions offering LUIS authoring
    luis_regions: Vec<String>,
}

impl ManagementApiClient {
    /// Create a client for `api_url` with the given request timeout
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(PlatformApiError::HttpError)?;

        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            access_token: None,
            graph_token: None,
            luis_regions: regions::authoring_region_ids(),
        })
    }

    /// Create a client with the default 30 second timeout
    pub fn with_url(api_url: impl Into<String>) -> Result<Self> {
        Self::new(api_url, Duration::from_secs(30))
    }

    /// Use the tokens carried by a wizard context
    pub fn with_context(mut self, context: &WizardContext) -> Self {
        self.access_token = context.access_token.clone();
        self.graph_token = context.graph_token.clone();
        self
    }

    /// Replace the LUIS authoring region list (empty keeps the built-in one)
    pub fn with_luis_regions(mut self, luis_regions: Vec<String>) -> Self {
        if !luis_regions.is_empty() {
            self.luis_regions = luis_regions;
        }
        self
    }

    /// Get the configured API URL
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn auth_token(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .ok_or(PlatformApiError::Unauthorized)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        let builder = builder.bearer_auth(self.auth_token()?);
        Ok(match &self.graph_token {
            Some(graph) => builder.header(GRAPH_TOKEN_HEADER, graph),
            None => builder,
        })
    }

    /// Make an authenticated GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.api_url, path);
        log::debug!("GET {}", url);

        let response = self.authorized(self.http_client.get(&url))?.send().await?;
        self.handle_response(response).await
    }

    /// Make an authenticated POST request with a JSON body
    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.api_url, path);
        log::debug!("POST {}", url);

        let response = self
            .authorized(self.http_client.post(&url))?
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make an authenticated POST request, ignoring any response body
    async fn post_empty<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = format!("{}{}", self.api_url, path);
        log::debug!("POST {}", url);

        let response = self
            .authorized(self.http_client.post(&url))?
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from(status.as_u16(), response).await)
        }
    }

    /// Handle the HTTP response, converting errors appropriately
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| PlatformApiError::ParseError(e.to_string()))
        } else {
            Err(Self::error_from(status.as_u16(), response).await)
        }
    }

    async fn error_from(status_code: u16, response: reqwest::Response) -> PlatformApiError {
        let error_body = response.text().await.unwrap_or_default();
        let error_message = serde_json::from_str::<ApiErrorResponse>(&error_body)
            .map(|e| e.get_message())
            .unwrap_or_else(|_| error_body.clone());
        PlatformApiError::from_status(status_code, error_message)
    }

    // =========================================================================
    // Directory API methods
    // =========================================================================

    /// Endpoint: GET /api/publish/subscriptions
    pub async fn get_subscriptions(&self) -> Result<Vec<Subscription>> {
        let response: GenericResponse<Vec<Subscription>> =
            self.get(&subscriptions_path()).await?;
        Ok(response.data)
    }

    /// Endpoint: GET /api/publish/subscriptions/:id/resourceGroups
    pub async fn get_resource_groups(&self, subscription_id: &str) -> Result<Vec<ResourceGroup>> {
        let response: GenericResponse<Vec<ResourceGroup>> =
            self.get(&resource_groups_path(subscription_id)).await?;
        Ok(response.data)
    }

    /// Endpoint: GET /api/publish/subscriptions/:id/locations
    pub async fn get_deploy_locations(&self, subscription_id: &str) -> Result<Vec<DeployLocation>> {
        let response: GenericResponse<Vec<DeployLocation>> =
            self.get(&locations_path(subscription_id)).await?;
        Ok(response.data)
    }

    /// Endpoint: GET /api/publish/:projectId/resources?type=:publishKind
    pub async fn get_resource_list(
        &self,
        project_id: &str,
        publish_kind: PublishKind,
    ) -> Result<Vec<ResourceCatalogItem>> {
        let response: GenericResponse<Vec<ResourceCatalogItem>> = self
            .get(&resource_catalog_path(project_id, publish_kind))
            .await?;
        Ok(response.data)
    }

    /// Endpoint: GET /api/publish/preview?hostname=:hostname&type=:publishKind
    pub async fn get_preview(
        &self,
        host_name: &str,
        publish_kind: PublishKind,
    ) -> Result<Vec<ResourcePreview>> {
        let response: GenericResponse<Vec<ResourcePreview>> =
            self.get(&preview_path(host_name, publish_kind)).await?;
        Ok(response.data)
    }

    // =========================================================================
    // Submission API methods
    // =========================================================================

    /// Start a provisioning job
    ///
    /// Endpoint: POST /api/publish/:projectId/provision
    pub async fn start_provision_job(
        &self,
        project_id: &str,
        request: &ProvisionRequest,
    ) -> Result<ProvisionJob> {
        let response: GenericResponse<ProvisionJob> =
            self.post(&provision_path(project_id), request).await?;
        Ok(response.data)
    }

    /// Save an existing publish configuration
    ///
    /// Endpoint: POST /api/publish/:projectId/config
    pub async fn save_config(&self, project_id: &str, config: &serde_json::Value) -> Result<()> {
        self.post_empty(&config_path(project_id), config).await
    }
}

#[async_trait]
impl DirectoryClient for ManagementApiClient {
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        self.get_subscriptions().await
    }

    async fn list_resource_groups(&self, subscription_id: &str) -> Result<Vec<ResourceGroup>> {
        self.get_resource_groups(subscription_id).await
    }

    async fn list_locations(&self, subscription_id: &str) -> Result<Vec<DeployLocation>> {
        self.get_deploy_locations(subscription_id).await
    }

    async fn list_luis_regions(&self) -> Result<Vec<String>> {
        Ok(self.luis_regions.clone())
    }

    async fn list_resource_catalog(
        &self,
        project_id: &str,
        publish_kind: PublishKind,
    ) -> Result<Vec<ResourceCatalogItem>> {
        self.get_resource_list(project_id, publish_kind).await
    }

    async fn preview_names(
        &self,
        host_name: &str,
        publish_kind: PublishKind,
    ) -> Result<Vec<ResourcePreview>> {
        self.get_preview(host_name, publish_kind).await
    }
}

#[async_trait]
impl SubmissionGateway for ManagementApiClient {
    async fn start_provision(
        &self,
        project_id: &str,
        request: &ProvisionRequest,
    ) -> Result<ProvisionJob> {
        self.start_provision_job(project_id, request).await
    }

    async fn save_publish_config(
        &self,
        project_id: &str,
        config: &serde_json::Value,
    ) -> Result<()> {
        self.save_config(project_id, config).await
    }
}

// =============================================================================
// Paths
// =============================================================================

fn subscriptions_path() -> String {
    "/api/publish/subscriptions".to_string()
}

fn resource_groups_path(subscription_id: &str) -> String {
    format!(
        "/api/publish/subscriptions/{}/resourceGroups",
        urlencoding::encode(subscription_id)
    )
}

fn locations_path(subscription_id: &str) -> String {
    format!(
        "/api/publish/subscriptions/{}/locations",
        urlencoding::encode(subscription_id)
    )
}

fn resource_catalog_path(project_id: &str, publish_kind: PublishKind) -> String {
    format!(
        "/api/publish/{}/resources?type={}",
        urlencoding::encode(project_id),
        publish_kind.as_str()
    )
}

fn preview_path(host_name: &str, publish_kind: PublishKind) -> String {
    format!(
        "/api/publish/preview?hostname={}&type={}",
        urlencoding::encode(host_name),
        publish_kind.as_str()
    )
}

fn provision_path(project_id: &str) -> String {
    format!("/api/publish/{}/provision", urlencoding::encode(project_id))
}

fn config_path(project_id: &str) -> String {
    format!("/api/publish/{}/config", urlencoding::encode(project_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction() {
        let client = ManagementApiClient::with_url("https://example.com/").unwrap();
        assert_eq!(client.api_url(), "https://example.com");
    }

    #[test]
    fn test_missing_token_is_unauthorized() {
        let client = ManagementApiClient::with_url("https://example.com").unwrap();
        assert!(matches!(
            client.auth_token(),
            Err(PlatformApiError::Unauthorized)
        ));
    }

    #[test]
    fn test_context_tokens_applied() {
        let context = WizardContext::new("p", PublishKind::AzurePublish)
            .with_tokens(Some("abc".to_string()), Some("graph".to_string()));
        let client = ManagementApiClient::with_url("https://example.com")
            .unwrap()
            .with_context(&context);
        assert_eq!(client.auth_token().unwrap(), "abc");
        assert_eq!(client.graph_token.as_deref(), Some("graph"));
    }

    #[tokio::test]
    async fn test_luis_regions_override() {
        let client = ManagementApiClient::with_url("https://example.com").unwrap();
        assert_eq!(
            client.list_luis_regions().await.unwrap(),
            regions::authoring_region_ids()
        );

        let client = client.with_luis_regions(vec!["westus".to_string()]);
        assert_eq!(client.list_luis_regions().await.unwrap(), vec!["westus"]);

        let client = client.with_luis_regions(Vec::new());
        assert_eq!(client.list_luis_regions().await.unwrap(), vec!["westus"]);
    }

    #[test]
    fn test_paths() {
        assert_eq!(subscriptions_path(), "/api/publish/subscriptions");
        assert_eq!(
            resource_groups_path("sub-1"),
            "/api/publish/subscriptions/sub-1/resourceGroups"
        );
        assert_eq!(
            locations_path("sub-1"),
            "/api/publish/subscriptions/sub-1/locations"
        );
        assert_eq!(
            resource_catalog_path("proj", PublishKind::AzureFunctionsPublish),
            "/api/publish/proj/resources?type=azureFunctionsPublish"
        );
        assert_eq!(provision_path("proj"), "/api/publish/proj/provision");
        assert_eq!(config_path("proj"), "/api/publish/proj/config");
    }

    #[test]
    fn test_preview_path_encodes_host_name() {
        assert_eq!(
            preview_path("my bot&co", PublishKind::AzurePublish),
            "/api/publish/preview?hostname=my%20bot%26co&type=azurePublish"
        );
    }

    #[test]
    fn test_user_agent() {
        assert!(USER_AGENT.starts_with("bot-provision/"));
    }

    #[test]
    fn test_http_error_conversion() {
        let _: fn(reqwest::Error) -> PlatformApiError = PlatformApiError::from;
    }
}
