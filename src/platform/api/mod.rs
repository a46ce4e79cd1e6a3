//! Management API client module
//!
//! Provides authenticated access to the publish management API: the
//! directory reads the wizard needs and the provisioning/import calls that
//! finish it.
//!
//! # Example
//!
//! ```rust,ignore
//! use bot_provision::platform::api::ManagementApiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ManagementApiClient::with_url("http://localhost:5000")?;
//!
//!     for sub in client.get_subscriptions().await? {
//!         println!("Subscription: {}", sub.display_name);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use client::ManagementApiClient;
pub use error::{PlatformApiError, Result};
pub use types::{
    CurrentUser, DeployLocation, ProvisionJob, ProvisionRequest, PublishKind,
    ResourceCatalogItem, ResourceGroup, ResourcePreview, ResourceSelection, Subscription,
};
