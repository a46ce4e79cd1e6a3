// Handler modules
pub mod auth;
pub mod import;
pub mod plan;
pub mod project;
pub mod provision;
pub mod regions;
pub mod utils;

// Re-export all handler functions
pub use auth::handle_auth;
pub use import::{handle_import, import_text};
pub use plan::{handle_plan, preview_plan};
pub use project::handle_project;
pub use provision::{handle_provision, run_unattended, ProvisionArgs, UnattendedOptions};
pub use regions::handle_regions;
pub use utils::{build_client, build_context};
