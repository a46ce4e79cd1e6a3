//! Platform module for the publish management backend
//!
//! This module provides:
//! - Session state for the selected bot project
//! - API client for directory reads and provisioning submissions

pub mod api;
pub mod session;

pub use session::ProvisionSession;
