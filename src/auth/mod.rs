//! Authentication for the publish management API
//!
//! Tokens are obtained out of band (e.g., from the authoring tool's sign-in)
//! and stored with `prov-ctl auth login`.

pub mod credentials;
