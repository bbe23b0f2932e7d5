//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the acting user and org from a JWT Bearer token.

pub mod auth;
