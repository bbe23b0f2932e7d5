//! Domain core for reusable library panels.
//!
//! Holds the panel model, the patch merge engine, the collaborator traits
//! (store, connection tracker, folder guard, user directory) and the
//! [`service::LibraryPanelService`] that orchestrates them. Nothing in this
//! crate talks to a database directly; see `libpanels-db` for PostgreSQL.

pub mod access;
pub mod assemble;
pub mod avatar;
pub mod connection;
pub mod error;
pub mod library_panel;
pub mod memory;
pub mod patch;
pub mod service;
pub mod store;
pub mod types;
