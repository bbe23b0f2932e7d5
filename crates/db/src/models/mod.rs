//! Row structs.
//!
//! Each submodule contains a `FromRow` struct matching a database row and a
//! conversion into the corresponding `libpanels_core` domain type.

pub mod library_panel;
pub mod panel_connection;
pub mod user;
