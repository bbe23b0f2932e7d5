//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` (or an open transaction) as the first argument.

pub mod folder_permission_repo;
pub mod library_panel_repo;
pub mod panel_connection_repo;
pub mod user_repo;

pub use folder_permission_repo::FolderPermissionRepo;
pub use library_panel_repo::LibraryPanelRepo;
pub use panel_connection_repo::PanelConnectionRepo;
pub use user_repo::UserRepo;
