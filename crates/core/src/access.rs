//! Collaborators consulted for authorization and identity.
//!
//! - [`FolderGuard`] -- may a user edit panels in a given folder?
//! - [`UserDirectory`] -- display name and avatar for a user id.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Answers whether a user may edit library panels located in a folder.
#[async_trait]
pub trait FolderGuard: Send + Sync {
    async fn can_edit(&self, user_id: DbId, org_id: DbId, folder_id: DbId)
        -> Result<bool, CoreError>;
}

/// Display information for a user, resolved at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub avatar_url: String,
}

/// Resolves user ids to display profiles. `None` means the user is unknown.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn resolve(&self, user_id: DbId) -> Result<Option<UserProfile>, CoreError>;
}
