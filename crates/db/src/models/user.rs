//! User row as read by the user directory.

use libpanels_core::access::UserProfile;
use libpanels_core::avatar::avatar_url;
use libpanels_core::types::DbId;
use sqlx::FromRow;

/// The identity columns of a `users` row.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub login: String,
    pub email: String,
    pub name: String,
}

impl UserRow {
    /// Display profile: `name` falling back to `login`, avatar from the
    /// email falling back to the login.
    pub fn profile(&self) -> UserProfile {
        let name = if self.name.trim().is_empty() {
            self.login.clone()
        } else {
            self.name.clone()
        };
        let identity = if self.email.trim().is_empty() {
            &self.login
        } else {
            &self.email
        };
        UserProfile {
            name,
            avatar_url: avatar_url(identity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, email: &str) -> UserRow {
        UserRow {
            id: 1,
            login: "user_in_db".into(),
            email: email.into(),
            name: name.into(),
        }
    }

    #[test]
    fn profile_falls_back_to_login() {
        let profile = row("", "").profile();
        assert_eq!(profile.name, "user_in_db");
        assert_eq!(profile.avatar_url, avatar_url("user_in_db"));
    }

    #[test]
    fn profile_prefers_name_and_email() {
        let profile = row("User In Db", "user@example.com").profile();
        assert_eq!(profile.name, "User In Db");
        assert_eq!(profile.avatar_url, avatar_url("user@example.com"));
    }
}
