//! Deterministic avatar URLs derived from a user's identity string.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
const AVATAR_HASH_LEN: usize = 32;

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Build the avatar URL for an identity (email, falling back to login).
///
/// The identity is trimmed and lowercased first, so `Foo@Example.com ` and
/// `foo@example.com` share an avatar.
pub fn avatar_url(identity: &str) -> String {
    let normalized = identity.trim().to_lowercase();
    let digest = sha256_hex(normalized.as_bytes());
    format!("/avatar/{}", &digest[..AVATAR_HASH_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_produces_known_hash() {
        let hash = sha256_hex(b"");
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn avatar_is_normalized_and_stable() {
        let a = avatar_url("User@Example.com ");
        let b = avatar_url("user@example.com");
        assert_eq!(a, b);
        assert!(a.starts_with("/avatar/"));
        assert_eq!(a.len(), "/avatar/".len() + 32);
    }

    #[test]
    fn different_users_get_different_avatars() {
        assert_ne!(avatar_url("user_in_db"), avatar_url("signed_in_user"));
    }
}
