//! # Credential Hashing
//!
//! Salted, iterated password digest for the local credential store, plus the
//! injectable bootstrap admin seed.
//!
//! ## Security posture
//!
//! The salt is a static compiled-in value and every password shares it. That
//! is acceptable ONLY because this is a single-user tool with a local
//! database: there is no multi-user hash table to rainbow-attack, and the
//! deterministic digest is what makes verification a plain string compare.
//! Anything network-facing must not reuse this module.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

/// Static salt shared by every stored hash.
const SALT: &[u8] = b"stockbook-local-credential-salt";

/// PBKDF2 iteration count.
const ITERATIONS: u32 = 100_000;

/// Derived key length in bytes (SHA-256 output size).
const KEY_LEN: usize = 32;

/// Hashes a password with PBKDF2-HMAC-SHA256 and hex-encodes the digest.
///
/// Deterministic: the same password always produces the same hash, so
/// [`verify_password`] is a direct comparison against the stored value.
pub fn hash_password(password: &str) -> String {
    let mut derived = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), SALT, ITERATIONS, &mut derived);
    hex::encode(derived)
}

/// Checks a password attempt against a stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}

// =============================================================================
// Bootstrap Admin Seed
// =============================================================================

/// The account created on first run when the credential store is empty.
///
/// The default is the publicly known `admin` / `admin123` pair - a
/// deliberate, documented first-run convenience so the operator can log in
/// before any account exists, NOT a security feature. It is injected through
/// `DbConfig` rather than baked into the store so deployments can replace or
/// disable it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
}

impl AdminSeed {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        AdminSeed {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for AdminSeed {
    /// The documented insecure default: `admin` / `admin123`.
    fn default() -> Self {
        AdminSeed::new("admin", "admin123")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash_password("admin123"), hash_password("admin123"));
        assert_ne!(hash_password("admin123"), hash_password("admin124"));
    }

    #[test]
    fn hash_is_hex_of_key_len() {
        let hash = hash_password("secret");
        assert_eq!(hash.len(), KEY_LEN * 2);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn verify_accepts_only_the_right_password() {
        let stored = hash_password("hunter2");
        assert!(verify_password("hunter2", &stored));
        assert!(!verify_password("hunter3", &stored));
        assert!(!verify_password("", &stored));
    }

    #[test]
    fn default_seed_is_the_documented_pair() {
        let seed = AdminSeed::default();
        assert_eq!(seed.username, "admin");
        assert_eq!(seed.password, "admin123");
    }
}
