use std::collections::HashMap;
use std::fmt::Write as _;

use domain::auth::entity::CallerClaims;
use domain::auth::error::AuthError;
use ports::secondary::auth_provider::AuthProvider;
use sha2::{Digest, Sha256};

/// Static API key authentication provider.
///
/// Keys are stored as SHA-256 hashes to avoid keeping plaintext secrets in
/// memory after construction.
pub struct ApiKeyAuthProvider {
    /// Map from hex-encoded SHA-256 hash of the key to the caller name.
    keys: HashMap<String, String>,
}

/// Compute the hex-encoded SHA-256 hash of a key.
fn hash_key(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    let mut hex = String::with_capacity(64);
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

impl std::fmt::Debug for ApiKeyAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuthProvider")
            .field("key_count", &self.keys.len())
            .finish_non_exhaustive()
    }
}

impl ApiKeyAuthProvider {
    /// Create a provider from `(name, key)` pairs. Keys are immediately
    /// hashed; the plaintext is not retained.
    pub fn new(entries: Vec<(String, String)>) -> Self {
        let mut keys = HashMap::with_capacity(entries.len());
        for (name, key) in entries {
            keys.insert(hash_key(&key), name);
        }
        Self { keys }
    }
}

impl AuthProvider for ApiKeyAuthProvider {
    fn validate_token(&self, token: &str) -> Result<CallerClaims, AuthError> {
        if token.is_empty() {
            return Err(AuthError::TokenMissing);
        }

        let hashed = hash_key(token);
        let name = self
            .keys
            .get(&hashed)
            .ok_or_else(|| AuthError::TokenInvalid("invalid API key".to_string()))?;

        Ok(CallerClaims { sub: name.clone() })
    }
}
