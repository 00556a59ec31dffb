use serde::{Deserialize, Serialize};

/// Identity of an authenticated API caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerClaims {
    /// Stable caller identifier (API key name).
    pub sub: String,
}
