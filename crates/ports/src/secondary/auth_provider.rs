use domain::auth::entity::CallerClaims;
use domain::auth::error::AuthError;

/// Port for token-based caller authentication.
///
/// Synchronous trait — key validation is CPU-bound (hash lookup).
pub trait AuthProvider: Send + Sync {
    fn validate_token(&self, token: &str) -> Result<CallerClaims, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify the trait is object-safe (can be used as `dyn AuthProvider`).
    #[test]
    fn trait_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn AuthProvider) {}
    }
}
