//! API authentication configuration.

use serde::{Deserialize, Serialize};

use super::common::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Static API keys. At least one is required: every API route, the
    /// single-shot send included, rejects unauthenticated callers.
    #[serde(default)]
    pub api_keys: Vec<ApiKeyConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiKeyConfig {
    pub name: String,
    pub key: String,
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_keys.is_empty() {
            return Err(ConfigError::Validation {
                field: "auth.api_keys".to_string(),
                message: "at least one API key is required".to_string(),
            });
        }
        for (idx, entry) in self.api_keys.iter().enumerate() {
            if entry.name.is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("auth.api_keys[{idx}].name"),
                    message: "key name must not be empty".to_string(),
                });
            }
            if entry.key.len() < 8 {
                return Err(ConfigError::Validation {
                    field: format!("auth.api_keys[{idx}].key"),
                    message: "key must be at least 8 characters".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_list_rejected() {
        let err = AuthConfig::default().validate().unwrap_err();
        assert!(err.to_string().contains("api_keys"));
    }

    #[test]
    fn short_key_rejected() {
        let config = AuthConfig {
            api_keys: vec![ApiKeyConfig {
                name: "ops".to_string(),
                key: "short".to_string(),
            }],
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("8 characters"));
    }

    #[test]
    fn valid_key_accepted() {
        let config = AuthConfig {
            api_keys: vec![ApiKeyConfig {
                name: "ops".to_string(),
                key: "long-enough-key".to_string(),
            }],
        };
        assert!(config.validate().is_ok());
    }
}
