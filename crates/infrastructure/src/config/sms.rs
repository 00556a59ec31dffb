//! SMS transport configuration and validation.

use serde::{Deserialize, Serialize};

use super::common::ConfigError;
use crate::constants::DEFAULT_SMS_API_URL;

/// Which transport adapter to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Provider REST API (Twilio-compatible).
    Http,
    /// Log-only transport for development; no messages leave the process.
    Log,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmsConfig {
    pub provider: SmsProvider,

    /// Configured sender address, the `from` of every outbound message.
    pub from_number: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub account_sid: Option<String>,

    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_SMS_API_URL.to_string()
}

impl SmsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.from_number.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "sms.from_number".to_string(),
                message: "sender address must not be empty".to_string(),
            });
        }

        if self.provider == SmsProvider::Http {
            if self.account_sid.as_deref().unwrap_or("").is_empty() {
                return Err(ConfigError::Validation {
                    field: "sms.account_sid".to_string(),
                    message: "http provider requires an account_sid".to_string(),
                });
            }
            if self.auth_token.as_deref().unwrap_or("").is_empty() {
                return Err(ConfigError::Validation {
                    field: "sms.auth_token".to_string(),
                    message: "http provider requires an auth_token".to_string(),
                });
            }
            if self.api_url.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: "sms.api_url".to_string(),
                    message: "http provider requires an api_url".to_string(),
                });
            }
        }

        Ok(())
    }
}
