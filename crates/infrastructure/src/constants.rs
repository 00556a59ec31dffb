use std::time::Duration;

// ── Defaults ───────────────────────────────────────────────────────

pub const DEFAULT_CONFIG_PATH: &str = "/etc/alertdispatch/config.yaml";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_STORE_PATH: &str = "/var/lib/alertdispatch/alerts.redb";

/// Twilio-compatible messaging API base.
pub const DEFAULT_SMS_API_URL: &str = "https://api.twilio.com/2010-04-01";

// ── Channel capacities ─────────────────────────────────────────────

pub const ALERT_CHANNEL_CAPACITY: usize = 1_000;

// ── Timeouts ───────────────────────────────────────────────────────

pub const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-request timeout for the provider messaging API.
pub const SMS_API_TIMEOUT: Duration = Duration::from_secs(15);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_capacity_is_positive() {
        assert!(ALERT_CHANNEL_CAPACITY > 0);
    }

    #[test]
    fn shutdown_timeout_is_reasonable() {
        assert!(GRACEFUL_SHUTDOWN_TIMEOUT.as_secs() >= 1);
        assert!(GRACEFUL_SHUTDOWN_TIMEOUT.as_secs() <= 30);
    }

    #[test]
    fn sms_api_url_has_no_trailing_slash() {
        assert!(!DEFAULT_SMS_API_URL.ends_with('/'));
    }
}
