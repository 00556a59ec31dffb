use serde::{Deserialize, Serialize};

/// Provider-assigned identifier for an accepted outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessageId(pub String);

impl std::fmt::Display for ProviderMessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single outbound SMS handed to the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundSms {
    pub from: String,
    pub to: String,
    pub body: String,
}

/// Outcome of one recipient's dispatch attempt.
///
/// `provider_id` is present iff `success`; `error_detail` is present iff
/// `!success`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryResult {
    pub recipient: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl DeliveryResult {
    pub fn delivered(recipient: impl Into<String>, provider_id: ProviderMessageId) -> Self {
        Self {
            recipient: recipient.into(),
            success: true,
            provider_id: Some(provider_id.0),
            error_detail: None,
        }
    }

    pub fn failed(recipient: impl Into<String>, error_detail: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            success: false,
            provider_id: None,
            error_detail: Some(error_detail.into()),
        }
    }
}

/// Request to create a new alert record. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlert {
    pub message: String,
    pub recipients: Vec<String>,
}

impl NewAlert {
    /// Validate intake input: non-empty message, every recipient non-empty.
    /// Duplicate recipients are allowed — each is dispatched independently.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.message.trim().is_empty() {
            return Err("alert message must not be empty");
        }
        if self.recipients.iter().any(|r| r.trim().is_empty()) {
            return Err("recipient addresses must not be empty");
        }
        Ok(())
    }
}

/// Persisted emergency-alert record.
///
/// Created unsent by the intake path, mutated exactly once by the
/// dispatcher's commit, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: String,
    pub message: String,
    /// Ordered destination addresses. Duplicates permitted.
    pub recipients: Vec<String>,
    /// True once the record has been processed. "Sent" means processed,
    /// not delivered: an all-failed batch still flips this flag.
    #[serde(default)]
    pub sent: bool,
    /// Set by the dispatcher's claim before any transport call. Guards
    /// against duplicate creation-event delivery racing the commit.
    #[serde(default)]
    pub claimed: bool,
    /// Store-assigned, set at the moment `sent` flips true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_timestamp_ms: Option<u64>,
    /// One entry per recipient, same order as `recipients`. Written once.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delivery_results: Vec<DeliveryResult>,
}

impl AlertRecord {
    /// Build an unsent record from validated intake input.
    pub fn new(id: impl Into<String>, alert: NewAlert) -> Self {
        Self {
            id: id.into(),
            message: alert.message,
            recipients: alert.recipients,
            sent: false,
            claimed: false,
            sent_timestamp_ms: None,
            delivery_results: Vec::new(),
        }
    }
}

/// Why a dispatch invocation did nothing. A skip is a distinct negative
/// outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyProcessed,
    NoRecipients,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyProcessed => write!(f, "alert already sent"),
            Self::NoRecipients => write!(f, "no recipients"),
        }
    }
}

/// Reported outcome of one dispatch invocation.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// All sends resolved and the commit succeeded. Individual results may
    /// still be failures.
    Completed { results: Vec<DeliveryResult> },
    /// Precondition unmet or claim lost — zero transport calls were made.
    Skipped { reason: SkipReason },
    /// The store commit (or claim) itself failed. The record remains
    /// unsent; replay is a manual operator action.
    Failed { error: String },
}

/// Result of the store's conditional claim.
#[derive(Debug, Clone)]
pub enum ClaimOutcome {
    /// The claim won; the returned record is the authoritative copy.
    Claimed(AlertRecord),
    /// Another invocation already claimed or processed the record.
    AlreadyTaken,
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_alert(message: &str, recipients: &[&str]) -> NewAlert {
        NewAlert {
            message: message.to_string(),
            recipients: recipients.iter().map(|r| (*r).to_string()).collect(),
        }
    }

    #[test]
    fn valid_alert_passes_validation() {
        assert!(new_alert("Accident detected", &["+15550001"]).validate().is_ok());
    }

    #[test]
    fn empty_message_rejected() {
        assert!(new_alert("  ", &["+15550001"]).validate().is_err());
    }

    #[test]
    fn empty_recipient_rejected() {
        assert!(new_alert("help", &["+15550001", ""]).validate().is_err());
    }

    #[test]
    fn empty_recipient_list_is_valid_intake() {
        // Intake accepts an empty list; the dispatcher skips it.
        assert!(new_alert("help", &[]).validate().is_ok());
    }

    #[test]
    fn duplicate_recipients_allowed() {
        assert!(
            new_alert("help", &["+15550001", "+15550001"])
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn new_record_is_unsent_and_unclaimed() {
        let record = AlertRecord::new("r1", new_alert("help", &["+15550001"]));
        assert!(!record.sent);
        assert!(!record.claimed);
        assert!(record.sent_timestamp_ms.is_none());
        assert!(record.delivery_results.is_empty());
    }

    #[test]
    fn delivered_result_carries_provider_id_only() {
        let r = DeliveryResult::delivered("+15550001", ProviderMessageId("SM1".to_string()));
        assert!(r.success);
        assert_eq!(r.provider_id.as_deref(), Some("SM1"));
        assert!(r.error_detail.is_none());
    }

    #[test]
    fn failed_result_carries_error_only() {
        let r = DeliveryResult::failed("+15550002", "number unreachable");
        assert!(!r.success);
        assert!(r.provider_id.is_none());
        assert_eq!(r.error_detail.as_deref(), Some("number unreachable"));
    }

    #[test]
    fn record_roundtrips_through_json() {
        let mut record = AlertRecord::new(
            "1000-1",
            new_alert("Accident detected at Lat/Lng", &["+15550001", "+15550002"]),
        );
        record.sent = true;
        record.sent_timestamp_ms = Some(1_700_000_000_000);
        record.delivery_results = vec![
            DeliveryResult::delivered("+15550001", ProviderMessageId("SM1".to_string())),
            DeliveryResult::failed("+15550002", "carrier error"),
        ];

        let json = serde_json::to_string(&record).unwrap();
        let back: AlertRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "1000-1");
        assert!(back.sent);
        assert_eq!(back.delivery_results.len(), 2);
        assert_eq!(back.delivery_results[0].provider_id.as_deref(), Some("SM1"));
        assert_eq!(
            back.delivery_results[1].error_detail.as_deref(),
            Some("carrier error")
        );
    }

    #[test]
    fn legacy_record_without_flags_deserializes_unsent() {
        // Records written before the claim flag existed default to unsent.
        let json = r#"{"id":"a","message":"m","recipients":["+15550001"]}"#;
        let record: AlertRecord = serde_json::from_str(json).unwrap();
        assert!(!record.sent);
        assert!(!record.claimed);
    }

    #[test]
    fn skip_reason_display() {
        assert_eq!(SkipReason::AlreadyProcessed.to_string(), "alert already sent");
        assert_eq!(SkipReason::NoRecipients.to_string(), "no recipients");
    }
}
