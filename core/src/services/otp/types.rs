//! Types for passcode lifecycle results

use chrono::{DateTime, Utc};

use crate::errors::{DomainError, DomainResult};

/// Outcome of handing the current code to the notifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// Provider accepted the message
    Sent { message_id: String },
    /// Provider failed; the committed token is left intact
    Failed { reason: String },
}

/// Result of an issue or resend request
#[derive(Debug, Clone)]
pub struct IssueOutcome {
    /// When the current code expires
    pub expires_at: DateTime<Utc>,
    /// Whether an unexpired code was re-sent instead of a new one issued
    pub reused: bool,
    /// Result of the single delivery attempt
    pub delivery: DeliveryStatus,
}

impl IssueOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self.delivery, DeliveryStatus::Sent { .. })
    }

    /// Seconds until the current code expires, zero once past
    pub fn expires_in_seconds(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }

    /// Turn a failed delivery into `DomainError::Delivery`
    pub fn ensure_delivered(self) -> DomainResult<Self> {
        match &self.delivery {
            DeliveryStatus::Sent { .. } => Ok(self),
            DeliveryStatus::Failed { reason } => Err(DomainError::Delivery {
                message: reason.clone(),
            }),
        }
    }
}
