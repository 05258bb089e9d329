//! The uniform envelope every checkpointed stage returns

use std::fmt;

/// Terminal status of a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    /// Stage output accepted (possibly with reviewer modifications)
    Approved,
    /// Reviewer declined; the run halts, this is not a bug
    Rejected,
    /// The stage itself failed (invalid plan, all sources down, broken
    /// review channel)
    Error,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Status plus stage-specific payload plus a human-readable summary
///
/// Every halt carries enough detail to explain why: status, message, and the
/// partial payload where one exists. A bare failure with no artifact is
/// never returned.
#[derive(Debug, Clone, PartialEq)]
pub struct StageResult<P> {
    /// Terminal status of the stage
    pub status: StageStatus,
    /// Stage-specific payload; present on approval, and on halts where a
    /// partial artifact exists
    pub payload: Option<P>,
    /// Human-readable summary of what the stage produced
    pub summary: String,
    /// Reason for rejection or error
    pub message: Option<String>,
}

impl<P> StageResult<P> {
    /// An approved result carrying the (possibly merged) payload
    pub fn approved(payload: P, summary: impl Into<String>) -> Self {
        Self {
            status: StageStatus::Approved,
            payload: Some(payload),
            summary: summary.into(),
            message: None,
        }
    }

    /// A rejection with the reviewer's stated reason
    pub fn rejected(payload: P, summary: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            status: StageStatus::Rejected,
            payload: Some(payload),
            summary: summary.into(),
            message: Some(reason.into()),
        }
    }

    /// A stage-fatal error, with whatever partial payload exists
    pub fn error(payload: Option<P>, summary: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: StageStatus::Error,
            payload,
            summary: summary.into(),
            message: Some(message.into()),
        }
    }

    /// Whether the stage was approved
    pub fn is_approved(&self) -> bool {
        self.status == StageStatus::Approved
    }

    /// Map the payload type, preserving status and messages
    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> StageResult<Q> {
        StageResult {
            status: self.status,
            payload: self.payload.map(f),
            summary: self.summary,
            message: self.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approved_carries_payload() {
        let result = StageResult::approved(42, "the answer");
        assert!(result.is_approved());
        assert_eq!(result.payload, Some(42));
        assert_eq!(result.message, None);
    }

    #[test]
    fn test_rejected_carries_reason() {
        let result = StageResult::rejected(1, "plan", "scope too broad");
        assert_eq!(result.status, StageStatus::Rejected);
        assert_eq!(result.message.as_deref(), Some("scope too broad"));
        assert!(result.payload.is_some());
    }

    #[test]
    fn test_error_distinguishable_from_rejection() {
        let result: StageResult<()> = StageResult::error(None, "plan", "channel timed out");
        assert_eq!(result.status, StageStatus::Error);
        assert_ne!(result.status, StageStatus::Rejected);
    }

    #[test]
    fn test_map_preserves_status() {
        let result = StageResult::approved(2, "n").map(|n| n * 2);
        assert_eq!(result.payload, Some(4));
        assert!(result.is_approved());
    }
}
