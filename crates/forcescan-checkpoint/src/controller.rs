//! Generic checkpoint state machine

use forcescan_domain::traits::{ReviewChannel, ReviewDecision};
use forcescan_domain::{StageResult, StageStatus};
use tracing::{info, warn};

/// Observable state of a checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointState {
    /// Not yet presented to the reviewer
    Pending,
    /// Resolved: approved (terminal)
    Approved,
    /// Resolved: rejected (terminal)
    Rejected,
    /// Resolved: the channel failed (terminal)
    Error,
}

/// A checkpoint gating one stage boundary
///
/// One value per pause point per run; terminal results are cached so a
/// repeated approval signal is a no-op.
pub struct Checkpoint<P: Clone> {
    name: String,
    cached: Option<StageResult<P>>,
}

impl<P: Clone> Checkpoint<P> {
    /// Create a pending checkpoint with a diagnostic name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cached: None,
        }
    }

    /// Current state of the checkpoint
    pub fn state(&self) -> CheckpointState {
        match &self.cached {
            None => CheckpointState::Pending,
            Some(result) => match result.status {
                StageStatus::Approved => CheckpointState::Approved,
                StageStatus::Rejected => CheckpointState::Rejected,
                StageStatus::Error => CheckpointState::Error,
            },
        }
    }

    /// Present the payload to the reviewer and resolve the checkpoint
    ///
    /// The summary renderer turns the payload into the artifact shown to the
    /// reviewer (markdown or equivalent). The original payload is never
    /// mutated; an approval with modifications carries the channel's revised
    /// payload, a new artifact.
    ///
    /// Idempotent: once resolved, further calls return the cached result and
    /// the channel is not invoked again.
    pub fn resolve<C, F>(&mut self, payload: P, render: F, channel: &C) -> StageResult<P>
    where
        C: ReviewChannel<P>,
        C::Error: std::fmt::Display,
        F: Fn(&P) -> String,
    {
        if let Some(cached) = &self.cached {
            info!("Checkpoint '{}' already resolved, returning cached result", self.name);
            return cached.clone();
        }

        let summary = render(&payload);
        info!("Checkpoint '{}': presenting summary to reviewer", self.name);

        let result = match channel.review(&payload, &summary) {
            Ok(ReviewDecision::Approve) => StageResult::approved(payload, summary),
            Ok(ReviewDecision::ApproveWith(revised)) => {
                info!("Checkpoint '{}': approved with modifications", self.name);
                StageResult::approved(revised, summary)
            }
            Ok(ReviewDecision::Reject(reason)) => {
                info!("Checkpoint '{}': rejected ({})", self.name, reason);
                StageResult::rejected(payload, summary, reason)
            }
            Err(e) => {
                warn!("Checkpoint '{}': review channel failed: {}", self.name, e);
                StageResult::error(
                    Some(payload),
                    summary,
                    format!("review channel error: {}", e),
                )
            }
        };

        self.cached = Some(result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChannelError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedChannel {
        decision: fn(&String) -> Result<ReviewDecision<String>, ChannelError>,
        calls: AtomicUsize,
    }

    impl ScriptedChannel {
        fn new(decision: fn(&String) -> Result<ReviewDecision<String>, ChannelError>) -> Self {
            Self {
                decision,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ReviewChannel<String> for ScriptedChannel {
        type Error = ChannelError;

        fn review(
            &self,
            payload: &String,
            _summary: &str,
        ) -> Result<ReviewDecision<String>, Self::Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.decision)(payload)
        }
    }

    #[test]
    fn test_approve_as_is() {
        let channel = ScriptedChannel::new(|_| Ok(ReviewDecision::Approve));
        let mut checkpoint = Checkpoint::new("plan-review");

        let result = checkpoint.resolve("payload".to_string(), |p| format!("## {}", p), &channel);

        assert!(result.is_approved());
        assert_eq!(result.payload.as_deref(), Some("payload"));
        assert_eq!(result.summary, "## payload");
        assert_eq!(checkpoint.state(), CheckpointState::Approved);
    }

    #[test]
    fn test_approve_with_modifications_is_new_artifact() {
        let channel =
            ScriptedChannel::new(|p| Ok(ReviewDecision::ApproveWith(format!("{} (revised)", p))));
        let mut checkpoint = Checkpoint::new("plan-review");

        let original = "payload".to_string();
        let result = checkpoint.resolve(original.clone(), |p| p.clone(), &channel);

        assert_eq!(result.payload.as_deref(), Some("payload (revised)"));
        assert_eq!(original, "payload");
    }

    #[test]
    fn test_reject_carries_reason_and_payload() {
        let channel =
            ScriptedChannel::new(|_| Ok(ReviewDecision::Reject("scope too broad".to_string())));
        let mut checkpoint = Checkpoint::new("plan-review");

        let result = checkpoint.resolve("payload".to_string(), |p| p.clone(), &channel);

        assert_eq!(result.status, StageStatus::Rejected);
        assert_eq!(result.message.as_deref(), Some("scope too broad"));
        assert!(result.payload.is_some());
        assert_eq!(checkpoint.state(), CheckpointState::Rejected);
    }

    #[test]
    fn test_channel_error_distinguishable_from_rejection() {
        let channel = ScriptedChannel::new(|_| Err(ChannelError::Timeout));
        let mut checkpoint = Checkpoint::new("plan-review");

        let result = checkpoint.resolve("payload".to_string(), |p| p.clone(), &channel);

        assert_eq!(result.status, StageStatus::Error);
        assert_eq!(checkpoint.state(), CheckpointState::Error);
        assert!(result.message.unwrap().contains("timed out"));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let channel = ScriptedChannel::new(|_| Ok(ReviewDecision::Approve));
        let mut checkpoint = Checkpoint::new("plan-review");

        let first = checkpoint.resolve("payload".to_string(), |p| p.clone(), &channel);
        let second = checkpoint.resolve("other".to_string(), |p| p.clone(), &channel);

        // Identical result, channel invoked exactly once
        assert_eq!(first, second);
        assert_eq!(channel.calls(), 1);
    }

    #[test]
    fn test_rejected_checkpoint_stays_rejected() {
        let channel = ScriptedChannel::new(|_| Ok(ReviewDecision::Reject("no".to_string())));
        let mut checkpoint = Checkpoint::new("plan-review");

        checkpoint.resolve("payload".to_string(), |p| p.clone(), &channel);
        let again = checkpoint.resolve("payload".to_string(), |p| p.clone(), &channel);

        assert_eq!(again.status, StageStatus::Rejected);
        assert_eq!(channel.calls(), 1);
    }

    #[test]
    fn test_pending_before_resolve() {
        let checkpoint: Checkpoint<String> = Checkpoint::new("plan-review");
        assert_eq!(checkpoint.state(), CheckpointState::Pending);
    }
}
