//! Forcescan Checkpoint Controller
//!
//! Generic human-review pause/resume/reject protocol, reused at two points
//! in the pipeline (after configuration and after preliminary synthesis).
//!
//! # State machine
//!
//! ```text
//! Pending → Approved   (reviewer accepts, possibly with modifications)
//!         → Rejected   (reviewer declines with a reason; run halts)
//!         → Error      (the review channel itself fails)
//! ```
//!
//! The controller is agnostic to what stage it gates: it operates purely on
//! (payload, summary-renderer, review-channel) triples. It never mutates the
//! original payload in place; a "merged" payload is a new immutable
//! artifact supplied by the channel.
//!
//! Completion is idempotent: a repeated resolve call for an already-resolved
//! checkpoint is a no-op returning the cached result, without re-invoking
//! the review channel.

#![warn(missing_docs)]

mod controller;
mod error;

pub use controller::{Checkpoint, CheckpointState};
pub use error::ChannelError;
