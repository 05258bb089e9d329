//! Forcescan Pipeline
//!
//! Sequences the research pipeline and packages its output:
//!
//! ```text
//! Configuration → [Checkpoint 1] → Scan → Synthesis → [Checkpoint 2] → Packaging
//! ```
//!
//! # Overview
//!
//! The orchestrator is pure control flow over [`StageResult`] envelopes: a
//! `rejected` or `error` at any checkpoint halts the run and returns the
//! last envelope to the caller; an `approved` passes the merged payload as
//! the exact input of the next stage. The orchestrator is stateless between
//! runs: a run is fully defined by the artifacts produced so far, and each
//! stage is a public method so a host can re-enter from any stored payload.
//!
//! [`StageResult`]: forcescan_domain::StageResult

#![warn(missing_docs)]

mod channel;
mod config;
mod error;
mod packaging;
mod pipeline;
mod render;

pub use channel::AutoApproveChannel;
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use packaging::MarketForceReport;
pub use pipeline::{Pipeline, RunOutcome};
pub use render::{render_forces_markdown, render_plan_markdown};
