//! Forcescan Domain Layer
//!
//! This crate contains the core data contracts for the forcescan research
//! pipeline. It has near-zero external dependencies and defines the evidence
//! model, stage envelope, and trait interfaces that all other layers depend
//! upon.
//!
//! ## Key Concepts
//!
//! - **ResearchPlan**: the validated input to a pipeline run: keywords,
//!   scope, and the sources to scan
//! - **SourceFinding**: one raw extracted text snippet plus source metadata
//! - **IdentifiedForce**: a synthesized, named market trend backed by one or
//!   more findings
//! - **SourceReference**: denormalized evidence pointer embedded in a force
//! - **StageResult**: the uniform envelope every checkpointed stage returns
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure data contracts and business rules only
//! - Infrastructure implementations (scanners, oracles, review channels)
//!   live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod finding;
pub mod force;
pub mod plan;
pub mod stage;
pub mod traits;

// Re-exports for convenience
pub use finding::{SourceCategory, SourceFailure, SourceFinding};
pub use force::{ForceId, IdentifiedForce, ImpactRating, SourceReference};
pub use plan::{PlanInput, ResearchPlan, SourceGroup, ValidationError};
pub use stage::{StageResult, StageStatus};
