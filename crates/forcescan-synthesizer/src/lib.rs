//! Forcescan Synthesizer
//!
//! Deduplicates and clusters raw findings into distinct identified forces
//! with preserved evidence linkage.
//!
//! # Overview
//!
//! The synthesizer is the core algorithmic component of the pipeline. It
//! takes the concatenated findings from all scan categories and produces an
//! ordered list of named forces, each backed by at least one source
//! reference.
//!
//! # Architecture
//!
//! ```text
//! Findings → Dedup → Clustering (oracle or fallback) → Naming (oracle) → Forces
//! ```
//!
//! # Key Properties
//!
//! - **Evidence is never discarded**: a cluster whose naming call fails is
//!   still emitted, flagged as needing manual synthesis
//! - **Deterministic**: the same finding set and oracle responses always
//!   produce the same forces in the same order
//! - **Stable identifiers**: re-running on an unchanged set with the prior
//!   output as a hint reproduces force ids
//!
//! # Example Usage
//!
//! ```no_run
//! use forcescan_synthesizer::{Synthesizer, SynthesizerConfig};
//! use forcescan_oracle::MockOracle;
//! use forcescan_domain::{PlanInput, ResearchPlan};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let oracle = MockOracle::new(r#"{"name": "Force", "description": "..."}"#);
//! let synthesizer = Synthesizer::new(oracle, SynthesizerConfig::default());
//!
//! let plan = ResearchPlan::from_input(PlanInput {
//!     target_industry: "Energy".to_string(),
//!     ..Default::default()
//! });
//!
//! let outcome = synthesizer.synthesize(Vec::new(), &plan, &[]).await?;
//! println!("{}", outcome.summary);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cluster;
mod config;
mod dedup;
mod error;
mod parser;
mod prompt;
mod synthesizer;


pub use config::SynthesizerConfig;
pub use dedup::dedup_findings;
pub use error::SynthesizerError;
pub use synthesizer::{SynthesisOutcome, Synthesizer};
