//! Forcescan Scanner
//!
//! Fans an approved research plan out to independent scanning workers, one
//! per source category, and joins whatever succeeded.
//!
//! # Overview
//!
//! The coordinator launches one concurrent unit of work per source category
//! in the plan. Each unit takes the plan and the category's external scan
//! function and returns either a list of findings or a recorded failure.
//! One category's failure never aborts the others: the coordinator collects
//! whatever succeeded and returns a combined batch carrying both the
//! findings and the failure records.
//!
//! # Architecture
//!
//! ```text
//! ResearchPlan → Coordinator → [web worker | document worker | ...] → ScanBatch
//! ```
//!
//! Only when every attempted category fails does the coordinator report a
//! stage-level error. No retries happen at this layer; retry policy, if
//! any, belongs to the external scan function.

#![warn(missing_docs)]

mod config;
mod coordinator;
mod error;

pub use config::ScanConfig;
pub use coordinator::{ScanBatch, ScanCoordinator};
pub use error::ScanError;
