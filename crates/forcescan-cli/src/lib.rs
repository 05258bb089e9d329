//! Forcescan CLI library.
//!
//! Wires the research pipeline to the terminal: argument parsing, file
//! configuration, console review prompts, and the concrete web/document
//! scanners.

pub mod cli;
pub mod config;
pub mod error;
pub mod review;
pub mod scanners;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use review::ConsoleReviewChannel;
