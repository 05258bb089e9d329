//! Forcescan Oracle Layer
//!
//! Pluggable implementations of the text-transformation oracle.
//!
//! # Architecture
//!
//! This crate provides implementations of the `TextOracle` trait from
//! `forcescan-domain`. The pipeline treats the oracle as a black box that
//! turns structured prompts into text; it may be slow, unavailable, or
//! return malformed output, so callers validate shape before trusting it.
//!
//! # Providers
//!
//! - `MockOracle`: Deterministic mock for testing
//! - `OllamaOracle`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use forcescan_oracle::MockOracle;
//! use forcescan_domain::traits::TextOracle;
//!
//! let oracle = MockOracle::new("Hello from the oracle!");
//! let result = oracle.generate("test prompt").unwrap();
//! assert_eq!(result, "Hello from the oracle!");
//! ```

#![warn(missing_docs)]

pub mod ollama;

use forcescan_domain::traits::TextOracle as TextOracleTrait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::OllamaOracle;

/// Errors that can occur during oracle operations
#[derive(Error, Debug)]
pub enum OracleError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the oracle
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Oracle error: {0}")]
    Other(String),
}

/// Mock oracle for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Responses can be keyed by prompt, queued in order, or fixed; failures can
/// be scripted to exercise the pipeline's degraded paths.
///
/// # Examples
///
/// ```
/// use forcescan_oracle::MockOracle;
/// use forcescan_domain::traits::TextOracle;
///
/// // Simple fixed response
/// let oracle = MockOracle::new("Fixed response");
/// assert_eq!(oracle.generate("any prompt").unwrap(), "Fixed response");
///
/// // Queued responses, consumed in call order
/// let oracle = MockOracle::new("fallback");
/// oracle.push_response("first");
/// oracle.push_response("second");
/// assert_eq!(oracle.generate("a").unwrap(), "first");
/// assert_eq!(oracle.generate("b").unwrap(), "second");
/// assert_eq!(oracle.generate("c").unwrap(), "fallback");
/// ```
#[derive(Debug, Clone)]
pub struct MockOracle {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    queue: Arc<Mutex<VecDeque<String>>>,
    fail_always: bool,
    call_count: Arc<Mutex<usize>>,
}

impl MockOracle {
    /// Create a new MockOracle with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            fail_always: false,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create an oracle that fails every call (unavailable backend)
    pub fn unavailable() -> Self {
        let mut oracle = Self::new("");
        oracle.fail_always = true;
        oracle
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), response.into());
    }

    /// Queue a response to be consumed by the next unmatched call
    pub fn push_response(&self, response: impl Into<String>) {
        self.queue.lock().unwrap().push_back(response.into());
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&self, prompt: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), "ERROR".to_string());
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl TextOracleTrait for MockOracle {
    type Error = OracleError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        if self.fail_always {
            return Err(OracleError::Communication("oracle unavailable".to_string()));
        }

        // Prompt-keyed responses win over the queue
        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(prompt) {
            if response == "ERROR" {
                return Err(OracleError::Other("Mock error".to_string()));
            }
            return Ok(response.clone());
        }

        if let Some(response) = self.queue.lock().unwrap().pop_front() {
            return Ok(response);
        }

        Ok(self.default_response.clone())
    }
}
