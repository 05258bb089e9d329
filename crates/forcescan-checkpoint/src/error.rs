//! Error types for review channels

use thiserror::Error;

/// Failures of the review channel itself
///
/// These are distinguishable from a human rejection: a rejection is a valid
/// decision, a channel error is a fault. Channel implementations may use
/// this type as their `ReviewChannel::Error`.
#[derive(Error, Debug)]
pub enum ChannelError {
    /// The reviewer did not respond in time
    #[error("review channel timed out")]
    Timeout,

    /// The response could not be understood
    #[error("malformed review response: {0}")]
    Malformed(String),

    /// Transport failure (closed pipe, broken connection)
    #[error("review channel unavailable: {0}")]
    Unavailable(String),
}
