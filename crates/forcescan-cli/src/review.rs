//! Console review channel for the two pipeline checkpoints.

use forcescan_checkpoint::ChannelError;
use forcescan_domain::traits::{ReviewChannel, ReviewDecision};
use forcescan_domain::{IdentifiedForce, ResearchPlan};
use std::io::{self, BufRead, Write};

/// Presents checkpoint summaries on stdout and reads decisions from stdin.
///
/// An empty line approves. `reject: <reason>` rejects. At the plan review,
/// `keywords: a, b` approves with a revised keyword list; at the force
/// review, `drop: <name>` approves with the named force removed.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReviewChannel {
    /// Approve everything without prompting (`--yes`)
    pub auto_approve: bool,
}

impl ConsoleReviewChannel {
    /// Create a channel; `auto_approve` skips the prompt entirely.
    pub fn new(auto_approve: bool) -> Self {
        Self { auto_approve }
    }

    fn prompt(&self, summary: &str, hint: &str) -> Result<String, ChannelError> {
        let mut stdout = io::stdout();
        writeln!(stdout, "\n{}", summary)
            .and_then(|_| writeln!(stdout, "{}", hint))
            .and_then(|_| write!(stdout, "> "))
            .and_then(|_| stdout.flush())
            .map_err(|e| ChannelError::Unavailable(e.to_string()))?;

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| ChannelError::Unavailable(e.to_string()))?;
        Ok(line)
    }
}

/// A parsed console command, independent of the payload type.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Approve,
    Reject(String),
    Keywords(Vec<String>),
    Drop(String),
}

fn parse_command(line: &str) -> Result<Command, ChannelError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Approve);
    }
    if let Some(reason) = line.strip_prefix("reject:") {
        return Ok(Command::Reject(reason.trim().to_string()));
    }
    if let Some(list) = line.strip_prefix("keywords:") {
        let keywords: Vec<String> = list
            .split(',')
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(ChannelError::Malformed(
                "keywords revision names no keywords".to_string(),
            ));
        }
        return Ok(Command::Keywords(keywords));
    }
    if let Some(name) = line.strip_prefix("drop:") {
        return Ok(Command::Drop(name.trim().to_string()));
    }
    Err(ChannelError::Malformed(format!(
        "unrecognized review command: '{}'",
        line
    )))
}

impl ReviewChannel<ResearchPlan> for ConsoleReviewChannel {
    type Error = ChannelError;

    fn review(
        &self,
        payload: &ResearchPlan,
        summary: &str,
    ) -> Result<ReviewDecision<ResearchPlan>, Self::Error> {
        if self.auto_approve {
            return Ok(ReviewDecision::Approve);
        }

        let line = self.prompt(
            summary,
            "[Enter] approve | keywords: a, b | reject: <reason>",
        )?;

        match parse_command(&line)? {
            Command::Approve => Ok(ReviewDecision::Approve),
            Command::Reject(reason) => Ok(ReviewDecision::Reject(reason)),
            Command::Keywords(keywords) => {
                Ok(ReviewDecision::ApproveWith(payload.with_keywords(keywords)))
            }
            Command::Drop(_) => Err(ChannelError::Malformed(
                "'drop:' applies to the force review, not the plan".to_string(),
            )),
        }
    }
}

impl ReviewChannel<Vec<IdentifiedForce>> for ConsoleReviewChannel {
    type Error = ChannelError;

    fn review(
        &self,
        payload: &Vec<IdentifiedForce>,
        summary: &str,
    ) -> Result<ReviewDecision<Vec<IdentifiedForce>>, Self::Error> {
        if self.auto_approve {
            return Ok(ReviewDecision::Approve);
        }

        let line = self.prompt(summary, "[Enter] approve | drop: <name> | reject: <reason>")?;

        match parse_command(&line)? {
            Command::Approve => Ok(ReviewDecision::Approve),
            Command::Reject(reason) => Ok(ReviewDecision::Reject(reason)),
            Command::Drop(name) => {
                let revised: Vec<IdentifiedForce> = payload
                    .iter()
                    .filter(|f| !f.name.eq_ignore_ascii_case(&name))
                    .cloned()
                    .collect();
                if revised.len() == payload.len() {
                    return Err(ChannelError::Malformed(format!(
                        "no force named '{}'",
                        name
                    )));
                }
                Ok(ReviewDecision::ApproveWith(revised))
            }
            Command::Keywords(_) => Err(ChannelError::Malformed(
                "'keywords:' applies to the plan review, not the forces".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_approves() {
        assert_eq!(parse_command("  \n").unwrap(), Command::Approve);
    }

    #[test]
    fn test_reject_with_reason() {
        assert_eq!(
            parse_command("reject: wrong industry").unwrap(),
            Command::Reject("wrong industry".to_string())
        );
    }

    #[test]
    fn test_keywords_revision() {
        assert_eq!(
            parse_command("keywords: Trends, Signals").unwrap(),
            Command::Keywords(vec!["Trends".to_string(), "Signals".to_string()])
        );
    }

    #[test]
    fn test_empty_keywords_malformed() {
        assert!(parse_command("keywords: , ,").is_err());
    }

    #[test]
    fn test_unknown_command_malformed() {
        assert!(parse_command("approve please").is_err());
    }
}
