use std::io::BufRead;
use std::io::Write;

use anyhow::bail;
use anyhow::Context;
use auth::Authenticator;
use chrono::Duration;

pub const USAGE: &str = "Usage:
  credential-service hash <password|->
  credential-service verify <password|-> <stored-hash>
  credential-service issue <subject> [lifetime-minutes]

Pass - as the password to read it from stdin.";

/// Operator command parsed from the process arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hash {
        password: String,
    },
    Verify {
        password: String,
        stored_hash: String,
    },
    Issue {
        subject: String,
        lifetime: Option<Duration>,
    },
}

/// How a successfully executed command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Mismatch,
}

impl Outcome {
    /// Process exit code. Failures surface as errors and exit with 1.
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Mismatch => 2,
        }
    }
}

impl Command {
    /// Parse arguments, program name excluded.
    ///
    /// # Errors
    /// Unknown command, wrong arity, or a lifetime that is not a whole number
    /// of minutes representable as a duration.
    pub fn parse(args: &[String]) -> Result<Self, anyhow::Error> {
        match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            ["hash", password] => Ok(Command::Hash {
                password: password.to_string(),
            }),
            ["verify", password, stored_hash] => Ok(Command::Verify {
                password: password.to_string(),
                stored_hash: stored_hash.to_string(),
            }),
            ["issue", subject] => Ok(Command::Issue {
                subject: subject.to_string(),
                lifetime: None,
            }),
            ["issue", subject, minutes] => {
                let minutes: i64 = minutes
                    .parse()
                    .with_context(|| format!("Invalid lifetime: {}", minutes))?;
                let lifetime = Duration::try_minutes(minutes)
                    .with_context(|| format!("Lifetime out of range: {} minutes", minutes))?;

                Ok(Command::Issue {
                    subject: subject.to_string(),
                    lifetime: Some(lifetime),
                })
            }
            _ => bail!("Unrecognized arguments"),
        }
    }

    /// Run the command, reading `-` passwords from `input` and printing the
    /// result to `output`.
    ///
    /// # Errors
    /// * Malformed stored hash, hashing or signing failure
    /// * Password requested on stdin but none given
    pub fn execute<R, W>(
        self,
        authenticator: &Authenticator,
        input: &mut R,
        output: &mut W,
    ) -> Result<Outcome, anyhow::Error>
    where
        R: BufRead,
        W: Write,
    {
        match self {
            Command::Hash { password } => {
                let password = read_password(&password, input)?;
                let hash = authenticator.hash_password(&password)?;
                writeln!(output, "{}", hash)?;
                Ok(Outcome::Success)
            }
            Command::Verify {
                password,
                stored_hash,
            } => {
                let password = read_password(&password, input)?;
                if authenticator.verify_password(&password, &stored_hash)? {
                    writeln!(output, "match")?;
                    Ok(Outcome::Success)
                } else {
                    writeln!(output, "mismatch")?;
                    Ok(Outcome::Mismatch)
                }
            }
            Command::Issue { subject, lifetime } => {
                let token = authenticator.issue_token(&subject, lifetime)?;
                writeln!(output, "{}", token)?;
                Ok(Outcome::Success)
            }
        }
    }
}

fn read_password<R: BufRead>(argument: &str, input: &mut R) -> Result<String, anyhow::Error> {
    if argument != "-" {
        return Ok(argument.to_string());
    }

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;

    if line.is_empty() {
        bail!("No password on stdin");
    }

    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}
