//! The single failure type shared by every pipeline stage.

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

use crate::exit_codes;

/// Message reported for any non-200 response, whatever its status or body.
pub const REMOTE_FAILURE_MESSAGE: &str = "Failed to retrieve image";

/// Failure raised by one of the four pipeline stages.
///
/// `Display` is the one-line, human-readable message printed by the binary.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("could not read input: {0}")]
    Input(String),

    /// Transport failure; carries the transport's own message.
    #[error("{0}")]
    Network(String),

    #[error("{}", REMOTE_FAILURE_MESSAGE)]
    RemoteFailure { status: u16 },

    /// Body was not JSON; carries the parser's message.
    #[error("{0}")]
    Parse(String),

    #[error("response has no \"message\" string field")]
    MissingField,

    #[error("Could not write file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Build a `Network` failure from a transport error and its causes.
    pub fn network(err: &reqwest::Error) -> Self {
        Self::Network(error_chain(err))
    }

    pub fn parse(err: &serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }

    /// Stable process exit code for this failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Input(_) => exit_codes::INPUT,
            Self::Network(_) => exit_codes::NETWORK,
            Self::RemoteFailure { .. } => exit_codes::REMOTE_FAILURE,
            Self::Parse(_) => exit_codes::PARSE,
            Self::MissingField => exit_codes::MISSING_FIELD,
            Self::Write { .. } => exit_codes::WRITE,
        }
    }
}

/// Join an error with its source chain: `outer: cause: root`.
///
/// reqwest hides the interesting part (DNS, refused, TLS) in the sources.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
