//! Single-shot interactive prompt.

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::error::PipelineError;

/// Question shown before reading the breed.
pub const BREED_PROMPT: &str = "Enter a dog breed: ";

/// Prompter bound to the process's stdin/stdout.
pub type StdioPrompter = Prompter<BufReader<io::Stdin>, io::Stdout>;

/// Owns the input stream for exactly one question.
///
/// [`Prompter::ask`] consumes the prompter, so the stream is released after
/// the single read and cannot be reused.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl StdioPrompter {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> Prompter<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Print `question`, then read one line and strip its line ending.
    ///
    /// An empty line is returned as an empty string. End of input before any
    /// byte arrives is an [`PipelineError::Input`] failure.
    pub async fn ask(mut self, question: &str) -> Result<String, PipelineError> {
        self.writer
            .write_all(question.as_bytes())
            .await
            .map_err(|err| PipelineError::Input(err.to_string()))?;
        self.writer
            .flush()
            .await
            .map_err(|err| PipelineError::Input(err.to_string()))?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(|err| PipelineError::Input(err.to_string()))?;
        if read == 0 {
            return Err(PipelineError::Input("end of input".to_string()));
        }
        debug!(bytes = read, "prompt answered");
        Ok(strip_line_ending(line))
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
