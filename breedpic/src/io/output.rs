//! Output artifact: the extracted image URL written to disk.

use std::path::Path;

use tokio::fs;
use tracing::{debug, instrument};

use crate::error::PipelineError;

/// Output file used when no path is configured.
pub const DEFAULT_OUTPUT_PATH: &str = "img.txt";

/// Create or truncate `path` and write `contents` as raw bytes.
///
/// No trailing newline or framing is added. The write is not atomic: a crash
/// mid-write can leave a partial file.
#[instrument(skip(contents), fields(path = %path.display(), bytes = contents.len()))]
pub async fn write_output(path: &Path, contents: &str) -> Result<(), PipelineError> {
    fs::write(path, contents.as_bytes())
        .await
        .map_err(|source| PipelineError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("output written");
    Ok(())
}
