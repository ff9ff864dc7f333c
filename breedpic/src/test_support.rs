//! Test-only helpers: a mocked breed API and a scratch output directory.

use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::io::output::DEFAULT_OUTPUT_PATH;
use crate::pipeline::PipelineRequest;

/// Start a mock API answering `GET /breed/<breed>/images/random` with `response`.
///
/// Any other path gets wiremock's default 404.
pub async fn mock_breed_api(breed: &str, response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/breed/{breed}/images/random")))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

/// JSON response with the given status.
pub fn json_response(status: u16, body: &Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json")
}

/// Raw text response with the given status.
pub fn text_response(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_string(body)
}

/// Base URL of a local port with nothing listening on it.
pub fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// Temporary directory holding the run's output file.
pub struct OutputDir {
    dir: TempDir,
}

impl OutputDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join(DEFAULT_OUTPUT_PATH)
    }

    /// Pipeline request against `base_url` writing into this directory.
    pub fn request(&self, base_url: &str) -> PipelineRequest {
        PipelineRequest {
            base_url: base_url.to_string(),
            output_path: self.output_path(),
        }
    }

    /// Pre-populate the output file, to check that failures leave it alone.
    pub fn seed_output(&self, contents: &str) {
        fs::write(self.output_path(), contents).expect("seed output");
    }

    /// Output file contents, or `None` if the file was never created.
    pub fn read_output(&self) -> Option<String> {
        fs::read_to_string(self.output_path()).ok()
    }
}

impl Default for OutputDir {
    fn default() -> Self {
        Self::new()
    }
}
