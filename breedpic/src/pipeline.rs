//! Prompt → fetch → extract → persist, strictly in sequence.

use std::io::Write;
use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{info, instrument};

use crate::core::extract::extract_message;
use crate::core::url::breed_image_url;
use crate::error::PipelineError;
use crate::io::fetch::Fetcher;
use crate::io::output::write_output;
use crate::io::prompt::{BREED_PROMPT, Prompter};

/// Where the breed comes from.
pub enum BreedSource<R, W> {
    /// Given up front (e.g. `--breed`); no prompt is shown.
    Fixed(String),
    /// Asked once on the prompter's streams.
    Prompt(Prompter<R, W>),
}

impl<R, W> BreedSource<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn resolve(self) -> Result<String, PipelineError> {
        match self {
            Self::Fixed(breed) => Ok(breed),
            Self::Prompt(prompter) => prompter.ask(BREED_PROMPT).await,
        }
    }
}

/// Inputs that stay fixed for a run.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub base_url: String,
    pub output_path: PathBuf,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub breed: String,
    pub image_url: String,
    pub output_path: PathBuf,
    /// Print `Breed: <breed>` before the image URL.
    pub echo_breed: bool,
}

/// Run the four stages. The first failure aborts the rest.
///
/// The output file is only touched by the last stage, so any failure before
/// it leaves an existing file unchanged.
#[instrument(skip_all, fields(base_url = %request.base_url, output = %request.output_path.display()))]
pub async fn run_pipeline<R, W, F>(
    request: &PipelineRequest,
    source: BreedSource<R, W>,
    fetcher: &F,
) -> Result<Outcome, PipelineError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    F: Fetcher,
{
    let breed = source.resolve().await?;
    let url = breed_image_url(&request.base_url, &breed);
    info!(%breed, %url, "fetching breed image");

    let payload = fetcher.fetch_json(&url).await?;
    let image_url = extract_message(&payload)?;
    write_output(&request.output_path, &image_url).await?;
    info!(%image_url, "image url saved");

    Ok(Outcome {
        breed,
        image_url,
        output_path: request.output_path.clone(),
        echo_breed: fetcher.echoes_query(),
    })
}

/// Print the success lines: optional breed echo, the image URL, `Saved image`.
pub fn report<O: Write>(outcome: &Outcome, out: &mut O) -> std::io::Result<()> {
    if outcome.echo_breed {
        writeln!(out, "Breed: {}", outcome.breed)?;
    }
    writeln!(out, "{}", outcome.image_url)?;
    writeln!(out, "Saved image")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::fetch::{BufferedFetcher, ClientFetcher};
    use crate::test_support::{OutputDir, json_response, mock_breed_api, text_response};
    use serde_json::json;

    const HOUND_URL: &str = "https://example.com/hound.jpg";

    fn fixed(breed: &str) -> BreedSource<&'static [u8], Vec<u8>> {
        BreedSource::Fixed(breed.to_string())
    }

    fn hound_body() -> serde_json::Value {
        json!({ "status": "success", "message": HOUND_URL })
    }

    #[tokio::test]
    async fn prompted_breed_is_fetched_and_saved() {
        let server = mock_breed_api("hound", json_response(200, &hound_body())).await;
        let dir = OutputDir::new();
        let request = dir.request(&server.uri());

        let mut shown = Vec::new();
        let source = BreedSource::Prompt(Prompter::new(&b"hound\n"[..], &mut shown));
        let fetcher = ClientFetcher::new(None).expect("client");
        let outcome = run_pipeline(&request, source, &fetcher).await.expect("run");

        assert_eq!(shown, BREED_PROMPT.as_bytes());
        assert_eq!(outcome.breed, "hound");
        assert_eq!(outcome.image_url, HOUND_URL);
        assert_eq!(outcome.output_path, request.output_path);
        assert!(!outcome.echo_breed);
        assert_eq!(dir.read_output().as_deref(), Some(HOUND_URL));
    }

    #[tokio::test]
    async fn buffered_fetcher_requests_breed_echo() {
        let server = mock_breed_api("hound", json_response(200, &hound_body())).await;
        let dir = OutputDir::new();
        let fetcher = BufferedFetcher::new(None).expect("client");
        let outcome = run_pipeline(&dir.request(&server.uri()), fixed("hound"), &fetcher)
            .await
            .expect("run");
        assert!(outcome.echo_breed);
        assert_eq!(dir.read_output().as_deref(), Some(HOUND_URL));
    }

    #[tokio::test]
    async fn remote_failure_leaves_existing_output_untouched() {
        let server = mock_breed_api("nope", json_response(404, &json!({}))).await;
        let dir = OutputDir::new();
        dir.seed_output("previous");
        let fetcher = ClientFetcher::new(None).expect("client");
        let err = run_pipeline(&dir.request(&server.uri()), fixed("nope"), &fetcher)
            .await
            .expect_err("404");
        assert_eq!(err.to_string(), "Failed to retrieve image");
        assert_eq!(dir.read_output().as_deref(), Some("previous"));
    }

    #[tokio::test]
    async fn remote_failure_does_not_create_output() {
        let server = mock_breed_api("nope", json_response(404, &json!({}))).await;
        let dir = OutputDir::new();
        let fetcher = BufferedFetcher::new(None).expect("client");
        run_pipeline(&dir.request(&server.uri()), fixed("nope"), &fetcher)
            .await
            .expect_err("404");
        assert_eq!(dir.read_output(), None);
    }

    #[tokio::test]
    async fn malformed_body_leaves_output_untouched() {
        let server = mock_breed_api("hound", text_response(200, "not json")).await;
        let dir = OutputDir::new();
        dir.seed_output("previous");
        let fetcher = ClientFetcher::new(None).expect("client");
        let err = run_pipeline(&dir.request(&server.uri()), fixed("hound"), &fetcher)
            .await
            .expect_err("parse");
        assert!(matches!(err, PipelineError::Parse(_)));
        assert_eq!(dir.read_output().as_deref(), Some("previous"));
    }

    #[tokio::test]
    async fn missing_message_fails_before_write() {
        let body = json!({ "status": "success" });
        let server = mock_breed_api("hound", json_response(200, &body)).await;
        let dir = OutputDir::new();
        let fetcher = ClientFetcher::new(None).expect("client");
        let err = run_pipeline(&dir.request(&server.uri()), fixed("hound"), &fetcher)
            .await
            .expect_err("missing field");
        assert!(matches!(err, PipelineError::MissingField));
        assert_eq!(dir.read_output(), None);
    }

    #[tokio::test]
    async fn closed_input_skips_the_fetch() {
        let server = mock_breed_api("hound", json_response(200, &hound_body())).await;
        let dir = OutputDir::new();
        let source = BreedSource::Prompt(Prompter::new(&b""[..], Vec::new()));
        let fetcher = ClientFetcher::new(None).expect("client");
        let err = run_pipeline(&dir.request(&server.uri()), source, &fetcher)
            .await
            .expect_err("eof");
        assert!(matches!(err, PipelineError::Input(_)));
        let received = server.received_requests().await.unwrap_or_default();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn repeated_runs_write_identical_bytes() {
        let server = mock_breed_api("hound", json_response(200, &hound_body())).await;
        let dir = OutputDir::new();
        let request = dir.request(&server.uri());
        let fetcher = ClientFetcher::new(None).expect("client");

        run_pipeline(&request, fixed("hound"), &fetcher)
            .await
            .expect("first run");
        let first = std::fs::read(&request.output_path).expect("read first");
        run_pipeline(&request, fixed("hound"), &fetcher)
            .await
            .expect("second run");
        let second = std::fs::read(&request.output_path).expect("read second");

        assert_eq!(first, second);
        assert_eq!(first, HOUND_URL.as_bytes());
    }

    #[test]
    fn report_lists_url_then_confirmation() {
        let outcome = Outcome {
            breed: "hound".to_string(),
            image_url: HOUND_URL.to_string(),
            output_path: PathBuf::from("img.txt"),
            echo_breed: false,
        };
        let mut out = Vec::new();
        report(&outcome, &mut out).expect("report");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            format!("{HOUND_URL}\nSaved image\n")
        );
    }

    #[test]
    fn report_echoes_breed_when_requested() {
        let outcome = Outcome {
            breed: "hound".to_string(),
            image_url: HOUND_URL.to_string(),
            output_path: PathBuf::from("img.txt"),
            echo_breed: true,
        };
        let mut out = Vec::new();
        report(&outcome, &mut out).expect("report");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            format!("Breed: hound\n{HOUND_URL}\nSaved image\n")
        );
    }
}
