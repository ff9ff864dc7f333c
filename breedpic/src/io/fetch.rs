//! Remote fetch of the breed image payload.
//!
//! The [`Fetcher`] trait decouples the pipeline from how the body is read.
//! Two strategies are provided and behave identically from the caller's side:
//!
//! - [`ClientFetcher`] lets the HTTP client decode the JSON body.
//! - [`BufferedFetcher`] pulls the body chunk by chunk into a buffer and
//!   parses it once the stream ends.
//!
//! Both accept only status 200 and a body that parses as JSON.

use std::error::Error as StdError;
use std::time::Duration;

use clap::ValueEnum;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::error::PipelineError;

/// Which [`Fetcher`] implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FetchStrategy {
    /// Let the HTTP client decode the JSON body.
    #[default]
    Client,
    /// Accumulate body chunks manually, then parse.
    Buffered,
}

/// Abstraction over the ways of fetching and decoding the payload.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    /// GET `url` and decode the body as JSON.
    async fn fetch_json(&self, url: &str) -> Result<Value, PipelineError>;

    /// Whether a successful run echoes the queried breed before the URL.
    fn echoes_query(&self) -> bool {
        false
    }
}

/// Build the shared HTTP client. No timeout is applied unless one is given.
pub fn build_http_client(timeout: Option<Duration>) -> Result<Client, PipelineError> {
    let mut builder =
        Client::builder().user_agent(concat!("breedpic/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|err| PipelineError::network(&err))
}

/// Fetcher that delegates body decoding to the HTTP client.
pub struct ClientFetcher {
    client: Client,
}

impl ClientFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, PipelineError> {
        Ok(Self {
            client: build_http_client(timeout)?,
        })
    }
}

impl Fetcher for ClientFetcher {
    #[instrument(skip(self), fields(strategy = "client"))]
    async fn fetch_json(&self, url: &str) -> Result<Value, PipelineError> {
        let response = send_get(&self.client, url).await?;
        response.json::<Value>().await.map_err(|err| {
            if err.is_decode() {
                decode_failure(&err)
            } else {
                PipelineError::network(&err)
            }
        })
    }
}

/// Fetcher that reads the body chunk by chunk before parsing it.
pub struct BufferedFetcher {
    client: Client,
}

impl BufferedFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, PipelineError> {
        Ok(Self {
            client: build_http_client(timeout)?,
        })
    }
}

impl Fetcher for BufferedFetcher {
    #[instrument(skip(self), fields(strategy = "buffered"))]
    async fn fetch_json(&self, url: &str) -> Result<Value, PipelineError> {
        let mut response = send_get(&self.client, url).await?;
        let mut buffer = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|err| PipelineError::network(&err))?
        {
            trace!(len = chunk.len(), "body chunk received");
            buffer.extend_from_slice(&chunk);
        }
        debug!(bytes = buffer.len(), "response body accumulated");
        serde_json::from_slice(&buffer).map_err(|err| PipelineError::parse(&err))
    }

    fn echoes_query(&self) -> bool {
        true
    }
}

/// Send the GET and reject any status other than 200.
async fn send_get(client: &Client, url: &str) -> Result<Response, PipelineError> {
    debug!(url, "sending request");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| PipelineError::network(&err))?;
    let status = response.status();
    debug!(%status, "response received");
    if status != StatusCode::OK {
        return Err(PipelineError::RemoteFailure {
            status: status.as_u16(),
        });
    }
    Ok(response)
}

/// Surface the JSON parser's message from a client decode error.
fn decode_failure(err: &reqwest::Error) -> PipelineError {
    match err.source() {
        Some(cause) => PipelineError::Parse(cause.to_string()),
        None => PipelineError::Parse(err.to_string()),
    }
}
