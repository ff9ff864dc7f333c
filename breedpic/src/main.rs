//! Ask for a dog breed, fetch a random image URL for it, and save it to disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use breedpic::error::PipelineError;
use breedpic::exit_codes;
use breedpic::io::config::{AppConfig, load_config};
use breedpic::io::fetch::{BufferedFetcher, ClientFetcher, FetchStrategy};
use breedpic::io::prompt::Prompter;
use breedpic::logging;
use breedpic::pipeline::{BreedSource, PipelineRequest, report, run_pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "breedpic",
    version,
    about = "Fetch a random dog image URL for a breed and save it to a file"
)]
struct Cli {
    /// Breed to look up. Prompts on stdin when omitted.
    #[arg(long)]
    breed: Option<String>,

    /// API root (default: https://dog.ceo/api).
    #[arg(long)]
    base_url: Option<String>,

    /// File that receives the image URL (default: img.txt).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// How the response body is read.
    #[arg(long, value_enum)]
    fetcher: Option<FetchStrategy>,

    /// Abort the request after this many seconds (default: no timeout).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// TOML config file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        let code = match err.downcast_ref::<PipelineError>() {
            // Pipeline failures are product output: one line on stdout.
            Some(failure) => {
                println!("{failure}");
                failure.exit_code()
            }
            None => {
                eprintln!("{:#}", err);
                exit_codes::INVALID
            }
        };
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    debug!(?config, "resolved config");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    runtime.block_on(fetch_and_save(cli.breed, &config))
}

/// Defaults ← config file ← command-line flags.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(output) = &cli.output {
        config.output_path = output.clone();
    }
    if let Some(fetcher) = cli.fetcher {
        config.fetcher = fetcher;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.timeout_secs = Some(timeout_secs);
    }
    config.validate()?;
    Ok(config)
}

async fn fetch_and_save(breed: Option<String>, config: &AppConfig) -> Result<()> {
    let request = PipelineRequest {
        base_url: config.base_url.clone(),
        output_path: config.output_path.clone(),
    };
    let source = match breed {
        Some(breed) => BreedSource::Fixed(breed),
        None => BreedSource::Prompt(Prompter::stdio()),
    };
    let outcome = match config.fetcher {
        FetchStrategy::Client => {
            let fetcher = ClientFetcher::new(config.timeout())?;
            run_pipeline(&request, source, &fetcher).await?
        }
        FetchStrategy::Buffered => {
            let fetcher = BufferedFetcher::new(config.timeout())?;
            run_pipeline(&request, source, &fetcher).await?
        }
    };
    let stdout = std::io::stdout();
    report(&outcome, &mut stdout.lock()).context("write report")?;
    debug!(path = %outcome.output_path.display(), breed = %outcome.breed, "run complete");
    Ok(())
}
