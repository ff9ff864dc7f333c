//! Diagnostics for a fetch, on stderr.
//!
//! `RUST_LOG` selects what is shown. Product output (the prompt, the image
//! URL, `Saved image`, the failure line) goes to stdout and is never filtered.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";

/// HTTP stack crates held at `warn` unless `RUST_LOG` names them.
const NOISY_HTTP_CRATES: [&str; 3] = ["hyper_util", "reqwest", "rustls"];

/// Install the stderr subscriber.
///
/// `RUST_LOG=breedpic=debug` shows URL, status and body size per run without
/// the connection-pool chatter of the HTTP stack.
pub fn init() {
    let directives = filter_directives(std::env::var("RUST_LOG").ok().as_deref());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .init();
}

/// Build the filter string from the `RUST_LOG` value.
fn filter_directives(env: Option<&str>) -> String {
    let base = match env.map(str::trim) {
        Some(spec) if !spec.is_empty() => spec,
        _ => DEFAULT_FILTER,
    };
    if base == "off" {
        return base.to_string();
    }
    let mut directives = base.to_string();
    for krate in NOISY_HTTP_CRATES {
        if !base.contains(krate) {
            directives.push_str(&format!(",{krate}=warn"));
        }
    }
    directives
}
