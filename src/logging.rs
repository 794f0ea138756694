//! Structured logging setup.
//!
//! `RUST_LOG` takes precedence; otherwise `restconfig=info`, or `debug` for
//! this crate and the HTTP trace layer when verbose.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "restconfig=debug,tower_http=debug"
    } else {
        "restconfig=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second initialisation (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
