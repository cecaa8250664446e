//! Pre-commit SEO check: lints every post in the configured post directory.
//! Exits 1 if any post has an error.

use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yarb=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = yarb::Blog::new(".").and_then(|blog| yarb::commands::lint::run(&blog, None, false));

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("seo-lint: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
