//! CLI entry point for yarb

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "yarb")]
#[command(version)]
#[command(about = "A minimal file-based markdown blog with an SEO linter", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the blog over HTTP
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Check post front-matter against SEO rules
    Lint {
        /// Directory to lint (defaults to the configured post directory)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List posts
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug { "yarb=debug,info" } else { "yarb=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    match cli.command {
        Commands::Serve { port, ip } => {
            let blog = yarb::Blog::new(&base_dir)?;
            tracing::info!("Serving posts from {:?}", blog.post_dir);
            yarb::server::start(&blog, &ip, port).await?;
        }

        Commands::Lint { dir, no_color } => {
            let blog = yarb::Blog::new(&base_dir)?;
            let dir = dir.map(|d| if d.is_absolute() { d } else { base_dir.join(d) });
            let passed = yarb::commands::lint::run(&blog, dir.as_deref(), no_color)?;
            if !passed {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::List => {
            let blog = yarb::Blog::new(&base_dir)?;
            yarb::commands::list::run(&blog)?;
        }

        Commands::Version => {
            println!("yarb version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(ExitCode::SUCCESS)
}
