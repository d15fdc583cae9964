use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod ask;
pub mod chat;
pub mod serve;

use crate::core::AppConfig;

#[derive(Subcommand)]
enum Command {
    /// Start an interactive trip planning session
    Chat {},
    /// Ask a single question and print the answer
    Ask {
        #[arg(long)]
        message: String,
    },
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

/// Logs go to stderr so they never interleave with chat output on
/// stdout. Override with `RUST_LOG`.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    let config = AppConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::Chat {}) => {
            init_tracing("warn");
            chat::run(config).await?;
        }
        Some(Command::Ask { message }) => {
            init_tracing("warn");
            ask::run(config, &message).await?;
        }
        Some(Command::Serve { host, port }) => {
            serve::run(host, port, config).await?;
        }
        None => {}
    }

    Ok(())
}
