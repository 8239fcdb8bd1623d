//! # Messenger CLI Entry Point
//!
//! 1. **Initialization**: Parses command-line arguments and installs the log subscriber.
//! 2. **Connection**: Opens a channel to the `MessagingService` server.
//! 3. **Execution**: Runs the unary, server-streaming, client-streaming and bidirectional calls in order.
//! 4. **Presentation**: Prints the transcript to stdout, or the failing call and its status to stderr.
mod cli;

use clap::Parser;
use cli::Cli;
use colored::Colorize;
use messenger::CallDriver;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    init_tracing();

    if let Err(err) = run(&args.url).await {
        eprintln!("{} {}", "Messenger Failed:".red().bold(), err);
        process::exit(1);
    }
}

/// Logs go to stderr so that stdout only carries the transcript.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(url: &str) -> anyhow::Result<()> {
    // The driver owns the channel; it is closed when `driver` drops, on success or failure.
    let mut driver = CallDriver::connect(url, std::io::stdout()).await?;
    driver.run_all().await?;
    Ok(())
}
