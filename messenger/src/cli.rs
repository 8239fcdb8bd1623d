//! # CLI
//!
//! This module defines the command-line interface of `messenger` using `clap`.
//!
//! Running the binary without arguments performs the four calls against the default address.
use clap::Parser;
use messenger::DEFAULT_URL;

#[derive(Parser, Debug)]
#[command(
    name = "messenger",
    version,
    about = "Exercise the unary, server, client and bidirectional streaming calls of a MessagingService"
)]
pub struct Cli {
    /// The server URL to connect to (e.g. http://localhost:9000)
    #[arg(long, env = "MESSENGER_URL", default_value = DEFAULT_URL)]
    pub url: String,
}
