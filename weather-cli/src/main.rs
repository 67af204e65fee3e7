//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Storing the upstream credential locally
//! - Running the proxy handler outside of Lambda
//! - Printing the handler's result

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    weather_core::telemetry::init_tracing("warn");

    let cmd = cli::Cli::parse();
    cmd.run().await
}
