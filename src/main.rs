//! lambda-build CLI - Concurrent builder for Go AWS Lambdas
//!
//! Entry point for the lambda-build command-line application.

use anyhow::Result;
use clap::Parser;

use lambda_build::cli::output::display_error;
use lambda_build::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            cli.output_config()
                .log_filter(std::env::var("RUST_LOG").ok().as_deref()),
        )
        .init();

    // Run the build and handle errors
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
