//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod build;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::defaults::{DEFAULT_BUILD_TOOL, DEFAULT_CONCURRENT_BUILDS};
use output::OutputConfig;

/// lambda-build - Tool for building Go AWS Lambdas
///
/// Finds every directory holding a main.go under the source path and
/// cross-compiles each one for linux/amd64, a few at a time.
#[derive(Parser, Debug)]
#[command(name = "lambda-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The base path for the lambdas source
    #[arg(short = 's', long = "source-path")]
    pub source_path: PathBuf,

    /// The base path for the lambdas built output
    #[arg(short = 'd', long = "destination-path")]
    pub destination_path: PathBuf,

    /// The number of concurrent builds
    #[arg(
        long = "concurrent-builds",
        visible_alias = "cb",
        default_value_t = DEFAULT_CONCURRENT_BUILDS,
        value_parser = parse_concurrency
    )]
    pub concurrent_builds: usize,

    /// Build for local step-through debugging (disables optimizations and inlining)
    #[arg(long = "debug-mode", visible_alias = "dm")]
    pub debug_mode: bool,

    /// Only build lambdas whose directory path contains this text [default: build all]
    #[arg(long = "source-path-pattern", visible_alias = "spp")]
    pub source_path_pattern: Option<String>,

    /// Go binary used to compile each lambda
    #[arg(long = "build-tool", env = "LAMBDA_BUILD_GO", default_value = DEFAULT_BUILD_TOOL)]
    pub build_tool: PathBuf,

    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress and summary output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Output settings selected on the command line
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new(self.quiet, self.verbose)
    }

    /// Execute the build
    pub async fn run(self) -> Result<()> {
        let output = self.output_config();
        let options = build::BuildOptions {
            source_path: self.source_path,
            destination_path: self.destination_path,
            concurrent_builds: self.concurrent_builds,
            debug_mode: self.debug_mode,
            source_path_pattern: self.source_path_pattern,
            build_tool: self.build_tool,
        };
        build::execute(options, output).await
    }
}

fn parse_concurrency(value: &str) -> Result<usize, String> {
    let parsed: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a whole number"))?;
    if parsed == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(parsed)
}
