//! lambda-build - Concurrent builder for Go AWS Lambdas
//!
//! This library discovers every Lambda handler (a directory holding a
//! `main.go`) under a source tree and cross-compiles each one with
//! `go build`, running a bounded number of builds at once.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Targets, outcomes, command construction and the build orchestrator
//! - [`infra`] - Infrastructure layer (filesystem walk, processes, toolchain lookup)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
