//! Core business logic module
//!
//! This module contains all business logic for lambda-build.
//! It has NO I/O operations - those belong in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`target`] - Build target identity and output layout
//! - [`outcome`] - Build outcomes and run summaries
//! - [`build_env`] - Build environment setup
//! - [`command`] - Build command construction
//! - [`builder`] - Build orchestration logic

pub mod build_env;
pub mod builder;
pub mod command;
pub mod outcome;
pub mod target;
