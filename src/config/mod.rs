//! Configuration and constants
//!
//! lambda-build has no configuration file; every tunable is a command-line
//! flag whose default lives in [`defaults`].

pub mod defaults;
