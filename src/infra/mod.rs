//! Infrastructure layer
//!
//! Handles all I/O operations: filesystem traversal and external processes.
//! This module is the only place where side effects occur.

pub mod discovery;
pub mod filesystem;
pub mod invoker;
pub mod toolchain;
