//! # quizcheck Library
//!
//! Exposes the CLI commands for testing and integration.
//!
//! The binary uses these through the `main.rs` entry point.

pub mod cli;

// Re-export quizcheck_core for convenience
pub use quizcheck_core;
