//! Soul Bit-Perfect CLI Library
//!
//! Configuration loading and output formatting for the `soul-bitperfect`
//! command-line tool.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod error;
pub mod report;

// Re-export commonly used types for convenience
pub use config::{BitPerfectConfig, OutputSettings};
pub use error::{BitPerfectError, Result};
