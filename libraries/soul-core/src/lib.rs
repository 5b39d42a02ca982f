//! Soul Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Soul Player.
//!
//! This crate provides the foundational building blocks shared by the
//! bit-perfect playback libraries.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `AudioCharacteristics`, `BitDepth`, `Codec`, `DeviceCapability`
//! - **Core Traits**: `MediaProbe` (file → stream description), `OsAudio` (device layer)
//! - **Error Handling**: Unified `SoulError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use soul_core::types::{BitDepth, Codec, DeviceCapability, SampleRate};
//!
//! let dac = DeviceCapability::new("dac1", "USB DAC", SampleRate::HIGH_RES_192.as_hz(), 32, 2)
//!     .as_default();
//! assert!(dac.is_default);
//! assert_eq!(BitDepth::normalize(20), BitDepth::TwentyFour);
//! assert!(Codec::from_name("mp3").is_lossy());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Result, SoulError};
pub use traits::{MediaProbe, OsAudio, ProbeReport};

pub use types::{
    AudioCharacteristics, BitDepth, Codec, DepthOrigin, DeviceCapability, DeviceId, SampleRate,
};
