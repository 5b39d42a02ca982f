//! Desktop audio hosts for Soul Player
//!
//! This crate provides the OS Audio collaborators the playback core talks to
//! through the `soul_core::OsAudio` trait.
//!
//! # Features
//!
//! - `VirtualHost`: in-process device set with hot-plug and failure injection
//! - `CpalHost` (feature `cpal`): real output enumeration through CPAL
//! - `HostBackend` + `create_host`: config-driven host selection
//!
//! # Example
//!
//! ```rust
//! use soul_audio_desktop::{create_host, HostBackend};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let host = create_host(HostBackend::Virtual)?;
//! for device in host.enumerate_devices()? {
//!     println!("{} ({} Hz, {}-bit)", device.display_name, device.max_sample_rate_hz, device.max_bit_depth);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
#[cfg(feature = "cpal")]
mod cpal_host;
mod enumeration;
mod error;
mod virtual_host;

pub use backend::{create_host, HostBackend};
#[cfg(feature = "cpal")]
pub use cpal_host::CpalHost;
pub use error::{AudioError, Result};
pub use virtual_host::{reference_devices, VirtualHost};
