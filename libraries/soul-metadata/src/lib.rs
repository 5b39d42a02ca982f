//! Soul Player Metadata
//!
//! Format extraction for the bit-perfect playback core.
//!
//! This crate provides:
//! - `SymphoniaProbe`: reads the primary audio stream's parameters (rate,
//!   declared depth, channels, codec, duration) and title/artist/album tags
//! - `FormatExtractor`: normalises a probe report into `AudioCharacteristics`,
//!   applying defaults and the codec → nominal bit-depth table
//!
//! # Example
//!
//! ```rust,no_run
//! use soul_metadata::{FormatExtractor, SymphoniaProbe};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = FormatExtractor::new(Arc::new(SymphoniaProbe::new()));
//! let characteristics = extractor.extract(Path::new("/music/song.flac"))?;
//! println!(
//!     "{} Hz / {}",
//!     characteristics.sample_rate_hz, characteristics.bit_depth
//! );
//! # Ok(())
//! # }
//! ```

mod error;
mod extractor;
mod probe;
mod reader;

pub use error::{MetadataError, Result};
pub use extractor::{
    nominal_bit_depth, normalize, ExtractedMedia, FormatExtractor, TrackTags,
    DEFAULT_CHANNEL_COUNT, DEFAULT_SAMPLE_RATE_HZ, UNKNOWN_ALBUM, UNKNOWN_ARTIST,
};
pub use probe::{codec_from_symphonia, SymphoniaProbe};
pub use reader::{LoftyTagReader, RawTags};
