//! Soul Player - Bit-Perfect Playback
//!
//! Decides whether a file can reach an output device without sample-rate
//! conversion or bit-depth alteration, and runs the playback session that
//! keeps that decision current.
//!
//! This crate provides:
//! - Bit-perfect evaluator (pure, total, first-matching-rule)
//! - Device capability registry (selection → default → none)
//! - Playback session state machine (Stopped/Loading/Playing/Paused/Ended)
//! - Typed event bus with kind-scoped subscriptions
//! - `PlaybackEngine`: single-writer handle with a cancellable position ticker
//!
//! # Architecture
//!
//! `soul-playback` talks to the platform only through the `soul-core`
//! traits:
//! - `MediaProbe` reads a file's stream parameters (see `soul-metadata`)
//! - `OsAudio` enumerates devices and forwards exclusive/selection requests
//!   (see `soul-audio-desktop`)
//!
//! # Example: Evaluating a file against a device
//!
//! ```rust
//! use soul_core::{AudioCharacteristics, BitDepth, Codec, DepthOrigin, DeviceCapability};
//! use soul_playback::{evaluate, VerdictReason};
//!
//! let file = AudioCharacteristics {
//!     sample_rate_hz: 192_000,
//!     bit_depth: BitDepth::ThirtyTwo,
//!     depth_origin: DepthOrigin::Declared,
//!     channel_count: 2,
//!     codec: Codec::PcmS32,
//! };
//! let dac = DeviceCapability::new("dac1", "USB DAC", 192_000, 32, 2);
//!
//! let verdict = evaluate(Some(&file), Some(&dac), true);
//! assert!(verdict.is_bit_perfect);
//! assert_eq!(verdict.reason, VerdictReason::BitPerfectActive);
//!
//! let shared = evaluate(Some(&file), Some(&dac), false);
//! assert_eq!(shared.reason.as_str(), "shared/non-exclusive mode");
//! ```
//!
//! # Example: Driving the engine
//!
//! ```rust,no_run
//! use soul_audio_desktop::VirtualHost;
//! use soul_playback::{EngineConfig, EventKind, PlaybackEngine, PlaybackEvent};
//! use std::sync::Arc;
//!
//! # async fn example() -> soul_playback::Result<()> {
//! let host = Arc::new(VirtualHost::with_reference_devices());
//! let engine = PlaybackEngine::with_symphonia(EngineConfig::default(), host)?;
//!
//! let verdicts = engine.subscribe_to(&[EventKind::BitPerfectChanged]);
//! engine.play_file("/music/track.flac").await?;
//!
//! if let Ok(PlaybackEvent::BitPerfectChanged { verdict }) = verdicts.try_recv() {
//!     println!("{verdict}");
//! }
//! engine.shutdown();
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;
pub mod events;
mod registry;
mod session;
pub mod types;
mod verdict;

// Public exports
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::{ErrorKind, EventBus, EventKind, PlaybackEvent};
pub use registry::{resolve_device, DeviceRegistry};
pub use session::{PlaybackSession, TickOutcome};
pub use types::{EngineConfig, LoadOutcome, PlaybackState, SessionSnapshot};
pub use verdict::{evaluate, BitPerfectVerdict, DeviceSnapshot, FileSnapshot, VerdictReason};
