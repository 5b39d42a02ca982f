//! Playback session state machine
//!
//! `Stopped → Loading → Playing ⇄ Paused → Stopped`, `Playing → Ended → Stopped`.
//!
//! The session is synchronous and owns no timers or threads. Transitions
//! queue [`PlaybackEvent`]s which the owner drains after each call. Two
//! counters keep asynchronous work honest:
//!
//! - the load generation: a probe result is applied only if no newer load
//!   (or stop) happened since it started
//! - the tick epoch: bumped whenever playback starts or stops, so a tick
//!   scheduled for an earlier playing period does nothing

use crate::error::{PlaybackError, Result};
use crate::events::{ErrorKind, PlaybackEvent};
use crate::registry::DeviceRegistry;
use crate::types::{EngineConfig, LoadOutcome, PlaybackState, SessionSnapshot};
use crate::verdict::{self, BitPerfectVerdict};
use soul_core::{AudioCharacteristics, DeviceId};
use soul_metadata::{ExtractedMedia, MetadataError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
struct LoadedFile {
    path: PathBuf,
    media: ExtractedMedia,
}

#[derive(Debug, Clone)]
struct PendingLoad {
    generation: u64,
    path: PathBuf,
    prior_state: PlaybackState,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Position moved forward
    Advanced,

    /// Track reached its end; the session is Stopped
    Ended,

    /// Tick belonged to an earlier playing period or the session is not playing
    Stale,
}

/// Single playback session
#[derive(Debug)]
pub struct PlaybackSession {
    state: PlaybackState,
    current: Option<LoadedFile>,
    position: Duration,
    volume: f32,
    exclusive: bool,
    registry: Arc<DeviceRegistry>,

    pending_load: Option<PendingLoad>,
    load_generation: u64,
    tick_epoch: u64,

    // Event queue for subscribers
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackSession {
    /// Create a stopped session with no file
    pub fn new(config: &EngineConfig, registry: Arc<DeviceRegistry>) -> Self {
        Self {
            state: PlaybackState::Stopped,
            current: None,
            position: Duration::ZERO,
            volume: config.clamped_volume(),
            exclusive: config.exclusive_mode,
            registry,
            pending_load: None,
            load_generation: 0,
            tick_epoch: 0,
            pending_events: Vec::new(),
        }
    }

    // ===== Loading =====

    /// Start loading `path`
    ///
    /// Returns the generation token to hand back to [`Self::complete_load`],
    /// or `None` if `path` is already playing.
    pub fn begin_load(&mut self, path: &Path) -> Result<Option<u64>> {
        match self.state {
            PlaybackState::Paused => {
                return Err(PlaybackError::InvalidTransition {
                    operation: "load",
                    state: self.state,
                });
            }
            PlaybackState::Playing if self.current_file() == Some(path) => {
                tracing::debug!(path = %path.display(), "file already playing");
                return Ok(None);
            }
            _ => {}
        }

        let prior_state = match &self.pending_load {
            Some(pending) => pending.prior_state,
            None => self.state,
        };

        self.load_generation += 1;
        if self.state == PlaybackState::Playing {
            self.tick_epoch += 1;
        }
        self.pending_load = Some(PendingLoad {
            generation: self.load_generation,
            path: path.to_path_buf(),
            prior_state,
        });
        self.state = PlaybackState::Loading;

        tracing::debug!(
            path = %path.display(),
            generation = self.load_generation,
            "load started"
        );
        Ok(Some(self.load_generation))
    }

    /// Apply a probe result
    ///
    /// A result for anything but the newest pending load is discarded. On
    /// success the file becomes current and the session rests in Stopped;
    /// on failure the prior state is restored and an error event queued.
    pub fn complete_load(
        &mut self,
        generation: u64,
        result: std::result::Result<ExtractedMedia, MetadataError>,
    ) -> Result<LoadOutcome> {
        let Some(pending) = self.take_pending(generation) else {
            tracing::debug!(generation, "discarding superseded load result");
            return Ok(LoadOutcome::Superseded);
        };

        let media = match result {
            Ok(media) => media,
            Err(e) => {
                tracing::warn!(path = %pending.path.display(), error = %e, "failed to load file");
                self.restore(pending.prior_state);
                self.pending_events.push(PlaybackEvent::Error {
                    kind: ErrorKind::UnreadableMedia,
                    message: e.to_string(),
                });
                return Err(PlaybackError::Media(e));
            }
        };

        if pending.prior_state == PlaybackState::Playing {
            self.pending_events.push(PlaybackEvent::Stopped);
        }

        self.state = PlaybackState::Stopped;
        self.position = Duration::ZERO;

        tracing::info!(
            path = %pending.path.display(),
            sample_rate = media.characteristics.sample_rate_hz,
            bit_depth = media.characteristics.bit_depth.bits(),
            codec = %media.characteristics.codec,
            duration_secs = media.duration.as_secs_f64(),
            "file loaded"
        );

        self.pending_events.push(PlaybackEvent::FileLoaded {
            path: pending.path.clone(),
            characteristics: media.characteristics,
            duration_seconds: media.duration.as_secs_f64(),
            tags: media.tags.clone(),
        });
        self.current = Some(LoadedFile {
            path: pending.path,
            media,
        });

        self.publish_verdict();
        Ok(LoadOutcome::Loaded)
    }

    /// Drop a pending load without a result, restoring the prior state
    ///
    /// Returns false if the load had already been superseded.
    pub fn abandon_load(&mut self, generation: u64) -> bool {
        match self.take_pending(generation) {
            Some(pending) => {
                self.restore(pending.prior_state);
                true
            }
            None => false,
        }
    }

    fn take_pending(&mut self, generation: u64) -> Option<PendingLoad> {
        match self.pending_load.take() {
            Some(pending) if pending.generation == generation => Some(pending),
            other => {
                self.pending_load = other;
                None
            }
        }
    }

    fn restore(&mut self, state: PlaybackState) {
        self.state = match state {
            PlaybackState::Loading | PlaybackState::Ended => PlaybackState::Stopped,
            other => other,
        };
        if self.state == PlaybackState::Playing {
            self.tick_epoch += 1;
        }
    }

    // ===== Playback Control =====

    /// Start or resume playback
    ///
    /// Returns true if the state changed. Starting without a resolvable
    /// device still plays, but queues a `DeviceUnresolved` error.
    pub fn play(&mut self) -> Result<bool> {
        match self.state {
            PlaybackState::Playing => Ok(false),
            PlaybackState::Paused => {
                self.enter_playing();
                self.pending_events.push(PlaybackEvent::Resumed);
                tracing::debug!("playback resumed");
                Ok(true)
            }
            PlaybackState::Stopped | PlaybackState::Ended => {
                let Some(path) = self.current.as_ref().map(|c| c.path.clone()) else {
                    return Err(PlaybackError::NoFileLoaded);
                };

                let verdict = self.verdict();
                let unresolved = verdict.device.is_none();

                self.enter_playing();
                tracing::info!(path = %path.display(), verdict = %verdict, "playback started");
                self.pending_events.push(PlaybackEvent::Started { path, verdict });

                if unresolved {
                    tracing::warn!("playing without a resolved output device");
                    self.pending_events.push(PlaybackEvent::Error {
                        kind: ErrorKind::DeviceUnresolved,
                        message: "no output device resolved; playback is not bit-perfect"
                            .to_string(),
                    });
                }
                Ok(true)
            }
            PlaybackState::Loading => Err(PlaybackError::InvalidTransition {
                operation: "play",
                state: self.state,
            }),
        }
    }

    fn enter_playing(&mut self) {
        self.state = PlaybackState::Playing;
        self.tick_epoch += 1;
    }

    /// Pause playback; no-op unless Playing
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.state = PlaybackState::Paused;
        self.tick_epoch += 1;
        self.pending_events.push(PlaybackEvent::Paused);
        tracing::debug!(position_secs = self.position.as_secs_f64(), "playback paused");
        true
    }

    /// Stop from any state, resetting position and cancelling a pending load
    ///
    /// Returns true if the state changed.
    pub fn stop(&mut self) -> bool {
        if self.pending_load.take().is_some() {
            tracing::debug!("pending load cancelled by stop");
        }

        let changed = self.state != PlaybackState::Stopped;
        self.state = PlaybackState::Stopped;
        self.position = Duration::ZERO;
        self.tick_epoch += 1;

        if changed {
            self.pending_events.push(PlaybackEvent::Stopped);
            tracing::debug!("playback stopped");
        }
        changed
    }

    /// Seek to `seconds`, clamped to `[0, duration]`; NaN seeks to 0
    pub fn seek(&mut self, seconds: f64) -> Result<Duration> {
        if !matches!(self.state, PlaybackState::Playing | PlaybackState::Paused) {
            return Err(PlaybackError::InvalidTransition {
                operation: "seek",
                state: self.state,
            });
        }

        let duration = self.duration();
        let target = if seconds.is_nan() || seconds <= 0.0 {
            Duration::ZERO
        } else if seconds >= duration.as_secs_f64() {
            duration
        } else {
            Duration::from_secs_f64(seconds)
        };

        self.position = target;
        self.pending_events.push(PlaybackEvent::PositionChanged {
            seconds: target.as_secs_f64(),
        });
        Ok(target)
    }

    /// Set volume, clamped to `[0, 1]`; NaN keeps the current volume
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        if volume.is_nan() {
            return self.volume;
        }
        let volume = volume.clamp(0.0, 1.0);
        if volume != self.volume {
            self.volume = volume;
            self.pending_events.push(PlaybackEvent::VolumeChanged { volume });
        }
        self.volume
    }

    // ===== Device & Mode =====

    /// Toggle exclusive mode and publish the resulting verdict
    pub fn set_exclusive(&mut self, exclusive: bool) -> BitPerfectVerdict {
        self.registry.set_exclusive(exclusive);
        self.exclusive = exclusive;
        tracing::info!(exclusive, "exclusive mode changed");
        self.pending_events.push(PlaybackEvent::ExclusiveModeChanged { exclusive });
        self.publish_verdict()
    }

    /// Select an output device and publish the resulting verdict
    ///
    /// An unknown id keeps the previous selection; the verdict is published
    /// either way.
    pub fn set_device(&mut self, id: &DeviceId) -> bool {
        let accepted = self.registry.select_device(id);
        if accepted {
            self.pending_events.push(PlaybackEvent::DeviceChanged { id: id.clone() });
        }
        self.publish_verdict();
        accepted
    }

    /// Evaluate against the current device and queue a `bitPerfectChanged`
    pub fn publish_verdict(&mut self) -> BitPerfectVerdict {
        let verdict = self.verdict();
        tracing::debug!(verdict = %verdict, "bit-perfect status evaluated");
        self.pending_events.push(PlaybackEvent::BitPerfectChanged {
            verdict: verdict.clone(),
        });
        verdict
    }

    /// Fresh verdict for the current file, device and mode
    pub fn verdict(&self) -> BitPerfectVerdict {
        let device = self.registry.current_device();
        verdict::evaluate(self.characteristics().as_ref(), device.as_ref(), self.exclusive)
    }

    // ===== Position =====

    /// Advance position by `elapsed` for a tick scheduled in `epoch`
    ///
    /// Reaching the duration clamps position to it, queues the final
    /// position and `ended`, then resets to Stopped at position 0.
    pub fn advance(&mut self, elapsed: Duration, epoch: u64) -> TickOutcome {
        if epoch != self.tick_epoch || self.state != PlaybackState::Playing {
            return TickOutcome::Stale;
        }
        let Some(current) = &self.current else {
            return TickOutcome::Stale;
        };

        let duration = current.media.duration;
        self.position = self.position.saturating_add(elapsed);

        if self.position < duration {
            self.pending_events.push(PlaybackEvent::PositionChanged {
                seconds: self.position.as_secs_f64(),
            });
            return TickOutcome::Advanced;
        }

        let path = current.path.clone();
        self.position = duration;
        self.pending_events.push(PlaybackEvent::PositionChanged {
            seconds: duration.as_secs_f64(),
        });

        self.state = PlaybackState::Ended;
        tracing::info!(path = %path.display(), "track ended");
        self.pending_events.push(PlaybackEvent::Ended { path });

        self.state = PlaybackState::Stopped;
        self.position = Duration::ZERO;
        self.tick_epoch += 1;
        TickOutcome::Ended
    }

    // ===== Queries =====

    /// Current state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Path of the loaded file
    pub fn current_file(&self) -> Option<&Path> {
        self.current.as_ref().map(|c| c.path.as_path())
    }

    /// Characteristics of the loaded file
    pub fn characteristics(&self) -> Option<AudioCharacteristics> {
        self.current.as_ref().map(|c| c.media.characteristics)
    }

    /// Extracted media of the loaded file
    pub fn media(&self) -> Option<&ExtractedMedia> {
        self.current.as_ref().map(|c| &c.media)
    }

    /// Playback position
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Duration of the loaded file (zero if none)
    pub fn duration(&self) -> Duration {
        self.current
            .as_ref()
            .map_or(Duration::ZERO, |c| c.media.duration)
    }

    /// Volume (0.0 - 1.0)
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Exclusive mode flag
    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Current tick epoch
    pub fn tick_epoch(&self) -> u64 {
        self.tick_epoch
    }

    /// Whether a load is in flight
    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Consistent copy of the session state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            current_file: self.current_file().map(Path::to_path_buf),
            characteristics: self.characteristics(),
            position: self.position,
            duration: self.duration(),
            volume: self.volume,
            selected_device: self.registry.selected(),
            exclusive_mode: self.exclusive,
        }
    }

    // ===== Events =====

    /// Take all queued events in order
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::verdict::VerdictReason;
    use soul_audio_desktop::VirtualHost;
    use soul_core::{BitDepth, Codec, DepthOrigin};
    use soul_metadata::TrackTags;

    fn media(rate: u32, depth: BitDepth, secs: u64) -> ExtractedMedia {
        ExtractedMedia {
            characteristics: AudioCharacteristics {
                sample_rate_hz: rate,
                bit_depth: depth,
                depth_origin: DepthOrigin::Declared,
                channel_count: 2,
                codec: Codec::Flac,
            },
            duration: Duration::from_secs(secs),
            tags: TrackTags {
                title: "Song".to_string(),
                artist: "Artist".to_string(),
                album: "Album".to_string(),
            },
        }
    }

    fn session() -> (Arc<VirtualHost>, PlaybackSession) {
        let host = Arc::new(VirtualHost::with_reference_devices());
        let registry = Arc::new(DeviceRegistry::new(host.clone()));
        (host, PlaybackSession::new(&EngineConfig::default(), registry))
    }

    fn loaded(secs: u64) -> PlaybackSession {
        let (_, mut session) = session();
        let generation = session.begin_load(Path::new("/m/a.flac")).unwrap().unwrap();
        session
            .complete_load(generation, Ok(media(192_000, BitDepth::ThirtyTwo, secs)))
            .unwrap();
        session.drain_events();
        session
    }

    fn kinds(session: &mut PlaybackSession) -> Vec<EventKind> {
        session.drain_events().iter().map(PlaybackEvent::kind).collect()
    }

    #[test]
    fn load_rests_in_stopped_and_publishes_verdict() {
        let (_, mut session) = session();
        let generation = session.begin_load(Path::new("/m/a.flac")).unwrap().unwrap();
        assert_eq!(session.state(), PlaybackState::Loading);

        let outcome = session
            .complete_load(generation, Ok(media(192_000, BitDepth::ThirtyTwo, 60)))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert_eq!(session.state(), PlaybackState::Stopped);
        assert_eq!(session.duration(), Duration::from_secs(60));
        assert_eq!(
            kinds(&mut session),
            vec![EventKind::FileLoaded, EventKind::BitPerfectChanged]
        );
        assert_eq!(session.verdict().reason, VerdictReason::BitPerfectActive);
    }

    #[test]
    fn failed_load_keeps_prior_state_and_reports_once() {
        let mut session = loaded(60);
        session.play().unwrap();
        session.drain_events();

        let generation = session.begin_load(Path::new("/m/missing.flac")).unwrap().unwrap();
        let err = session
            .complete_load(
                generation,
                Err(MetadataError::unreadable("/m/missing.flac", "not found")),
            )
            .unwrap_err();

        assert!(err.is_unreadable_media());
        assert_eq!(session.state(), PlaybackState::Playing);
        assert_eq!(session.current_file(), Some(Path::new("/m/a.flac")));
        assert_eq!(kinds(&mut session), vec![EventKind::Error]);
    }

    #[test]
    fn stale_load_is_discarded() {
        let (_, mut session) = session();
        let first = session.begin_load(Path::new("/m/first.flac")).unwrap().unwrap();
        let second = session.begin_load(Path::new("/m/second.flac")).unwrap().unwrap();

        session
            .complete_load(second, Ok(media(48_000, BitDepth::TwentyFour, 30)))
            .unwrap();
        let late = session
            .complete_load(first, Ok(media(192_000, BitDepth::ThirtyTwo, 60)))
            .unwrap();

        assert_eq!(late, LoadOutcome::Superseded);
        assert_eq!(session.current_file(), Some(Path::new("/m/second.flac")));
        assert_eq!(session.characteristics().unwrap().sample_rate_hz, 48_000);
    }

    #[test]
    fn load_while_paused_is_rejected() {
        let mut session = loaded(60);
        session.play().unwrap();
        session.pause();
        assert!(matches!(
            session.begin_load(Path::new("/m/b.flac")),
            Err(PlaybackError::InvalidTransition {
                operation: "load",
                state: PlaybackState::Paused
            })
        ));
    }

    #[test]
    fn reloading_playing_file_is_a_no_op() {
        let mut session = loaded(60);
        session.play().unwrap();
        assert_eq!(session.begin_load(Path::new("/m/a.flac")).unwrap(), None);
        assert_eq!(session.state(), PlaybackState::Playing);
    }

    #[test]
    fn loading_over_playing_file_publishes_stopped_first() {
        let mut session = loaded(60);
        session.play().unwrap();
        session.drain_events();

        let generation = session.begin_load(Path::new("/m/b.flac")).unwrap().unwrap();
        session
            .complete_load(generation, Ok(media(44_100, BitDepth::Sixteen, 20)))
            .unwrap();
        assert_eq!(
            kinds(&mut session),
            vec![
                EventKind::Stopped,
                EventKind::FileLoaded,
                EventKind::BitPerfectChanged
            ]
        );
    }

    #[test]
    fn play_without_file_fails() {
        let (_, mut session) = session();
        assert!(matches!(session.play(), Err(PlaybackError::NoFileLoaded)));
    }

    #[test]
    fn started_carries_verdict() {
        let mut session = loaded(60);
        assert!(session.play().unwrap());
        let events = session.drain_events();
        match &events[..] {
            [PlaybackEvent::Started { path, verdict }] => {
                assert_eq!(path, Path::new("/m/a.flac"));
                assert!(verdict.is_bit_perfect);
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn play_without_device_reports_and_plays() {
        let (host, mut session) = session();
        host.set_devices(Vec::new());
        let generation = session.begin_load(Path::new("/m/a.flac")).unwrap().unwrap();
        session
            .complete_load(generation, Ok(media(44_100, BitDepth::Sixteen, 10)))
            .unwrap();
        session.drain_events();

        session.play().unwrap();
        assert_eq!(session.state(), PlaybackState::Playing);
        let events = session.drain_events();
        assert!(matches!(
            events.last(),
            Some(PlaybackEvent::Error {
                kind: ErrorKind::DeviceUnresolved,
                ..
            })
        ));
    }

    #[test]
    fn pause_from_stopped_and_play_from_playing_are_no_ops() {
        let mut session = loaded(60);
        assert!(!session.pause());
        assert_eq!(session.state(), PlaybackState::Stopped);

        session.play().unwrap();
        session.drain_events();
        assert!(!session.play().unwrap());
        assert_eq!(session.state(), PlaybackState::Playing);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn resume_from_pause() {
        let mut session = loaded(60);
        session.play().unwrap();
        session.pause();
        session.drain_events();

        session.play().unwrap();
        assert_eq!(kinds(&mut session), vec![EventKind::Resumed]);
    }

    #[test]
    fn stop_resets_position_and_publishes_once() {
        let mut session = loaded(60);
        session.play().unwrap();
        session.seek(30.0).unwrap();
        session.drain_events();

        assert!(session.stop());
        assert!(!session.stop());
        assert_eq!(session.position(), Duration::ZERO);
        assert_eq!(kinds(&mut session), vec![EventKind::Stopped]);
    }

    #[test]
    fn stop_cancels_pending_load() {
        let (_, mut session) = session();
        let generation = session.begin_load(Path::new("/m/a.flac")).unwrap().unwrap();
        session.stop();
        let outcome = session
            .complete_load(generation, Ok(media(44_100, BitDepth::Sixteen, 10)))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Superseded);
        assert!(session.current_file().is_none());
    }

    #[test]
    fn seek_clamps_to_bounds() {
        let mut session = loaded(60);
        session.play().unwrap();

        assert_eq!(session.seek(-5.0).unwrap(), Duration::ZERO);
        assert_eq!(session.seek(500.0).unwrap(), Duration::from_secs(60));
        assert_eq!(session.seek(f64::NAN).unwrap(), Duration::ZERO);
        assert_eq!(session.seek(12.5).unwrap(), Duration::from_millis(12_500));
    }

    #[test]
    fn seek_while_stopped_is_rejected() {
        let mut session = loaded(60);
        assert!(matches!(
            session.seek(1.0),
            Err(PlaybackError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn volume_clamps_and_ignores_nan() {
        let (_, mut session) = session();
        assert_eq!(session.set_volume(1.5), 1.0);
        assert_eq!(session.set_volume(-0.5), 0.0);
        assert_eq!(session.set_volume(f32::NAN), 0.0);
        assert_eq!(session.set_volume(0.25), 0.25);
        assert_eq!(
            kinds(&mut session),
            vec![EventKind::VolumeChanged, EventKind::VolumeChanged]
        );
    }

    #[test]
    fn exclusive_toggle_reevaluates_without_file() {
        let (host, mut session) = session();
        let verdict = session.set_exclusive(false);
        assert_eq!(verdict.reason, VerdictReason::NoFileLoaded);
        assert!(!host.is_exclusive());
        assert_eq!(
            kinds(&mut session),
            vec![EventKind::ExclusiveModeChanged, EventKind::BitPerfectChanged]
        );
    }

    #[test]
    fn device_change_reevaluates() {
        let mut session = loaded(60);
        assert!(session.set_device(&DeviceId::new("speakers")));
        assert_eq!(
            kinds(&mut session),
            vec![EventKind::DeviceChanged, EventKind::BitPerfectChanged]
        );
        assert_eq!(session.verdict().reason, VerdictReason::ConversionRequired);

        assert!(!session.set_device(&DeviceId::new("hdmi")));
        assert_eq!(kinds(&mut session), vec![EventKind::BitPerfectChanged]);
        assert_eq!(
            session.snapshot().selected_device,
            Some(DeviceId::new("speakers"))
        );
    }

    #[test]
    fn ticks_reach_end_exactly_once() {
        let mut session = loaded(10);
        session.play().unwrap();
        session.drain_events();
        let epoch = session.tick_epoch();

        let tick = Duration::from_millis(100);
        for _ in 0..99 {
            assert_eq!(session.advance(tick, epoch), TickOutcome::Advanced);
        }
        assert_eq!(session.advance(tick, epoch), TickOutcome::Ended);
        assert_eq!(session.advance(tick, epoch), TickOutcome::Stale);

        let events = session.drain_events();
        assert_eq!(
            events.iter().filter(|e| e.kind() == EventKind::Ended).count(),
            1
        );
        assert_eq!(
            events[events.len() - 2],
            PlaybackEvent::PositionChanged { seconds: 10.0 }
        );
        assert_eq!(session.state(), PlaybackState::Stopped);
        assert_eq!(session.position(), Duration::ZERO);
    }

    #[test]
    fn ticks_from_earlier_playing_period_are_ignored() {
        let mut session = loaded(10);
        session.play().unwrap();
        let old_epoch = session.tick_epoch();
        session.pause();
        session.play().unwrap();
        session.drain_events();

        assert_eq!(
            session.advance(Duration::from_millis(100), old_epoch),
            TickOutcome::Stale
        );
        assert!(session.drain_events().is_empty());
        assert_eq!(session.position(), Duration::ZERO);
    }
}
