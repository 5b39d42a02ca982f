//! Playback engine
//!
//! [`PlaybackEngine`] is the single-writer front of a [`PlaybackSession`]:
//! every mutation takes the session lock, applies the transition, starts or
//! cancels the position ticker, and publishes the queued events in order
//! before the lock is released.
//!
//! Format extraction runs on tokio's blocking pool outside the lock; its
//! result is applied only if no newer load or stop happened meanwhile, and
//! is applied even if the caller stops waiting for it.
//! The ticker is a tokio task holding a weak reference to the engine. It is
//! aborted when playback leaves Playing, on [`PlaybackEngine::shutdown`], and
//! when the last engine handle is dropped.

use crate::error::{PlaybackError, Result};
use crate::events::{EventBus, EventKind, PlaybackEvent};
use crate::registry::DeviceRegistry;
use crate::session::{PlaybackSession, TickOutcome};
use crate::types::{EngineConfig, LoadOutcome, PlaybackState, SessionSnapshot};
use crate::verdict::{self, BitPerfectVerdict};
use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use soul_core::{DeviceCapability, DeviceId, MediaProbe, OsAudio};
use soul_metadata::{FormatExtractor, SymphoniaProbe};
use std::path::Path;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

struct Ticker {
    epoch: u64,
    handle: JoinHandle<()>,
}

struct Inner {
    config: EngineConfig,
    session: Mutex<PlaybackSession>,
    registry: Arc<DeviceRegistry>,
    extractor: FormatExtractor,
    bus: EventBus,
    ticker: Mutex<Option<Ticker>>,
}

impl Inner {
    fn publish_pending(&self, session: &mut PlaybackSession) {
        for event in session.drain_events() {
            self.bus.publish(event);
        }
    }

    fn tick(&self, epoch: u64, elapsed: Duration) -> TickOutcome {
        let mut session = self.session.lock();
        let outcome = session.advance(elapsed, epoch);
        self.publish_pending(&mut session);
        outcome
    }

    fn cancel_ticker(&self) {
        if let Some(ticker) = self.ticker.lock().take() {
            ticker.handle.abort();
            tracing::debug!(epoch = ticker.epoch, "position ticker cancelled");
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.get_mut().take() {
            ticker.handle.abort();
        }
    }
}

/// Playback engine handle
///
/// Cheap to clone; all clones drive the same session.
#[derive(Clone)]
pub struct PlaybackEngine {
    inner: Arc<Inner>,
}

impl PlaybackEngine {
    /// Create an engine over the given probe and OS audio host
    pub fn new(
        config: EngineConfig,
        probe: Arc<dyn MediaProbe>,
        host: Arc<dyn OsAudio>,
    ) -> Result<Self> {
        config.validate()?;

        let registry = Arc::new(DeviceRegistry::new(host));
        registry.set_exclusive(config.exclusive_mode);
        if let Some(id) = &config.preferred_device {
            registry.select_device(id);
        }

        let session = PlaybackSession::new(&config, registry.clone());

        tracing::info!(
            host = registry.host_name(),
            exclusive = config.exclusive_mode,
            tick_ms = config.tick_interval_ms,
            "playback engine ready"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                session: Mutex::new(session),
                registry,
                extractor: FormatExtractor::new(probe),
                bus: EventBus::new(),
                ticker: Mutex::new(None),
            }),
        })
    }

    /// Create an engine that reads files with symphonia/lofty
    pub fn with_symphonia(config: EngineConfig, host: Arc<dyn OsAudio>) -> Result<Self> {
        Self::new(config, Arc::new(SymphoniaProbe::new()), host)
    }

    // ===== Subscriptions =====

    /// Receive every event
    pub fn subscribe(&self) -> Receiver<PlaybackEvent> {
        self.inner.bus.subscribe()
    }

    /// Receive only the listed event kinds
    pub fn subscribe_to(&self, kinds: &[EventKind]) -> Receiver<PlaybackEvent> {
        self.inner.bus.subscribe_to(kinds)
    }

    // ===== Loading =====

    /// Load `path` as the current file
    ///
    /// The probe runs on the blocking pool. If another `load` (or `stop`)
    /// happens before it finishes, this call returns
    /// [`LoadOutcome::Superseded`] and its result is never published.
    ///
    /// The result is applied by a spawned task, so dropping this future
    /// does not leave the session in `Loading`.
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let path = path.as_ref().to_path_buf();

        let Some(generation) = self.mutate(|session| session.begin_load(&path))? else {
            return Ok(LoadOutcome::AlreadyLoaded);
        };

        let engine = self.clone();
        let task = tokio::spawn(async move {
            let extractor = engine.inner.extractor.clone();
            let probe_path = path.clone();
            let probed =
                tokio::task::spawn_blocking(move || extractor.extract_media(&probe_path)).await;

            match probed {
                Ok(result) => engine.mutate(|session| session.complete_load(generation, result)),
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "probe task failed");
                    engine.mutate(|session| session.abandon_load(generation));
                    Err(PlaybackError::Task(e.to_string()))
                }
            }
        });

        match task.await {
            Ok(result) => result,
            Err(e) => {
                self.mutate(|session| session.abandon_load(generation));
                Err(PlaybackError::Task(e.to_string()))
            }
        }
    }

    /// Load `path` unless it is already current, then play it
    pub async fn play_file(&self, path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let path = path.as_ref();
        let already_current = self.inner.session.lock().current_file() == Some(path);

        let outcome = if already_current {
            LoadOutcome::AlreadyLoaded
        } else {
            self.load(path).await?
        };

        if outcome != LoadOutcome::Superseded {
            self.play()?;
        }
        Ok(outcome)
    }

    // ===== Playback Control =====

    /// Start or resume playback; no-op if already playing
    pub fn play(&self) -> Result<()> {
        Handle::try_current().map_err(|_| PlaybackError::NoRuntime)?;
        self.mutate(PlaybackSession::play).map(|_| ())
    }

    /// Pause playback; no-op unless playing
    pub fn pause(&self) -> bool {
        self.mutate(PlaybackSession::pause)
    }

    /// Stop playback and reset position
    pub fn stop(&self) -> bool {
        self.mutate(PlaybackSession::stop)
    }

    /// Seek to `seconds`, clamped to the file's duration
    pub fn seek(&self, seconds: f64) -> Result<Duration> {
        self.mutate(|session| session.seek(seconds))
    }

    /// Set volume (clamped to 0.0 - 1.0); returns the effective volume
    pub fn set_volume(&self, volume: f32) -> f32 {
        self.mutate(|session| session.set_volume(volume))
    }

    /// Toggle exclusive mode; returns the re-evaluated verdict
    pub fn set_exclusive_mode(&self, exclusive: bool) -> BitPerfectVerdict {
        self.mutate(|session| session.set_exclusive(exclusive))
    }

    /// Select an output device; false if `id` is not currently enumerated
    pub fn set_device(&self, id: &DeviceId) -> bool {
        self.mutate(|session| session.set_device(id))
    }

    /// Stop the session and cancel the ticker
    pub fn shutdown(&self) {
        self.mutate(PlaybackSession::stop);
        self.inner.cancel_ticker();
        tracing::info!("playback engine shut down");
    }

    // ===== Queries =====

    /// Fresh bit-perfect verdict
    ///
    /// Session state is copied under the lock; devices are enumerated after
    /// it is released.
    pub fn get_bit_perfect_status(&self) -> BitPerfectVerdict {
        let (file, exclusive) = {
            let session = self.inner.session.lock();
            (session.characteristics(), session.is_exclusive())
        };
        let device = self.inner.registry.current_device();
        verdict::evaluate(file.as_ref(), device.as_ref(), exclusive)
    }

    /// Playback position
    pub fn get_position(&self) -> Duration {
        self.inner.session.lock().position()
    }

    /// Duration of the loaded file (zero if none)
    pub fn get_duration(&self) -> Duration {
        self.inner.session.lock().duration()
    }

    /// Enumerate output devices
    pub fn get_audio_devices(&self) -> Vec<DeviceCapability> {
        self.inner.registry.list_devices()
    }

    /// Device output currently resolves to
    pub fn current_device(&self) -> Option<DeviceCapability> {
        self.inner.registry.current_device()
    }

    /// Current state
    pub fn state(&self) -> PlaybackState {
        self.inner.session.lock().state()
    }

    /// Consistent copy of the session state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.session.lock().snapshot()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    // ===== Internals =====

    fn mutate<R>(&self, f: impl FnOnce(&mut PlaybackSession) -> R) -> R {
        let mut session = self.inner.session.lock();
        let out = f(&mut session);
        sync_ticker(&self.inner, &session);
        self.inner.publish_pending(&mut session);
        out
    }
}

impl std::fmt::Debug for PlaybackEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackEngine")
            .field("config", &self.inner.config)
            .field("registry", &self.inner.registry)
            .finish()
    }
}

/// Make the ticker match the session: one live ticker for the current
/// epoch while Playing, none otherwise. Called with the session locked.
fn sync_ticker(inner: &Arc<Inner>, session: &PlaybackSession) {
    if session.state() != PlaybackState::Playing {
        inner.cancel_ticker();
        return;
    }

    let epoch = session.tick_epoch();
    let mut ticker = inner.ticker.lock();
    if ticker
        .as_ref()
        .is_some_and(|t| t.epoch == epoch && !t.handle.is_finished())
    {
        return;
    }

    let Ok(runtime) = Handle::try_current() else {
        tracing::warn!("no tokio runtime; position will not advance");
        return;
    };

    let period = inner.config.tick_interval();
    let handle = runtime.spawn(run_ticker(Arc::downgrade(inner), epoch, period));
    if let Some(old) = ticker.replace(Ticker { epoch, handle }) {
        old.handle.abort();
    }
    tracing::debug!(epoch, period_ms = period.as_millis() as u64, "position ticker started");
}

async fn run_ticker(inner: Weak<Inner>, epoch: u64, period: Duration) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let Some(inner) = inner.upgrade() else {
            break;
        };
        if inner.tick(epoch, period) != TickOutcome::Advanced {
            break;
        }
    }
}
