//! Playback Events
//!
//! Typed notifications published by the engine. Each event kind is a
//! variant of [`PlaybackEvent`]; subscribers either take every kind
//! ([`EventBus::subscribe`]) or only the kinds they handle
//! ([`EventBus::subscribe_to`]).
//!
//! Events are published at most once per logical occurrence:
//! - State changes (started/paused/resumed/stopped/ended)
//! - File loads and the bit-perfect verdict that follows them
//! - Position updates (every tick while playing, and on seek)
//! - Volume, exclusive-mode and device changes

use crate::verdict::BitPerfectVerdict;
use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use soul_core::{AudioCharacteristics, DeviceId};
use soul_metadata::TrackTags;
use std::path::PathBuf;

/// Category of an `error` event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// File missing, unsupported container, or no audio stream
    UnreadableMedia,

    /// Playback started without a resolvable output device
    DeviceUnresolved,
}

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// Playback started from Stopped
    Started {
        path: PathBuf,
        /// Verdict at the moment playback started
        verdict: BitPerfectVerdict,
    },

    /// Playback paused
    Paused,

    /// Playback resumed from Paused
    Resumed,

    /// Session moved to Stopped
    Stopped,

    /// Track reached its end
    Ended { path: PathBuf },

    /// Position update
    PositionChanged { seconds: f64 },

    /// Volume changed (0.0 - 1.0)
    VolumeChanged { volume: f32 },

    /// A file became the session's current file
    FileLoaded {
        path: PathBuf,
        characteristics: AudioCharacteristics,
        duration_seconds: f64,
        tags: TrackTags,
    },

    /// Recoverable failure
    Error { kind: ErrorKind, message: String },

    /// Exclusive mode toggled
    ExclusiveModeChanged { exclusive: bool },

    /// Output device selection changed
    DeviceChanged { id: DeviceId },

    /// Fresh bit-perfect verdict
    BitPerfectChanged { verdict: BitPerfectVerdict },
}

/// Discriminant of [`PlaybackEvent`], used to scope subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Started,
    Paused,
    Resumed,
    Stopped,
    Ended,
    PositionChanged,
    VolumeChanged,
    FileLoaded,
    Error,
    ExclusiveModeChanged,
    DeviceChanged,
    BitPerfectChanged,
}

impl PlaybackEvent {
    /// Kind of this event
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Started { .. } => EventKind::Started,
            Self::Paused => EventKind::Paused,
            Self::Resumed => EventKind::Resumed,
            Self::Stopped => EventKind::Stopped,
            Self::Ended { .. } => EventKind::Ended,
            Self::PositionChanged { .. } => EventKind::PositionChanged,
            Self::VolumeChanged { .. } => EventKind::VolumeChanged,
            Self::FileLoaded { .. } => EventKind::FileLoaded,
            Self::Error { .. } => EventKind::Error,
            Self::ExclusiveModeChanged { .. } => EventKind::ExclusiveModeChanged,
            Self::DeviceChanged { .. } => EventKind::DeviceChanged,
            Self::BitPerfectChanged { .. } => EventKind::BitPerfectChanged,
        }
    }
}

struct Subscriber {
    kinds: Option<Vec<EventKind>>,
    tx: Sender<PlaybackEvent>,
}

impl Subscriber {
    fn wants(&self, kind: EventKind) -> bool {
        match &self.kinds {
            Some(kinds) => kinds.contains(&kind),
            None => true,
        }
    }
}

/// Fan-out of playback events to subscribers
///
/// Channels are unbounded so publishing never blocks the session. A
/// subscriber whose receiver was dropped is removed the next time an event
/// it would receive is published.
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl EventBus {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive every event
    pub fn subscribe(&self) -> Receiver<PlaybackEvent> {
        self.add(None)
    }

    /// Receive only the listed kinds
    pub fn subscribe_to(&self, kinds: &[EventKind]) -> Receiver<PlaybackEvent> {
        self.add(Some(kinds.to_vec()))
    }

    fn add(&self, kinds: Option<Vec<EventKind>>) -> Receiver<PlaybackEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.lock().push(Subscriber { kinds, tx });
        rx
    }

    /// Deliver `event` to every interested subscriber
    pub fn publish(&self, event: PlaybackEvent) {
        let kind = event.kind();
        self.subscribers.lock().retain(|subscriber| {
            !subscriber.wants(kind) || subscriber.tx.send(event.clone()).is_ok()
        });
    }

    /// Number of live subscribers as of the last publish
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_receives_everything() {
        let bus = EventBus::new();
        let rx = bus.subscribe();

        bus.publish(PlaybackEvent::Paused);
        bus.publish(PlaybackEvent::VolumeChanged { volume: 0.5 });

        let kinds: Vec<_> = rx.try_iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![EventKind::Paused, EventKind::VolumeChanged]);
    }

    #[test]
    fn scoped_subscription_filters_kinds() {
        let bus = EventBus::new();
        let rx = bus.subscribe_to(&[EventKind::Ended]);

        bus.publish(PlaybackEvent::PositionChanged { seconds: 1.0 });
        bus.publish(PlaybackEvent::Ended {
            path: PathBuf::from("/m/a.flac"),
        });

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::Ended);
    }

    #[test]
    fn dropped_receivers_are_pruned() {
        let bus = EventBus::new();
        let keep = bus.subscribe();
        let dropped = bus.subscribe();
        let scoped = bus.subscribe_to(&[EventKind::Ended]);
        drop(dropped);
        drop(scoped);

        bus.publish(PlaybackEvent::Stopped);
        assert_eq!(bus.subscriber_count(), 2);
        assert_eq!(keep.try_recv().unwrap(), PlaybackEvent::Stopped);

        bus.publish(PlaybackEvent::Ended {
            path: PathBuf::from("/m/a.flac"),
        });
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn events_serialize_with_camel_case_tag() {
        let json = serde_json::to_string(&PlaybackEvent::PositionChanged { seconds: 2.5 }).unwrap();
        assert_eq!(json, r#"{"type":"positionChanged","seconds":2.5}"#);
    }
}
