//! Player events
//!
//! Event-based communication from the controller outwards. Observers
//! subscribe by event name; every handler for a name runs synchronously,
//! in registration order, before `emit` returns.
//! Events are emitted at key points:
//! - Media lifecycle (can play, playing, pause, ended)
//! - Track changes (title of the newly loaded track)
//! - Seek start/finish
//! - Buffering and position updates

use crate::types::TimeRange;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Media reported it can start playing
    CanPlay,

    /// Current track reached its end
    Ended,

    /// Playback paused
    Pause,

    /// Playback started or resumed
    Playing,

    /// Buffered ranges changed
    Progress {
        /// Buffered spans of the current track
        buffered: Vec<TimeRange>,
    },

    /// Playback position advanced
    TimeUpdate {
        /// Position in seconds
        current_time: f64,
    },

    /// A titled track was loaded
    Title {
        /// Track title
        title: String,
    },

    /// Position is being moved
    Seeking {
        /// Requested position in seconds
        current_time: f64,
    },

    /// Seek finished
    Seeked {
        /// Whether playback resumes after the seek
        resume: bool,
    },
}

impl PlayerEvent {
    /// Name this event is subscribed under
    pub fn kind(&self) -> EventKind {
        match self {
            PlayerEvent::CanPlay => EventKind::CanPlay,
            PlayerEvent::Ended => EventKind::Ended,
            PlayerEvent::Pause => EventKind::Pause,
            PlayerEvent::Playing => EventKind::Playing,
            PlayerEvent::Progress { .. } => EventKind::Progress,
            PlayerEvent::TimeUpdate { .. } => EventKind::TimeUpdate,
            PlayerEvent::Title { .. } => EventKind::Title,
            PlayerEvent::Seeking { .. } => EventKind::Seeking,
            PlayerEvent::Seeked { .. } => EventKind::Seeked,
        }
    }
}

/// Event names observers can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    CanPlay,
    Ended,
    Pause,
    Playing,
    Progress,
    TimeUpdate,
    Title,
    Seeking,
    Seeked,
}

impl EventKind {
    /// Wire name (`"canplay"`, `"timeupdate"`, ...)
    pub fn name(self) -> &'static str {
        match self {
            EventKind::CanPlay => "canplay",
            EventKind::Ended => "ended",
            EventKind::Pause => "pause",
            EventKind::Playing => "playing",
            EventKind::Progress => "progress",
            EventKind::TimeUpdate => "timeupdate",
            EventKind::Title => "title",
            EventKind::Seeking => "seeking",
            EventKind::Seeked => "seeked",
        }
    }

    /// Look up an event by wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "canplay" => EventKind::CanPlay,
            "ended" => EventKind::Ended,
            "pause" => EventKind::Pause,
            "playing" => EventKind::Playing,
            "progress" => EventKind::Progress,
            "timeupdate" => EventKind::TimeUpdate,
            "title" => EventKind::Title,
            "seeking" => EventKind::Seeking,
            "seeked" => EventKind::Seeked,
            _ => return None,
        })
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Boxed event observer
pub type EventHandler = Box<dyn FnMut(&PlayerEvent)>;

/// Named-event publish/subscribe
///
/// Maps each event name to an ordered list of handlers. There is no
/// unsubscribe; handlers live as long as the emitter.
#[derive(Default)]
pub struct EventEmitter {
    handlers: HashMap<EventKind, Vec<EventHandler>>,
}

impl EventEmitter {
    /// Create an emitter with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&PlayerEvent) + 'static,
    {
        self.handlers
            .entry(kind)
            .or_default()
            .push(Box::new(handler));
    }

    /// Run every handler registered for the event's name
    ///
    /// Emitting an event nobody listens to is a no-op.
    pub fn emit(&mut self, event: &PlayerEvent) {
        if let Some(handlers) = self.handlers.get_mut(&event.kind()) {
            for handler in handlers.iter_mut() {
                handler(event);
            }
        }
    }

    /// Number of handlers registered for `kind`
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<_> = self
            .handlers
            .iter()
            .map(|(kind, handlers)| (kind.name(), handlers.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("EventEmitter")
            .field("handlers", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn handlers_run_in_registration_order() {
        let mut emitter = EventEmitter::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for id in 0..3 {
            let log = Rc::clone(&log);
            emitter.subscribe(EventKind::Playing, move |_| log.borrow_mut().push(id));
        }

        emitter.emit(&PlayerEvent::Playing);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn emit_only_reaches_matching_name() {
        let mut emitter = EventEmitter::new();
        let titles = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&titles);
        emitter.subscribe(EventKind::Title, move |event| {
            if let PlayerEvent::Title { title } = event {
                sink.borrow_mut().push(title.clone());
            }
        });

        emitter.emit(&PlayerEvent::Pause);
        emitter.emit(&PlayerEvent::Title {
            title: "B".to_string(),
        });

        assert_eq!(*titles.borrow(), vec!["B".to_string()]);
    }

    #[test]
    fn emit_without_subscribers_is_noop() {
        let mut emitter = EventEmitter::new();
        emitter.emit(&PlayerEvent::Ended);
        assert_eq!(emitter.handler_count(EventKind::Ended), 0);
    }

    #[test]
    fn later_handlers_are_not_dropped() {
        let mut emitter = EventEmitter::new();
        let count = Rc::new(RefCell::new(0));

        for _ in 0..2 {
            let count = Rc::clone(&count);
            emitter.subscribe(EventKind::Seeked, move |_| *count.borrow_mut() += 1);
        }
        emitter.emit(&PlayerEvent::Seeked { resume: false });

        let late = Rc::clone(&count);
        emitter.subscribe(EventKind::Seeked, move |_| *late.borrow_mut() += 10);
        emitter.emit(&PlayerEvent::Seeked { resume: true });

        assert_eq!(emitter.handler_count(EventKind::Seeked), 3);
        assert_eq!(*count.borrow(), 2 + 12);
    }

    #[test]
    fn event_names_round_trip() {
        for kind in [
            EventKind::CanPlay,
            EventKind::Ended,
            EventKind::Pause,
            EventKind::Playing,
            EventKind::Progress,
            EventKind::TimeUpdate,
            EventKind::Title,
            EventKind::Seeking,
            EventKind::Seeked,
        ] {
            assert_eq!(EventKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(EventKind::from_name("resize"), None);
    }
}
