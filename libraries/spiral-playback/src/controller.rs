//! Playback controller - transport state machine
//!
//! Owns the playlist cursor, the media backend and the optional analysis
//! tap. Media lifecycle arrives as [`MediaSignal`]s; everything observable
//! leaves as [`PlayerEvent`]s through the synchronous [`EventEmitter`].
//! An owner that routes events itself (the [`Player`](crate::Player))
//! builds the controller with [`PlaybackController::with_event_queue`] and
//! drains the queue after every input.

use crate::{
    backend::{AnalysisBackend, MediaBackend, MediaSignal},
    events::{EventEmitter, EventKind, PlayerEvent},
    sampler::{FrameSource, SampleFrame},
    types::{PlaybackState, TimeRange},
    volume::Volume,
};
use spiral_core::{Playlist, Settings, Track};
use tracing::{debug, info, warn};

/// Transport controller for one widget
pub struct PlaybackController<M: MediaBackend> {
    playlist: Playlist,
    autoplay: bool,
    cursor: usize,
    state: PlaybackState,

    /// Media reported "can play" for the current track
    can_play: bool,

    /// Resume after the seek in progress
    seek_resume: bool,
    /// State to restore when the seek finishes
    pre_seek_state: PlaybackState,

    media: M,
    analysis: Option<Box<dyn AnalysisBackend>>,

    /// Tap setup ran (successfully or not); never retried
    tap_attempted: bool,
    tap_connected: bool,

    volume: Volume,
    emitter: EventEmitter,

    /// Only filled when an owner drains it
    queue_events: bool,
    pending_events: Vec<PlayerEvent>,
}

impl<M: MediaBackend> PlaybackController<M> {
    /// Create a controller and load the first track without playing it
    ///
    /// Events reach subscribers only; nothing is queued.
    pub fn new(settings: Settings, media: M, analysis: Option<Box<dyn AnalysisBackend>>) -> Self {
        Self::build(settings, media, analysis, false)
    }

    /// Create a controller that also queues every event for [`drain_events`]
    ///
    /// The owner must drain after each call into the controller.
    ///
    /// [`drain_events`]: PlaybackController::drain_events
    pub fn with_event_queue(
        settings: Settings,
        media: M,
        analysis: Option<Box<dyn AnalysisBackend>>,
    ) -> Self {
        Self::build(settings, media, analysis, true)
    }

    fn build(
        settings: Settings,
        media: M,
        analysis: Option<Box<dyn AnalysisBackend>>,
        queue_events: bool,
    ) -> Self {
        let Settings {
            audio,
            autoplay,
            volume,
            ..
        } = settings;

        let mut controller = Self {
            playlist: audio,
            autoplay,
            cursor: 0,
            state: PlaybackState::Idle,
            can_play: false,
            seek_resume: false,
            pre_seek_state: PlaybackState::Idle,
            media,
            analysis,
            tap_attempted: false,
            tap_connected: false,
            volume: Volume::new(volume),
            emitter: EventEmitter::new(),
            queue_events,
            pending_events: Vec::new(),
        };
        controller.load_current();
        controller
    }

    // ===== Observation =====

    /// Register a synchronous observer for `kind`
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&PlayerEvent) + 'static,
    {
        self.emitter.subscribe(kind, handler);
    }

    /// Take all events queued since the last drain (always empty unless
    /// built with [`with_event_queue`](PlaybackController::with_event_queue))
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are undrained events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.emitter.emit(&event);
        if self.queue_events {
            self.pending_events.push(event);
        }
    }

    // ===== Playlist =====

    /// Advance to the next track, wrapping to the first
    pub fn next(&mut self) {
        self.cursor = self.playlist.next_index(self.cursor);
        self.load_current();
    }

    /// Go back to the previous track, wrapping to the last
    pub fn last(&mut self) {
        self.cursor = self.playlist.previous_index(self.cursor);
        self.load_current();
    }

    fn load_current(&mut self) {
        self.pause();

        let title = match self.playlist.get(self.cursor) {
            Some(track) => track.title().map(str::to_owned),
            None => return,
        };

        self.state = PlaybackState::Loading;
        self.can_play = false;

        if let Some(title) = title {
            self.emit(PlayerEvent::Title { title });
        }

        let Some(track) = self.playlist.get(self.cursor) else {
            return;
        };

        info!(
            cursor = self.cursor,
            title = track.title().unwrap_or(""),
            sources = track.sources().len(),
            "Loading track"
        );

        if let Err(e) = self.media.load(track.sources(), self.autoplay) {
            warn!(cursor = self.cursor, error = %e, "Media backend failed to load track");
        }
    }

    // ===== Media signals =====

    /// Feed a lifecycle signal from the media backend
    pub fn handle_signal(&mut self, signal: MediaSignal) {
        match signal {
            MediaSignal::CanPlay => self.on_can_play(),
            MediaSignal::Ended => {
                self.emit(PlayerEvent::Ended);
                self.next();
            }
            MediaSignal::Pause => {
                if self.state == PlaybackState::Playing {
                    self.state = PlaybackState::Paused;
                    self.emit(PlayerEvent::Pause);
                }
            }
            MediaSignal::Playing => {
                if !matches!(self.state, PlaybackState::Playing | PlaybackState::Seeking) {
                    self.state = PlaybackState::Playing;
                    self.emit(PlayerEvent::Playing);
                }
            }
            MediaSignal::Progress => {
                let buffered = self.media.buffered();
                self.emit(PlayerEvent::Progress { buffered });
            }
            MediaSignal::TimeUpdate => {
                let current_time = self.media.current_time();
                self.emit(PlayerEvent::TimeUpdate { current_time });
            }
        }
    }

    fn on_can_play(&mut self) {
        self.can_play = true;
        if matches!(self.state, PlaybackState::Loading | PlaybackState::Idle) {
            self.state = PlaybackState::Ready;
        }
        self.emit(PlayerEvent::CanPlay);

        if !self.tap_attempted {
            self.tap_attempted = true;
            self.connect_tap();
        }

        if self.autoplay {
            self.play();
        }
    }

    fn connect_tap(&mut self) {
        let gain = self.volume.gain();
        match self.analysis.as_mut() {
            Some(analysis) => match analysis.connect(gain) {
                Ok(()) => {
                    info!(fft_size = analysis.fft_size(), "Analysis tap connected");
                    self.tap_connected = true;
                }
                Err(e) => {
                    warn!(error = %e, "Analysis tap failed, visualization disabled");
                }
            },
            None => {
                warn!("No analysis backend, visualization disabled");
            }
        }
    }

    // ===== Transport =====

    /// Start playback
    ///
    /// Ignored unless the media can play, no seek is in progress and the
    /// media is paused. Returns whether playback was started.
    pub fn play(&mut self) -> bool {
        if !self.can_play || self.state == PlaybackState::Seeking || !self.media.is_paused() {
            debug!(state = ?self.state, can_play = self.can_play, "Ignoring play request");
            return false;
        }

        if let Err(e) = self.media.play() {
            warn!(error = %e, "Media backend refused to play");
            return false;
        }

        self.state = PlaybackState::Playing;
        self.emit(PlayerEvent::Playing);
        true
    }

    /// Pause playback
    ///
    /// Ignored unless playing. Returns whether playback was paused.
    pub fn pause(&mut self) -> bool {
        if self.media.is_paused() {
            return false;
        }

        self.media.pause();
        if self.state != PlaybackState::Seeking {
            self.state = PlaybackState::Paused;
        }
        self.emit(PlayerEvent::Pause);
        true
    }

    /// Play when paused, pause otherwise
    pub fn toggle(&mut self) -> bool {
        if self.media.is_paused() {
            self.play()
        } else {
            self.pause()
        }
    }

    /// Move to `seconds`, entering Seeking
    ///
    /// Repeated calls during one seek (a drag) only move the position.
    pub fn seek(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            debug!(seconds, "Ignoring seek to a non-finite position");
            return;
        }

        if self.state != PlaybackState::Seeking {
            self.seek_resume = !self.media.is_paused();
            self.pause();
            self.pre_seek_state = self.state;
            self.state = PlaybackState::Seeking;
        }

        let seconds = match self.media.duration() {
            Some(duration) if duration.is_finite() => seconds.clamp(0.0, duration),
            _ => seconds.max(0.0),
        };

        self.media.set_current_time(seconds);
        self.emit(PlayerEvent::Seeking {
            current_time: seconds,
        });
    }

    /// Finish the seek in progress, resuming if it began while playing
    pub fn finish_seek(&mut self) {
        let resume = self.seek_resume;
        self.finish_seek_with(resume);
    }

    /// Finish the seek in progress with an explicit resume decision
    pub fn finish_seek_with(&mut self, resume: bool) {
        if self.state != PlaybackState::Seeking {
            debug!(state = ?self.state, "No seek in progress");
            return;
        }

        self.state = match self.pre_seek_state {
            // "can play" may have arrived mid-seek
            PlaybackState::Loading | PlaybackState::Idle if self.can_play => PlaybackState::Ready,
            prior => prior,
        };
        self.seek_resume = false;
        self.emit(PlayerEvent::Seeked { resume });

        if resume {
            self.play();
        }
    }

    // ===== Volume =====

    /// Set the gain level (0.0-1.0); zero mutes
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.apply_gain();
    }

    /// Toggle mute, restoring the previous level on unmute
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_gain();
    }

    fn apply_gain(&mut self) {
        if !self.tap_connected {
            return;
        }
        if let Some(analysis) = self.analysis.as_mut() {
            analysis.set_gain(self.volume.gain());
        }
    }

    // ===== Accessors =====

    /// Transport state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index of the current track
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current track
    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.cursor)
    }

    /// Loaded playlist
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Track length, known only once the media can play
    pub fn duration(&self) -> Option<f64> {
        if self.can_play {
            self.media.duration()
        } else {
            None
        }
    }

    /// Current position in seconds
    pub fn current_time(&self) -> f64 {
        self.media.current_time()
    }

    /// Buffered spans of the current track
    pub fn buffered(&self) -> Vec<TimeRange> {
        self.media.buffered()
    }

    /// Whether the media is paused
    pub fn is_paused(&self) -> bool {
        self.media.is_paused()
    }

    /// Whether the media reported it can play the current track
    pub fn can_play(&self) -> bool {
        self.can_play
    }

    /// Volume state
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Media backend
    pub fn media(&self) -> &M {
        &self.media
    }

    /// Mutable media backend
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Whether the analysis tap is connected
    pub fn sampling_enabled(&self) -> bool {
        self.tap_connected
    }
}

impl<M: MediaBackend> FrameSource for PlaybackController<M> {
    fn is_paused(&self) -> bool {
        self.media.is_paused()
    }

    fn capture_frame(&mut self, cap: usize) -> Option<SampleFrame> {
        if !self.tap_connected {
            return None;
        }
        let analysis = self.analysis.as_mut()?;

        let mut frame = SampleFrame::with_lengths(
            analysis.fft_size().min(cap),
            analysis.frequency_bin_count().min(cap),
        );
        analysis.time_domain_bytes(&mut frame.time_domain);
        analysis.frequency_bytes(&mut frame.frequency);
        Some(frame)
    }
}

impl<M: MediaBackend + std::fmt::Debug> std::fmt::Debug for PlaybackController<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("cursor", &self.cursor)
            .field("state", &self.state)
            .field("can_play", &self.can_play)
            .field("tap_connected", &self.tap_connected)
            .field("volume", &self.volume)
            .field("media", &self.media)
            .finish_non_exhaustive()
    }
}
