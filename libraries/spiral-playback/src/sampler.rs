//! Sampler loop
//!
//! While the media plays, a fixed-interval timer pulls analysis data and
//! hands it to the renderer. The loop starts lazily on the first `playing`
//! event and stops itself the first time a tick finds the media paused.
//! The timer lives in [`Player::run`](crate::Player::run); this type only
//! holds the loop's state and the work done per tick.

use crate::backend::Renderer;
use std::time::Duration;
use tracing::{debug, trace};

/// One tick's worth of analysis data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleFrame {
    /// Unsigned 8-bit waveform samples (128 = silence)
    pub time_domain: Vec<u8>,

    /// Unsigned 8-bit frequency magnitudes, lowest bin first
    pub frequency: Vec<u8>,
}

impl SampleFrame {
    /// Zeroed frame with the given array lengths
    pub fn with_lengths(time_len: usize, freq_len: usize) -> Self {
        Self {
            time_domain: vec![0; time_len],
            frequency: vec![0; freq_len],
        }
    }
}

/// Something the sampler can pull frames from
pub trait FrameSource {
    /// Whether the media is paused
    fn is_paused(&self) -> bool;

    /// Capture one frame with both arrays capped at `cap` entries
    ///
    /// Returns `None` when no analysis data is available.
    fn capture_frame(&mut self, cap: usize) -> Option<SampleFrame>;
}

/// Outcome of a sampler tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerTick {
    /// A frame was rendered
    Rendered,
    /// Playing, but no analysis data was available
    Skipped,
    /// Media was paused; the loop stopped itself
    Stopped,
    /// Loop was not running
    Inactive,
}

/// Fixed-interval visualization driver state
#[derive(Debug, Clone)]
pub struct SamplerLoop {
    interval: Duration,
    active: bool,
    cap: usize,
    frames: u64,
}

impl SamplerLoop {
    /// Create an idle loop ticking every `interval`
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            active: false,
            cap: usize::MAX,
            frames: 0,
        }
    }

    /// Tick interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a timer should be running
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Per-array sample cap
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Set the per-array sample cap (recomputed on resize)
    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
    }

    /// Frames rendered since creation
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Handle a `playing` event
    ///
    /// Returns true if this started the loop. At most one timer runs, so a
    /// `playing` event while active does nothing.
    pub fn on_playing(&mut self) -> bool {
        if self.active {
            return false;
        }
        debug!(interval_ms = self.interval.as_millis(), "Sampler loop started");
        self.active = true;
        true
    }

    /// Run one tick
    pub fn tick<S, R>(&mut self, source: &mut S, renderer: &mut R) -> SamplerTick
    where
        S: FrameSource + ?Sized,
        R: Renderer + ?Sized,
    {
        if !self.active {
            return SamplerTick::Inactive;
        }

        if source.is_paused() {
            debug!(frames = self.frames, "Sampler loop stopped on pause");
            self.active = false;
            return SamplerTick::Stopped;
        }

        match source.capture_frame(self.cap) {
            Some(frame) => {
                trace!(
                    time_len = frame.time_domain.len(),
                    freq_len = frame.frequency.len(),
                    "Rendering frame"
                );
                renderer.render(&frame);
                self.frames += 1;
                SamplerTick::Rendered
            }
            None => SamplerTick::Skipped,
        }
    }
}
