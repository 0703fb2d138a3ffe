//! Platform seams
//!
//! The controller never touches a media element, an audio graph or a
//! renderer directly. Hosts implement these traits (an HTML media element
//! behind wasm bindings, a native decoder, a test double) and feed the
//! media's lifecycle back in as [`MediaSignal`]s.

use crate::error::Result;
use crate::sampler::SampleFrame;
use crate::types::TimeRange;
use spiral_core::MediaSource;

/// Lifecycle signals raised by the media backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSignal {
    /// Enough data is buffered to start playing (may recur, e.g. after a seek)
    CanPlay,
    /// Playback reached the end of the track
    Ended,
    /// Media paused
    Pause,
    /// Media started playing
    Playing,
    /// Buffered ranges changed
    Progress,
    /// Current position changed
    TimeUpdate,
}

/// Media element contract
///
/// Implementors own the actual decoding/output. Loading replaces every
/// previously loaded source.
pub trait MediaBackend {
    /// Replace the current sources and start loading them
    ///
    /// Sources are given in preference order; the backend plays the first
    /// one it supports.
    fn load(&mut self, sources: &[MediaSource], autoplay: bool) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Whether the media is paused (true before the first play)
    fn is_paused(&self) -> bool;

    /// Current position in seconds
    fn current_time(&self) -> f64;

    /// Move to `seconds`
    fn set_current_time(&mut self, seconds: f64);

    /// Track length in seconds, once known
    fn duration(&self) -> Option<f64>;

    /// Buffered spans of the current track
    fn buffered(&self) -> Vec<TimeRange> {
        Vec::new()
    }
}

/// Audio-analysis graph contract (optional capability)
///
/// Models `source -> analyser -> gain -> output`. The analyser reads the
/// signal before the gain stage, so volume never changes the sampled data.
pub trait AnalysisBackend {
    /// Wire the tap into the output path with the given initial gain
    fn connect(&mut self, gain: f32) -> Result<()>;

    /// Set the gain stage multiplier (0.0-1.0)
    fn set_gain(&mut self, gain: f32);

    /// Analyser FFT length (time-domain sample count)
    fn fft_size(&self) -> usize;

    /// Number of frequency bins
    fn frequency_bin_count(&self) -> usize {
        self.fft_size() / 2
    }

    /// Fill `out` with unsigned 8-bit time-domain samples (128 = silence)
    fn time_domain_bytes(&mut self, out: &mut [u8]);

    /// Fill `out` with unsigned 8-bit frequency magnitudes
    fn frequency_bytes(&mut self, out: &mut [u8]);
}

/// Visualization sink
pub trait Renderer {
    /// Draw one frame of sampled data
    fn render(&mut self, frame: &SampleFrame);
}

impl<F> Renderer for F
where
    F: FnMut(&SampleFrame),
{
    fn render(&mut self, frame: &SampleFrame) {
        self(frame);
    }
}
