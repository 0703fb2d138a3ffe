//! Test doubles for the media and analysis backends
#![allow(dead_code)]

use spiral_core::{Codec, MediaSource, Playlist, Settings, Track};
use spiral_playback::{AnalysisBackend, MediaBackend, PlaybackError, Result, TimeRange};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Route tracing output through the test harness
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("spiral_playback=debug"));
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Settings with one mp3 track per title
pub fn settings_with(titles: &[&str], autoplay: bool) -> Settings {
    let tracks = titles
        .iter()
        .map(|title| {
            Track::new(
                [(Codec::Mp3, format!("/music/{title}.mp3"))],
                Some((*title).to_string()),
            )
            .unwrap()
        })
        .collect();

    let mut settings = Settings::with_playlist(Playlist::new(tracks).unwrap());
    settings.autoplay = autoplay;
    settings.volume = 0.5;
    settings
}

/// Media element double
#[derive(Debug, Clone)]
pub struct MockMedia {
    pub paused: bool,
    pub time: f64,
    pub duration: Option<f64>,
    pub buffered: Vec<TimeRange>,
    pub loads: Vec<Vec<MediaSource>>,
    pub plays: usize,
    pub pauses: usize,
    pub fail_load: bool,
}

impl Default for MockMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMedia {
    pub fn new() -> Self {
        Self {
            paused: true,
            time: 0.0,
            duration: Some(180.0),
            buffered: Vec::new(),
            loads: Vec::new(),
            plays: 0,
            pauses: 0,
            fail_load: false,
        }
    }

    /// URL of the most recently loaded first source
    pub fn loaded_url(&self) -> Option<&str> {
        self.loads
            .last()
            .and_then(|sources| sources.first())
            .map(|s| s.url.as_str())
    }
}

impl MediaBackend for MockMedia {
    fn load(&mut self, sources: &[MediaSource], _autoplay: bool) -> Result<()> {
        if self.fail_load {
            return Err(PlaybackError::backend("load failed"));
        }
        self.paused = true;
        self.time = 0.0;
        self.loads.push(sources.to_vec());
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.paused = false;
        self.plays += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
        self.pauses += 1;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.time = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn buffered(&self) -> Vec<TimeRange> {
        self.buffered.clone()
    }
}

/// What the analysis double saw
#[derive(Debug, Default)]
pub struct AnalysisLog {
    pub connects: usize,
    pub gains: Vec<f32>,
}

/// Analysis graph double; fills time data with 128 and frequency data with 7
pub struct MockAnalysis {
    pub fft_size: usize,
    pub fail: bool,
    pub log: Rc<RefCell<AnalysisLog>>,
}

impl MockAnalysis {
    /// Double plus a handle on its log
    pub fn tracked(fft_size: usize) -> (Self, Rc<RefCell<AnalysisLog>>) {
        let log = Rc::new(RefCell::new(AnalysisLog::default()));
        (
            Self {
                fft_size,
                fail: false,
                log: Rc::clone(&log),
            },
            log,
        )
    }

    pub fn failing(fft_size: usize) -> (Self, Rc<RefCell<AnalysisLog>>) {
        let (mut analysis, log) = Self::tracked(fft_size);
        analysis.fail = true;
        (analysis, log)
    }
}

impl AnalysisBackend for MockAnalysis {
    fn connect(&mut self, gain: f32) -> Result<()> {
        self.log.borrow_mut().connects += 1;
        if self.fail {
            return Err(PlaybackError::analysis_unavailable("no audio context"));
        }
        self.log.borrow_mut().gains.push(gain);
        Ok(())
    }

    fn set_gain(&mut self, gain: f32) {
        self.log.borrow_mut().gains.push(gain);
    }

    fn fft_size(&self) -> usize {
        self.fft_size
    }

    fn time_domain_bytes(&mut self, out: &mut [u8]) {
        out.fill(128);
    }

    fn frequency_bytes(&mut self, out: &mut [u8]) {
        out.fill(7);
    }
}
