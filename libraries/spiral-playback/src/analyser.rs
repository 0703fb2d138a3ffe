//! Software analysis backend
//!
//! FFT analyser over pushed mono PCM, producing the same byte arrays a
//! browser analyser node does:
//! - Time domain: `128 * (1 + x)` clamped to a byte
//! - Frequency: Blackman window, `|X| / N`, exponential smoothing over
//!   time, decibels mapped linearly from `[min_db, max_db]` onto 0-255
//!
//! The analyser reads the signal before the gain stage; [`process`]
//! applies the gain to the output buffer afterwards.
//!
//! [`process`]: SoftwareAnalyser::process

use crate::backend::AnalysisBackend;
use crate::error::{PlaybackError, Result};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use spiral_core::Settings;
use std::f32::consts::PI;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Analyser tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyserConfig {
    /// FFT length, a power of two
    pub fft_size: usize,
    /// Smoothing time constant (0.0-1.0)
    pub smoothing: f32,
    pub min_decibels: f32,
    pub max_decibels: f32,
}

impl AnalyserConfig {
    /// Analyser tuning taken from widget settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            fft_size: settings.fft_size(),
            smoothing: settings.smoothing,
            min_decibels: settings.mindecibels,
            max_decibels: settings.maxdecibels,
        }
    }
}

/// FFT-based [`AnalysisBackend`]
pub struct SoftwareAnalyser {
    config: AnalyserConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,

    /// Most recent `fft_size` samples; `write` is the oldest
    ring: Vec<f32>,
    write: usize,

    /// Smoothed magnitude per bin
    smoothed: Vec<f32>,
    scratch: Vec<Complex<f32>>,

    gain: f32,
    connected: bool,
}

impl SoftwareAnalyser {
    /// Create an analyser; the FFT length must be a power of two
    pub fn new(config: AnalyserConfig) -> Result<Self> {
        let n = config.fft_size;
        if n < 2 || !n.is_power_of_two() {
            return Err(PlaybackError::InvalidAnalyserSize(n));
        }

        let fft = FftPlanner::<f32>::new().plan_fft_forward(n);

        Ok(Self {
            config,
            fft,
            window: blackman_window(n),
            ring: vec![0.0; n],
            write: 0,
            smoothed: vec![0.0; n / 2],
            scratch: vec![Complex::new(0.0, 0.0); n],
            gain: 1.0,
            connected: false,
        })
    }

    /// Analyser tuned by widget settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(AnalyserConfig::from_settings(settings))
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    /// Current gain stage multiplier
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Whether the tap has been connected
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Feed pre-gain samples to the analyser
    pub fn push_samples(&mut self, samples: &[f32]) {
        let n = self.ring.len();
        for &sample in samples {
            self.ring[self.write] = sample;
            self.write = (self.write + 1) % n;
        }
    }

    /// Analyse a block, then apply the gain stage to it in place
    pub fn process(&mut self, buffer: &mut [f32]) {
        self.push_samples(buffer);
        if self.gain != 1.0 {
            for sample in buffer.iter_mut() {
                *sample *= self.gain;
            }
        }
    }

    /// Samples oldest to newest
    fn chronological(&self) -> impl Iterator<Item = f32> + '_ {
        self.ring[self.write..]
            .iter()
            .chain(&self.ring[..self.write])
            .copied()
    }

    fn db_to_byte(&self, db: f32) -> u8 {
        let range = self.config.max_decibels - self.config.min_decibels;
        let scaled = 255.0 * (db - self.config.min_decibels) / range;
        if scaled.is_nan() {
            0
        } else {
            scaled.clamp(0.0, 255.0) as u8
        }
    }
}

impl AnalysisBackend for SoftwareAnalyser {
    fn connect(&mut self, gain: f32) -> Result<()> {
        self.gain = gain;
        self.connected = true;
        debug!(fft_size = self.config.fft_size, gain, "Software analyser connected");
        Ok(())
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }

    fn fft_size(&self) -> usize {
        self.config.fft_size
    }

    fn time_domain_bytes(&mut self, out: &mut [u8]) {
        for (byte, sample) in out.iter_mut().zip(self.chronological()) {
            *byte = (128.0 * (1.0 + sample)).clamp(0.0, 255.0) as u8;
        }
    }

    fn frequency_bytes(&mut self, out: &mut [u8]) {
        let n = self.config.fft_size;

        let windowed: Vec<Complex<f32>> = self
            .chronological()
            .zip(&self.window)
            .map(|(sample, w)| Complex::new(sample * w, 0.0))
            .collect();
        self.scratch.copy_from_slice(&windowed);
        self.fft.process(&mut self.scratch);

        let tau = self.config.smoothing;
        for (bin, smoothed) in self.smoothed.iter_mut().enumerate() {
            let magnitude = self.scratch[bin].norm() / n as f32;
            *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;
        }

        for (byte, &magnitude) in out.iter_mut().zip(&self.smoothed) {
            *byte = self.db_to_byte(20.0 * magnitude.log10());
        }
    }
}

impl fmt::Debug for SoftwareAnalyser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftwareAnalyser")
            .field("config", &self.config)
            .field("gain", &self.gain)
            .field("connected", &self.connected)
            .finish_non_exhaustive()
    }
}

/// Blackman window (alpha = 0.16)
fn blackman_window(n: usize) -> Vec<f32> {
    let a0 = 0.42;
    let a1 = 0.5;
    let a2 = 0.08;
    (0..n)
        .map(|i| {
            let x = i as f32 / n as f32;
            a0 - a1 * (2.0 * PI * x).cos() + a2 * (4.0 * PI * x).cos()
        })
        .collect()
}
