//! Property-based tests for the controller, drag bars and volume
//!
//! Uses proptest to verify invariants across many random inputs.

mod test_helpers;

use proptest::prelude::*;
use spiral_playback::{
    AnalyserConfig, AnalysisBackend, BarGeometry, DragBar, MediaSignal, PlaybackController,
    PlaybackState, SoftwareAnalyser, Volume,
};
use test_helpers::{settings_with, MockMedia};

fn titles(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("T{i}")).collect()
}

fn controller(n: usize) -> PlaybackController<MockMedia> {
    let names = titles(n);
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    PlaybackController::new(settings_with(&refs, false), MockMedia::new(), None)
}

proptest! {
    /// Property: N calls to next() on an N-track playlist return to the start
    #[test]
    fn next_n_times_returns_to_start(n in 1usize..20, start in 0usize..20) {
        let mut c = controller(n);
        for _ in 0..(start % n) {
            c.next();
        }
        let origin = c.cursor();

        for _ in 0..n {
            c.next();
        }
        prop_assert_eq!(c.cursor(), origin);

        for _ in 0..n {
            c.last();
        }
        prop_assert_eq!(c.cursor(), origin);
    }

    /// Property: play() never double-starts, whatever the signal sequence
    #[test]
    fn play_never_double_starts(ops in prop::collection::vec(0u8..4, 1..40)) {
        let mut c = controller(2);
        for op in ops {
            let was_playing = !c.is_paused();
            let started = match op {
                0 => c.play(),
                1 => { c.pause(); false }
                2 => { c.handle_signal(MediaSignal::CanPlay); false }
                _ => { c.next(); false }
            };
            if started {
                prop_assert!(!was_playing);
                prop_assert_eq!(c.state(), PlaybackState::Playing);
            }
        }
    }

    /// Property: drag ratio is monotonic in pointer position and clamped
    #[test]
    fn drag_ratio_monotonic_and_clamped(
        bar_width in 20.0f64..1000.0,
        button_width in 1.0f64..19.0,
        a in -500.0f64..1500.0,
        b in -500.0f64..1500.0,
    ) {
        let geometry = BarGeometry::new(bar_width, button_width).unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let mut first = DragBar::new(geometry);
        first.place_at_pointer(lo);
        let mut second = DragBar::new(geometry);
        second.place_at_pointer(hi);

        prop_assert!((0.0..=1.0).contains(&first.ratio()));
        prop_assert!((0.0..=1.0).contains(&second.ratio()));
        prop_assert!(first.ratio() <= second.ratio());
    }

    /// Property: mute then unmute restores the exact level
    #[test]
    fn mute_round_trip_is_exact(level in 0.001f32..=1.0) {
        let mut volume = Volume::new(0.5);
        volume.set_level(level);
        volume.toggle_mute();
        prop_assert_eq!(volume.gain(), 0.0);
        volume.toggle_mute();
        prop_assert_eq!(volume.level(), level);
    }

    /// Property: analyser output stays within its arrays for any input
    #[test]
    fn analyser_fills_requested_lengths(
        samples in prop::collection::vec(-2.0f32..2.0, 0..600),
        len in 0usize..300,
    ) {
        let mut analyser = SoftwareAnalyser::new(AnalyserConfig {
            fft_size: 256,
            smoothing: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        })
        .unwrap();
        analyser.push_samples(&samples);

        let mut time = vec![1u8; len];
        let mut freq = vec![1u8; len];
        analyser.time_domain_bytes(&mut time);
        analyser.frequency_bytes(&mut freq);

        if samples.is_empty() {
            prop_assert!(time.iter().take(256).all(|&b| b == 128));
        }
        prop_assert!(time.iter().skip(256).all(|&b| b == 1));
        prop_assert!(freq.iter().skip(128).all(|&b| b == 1));
    }
}
