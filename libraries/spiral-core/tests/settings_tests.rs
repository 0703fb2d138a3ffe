//! Settings parsing tests
//!
//! Exercises the full JSON document the embedding page supplies.

use proptest::prelude::*;
use spiral_core::{Codec, CoreError, EffectPosition, Settings};

const FULL: &str = r#"
{
    "audio": [
        {"mp3": "/music/a.mp3", "ogg": "/music/a.ogg", "webm": "/music/a.webm", "title": "A"},
        {"mp3": "/music/b.mp3", "title": "B"},
        {"ogg": "/music/c.ogg"}
    ],
    "volume": 0.5,
    "size": 1024,
    "smoothing": 0.6,
    "mindecibels": -90,
    "maxdecibels": -10,
    "autoplay": true,
    "frame": 16,
    "container": "width: 100%; height: 300px;",
    "controls": "bottom: 0;",
    "title": "top: 0;",
    "effects": [
        {"style": "position: absolute;", "position": "bottommirror", "size": 3}
    ]
}
"#;

#[test]
fn full_document_parses() {
    let settings = Settings::from_json(FULL).unwrap();

    assert_eq!(settings.audio.len(), 3);
    assert_eq!(settings.volume, 0.5);
    assert_eq!(settings.fft_size(), 2048);
    assert_eq!(settings.smoothing, 0.6);
    assert!(settings.autoplay);
    assert_eq!(settings.frame, 16);
    assert_eq!(settings.container, "width: 100%; height: 300px;");
    assert_eq!(settings.primary_effect().position, EffectPosition::BottomMirror);

    let a = settings.audio.get(0).unwrap();
    let order: Vec<_> = a.sources().iter().map(|s| s.codec).collect();
    assert_eq!(order, vec![Codec::Webm, Codec::Ogg, Codec::Mp3]);

    let c = settings.audio.get(2).unwrap();
    assert_eq!(c.title(), None);
    assert_eq!(c.source_for(Codec::Ogg), Some("/music/c.ogg"));
}

#[test]
fn missing_playlist_is_rejected() {
    let err = Settings::from_json(r#"{"volume": 0.5}"#).unwrap_err();
    assert!(matches!(err, CoreError::Json(_)));
}

#[test]
fn settings_file_is_read_and_validated() {
    let dir = std::env::temp_dir().join(format!("spiral-core-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("settings.json");
    std::fs::write(&path, FULL).unwrap();

    let settings = Settings::from_path(&path).unwrap();
    assert_eq!(settings.audio.len(), 3);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Settings::from_path("/definitely/not/here/settings.json").unwrap_err();
    assert!(matches!(err, CoreError::Io(_)));
}

proptest! {
    /// Property: validation accepts exactly the power-of-two sizes
    #[test]
    fn size_validation_matches_power_of_two(size in 0usize..5000) {
        let json = format!(r#"{{"audio": [{{"mp3": "a.mp3"}}], "size": {size}}}"#);
        let accepted = Settings::from_json(&json).is_ok();
        prop_assert_eq!(accepted, size != 0 && size.is_power_of_two());
    }

    /// Property: any volume inside [0, 1] is accepted, anything outside rejected
    #[test]
    fn volume_validation_matches_range(volume in -2.0f32..2.0) {
        let json = format!(r#"{{"audio": [{{"mp3": "a.mp3"}}], "volume": {volume}}}"#);
        let accepted = Settings::from_json(&json).is_ok();
        prop_assert_eq!(accepted, (0.0..=1.0).contains(&volume));
    }
}
