/// Track domain type
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Audio container/codec a source URL is encoded with
///
/// Variants are declared in label order so `Ord` matches the lexical
/// order of the configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// MPEG-1 Layer III
    Mp3,
    /// Ogg Vorbis/Opus
    Ogg,
    /// WebM audio
    Webm,
}

impl Codec {
    /// Configuration label (`"mp3"`, `"ogg"`, `"webm"`)
    pub fn label(self) -> &'static str {
        match self {
            Codec::Mp3 => "mp3",
            Codec::Ogg => "ogg",
            Codec::Webm => "webm",
        }
    }

    /// MIME type handed to the media backend
    pub fn mime_type(self) -> &'static str {
        match self {
            Codec::Mp3 => "audio/mpeg",
            Codec::Ogg => "audio/ogg",
            Codec::Webm => "audio/webm",
        }
    }

    /// Parse a configuration label
    pub fn from_label(label: &str) -> Result<Self> {
        match label {
            "mp3" => Ok(Codec::Mp3),
            "ogg" => Ok(Codec::Ogg),
            "webm" => Ok(Codec::Webm),
            other => Err(CoreError::UnknownCodec(other.to_string())),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One encoding of a track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    /// Codec of the file behind `url`
    pub codec: Codec,

    /// Location the media backend loads from
    pub url: String,
}

impl MediaSource {
    /// MIME type of this source
    pub fn mime_type(&self) -> &'static str {
        self.codec.mime_type()
    }
}

/// Audio track
///
/// Deserializes from the flat configuration form
/// `{"mp3": "a.mp3", "ogg": "a.ogg", "title": "A"}`. Sources are kept in
/// reverse label order (`webm`, `ogg`, `mp3`), which is the order the
/// media backend should try them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTrack", into = "RawTrack")]
pub struct Track {
    sources: Vec<MediaSource>,
    title: Option<String>,
}

impl Track {
    /// Create a track from `(codec, url)` pairs
    ///
    /// Duplicate codecs keep the last URL given.
    pub fn new(
        sources: impl IntoIterator<Item = (Codec, String)>,
        title: Option<String>,
    ) -> Result<Self> {
        let by_codec: BTreeMap<Codec, String> = sources.into_iter().collect();
        if by_codec.is_empty() {
            return Err(CoreError::NoSources(title));
        }

        let sources = by_codec
            .into_iter()
            .rev()
            .map(|(codec, url)| MediaSource { codec, url })
            .collect();

        Ok(Self { sources, title })
    }

    /// Sources in preference order
    pub fn sources(&self) -> &[MediaSource] {
        &self.sources
    }

    /// Display title, if configured
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// URL for a specific codec
    pub fn source_for(&self, codec: Codec) -> Option<&str> {
        self.sources
            .iter()
            .find(|s| s.codec == codec)
            .map(|s| s.url.as_str())
    }
}

/// Flat wire form of a track
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(flatten)]
    sources: BTreeMap<String, String>,
}

impl TryFrom<RawTrack> for Track {
    type Error = CoreError;

    fn try_from(raw: RawTrack) -> Result<Self> {
        let sources = raw
            .sources
            .into_iter()
            .map(|(label, url)| Codec::from_label(&label).map(|codec| (codec, url)))
            .collect::<Result<Vec<_>>>()?;

        Track::new(sources, raw.title)
    }
}

impl From<Track> for RawTrack {
    fn from(track: Track) -> Self {
        Self {
            title: track.title,
            sources: track
                .sources
                .into_iter()
                .map(|s| (s.codec.label().to_string(), s.url))
                .collect(),
        }
    }
}
