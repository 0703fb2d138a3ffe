/// Playlist domain type
use crate::error::{CoreError, Result};
use crate::types::Track;
use serde::{Deserialize, Serialize};

/// Ordered, non-empty sequence of tracks
///
/// Fixed at construction. Cursor arithmetic wraps in both directions so the
/// player can loop forever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Track>", into = "Vec<Track>")]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create a playlist, rejecting an empty track list
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(CoreError::EmptyPlaylist);
        }
        Ok(Self { tracks })
    }

    /// Number of tracks (always at least one)
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Iterate over tracks in order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Index after `cursor`, wrapping to the start
    pub fn next_index(&self, cursor: usize) -> usize {
        (cursor + 1) % self.tracks.len()
    }

    /// Index before `cursor`, wrapping to the end
    pub fn previous_index(&self, cursor: usize) -> usize {
        (cursor + self.tracks.len() - 1) % self.tracks.len()
    }
}

impl TryFrom<Vec<Track>> for Playlist {
    type Error = CoreError;

    fn try_from(tracks: Vec<Track>) -> Result<Self> {
        Playlist::new(tracks)
    }
}

impl From<Playlist> for Vec<Track> {
    fn from(playlist: Playlist) -> Self {
        playlist.tracks
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
