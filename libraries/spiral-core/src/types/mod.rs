//! Domain types shared by the player crates

mod playlist;
mod track;

pub use playlist::Playlist;
pub use track::{Codec, MediaSource, Track};
