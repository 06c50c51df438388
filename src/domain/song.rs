use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

use serde::Serialize;

/// Represents a song in the catalog.
///
/// Two songs are the same song when name, album and duration all match,
/// so adding an exact duplicate to a catalog has no effect.
#[derive(Debug, Clone, Serialize)]
pub struct Song {
    pub name: String,
    pub album: Option<String>,
    /// seconds
    pub duration: f64,
}

impl Song {
    pub fn new(name: impl Into<String>, album: Option<String>, duration: f64) -> Self {
        Self {
            name: name.into(),
            album,
            duration,
        }
    }

    pub fn album(&self) -> Option<&str> {
        self.album.as_deref()
    }

    pub fn belongs_to(&self, album: &str) -> bool {
        self.album() == Some(album)
    }

    /// bit pattern used for equality and hashing, `-0.0` folded into `0.0`
    fn duration_bits(&self) -> u64 {
        if self.duration == 0.0 {
            0.0f64.to_bits()
        } else {
            self.duration.to_bits()
        }
    }
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.album == other.album
            && self.duration_bits() == other.duration_bits()
    }
}

impl Eq for Song {}

impl Hash for Song {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.album.hash(state);
        self.duration_bits().hash(state);
    }
}

impl Display for Song {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.album {
            Some(album) => write!(
                f,
                "Song [name={}, album={}, duration={}]",
                self.name, album, self.duration
            ),
            None => write!(
                f,
                "Song [name={}, album=<none>, duration={}]",
                self.name, self.duration
            ),
        }
    }
}
