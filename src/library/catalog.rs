use super::model::Track;
use super::seed;

/// Ordered, append-only collection of the session's tracks.
///
/// Insertion order is display order is addressable index: entries are
/// never reordered or removed while the player runs, so indices held by
/// the transport stay valid as the catalog grows.
#[derive(Debug)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// Catalog pre-populated with the built-in seed tracks.
    pub fn seeded() -> Self {
        Self::new(seed::seed_tracks())
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Append a track, returning the index it landed on.
    pub fn push(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        self.tracks.len() - 1
    }
}
