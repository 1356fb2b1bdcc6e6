use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("track index {index} out of range (catalog holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Index state of the playlist transport.
///
/// Holds indices into the session catalog, never track data. Callers pass
/// the catalog length on every transition, so the state stays valid while
/// the catalog grows underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackState {
    current: usize,
    last: usize,
    shuffled: bool,
    repeating: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self { current: 0, last: 0, shuffled: false, repeating: false }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn last(&self) -> usize {
        self.last
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    /// Move to the next track: sequential wrap-around, or a uniform pick
    /// when shuffled. The pick deliberately does not exclude the current
    /// index, so a shuffled step may land on the same track again.
    pub fn advance(&mut self, len: usize, rng: &mut impl Rng) -> usize {
        if len == 0 {
            return self.current;
        }
        self.last = self.current;
        self.current = if self.shuffled {
            rng.random_range(0..len)
        } else {
            (self.current + 1) % len
        };
        self.current
    }

    /// Move to the previous track, wrapping from the front to the back.
    /// Shuffle applies here too.
    pub fn retreat(&mut self, len: usize, rng: &mut impl Rng) -> usize {
        if len == 0 {
            return self.current;
        }
        self.last = self.current;
        self.current = if self.shuffled {
            rng.random_range(0..len)
        } else {
            (self.current + len - 1) % len
        };
        self.current
    }

    /// Jump straight to `index`.
    pub fn select(&mut self, index: usize, len: usize) -> Result<usize, StateError> {
        if index >= len {
            return Err(StateError::IndexOutOfRange { index, len });
        }
        self.last = self.current;
        self.current = index;
        Ok(index)
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffled = !self.shuffled;
        self.shuffled
    }

    pub fn toggle_repeat(&mut self) -> bool {
        self.repeating = !self.repeating;
        self.repeating
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}
