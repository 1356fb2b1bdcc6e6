//! The playback-device seam between the controller and the audio engine.

use std::time::Duration;

use crate::library::AudioSource;

/// Notifications the device emits asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    /// Decoding got far enough to know the track duration; seek ranges and
    /// total-time displays become valid now.
    DataReady { duration: Duration },
    /// Playback reached the end of the loaded track. Not emitted while the
    /// device loops natively.
    Ended,
    /// Playback started or resumed.
    Play,
    /// Playback paused.
    Pause,
}

/// Contract of the underlying audio engine.
///
/// Implementations may run their own threads; every method here is
/// non-blocking. `poll_events` drains whatever notifications accumulated
/// since the last call, and `load` discards notifications still queued
/// from a previously loaded track.
pub trait PlaybackDevice {
    fn load(&mut self, source: &AudioSource);
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn position(&self) -> Duration;
    fn set_position(&mut self, position: Duration);
    /// `None` until the loaded track's duration is known.
    fn duration(&self) -> Option<Duration>;
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);
    fn muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);
    fn looping(&self) -> bool;
    fn set_looping(&mut self, looping: bool);
    fn poll_events(&mut self) -> Vec<DeviceEvent>;
}
