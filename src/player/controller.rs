//! The controller glues the transport state machine, the catalog and the
//! playback device together, and tells the UI when to redraw.

use std::time::Duration;

use tracing::debug;

use crate::library::{Catalog, ImportReport, MetadataResolver, Track, UploadedFile, import_files};

use super::device::{DeviceEvent, PlaybackDevice};
use super::state::{PlaybackState, StateError};

/// Coarse volume bucket for the transport's speaker icon.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VolumeIcon {
    Muted,
    Low,
    Medium,
    High,
}

/// Immutable view of the player, emitted on every refresh.
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub index: usize,
    pub track: Track,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub playing: bool,
    pub shuffled: bool,
    pub repeating: bool,
    pub volume: f32,
    pub muted: bool,
    /// Bumped on every track load. A consumer holding an async result can
    /// compare generations and drop anything that raced a newer selection.
    pub generation: u64,
}

type RefreshFn = Box<dyn FnMut(&PlayerSnapshot)>;

/// Single-threaded transport orchestrator. Every catalog and transport
/// mutation goes through here; the device does its own work on its own
/// thread and reports back through `poll_events`.
pub struct PlayerController<D: PlaybackDevice> {
    catalog: Catalog,
    state: PlaybackState,
    device: D,
    generation: u64,
    poll_active: bool,
    on_refresh: Option<RefreshFn>,
}

impl<D: PlaybackDevice> PlayerController<D> {
    pub fn new(catalog: Catalog, device: D) -> Self {
        Self {
            catalog,
            state: PlaybackState::new(),
            device,
            generation: 0,
            poll_active: false,
            on_refresh: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn current_index(&self) -> usize {
        self.state.current()
    }

    /// Track under the transport cursor, re-read from the catalog on every
    /// call so a grown catalog is always reflected.
    pub fn current_track(&self) -> Option<&Track> {
        self.catalog.get(self.state.current())
    }

    pub fn volume(&self) -> f32 {
        self.device.volume()
    }

    /// Register the UI refresh callback.
    pub fn on_refresh(&mut self, callback: impl FnMut(&PlayerSnapshot) + 'static) {
        self.on_refresh = Some(Box::new(callback));
    }

    pub fn snapshot(&self) -> Option<PlayerSnapshot> {
        let index = self.state.current();
        let track = self.catalog.get(index)?.clone();
        Some(PlayerSnapshot {
            index,
            track,
            position: self.device.position(),
            duration: self.device.duration(),
            playing: !self.device.is_paused(),
            shuffled: self.state.is_shuffled(),
            repeating: self.state.is_repeating(),
            volume: self.device.volume(),
            muted: self.device.muted(),
            generation: self.generation,
        })
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        if let (Some(snapshot), Some(callback)) = (snapshot, self.on_refresh.as_mut()) {
            callback(&snapshot);
        }
    }

    /// Load the current track, rewind, start playing, notify.
    fn start_current(&mut self) {
        let Some(track) = self.catalog.get(self.state.current()) else {
            return;
        };
        let source = track.source.clone();
        self.device.load(&source);
        self.device.set_position(Duration::ZERO);
        self.device.play();
        self.poll_active = true;
        self.generation += 1;
        self.notify();
    }

    pub fn advance(&mut self) {
        self.state.advance(self.catalog.len(), &mut rand::rng());
        self.start_current();
    }

    pub fn retreat(&mut self) {
        self.state.retreat(self.catalog.len(), &mut rand::rng());
        self.start_current();
    }

    pub fn select(&mut self, index: usize) -> Result<(), StateError> {
        self.state.select(index, self.catalog.len())?;
        self.start_current();
        Ok(())
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        let on = self.state.toggle_shuffle();
        self.notify();
        on
    }

    /// Repeat maps straight onto the device's native looping, so a repeated
    /// track restarts inside the device without a transition here.
    pub fn toggle_repeat(&mut self) -> bool {
        let on = self.state.toggle_repeat();
        self.device.set_looping(on);
        self.notify();
        on
    }

    pub fn toggle_play_pause(&mut self) {
        if self.device.is_paused() {
            self.device.play();
            self.poll_active = true;
        } else {
            self.device.pause();
            self.poll_active = false;
        }
        self.notify();
    }

    /// Whether the periodic position poll should be running.
    pub fn poll_active(&self) -> bool {
        self.poll_active
    }

    pub fn seek_to(&mut self, position: Duration) {
        let clamped = self.device.duration().map_or(position, |d| position.min(d));
        self.device.set_position(clamped);
        self.notify();
    }

    /// Set the playback volume, clamped to `0.0..=1.0`. Touching the
    /// volume always unmutes, the way a physical slider would.
    pub fn set_volume(&mut self, volume: f32) {
        self.device.set_muted(false);
        self.device.set_volume(volume.clamp(0.0, 1.0));
        self.notify();
    }

    pub fn toggle_mute(&mut self) {
        let muted = self.device.muted();
        self.device.set_muted(!muted);
        self.notify();
    }

    pub fn volume_icon(&self) -> VolumeIcon {
        if self.device.muted() {
            VolumeIcon::Muted
        } else if self.device.volume() <= 0.1 {
            VolumeIcon::Low
        } else if self.device.volume() <= 0.5 {
            VolumeIcon::Medium
        } else {
            VolumeIcon::High
        }
    }

    /// Route catalog growth through the controller so indices the transport
    /// holds stay authoritative.
    pub fn import(&mut self, files: &[UploadedFile], resolver: &MetadataResolver) -> ImportReport {
        let report = import_files(files, resolver, &mut self.catalog);
        if report.added > 0 {
            self.notify();
        }
        report
    }

    /// Drain device notifications and refresh the UI. Call on the UI tick.
    pub fn tick(&mut self) {
        for event in self.device.poll_events() {
            match event {
                DeviceEvent::DataReady { duration } => {
                    debug!(?duration, "track data ready");
                    self.notify();
                }
                DeviceEvent::Ended => self.on_ended(),
                DeviceEvent::Play | DeviceEvent::Pause => self.notify(),
            }
        }
        if self.poll_active {
            self.notify();
        }
    }

    fn on_ended(&mut self) {
        // A looping device never reports Ended for a repeated track, but
        // the flag may have flipped since the event was queued.
        if self.state.is_repeating() {
            return;
        }
        self.device.set_position(Duration::ZERO);
        self.device.pause();
        self.poll_active = false;
        self.notify();
    }
}
