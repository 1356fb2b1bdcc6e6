//! `rodio`-backed playback device running on its own thread.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::library::AudioSource;

use super::device::{DeviceEvent, PlaybackDevice};
use super::thread::spawn_output_thread;

/// Commands sent to the output thread.
#[derive(Debug)]
pub(super) enum OutputCmd {
    Load(AudioSource),
    Play,
    Pause,
    Seek(Duration),
    SetVolume(f32),
    SetLooping(bool),
    Quit,
}

/// State the output thread publishes for the controller to read.
#[derive(Debug, Default)]
pub(super) struct OutputState {
    pub elapsed: Duration,
    pub duration: Option<Duration>,
    pub playing: bool,
    pub events: VecDeque<DeviceEvent>,
}

pub(super) type OutputHandle = Arc<Mutex<OutputState>>;

/// Playback device backed by a dedicated `rodio` thread.
///
/// Volume, mute and looping are tracked here and forwarded; position and
/// duration come back through the shared handle the thread updates.
pub struct RodioDevice {
    tx: Sender<OutputCmd>,
    shared: OutputHandle,
    join: Mutex<Option<JoinHandle<()>>>,
    volume: f32,
    muted: bool,
    looping: bool,
}

impl RodioDevice {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<OutputCmd>();
        let shared: OutputHandle = Arc::new(Mutex::new(OutputState::default()));
        let join = spawn_output_thread(rx, shared.clone());
        Self {
            tx,
            shared,
            join: Mutex::new(Some(join)),
            volume: 1.0,
            muted: false,
            looping: false,
        }
    }

    fn send(&self, cmd: OutputCmd) {
        // A dead thread surfaces as silence, not a crash.
        let _ = self.tx.send(cmd);
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }
}

impl Default for RodioDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackDevice for RodioDevice {
    fn load(&mut self, source: &AudioSource) {
        if let Ok(mut state) = self.shared.lock() {
            state.elapsed = Duration::ZERO;
            state.duration = None;
            state.playing = false;
            // Notifications from the previous track must not leak into the
            // new one.
            state.events.clear();
        }
        self.send(OutputCmd::Load(source.clone()));
        self.send(OutputCmd::SetVolume(self.effective_volume()));
        self.send(OutputCmd::SetLooping(self.looping));
    }

    fn play(&mut self) {
        self.send(OutputCmd::Play);
    }

    fn pause(&mut self) {
        self.send(OutputCmd::Pause);
    }

    fn is_paused(&self) -> bool {
        !self.shared.lock().map(|s| s.playing).unwrap_or(false)
    }

    fn position(&self) -> Duration {
        self.shared.lock().map(|s| s.elapsed).unwrap_or_default()
    }

    fn set_position(&mut self, position: Duration) {
        self.send(OutputCmd::Seek(position));
    }

    fn duration(&self) -> Option<Duration> {
        self.shared.lock().ok().and_then(|s| s.duration)
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.send(OutputCmd::SetVolume(self.effective_volume()));
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.send(OutputCmd::SetVolume(self.effective_volume()));
    }

    fn looping(&self) -> bool {
        self.looping
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
        self.send(OutputCmd::SetLooping(looping));
    }

    fn poll_events(&mut self) -> Vec<DeviceEvent> {
        self.shared
            .lock()
            .map(|mut s| s.events.drain(..).collect())
            .unwrap_or_default()
    }
}

impl Drop for RodioDevice {
    fn drop(&mut self) {
        let _ = self.tx.send(OutputCmd::Quit);
        if let Ok(mut join) = self.join.lock() {
            if let Some(handle) = join.take() {
                let _ = handle.join();
            }
        }
    }
}
