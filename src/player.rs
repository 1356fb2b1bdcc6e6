//! Playback: transport state machine, the device abstraction and the
//! controller that drives both against the catalog.

mod controller;
mod device;
mod output;
mod sink;
mod state;
mod thread;

pub use controller::{PlayerController, PlayerSnapshot, VolumeIcon};
pub use device::{DeviceEvent, PlaybackDevice};
pub use output::RodioDevice;
pub use state::{PlaybackState, StateError};
