use crate::config;
use crate::player::{PlaybackDevice, PlayerController};

/// Apply configured playback defaults before the first frame renders.
pub fn apply_playback_defaults<D: PlaybackDevice>(
    controller: &mut PlayerController<D>,
    settings: &config::Settings,
) {
    if settings.playback.shuffle {
        controller.toggle_shuffle();
    }
    if settings.playback.repeat {
        controller.toggle_repeat();
    }
    controller.set_volume(settings.playback.volume);
}
