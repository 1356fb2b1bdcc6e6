//! Utilities for creating `rodio` sinks from audio sources.
//!
//! The helper here encapsulates opening/decoding a source and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};
use tracing::warn;

use crate::library::AudioSource;

/// Create a paused `Sink` for `source` that starts playback at `start_at`,
/// along with the total duration when the decoder knows it. Open and
/// decode failures degrade to `None` rather than tearing the thread down.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    source: &AudioSource,
    start_at: Duration,
) -> Option<(Sink, Option<Duration>)> {
    match source {
        AudioSource::Asset(path) => {
            let file = match File::open(path) {
                Ok(file) => file,
                Err(err) => {
                    warn!(path = %path.display(), %err, "failed to open audio file");
                    return None;
                }
            };
            match Decoder::new(BufReader::new(file)) {
                Ok(decoder) => Some(build(handle, decoder, start_at)),
                Err(err) => {
                    warn!(path = %path.display(), %err, "failed to decode audio file");
                    None
                }
            }
        }
        AudioSource::Memory(bytes) => match Decoder::new(Cursor::new(bytes.clone())) {
            Ok(decoder) => Some(build(handle, decoder, start_at)),
            Err(err) => {
                warn!(%err, "failed to decode in-memory audio");
                None
            }
        },
    }
}

fn build<S>(handle: &OutputStream, source: S, start_at: Duration) -> (Sink, Option<Duration>)
where
    S: Source + Send + 'static,
{
    // Read the total duration before `skip_duration` shortens the source.
    let total = source.total_duration();
    let sink = Sink::connect_new(handle.mixer());
    // `skip_duration` is the seeking primitive; even Duration::ZERO is fine.
    sink.append(source.skip_duration(start_at));
    sink.pause();
    (sink, total)
}
