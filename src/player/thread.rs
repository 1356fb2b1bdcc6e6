//! The output thread: owns the `rodio` stream and sink, applies commands
//! and publishes position, duration and notifications through the shared
//! handle.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};

use crate::library::AudioSource;

use super::device::DeviceEvent;
use super::output::{OutputCmd, OutputHandle};
use super::sink::create_sink_at;

fn elapsed_now(started_at: Option<Instant>, accumulated: Duration) -> Duration {
    accumulated + started_at.map_or(Duration::ZERO, |st| st.elapsed())
}

pub(super) fn spawn_output_thread(
    rx: Receiver<OutputCmd>,
    shared: OutputHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut sink: Option<Sink> = None;
        let mut current: Option<AudioSource> = None;
        let mut duration: Option<Duration> = None;
        let mut paused = true;
        let mut looping = false;
        let mut volume: f32 = 1.0;

        // Track start time and accumulated elapsed while paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    OutputCmd::Load(source) => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        paused = true;
                        started_at = None;
                        accumulated = Duration::ZERO;
                        duration = None;
                        current = Some(source.clone());

                        if let Some((new_sink, total)) = create_sink_at(&stream, &source, Duration::ZERO)
                        {
                            new_sink.set_volume(volume);
                            duration = total;
                            sink = Some(new_sink);
                        }

                        if let Ok(mut state) = shared.lock() {
                            state.elapsed = Duration::ZERO;
                            state.duration = duration;
                            state.playing = false;
                            if let Some(d) = duration {
                                state.events.push_back(DeviceEvent::DataReady { duration: d });
                            }
                        }
                    }

                    OutputCmd::Play => {
                        if let Some(ref s) = sink {
                            if paused {
                                s.play();
                                paused = false;
                                started_at = Some(Instant::now());
                                if let Ok(mut state) = shared.lock() {
                                    state.playing = true;
                                    state.events.push_back(DeviceEvent::Play);
                                }
                            }
                        }
                    }

                    OutputCmd::Pause => {
                        if let Some(ref s) = sink {
                            if !paused {
                                s.pause();
                                paused = true;
                                if let Some(st) = started_at {
                                    accumulated += Instant::now() - st;
                                }
                                started_at = None;
                                if let Ok(mut state) = shared.lock() {
                                    state.playing = false;
                                    state.elapsed = accumulated;
                                    state.events.push_back(DeviceEvent::Pause);
                                }
                            }
                        }
                    }

                    OutputCmd::Seek(position) => {
                        // Scrubbing: rebuild the sink and skip into the source.
                        let Some(source) = current.clone() else {
                            continue;
                        };
                        let position = duration.map_or(position, |d| position.min(d));
                        let was_paused = paused;

                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        if let Some((new_sink, total)) = create_sink_at(&stream, &source, position) {
                            new_sink.set_volume(volume);
                            if !was_paused {
                                new_sink.play();
                            }
                            if duration.is_none() {
                                duration = total;
                            }
                            sink = Some(new_sink);
                        }

                        accumulated = position;
                        started_at = if was_paused { None } else { Some(Instant::now()) };
                        if let Ok(mut state) = shared.lock() {
                            state.elapsed = position;
                            state.duration = duration;
                        }
                    }

                    OutputCmd::SetVolume(v) => {
                        volume = v;
                        if let Some(ref s) = sink {
                            s.set_volume(v);
                        }
                    }

                    OutputCmd::SetLooping(l) => {
                        looping = l;
                    }

                    OutputCmd::Quit => {
                        if let Some(ref s) = sink {
                            s.stop();
                        }
                        if let Ok(mut state) = shared.lock() {
                            state.playing = false;
                        }
                        break;
                    }
                },

                Err(RecvTimeoutError::Timeout) => {
                    // Housekeeping: publish elapsed time and detect the end of
                    // the current track.
                    if !paused {
                        if let Ok(mut state) = shared.lock() {
                            state.elapsed = elapsed_now(started_at, accumulated);
                        }
                    }

                    let finished = sink.as_ref().is_some_and(|s| s.empty());
                    if finished && !paused {
                        if looping {
                            // Native repeat: restart the same source from zero.
                            if let Some(source) = current.clone() {
                                if let Some((new_sink, _)) =
                                    create_sink_at(&stream, &source, Duration::ZERO)
                                {
                                    new_sink.set_volume(volume);
                                    new_sink.play();
                                    sink = Some(new_sink);
                                    accumulated = Duration::ZERO;
                                    started_at = Some(Instant::now());
                                    if let Ok(mut state) = shared.lock() {
                                        state.elapsed = Duration::ZERO;
                                    }
                                }
                            }
                        } else {
                            paused = true;
                            started_at = None;
                            accumulated = Duration::ZERO;
                            if let Ok(mut state) = shared.lock() {
                                state.playing = false;
                                state.elapsed = Duration::ZERO;
                                state.events.push_back(DeviceEvent::Ended);
                            }
                        }
                    }
                }

                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
