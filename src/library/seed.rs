use std::path::PathBuf;

use super::model::{AudioSource, PosterImage, Track};

/// The built-in tracks every session starts with.
pub(super) fn seed_tracks() -> Vec<Track> {
    [
        ("Rocketeer", "Free Wired", 2010, "Ryan Tedder ft. Far East Movement", 1),
        ("Sunshine Love", "LaRoxx Project", 2012, "Dave LaRoxx", 2),
        ("What is Love (Remix)", "IBIZA Summer Party", 2018, "VDJ Smile", 3),
    ]
    .into_iter()
    .map(|(title, album, year, artist, n)| Track {
        title: title.to_string(),
        album: album.to_string(),
        year,
        artist: artist.to_string(),
        poster: PosterImage::Asset(PathBuf::from(format!("assets/images/poster-{n}.jpg"))),
        source: AudioSource::Asset(PathBuf::from(format!("assets/music/music-{n}.mp3"))),
        user_supplied: false,
        embedded_art: false,
    })
    .collect()
}
