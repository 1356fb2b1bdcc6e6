use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Cover art attached to a track.
#[derive(Clone, PartialEq)]
pub enum PosterImage {
    /// Art shipped alongside the binary's asset bundle.
    Asset(PathBuf),
    /// PNG synthesized from the track title.
    Generated(Vec<u8>),
    /// Picture bytes embedded in the audio file's tags.
    Embedded { data: Vec<u8>, mime: String },
}

impl PosterImage {
    /// Render the in-memory variants as a base64 `data:` URI.
    pub fn data_uri(&self) -> Option<String> {
        match self {
            Self::Asset(_) => None,
            Self::Generated(data) => {
                Some(format!("data:image/png;base64,{}", STANDARD.encode(data)))
            }
            Self::Embedded { data, mime } => {
                Some(format!("data:{mime};base64,{}", STANDARD.encode(data)))
            }
        }
    }
}

impl fmt::Debug for PosterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset(path) => f.debug_tuple("Asset").field(path).finish(),
            Self::Generated(data) => write!(f, "Generated({} bytes)", data.len()),
            Self::Embedded { data, mime } => write!(f, "Embedded({mime}, {} bytes)", data.len()),
        }
    }
}

/// Where a track's audio bytes come from.
#[derive(Clone)]
pub enum AudioSource {
    /// File on disk, decoded lazily at load time.
    Asset(PathBuf),
    /// Bytes of an imported file, held for the session only.
    Memory(Arc<[u8]>),
}

impl fmt::Debug for AudioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset(path) => f.debug_tuple("Asset").field(path).finish(),
            Self::Memory(bytes) => write!(f, "Memory({} bytes)", bytes.len()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Track {
    pub title: String,
    pub album: String,
    pub year: i32,
    pub artist: String,
    pub poster: PosterImage,
    pub source: AudioSource,
    /// Imported by the user this session, as opposed to a built-in.
    pub user_supplied: bool,
    /// Poster came from picture data embedded in the file's tags.
    pub embedded_art: bool,
}
