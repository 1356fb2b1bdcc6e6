//! Tag extraction with layered fallbacks.
//!
//! Resolution never fails: whatever the tag reader cannot recover is
//! filled from the file name, fixed defaults and a synthesized poster.

use std::io::Cursor;
use std::sync::Arc;

use chrono::Datelike;
use lofty::{ItemKey, PictureType, Probe, TaggedFileExt};
use thiserror::Error;
use tracing::debug;

use crate::poster;

use super::model::{AudioSource, PosterImage, Track};

/// Extensions stripped when deriving a display title from a file name.
const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "wav", "ogg", "m4a", "flac"];
const DEFAULT_ALBUM: &str = "Uploaded Music";
const DEFAULT_ARTIST: &str = "Unknown Artist";

/// A file handed over by the frontend's picker.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    /// MIME type as reported by the picker, e.g. `audio/mpeg`.
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), mime: mime.into(), bytes: bytes.into() }
    }

    /// Only `audio/*` files are playable.
    pub fn is_audio(&self) -> bool {
        self.mime.starts_with("audio/")
    }
}

/// Fields a tag reader may recover from an audio file.
#[derive(Debug, Default, Clone)]
pub struct TagData {
    pub title: Option<String>,
    pub album: Option<String>,
    pub year: Option<i32>,
    pub artist: Option<String>,
    pub picture: Option<TagPicture>,
}

/// Embedded picture bytes plus a sniffed MIME type.
#[derive(Debug, Clone)]
pub struct TagPicture {
    pub data: Vec<u8>,
    pub mime: String,
}

#[derive(Debug, Error)]
pub enum TagReadError {
    #[error("could not sniff the container type: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] lofty::error::LoftyError),
}

/// Reads embedded tags out of an uploaded file's bytes.
pub trait TagReader {
    fn read(&self, file: &UploadedFile) -> Result<TagData, TagReadError>;
}

/// Production tag reader backed by `lofty`.
pub struct LoftyTagReader;

impl TagReader for LoftyTagReader {
    fn read(&self, file: &UploadedFile) -> Result<TagData, TagReadError> {
        let cursor = Cursor::new(file.bytes.clone());
        let tagged = Probe::new(cursor).guess_file_type()?.read()?;

        let mut data = TagData::default();
        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            data.title = non_empty(tag.get_string(&ItemKey::TrackTitle));
            data.album = non_empty(tag.get_string(&ItemKey::AlbumTitle));
            data.artist = non_empty(tag.get_string(&ItemKey::TrackArtist));
            data.year = tag
                .get_string(&ItemKey::Year)
                .and_then(|y| y.trim().parse().ok());

            // Prefer the front cover, fall back to the first picture.
            let pictures = tag.pictures();
            let picture = pictures
                .iter()
                .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
                .or_else(|| pictures.first());
            if let Some(p) = picture {
                let bytes = p.data().to_vec();
                // Sniffing both validates the bytes and yields the MIME type.
                if let Ok(format) = image::guess_format(&bytes) {
                    data.picture =
                        Some(TagPicture { data: bytes, mime: format.to_mime_type().to_string() });
                }
            }
        }
        Ok(data)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// File name with a single trailing audio extension stripped.
pub(super) fn display_stem(name: &str) -> String {
    if let Some((stem, ext)) = name.rsplit_once('.') {
        if !stem.is_empty() && AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            return stem.to_string();
        }
    }
    name.to_string()
}

/// Turns an uploaded file into a fully populated [`Track`].
pub struct MetadataResolver {
    reader: Option<Box<dyn TagReader>>,
    fallback_year: i32,
}

impl MetadataResolver {
    pub fn new() -> Self {
        Self { reader: Some(Box::new(LoftyTagReader)), fallback_year: chrono::Local::now().year() }
    }

    /// Resolver with no tag reader; every field comes from fallbacks.
    pub fn without_reader() -> Self {
        Self { reader: None, fallback_year: chrono::Local::now().year() }
    }

    pub fn with_reader(reader: Box<dyn TagReader>, fallback_year: i32) -> Self {
        Self { reader: Some(reader), fallback_year }
    }

    /// Resolve `file` into a track. Tag-reader errors downgrade to the
    /// fallback chain rather than propagating.
    pub fn resolve(&self, file: &UploadedFile) -> Track {
        let fallback_title = display_stem(&file.name);

        let tags = match &self.reader {
            Some(reader) => match reader.read(file) {
                Ok(tags) => tags,
                Err(err) => {
                    debug!(file = %file.name, %err, "tag read failed, using fallbacks");
                    TagData::default()
                }
            },
            None => TagData::default(),
        };

        // The synthesized poster always derives from the file name, even
        // when the tags carry a different title.
        let (poster, embedded_art) = match tags.picture {
            Some(pic) => (PosterImage::Embedded { data: pic.data, mime: pic.mime }, true),
            None => (PosterImage::Generated(poster::synthesize(&fallback_title)), false),
        };

        Track {
            title: tags.title.unwrap_or(fallback_title),
            album: tags.album.unwrap_or_else(|| DEFAULT_ALBUM.to_string()),
            year: tags.year.unwrap_or(self.fallback_year),
            artist: tags.artist.unwrap_or_else(|| DEFAULT_ARTIST.to_string()),
            poster,
            source: AudioSource::Memory(file.bytes.clone()),
            user_supplied: true,
            embedded_art,
        }
    }
}

impl Default for MetadataResolver {
    fn default() -> Self {
        Self::new()
    }
}
