use std::fs;

use tempfile::tempdir;

use super::resolver::display_stem;
use super::*;
use crate::config::LibrarySettings;

struct FakeTagReader(TagData);

impl TagReader for FakeTagReader {
    fn read(&self, _file: &UploadedFile) -> Result<TagData, TagReadError> {
        Ok(self.0.clone())
    }
}

struct FailingTagReader;

impl TagReader for FailingTagReader {
    fn read(&self, _file: &UploadedFile) -> Result<TagData, TagReadError> {
        Err(TagReadError::Io(std::io::Error::other("boom")))
    }
}

fn upload(name: &str, mime: &str) -> UploadedFile {
    UploadedFile::new(name, mime, b"not real audio".to_vec())
}

fn blank_resolver() -> MetadataResolver {
    MetadataResolver::with_reader(Box::new(FakeTagReader(TagData::default())), 2024)
}

#[test]
fn seeded_catalog_has_the_three_builtins() {
    let catalog = Catalog::seeded();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.get(0).unwrap().title, "Rocketeer");
    assert_eq!(catalog.get(1).unwrap().title, "Sunshine Love");
    assert_eq!(catalog.get(2).unwrap().title, "What is Love (Remix)");
    assert!(catalog.iter().all(|t| !t.user_supplied));
}

#[test]
fn push_appends_and_returns_index() {
    let mut catalog = Catalog::seeded();
    let track = blank_resolver().resolve(&upload("new.mp3", "audio/mpeg"));
    assert_eq!(catalog.push(track), 3);
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.get(0).unwrap().title, "Rocketeer");
}

#[test]
fn display_stem_strips_one_audio_extension() {
    assert_eq!(display_stem("song.mp3"), "song");
    assert_eq!(display_stem("song.MP3"), "song");
    assert_eq!(display_stem("my.track.flac"), "my.track");
    assert_eq!(display_stem("notes.txt"), "notes.txt");
    assert_eq!(display_stem("noext"), "noext");
    assert_eq!(display_stem(".mp3"), ".mp3");
}

#[test]
fn upload_audio_gate_is_mime_based() {
    assert!(upload("a.mp3", "audio/mpeg").is_audio());
    assert!(upload("a.weird", "audio/x-custom").is_audio());
    assert!(!upload("a.mp3", "text/plain").is_audio());
    assert!(!upload("a", "application/octet-stream").is_audio());
}

#[test]
fn resolve_fills_every_fallback() {
    let resolver = blank_resolver();
    let track = resolver.resolve(&upload("My Song.mp3", "audio/mpeg"));

    assert_eq!(track.title, "My Song");
    assert_eq!(track.album, "Uploaded Music");
    assert_eq!(track.year, 2024);
    assert_eq!(track.artist, "Unknown Artist");
    assert!(track.user_supplied);
    assert!(!track.embedded_art);
    assert!(matches!(&track.poster, PosterImage::Generated(data) if !data.is_empty()));
    assert!(matches!(&track.source, AudioSource::Memory(bytes) if !bytes.is_empty()));
}

#[test]
fn resolve_prefers_tag_fields() {
    let tags = TagData {
        title: Some("Proper Title".to_string()),
        album: Some("Proper Album".to_string()),
        year: Some(1999),
        artist: Some("Proper Artist".to_string()),
        picture: Some(TagPicture { data: vec![1, 2, 3], mime: "image/jpeg".to_string() }),
    };
    let resolver = MetadataResolver::with_reader(Box::new(FakeTagReader(tags)), 2024);
    let track = resolver.resolve(&upload("whatever.mp3", "audio/mpeg"));

    assert_eq!(track.title, "Proper Title");
    assert_eq!(track.album, "Proper Album");
    assert_eq!(track.year, 1999);
    assert_eq!(track.artist, "Proper Artist");
    assert!(track.embedded_art);
    assert_eq!(
        track.poster,
        PosterImage::Embedded { data: vec![1, 2, 3], mime: "image/jpeg".to_string() }
    );
}

#[test]
fn resolve_survives_reader_failure() {
    let resolver = MetadataResolver::with_reader(Box::new(FailingTagReader), 2024);
    let track = resolver.resolve(&upload("Broken Tune.mp3", "audio/mpeg"));

    assert_eq!(track.title, "Broken Tune");
    assert_eq!(track.album, "Uploaded Music");
    assert_eq!(track.artist, "Unknown Artist");
    assert!(matches!(track.poster, PosterImage::Generated(_)));
}

#[test]
fn generated_poster_derives_from_the_file_name() {
    let titled = TagData { title: Some("Tagged Name".to_string()), ..TagData::default() };
    let with_tags = MetadataResolver::with_reader(Box::new(FakeTagReader(titled)), 2024);
    let without_tags = blank_resolver();

    let a = with_tags.resolve(&upload("same-file.mp3", "audio/mpeg"));
    let b = without_tags.resolve(&upload("same-file.mp3", "audio/mpeg"));
    assert_ne!(a.title, b.title);
    assert_eq!(a.poster, b.poster);
}

#[test]
fn import_accepts_audio_and_skips_the_rest() {
    let mut catalog = Catalog::seeded();
    let resolver = blank_resolver();
    let files = vec![
        upload("keeper.mp3", "audio/mpeg"),
        upload("notes.txt", "text/plain"),
        upload("cover.png", "image/png"),
    ];

    let report = import_files(&files, &resolver, &mut catalog);
    assert_eq!(report, ImportReport { added: 1, skipped: 2 });
    assert_eq!(report.notice(), "1 song(s) added successfully!");
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.get(3).unwrap().title, "keeper");
}

#[test]
fn import_with_nothing_valid_reports_so() {
    let mut catalog = Catalog::seeded();
    let resolver = blank_resolver();

    let report = import_files(&[], &resolver, &mut catalog);
    assert_eq!(report.notice(), "No valid audio files found");
    assert_eq!(catalog.len(), 3);

    let report = import_files(&[upload("readme.md", "text/markdown")], &resolver, &mut catalog);
    assert_eq!(report, ImportReport { added: 0, skipped: 1 });
    assert_eq!(report.notice(), "No valid audio files found");
    assert_eq!(catalog.len(), 3);
}

#[test]
fn generated_poster_data_uri_is_png() {
    let track = blank_resolver().resolve(&upload("uri-check.mp3", "audio/mpeg"));
    let uri = track.poster.data_uri().unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
}

#[test]
fn mime_for_extension_covers_the_accepted_set() {
    assert_eq!(mime_for_extension("mp3"), "audio/mpeg");
    assert_eq!(mime_for_extension("WAV"), "audio/wav");
    assert_eq!(mime_for_extension("ogg"), "audio/ogg");
    assert_eq!(mime_for_extension("m4a"), "audio/mp4");
    assert_eq!(mime_for_extension("flac"), "audio/flac");
    assert_eq!(mime_for_extension("txt"), "application/octet-stream");
}

#[test]
fn collect_uploads_marks_unknown_extensions_non_audio() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("tune.mp3"), b"bytes").unwrap();
    fs::write(dir.path().join("cover.jpg"), b"bytes").unwrap();

    let uploads = collect_uploads(dir.path(), &LibrarySettings::default());
    assert_eq!(uploads.len(), 2);

    let tune = uploads.iter().find(|u| u.name == "tune.mp3").unwrap();
    assert_eq!(tune.mime, "audio/mpeg");
    assert_eq!(&tune.bytes[..], b"bytes");

    let cover = uploads.iter().find(|u| u.name == "cover.jpg").unwrap();
    assert!(!cover.is_audio());
    assert!(cover.bytes.is_empty());
}
