//! Batch import of user-picked files into the catalog.

use std::fs;
use std::path::Path;

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::catalog::Catalog;
use super::resolver::{MetadataResolver, UploadedFile};

/// Outcome of one import batch.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub skipped: usize,
}

impl ImportReport {
    /// User-facing notice for this batch.
    pub fn notice(&self) -> String {
        if self.added > 0 {
            format!("{} song(s) added successfully!", self.added)
        } else {
            "No valid audio files found".to_string()
        }
    }
}

/// Resolve and append every accepted file to `catalog`, in order.
///
/// Files whose MIME type is not `audio/*` are skipped and logged; one bad
/// file never aborts the rest of the batch.
pub fn import_files(
    files: &[UploadedFile],
    resolver: &MetadataResolver,
    catalog: &mut Catalog,
) -> ImportReport {
    let mut report = ImportReport::default();
    for file in files {
        if !file.is_audio() {
            warn!(file = %file.name, mime = %file.mime, "skipped non-audio file");
            report.skipped += 1;
            continue;
        }
        let track = resolver.resolve(file);
        let index = catalog.push(track);
        info!(file = %file.name, index, "imported track");
        report.added += 1;
    }
    report
}

/// MIME type for a file extension, the way a file picker would report it.
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}

/// Walk `dir` and build upload handles for every regular file found.
///
/// Files outside the configured extensions become non-audio handles with
/// empty bodies, so the import gate can count them as skipped.
pub fn collect_uploads(dir: &Path, settings: &LibrarySettings) -> Vec<UploadedFile> {
    let mut uploads = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        if !settings.accepts_extension(ext) {
            uploads.push(UploadedFile::new(name, "application/octet-stream", Vec::new()));
            continue;
        }
        match fs::read(path) {
            Ok(bytes) => uploads.push(UploadedFile::new(name, mime_for_extension(ext), bytes)),
            Err(err) => warn!(path = %path.display(), %err, "could not read file"),
        }
    }
    uploads
}
