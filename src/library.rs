//! Track catalog, metadata resolution and file import.

mod catalog;
mod import;
mod model;
mod resolver;
mod seed;

pub use catalog::Catalog;
pub use import::{ImportReport, collect_uploads, import_files, mime_for_extension};
pub use model::{AudioSource, PosterImage, Track};
pub use resolver::{
    LoftyTagReader, MetadataResolver, TagData, TagPicture, TagReadError, TagReader, UploadedFile,
};

#[cfg(test)]
mod tests;
