//! Procedural cover-poster synthesis.
//!
//! Tracks without artwork get a deterministic 800x800 poster derived from
//! their title: a palette hashed from the text, layered gradients, and the
//! word-wrapped title rendered on top of it all.

mod layout;
mod palette;
mod raster;
mod synth;

pub use layout::{TextMeasure, wrap_title};
pub use palette::{Hsl, Rgba, derive_palette};
pub use raster::{BlockMetrics, RasterCanvas};
pub use synth::{
    ColorStop, POSTER_SIZE, PosterCanvas, Region, TITLE_SIZE, TextShadow, paint, synthesize,
};

#[cfg(test)]
mod tests;
