//! Poster layer compositing.
//!
//! `paint` expresses the full layer stack against the [`PosterCanvas`]
//! capability trait; `synthesize` runs it against the built-in raster
//! backend and returns encoded PNG bytes.

use super::layout::{TextMeasure, wrap_title};
use super::palette::{Rgba, derive_palette};
use super::raster::RasterCanvas;

pub const POSTER_SIZE: u32 = 800;
pub const TITLE_SIZE: f32 = 56.0;
const GLYPH_SIZE: f32 = 80.0;
const TITLE_MARGIN: f32 = 100.0;
const LINE_HEIGHT: f32 = 70.0;
const TOP_FADE_HEIGHT: f32 = 250.0;
const MUSIC_NOTE: &str = "\u{266a}";

/// A gradient color stop at `offset` in `0.0..=1.0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Drop-shadow parameters for text drawing.
#[derive(Debug, Copy, Clone)]
pub struct TextShadow {
    pub color: Rgba,
    pub blur: f32,
    pub offset_y: f32,
}

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Drawing surface the synthesizer paints on.
///
/// Layers composite source-over in call order. Gradient colors interpolate
/// linearly between stops; text draws centered on `x` with a middle
/// baseline, using the same metrics [`TextMeasure`] reports.
pub trait PosterCanvas: TextMeasure {
    fn size(&self) -> (u32, u32);
    fn fill_linear_gradient(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        region: Region,
        stops: &[ColorStop],
    );
    fn fill_radial_gradient(
        &mut self,
        center: (f32, f32),
        inner_radius: f32,
        outer_radius: f32,
        region: Region,
        stops: &[ColorStop],
    );
    fn fill_circle(&mut self, center: (f32, f32), radius: f32, stops: &[ColorStop]);
    fn draw_text(
        &mut self,
        text: &str,
        center_x: f32,
        center_y: f32,
        size: f32,
        color: Rgba,
        shadow: Option<TextShadow>,
    );
}

/// Paint the full poster layer stack for `title` onto `canvas`.
pub fn paint(title: &str, canvas: &mut (impl PosterCanvas + ?Sized)) {
    let (w, h) = canvas.size();
    let (w, h) = (w as f32, h as f32);
    let full = Region { x: 0.0, y: 0.0, width: w, height: h };
    let center = (w / 2.0, h / 2.0);

    let palette = derive_palette(title);
    canvas.fill_linear_gradient(
        (0.0, 0.0),
        (w, h),
        full,
        &[
            ColorStop::new(0.0, palette[0].to_rgba()),
            ColorStop::new(0.5, palette[1].to_rgba()),
            ColorStop::new(1.0, palette[2].to_rgba()),
        ],
    );

    // Center glow: bright core fading out into darkened corners.
    canvas.fill_radial_gradient(
        center,
        100.0,
        500.0,
        full,
        &[
            ColorStop::new(0.0, Rgba::WHITE.with_alpha(0.3)),
            ColorStop::new(0.5, Rgba::WHITE.with_alpha(0.1)),
            ColorStop::new(1.0, Rgba::BLACK.with_alpha(0.4)),
        ],
    );

    // Five translucent accent circles on a fixed sine/cosine orbit.
    for i in 0..5 {
        let fi = i as f32;
        let x = (fi * 1.2).sin() * 200.0 + center.0;
        let y = (fi * 1.5).cos() * 200.0 + center.1;
        canvas.fill_circle(
            (x, y),
            50.0 + fi * 20.0,
            &[
                ColorStop::new(0.0, Rgba::WHITE.with_alpha(0.15)),
                ColorStop::new(1.0, Rgba::WHITE.with_alpha(0.0)),
            ],
        );
    }

    // Darken the top band so the title stays readable on bright palettes.
    canvas.fill_linear_gradient(
        (0.0, 0.0),
        (0.0, TOP_FADE_HEIGHT),
        Region { x: 0.0, y: 0.0, width: w, height: TOP_FADE_HEIGHT },
        &[
            ColorStop::new(0.0, Rgba::BLACK.with_alpha(0.6)),
            ColorStop::new(1.0, Rgba::BLACK.with_alpha(0.0)),
        ],
    );

    let lines = wrap_title(title, w - TITLE_MARGIN, TITLE_SIZE, canvas);
    let start_y = 80.0 + (lines.len() as f32 - 1.0) * LINE_HEIGHT / 2.0;
    let shadow = TextShadow { color: Rgba::BLACK.with_alpha(0.8), blur: 20.0, offset_y: 4.0 };
    for (i, line) in lines.iter().enumerate() {
        canvas.draw_text(
            line,
            center.0,
            start_y + i as f32 * LINE_HEIGHT,
            TITLE_SIZE,
            Rgba::WHITE,
            Some(shadow),
        );
    }

    let glyph_shadow = TextShadow { color: Rgba::BLACK.with_alpha(0.8), blur: 10.0, offset_y: 2.0 };
    canvas.draw_text(
        MUSIC_NOTE,
        center.0,
        h - 80.0,
        GLYPH_SIZE,
        Rgba::WHITE.with_alpha(0.8),
        Some(glyph_shadow),
    );
}

/// Render `title` to a PNG poster using the built-in raster backend.
pub fn synthesize(title: &str) -> Vec<u8> {
    let mut canvas = RasterCanvas::new(POSTER_SIZE, POSTER_SIZE);
    paint(title, &mut canvas);
    canvas.into_png()
}
