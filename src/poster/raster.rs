//! Software raster backend for poster synthesis.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};

use super::layout::TextMeasure;
use super::palette::Rgba;
use super::synth::{ColorStop, PosterCanvas, Region, TextShadow};

/// Fixed advance of the block font, in em (fraction of the font size).
const ADVANCE_EM: f32 = 0.6;

/// Metrics of the built-in block font: every character advances 0.6em.
#[derive(Debug, Default, Copy, Clone)]
pub struct BlockMetrics;

impl TextMeasure for BlockMetrics {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * ADVANCE_EM
    }
}

/// RGBA pixel buffer that composites layers source-over and renders text
/// with a compact built-in 5x7 font. Output is deterministic for a given
/// input.
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::new(width, height) }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Encode the canvas as PNG. In-memory encoding of a valid buffer does
    /// not fail.
    pub fn into_png(self) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(self.image)
            .write_to(&mut out, ImageFormat::Png)
            .expect("in-memory PNG encode");
        out.into_inner()
    }

    /// Clamp `region` to the buffer, yielding half-open pixel ranges.
    fn clip(&self, region: Region) -> (u32, u32, u32, u32) {
        let (w, h) = self.image.dimensions();
        let x0 = region.x.max(0.0) as u32;
        let y0 = region.y.max(0.0) as u32;
        let x1 = (region.x + region.width).clamp(0.0, w as f32).ceil() as u32;
        let y1 = (region.y + region.height).clamp(0.0, h as f32).ceil() as u32;
        (x0.min(w), y0.min(h), x1.min(w), y1.min(h))
    }

    fn blend(&mut self, x: u32, y: u32, src: Rgba) {
        let sa = src.a.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            *dst = image::Rgba([0, 0, 0, 0]);
            return;
        }
        let channel = |s: f32, d: u8| -> u8 {
            let d = d as f32 / 255.0;
            let c = (s * sa + d * da * (1.0 - sa)) / out_a;
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        };
        *dst = image::Rgba([
            channel(src.r, dst[0]),
            channel(src.g, dst[1]),
            channel(src.b, dst[2]),
            (out_a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        let (x0, y0, x1, y1) = self.clip(Region { x, y, width, height });
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color);
            }
        }
    }

    fn draw_run(&mut self, text: &str, center_x: f32, center_y: f32, size: f32, color: Rgba) {
        let scale = size / 10.0;
        let advance = size * ADVANCE_EM;
        let total = text.chars().count() as f32 * advance;
        let mut pen_x = center_x - total / 2.0;
        let top = center_y - 3.5 * scale;
        for ch in text.chars() {
            for (row, bits) in glyph_rows(ch).iter().enumerate() {
                for col in 0..5u32 {
                    if bits & (0b1_0000 >> col) != 0 {
                        self.fill_rect(
                            pen_x + col as f32 * scale,
                            top + row as f32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
            pen_x += advance;
        }
    }
}

/// Color at position `t` along a stop list, clamped to the outer stops.
fn sample_stops(stops: &[ColorStop], t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    match stops {
        [] => Rgba::TRANSPARENT,
        [only] => only.color,
        _ => {
            if t <= stops[0].offset {
                return stops[0].color;
            }
            for pair in stops.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if t <= b.offset {
                    let span = (b.offset - a.offset).max(f32::EPSILON);
                    return a.color.lerp(b.color, (t - a.offset) / span);
                }
            }
            stops[stops.len() - 1].color
        }
    }
}

impl TextMeasure for RasterCanvas {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        BlockMetrics.text_width(text, size)
    }
}

impl PosterCanvas for RasterCanvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn fill_linear_gradient(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        region: Region,
        stops: &[ColorStop],
    ) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len2 = dx * dx + dy * dy;
        let (x0, y0, x1, y1) = self.clip(region);
        for py in y0..y1 {
            for px in x0..x1 {
                let t = if len2 > 0.0 {
                    ((px as f32 + 0.5 - from.0) * dx + (py as f32 + 0.5 - from.1) * dy) / len2
                } else {
                    0.0
                };
                self.blend(px, py, sample_stops(stops, t));
            }
        }
    }

    fn fill_radial_gradient(
        &mut self,
        center: (f32, f32),
        inner_radius: f32,
        outer_radius: f32,
        region: Region,
        stops: &[ColorStop],
    ) {
        let span = (outer_radius - inner_radius).max(f32::EPSILON);
        let (x0, y0, x1, y1) = self.clip(region);
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - center.0;
                let dy = py as f32 + 0.5 - center.1;
                let t = (dx.hypot(dy) - inner_radius) / span;
                self.blend(px, py, sample_stops(stops, t));
            }
        }
    }

    fn fill_circle(&mut self, center: (f32, f32), radius: f32, stops: &[ColorStop]) {
        let bounds = Region {
            x: center.0 - radius,
            y: center.1 - radius,
            width: radius * 2.0,
            height: radius * 2.0,
        };
        let (x0, y0, x1, y1) = self.clip(bounds);
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - center.0;
                let dy = py as f32 + 0.5 - center.1;
                let dist = dx.hypot(dy);
                if dist > radius {
                    continue;
                }
                self.blend(px, py, sample_stops(stops, dist / radius.max(f32::EPSILON)));
            }
        }
    }

    fn draw_text(
        &mut self,
        text: &str,
        center_x: f32,
        center_y: f32,
        size: f32,
        color: Rgba,
        shadow: Option<TextShadow>,
    ) {
        // No blur primitive; the shadow is a plain offset pass underneath.
        if let Some(sh) = shadow {
            self.draw_run(text, center_x, center_y + sh.offset_y, size, sh.color);
        }
        self.draw_run(text, center_x, center_y, size, color);
    }
}

/// 5x7 glyph rows, one byte per row, low five bits left-to-right.
/// Lowercase maps onto the uppercase shapes; anything unmapped renders as
/// a hollow box.
fn glyph_rows(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0E],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x1B, 0x11],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x06, 0x08, 0x10, 0x1F],
        '3' => [0x0E, 0x11, 0x01, 0x06, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ' ' => [0x00; 7],
        '-' => [0x00, 0x00, 0x00, 0x0E, 0x00, 0x00, 0x00],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '\'' => [0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '&' => [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '/' => [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '\u{266a}' => [0x06, 0x05, 0x04, 0x04, 0x0C, 0x1C, 0x0C],
        _ => [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F],
    }
}
