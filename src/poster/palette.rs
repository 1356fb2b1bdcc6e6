//! Deterministic title-to-palette derivation.
//!
//! The hash is a 32-bit signed accumulator over UTF-16 code units with
//! two's-complement wraparound, so the same title always lands on the same
//! three hues regardless of platform.

/// One palette slot in HSL space: hue in degrees, saturation and lightness
/// in percent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

/// Straight (non-premultiplied) RGBA color, channels in `0.0..=1.0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation between two colors, `t` in `0.0..=1.0`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

impl Hsl {
    /// Standard HSL to RGB conversion; alpha is always opaque.
    pub fn to_rgba(self) -> Rgba {
        let s = self.saturation / 100.0;
        let l = self.lightness / 100.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = (self.hue.rem_euclid(360.0)) / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        Rgba::new(r1 + m, g1 + m, b1 + m, 1.0)
    }
}

/// 32-bit signed accumulator hash over the text's UTF-16 code units.
fn title_hash(text: &str) -> i32 {
    let mut hash: i32 = 0;
    for unit in text.encode_utf16() {
        hash = (unit as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash));
    }
    hash
}

/// Derive three evenly spaced hues from `text`. Pure and total: the same
/// text always produces the same palette.
pub fn derive_palette(text: &str) -> [Hsl; 3] {
    let hue1 = (title_hash(text).unsigned_abs() % 360) as f32;
    [
        Hsl { hue: hue1, saturation: 70.0, lightness: 50.0 },
        Hsl { hue: (hue1 + 120.0) % 360.0, saturation: 70.0, lightness: 45.0 },
        Hsl { hue: (hue1 + 240.0) % 360.0, saturation: 70.0, lightness: 55.0 },
    ]
}
