use super::*;

#[derive(Debug, PartialEq)]
enum Op {
    Linear { height: u32 },
    Radial { inner: u32, outer: u32 },
    Circle { radius: u32 },
    Text { text: String, size: u32 },
}

/// Canvas fake that records the layer sequence instead of rasterizing.
struct RecordingCanvas {
    ops: Vec<Op>,
}

impl RecordingCanvas {
    fn new() -> Self {
        Self { ops: Vec::new() }
    }
}

impl TextMeasure for RecordingCanvas {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        BlockMetrics.text_width(text, size)
    }
}

impl PosterCanvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (POSTER_SIZE, POSTER_SIZE)
    }

    fn fill_linear_gradient(
        &mut self,
        _from: (f32, f32),
        _to: (f32, f32),
        region: Region,
        _stops: &[ColorStop],
    ) {
        self.ops.push(Op::Linear { height: region.height as u32 });
    }

    fn fill_radial_gradient(
        &mut self,
        _center: (f32, f32),
        inner_radius: f32,
        outer_radius: f32,
        _region: Region,
        _stops: &[ColorStop],
    ) {
        self.ops.push(Op::Radial { inner: inner_radius as u32, outer: outer_radius as u32 });
    }

    fn fill_circle(&mut self, _center: (f32, f32), radius: f32, _stops: &[ColorStop]) {
        self.ops.push(Op::Circle { radius: radius as u32 });
    }

    fn draw_text(
        &mut self,
        text: &str,
        _center_x: f32,
        _center_y: f32,
        size: f32,
        _color: Rgba,
        _shadow: Option<TextShadow>,
    ) {
        self.ops.push(Op::Text { text: text.to_string(), size: size as u32 });
    }
}

#[test]
fn palette_is_deterministic() {
    assert_eq!(derive_palette("Midnight Drive"), derive_palette("Midnight Drive"));
}

#[test]
fn palette_hues_are_evenly_spaced() {
    let [a, b, c] = derive_palette("Sunshine Love");
    assert_eq!(a.hue, 325.0);
    assert_eq!(b.hue, 85.0);
    assert_eq!(c.hue, 205.0);
    assert_eq!((a.saturation, a.lightness), (70.0, 50.0));
    assert_eq!((b.saturation, b.lightness), (70.0, 45.0));
    assert_eq!((c.saturation, c.lightness), (70.0, 55.0));
}

#[test]
fn palette_known_hues() {
    assert_eq!(derive_palette("Rocketeer")[0].hue, 274.0);
    assert_eq!(derive_palette("my song")[0].hue, 33.0);
    assert_eq!(derive_palette("a")[0].hue, 97.0);
}

#[test]
fn palette_empty_title() {
    let [a, b, c] = derive_palette("");
    assert_eq!((a.hue, b.hue, c.hue), (0.0, 120.0, 240.0));
}

#[test]
fn hsl_primary_red() {
    let red = Hsl { hue: 0.0, saturation: 100.0, lightness: 50.0 }.to_rgba();
    assert_eq!(red, Rgba::new(1.0, 0.0, 0.0, 1.0));
}

#[test]
fn wrap_keeps_short_title_on_one_line() {
    let lines = wrap_title("Sunshine Love", 700.0, 56.0, &BlockMetrics);
    assert_eq!(lines, vec!["Sunshine Love".to_string()]);
}

#[test]
fn wrap_breaks_between_words() {
    let lines = wrap_title("longplaying longplaying", 700.0, 56.0, &BlockMetrics);
    assert_eq!(lines, vec!["longplaying".to_string(), "longplaying".to_string()]);
}

#[test]
fn wrap_caps_at_two_lines_with_ellipsis() {
    let lines = wrap_title("longplaying longplaying longplaying", 700.0, 56.0, &BlockMetrics);
    assert_eq!(lines, vec!["longplaying".to_string(), "longplaying...".to_string()]);
}

#[test]
fn wrap_truncates_long_second_line() {
    let text = vec!["velvety"; 21].join(" ");
    let lines = wrap_title(&text, 700.0, 20.0, &BlockMetrics);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].chars().count(), 28);
    assert!(lines[1].ends_with("..."));
}

#[test]
fn wrap_shortens_single_overlong_word() {
    let lines = wrap_title("abcdefghijklmnopqrstuvwxyz", 700.0, 56.0, &BlockMetrics);
    assert_eq!(lines, vec!["abcdefghijklmnopq...".to_string()]);
}

#[test]
fn wrap_handles_empty_title() {
    assert_eq!(wrap_title("", 700.0, 56.0, &BlockMetrics), vec![String::new()]);
}

#[test]
fn paint_layers_in_order() {
    let mut canvas = RecordingCanvas::new();
    paint("Sunshine Love", &mut canvas);

    assert_eq!(canvas.ops[0], Op::Linear { height: POSTER_SIZE });
    assert_eq!(canvas.ops[1], Op::Radial { inner: 100, outer: 500 });
    for (i, op) in canvas.ops[2..7].iter().enumerate() {
        assert_eq!(*op, Op::Circle { radius: 50 + 20 * i as u32 });
    }
    assert_eq!(canvas.ops[7], Op::Linear { height: 250 });
    assert_eq!(canvas.ops[8], Op::Text { text: "Sunshine Love".to_string(), size: 56 });
    assert_eq!(canvas.ops[9], Op::Text { text: "\u{266a}".to_string(), size: 80 });
    assert_eq!(canvas.ops.len(), 10);
}

#[test]
fn paint_draws_each_wrapped_line() {
    let mut canvas = RecordingCanvas::new();
    paint("longplaying longplaying longplaying", &mut canvas);

    let texts: Vec<&Op> = canvas.ops.iter().filter(|op| matches!(op, Op::Text { .. })).collect();
    // Two title lines plus the note glyph.
    assert_eq!(texts.len(), 3);
}

#[test]
fn block_metrics_advance() {
    assert_eq!(BlockMetrics.text_width("abcd", 10.0), 24.0);
    assert_eq!(BlockMetrics.text_width("", 56.0), 0.0);
}

#[test]
fn linear_gradient_spans_endpoint_colors() {
    let mut canvas = RasterCanvas::new(100, 1);
    let region = Region { x: 0.0, y: 0.0, width: 100.0, height: 1.0 };
    canvas.fill_linear_gradient(
        (0.0, 0.0),
        (100.0, 0.0),
        region,
        &[ColorStop::new(0.0, Rgba::BLACK), ColorStop::new(1.0, Rgba::WHITE)],
    );
    let left = canvas.image().get_pixel(0, 0);
    let right = canvas.image().get_pixel(99, 0);
    assert!(left[0] < 8, "left edge should be near black, got {}", left[0]);
    assert!(right[0] > 247, "right edge should be near white, got {}", right[0]);
    assert_eq!(left[3], 255);
}

#[test]
fn circle_leaves_outside_untouched() {
    let mut canvas = RasterCanvas::new(20, 20);
    canvas.fill_circle((10.0, 10.0), 4.0, &[ColorStop::new(0.0, Rgba::WHITE)]);
    assert_eq!(canvas.image().get_pixel(0, 0)[3], 0);
    assert!(canvas.image().get_pixel(10, 10)[3] > 0);
}

#[test]
fn synthesize_returns_png_bytes() {
    let png = synthesize("Midnight Drive");
    assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
}

#[test]
fn synthesize_is_deterministic() {
    assert_eq!(synthesize("Rocketeer"), synthesize("Rocketeer"));
}

#[test]
fn poster_base_layer_is_opaque() {
    let mut canvas = RasterCanvas::new(64, 64);
    paint("Rocketeer", &mut canvas);
    for (x, y) in [(0, 0), (63, 0), (0, 63), (63, 63), (32, 32)] {
        assert_eq!(canvas.image().get_pixel(x, y)[3], 255);
    }
}
