//! Title word-wrapping for the poster's text block.

/// Measures rendered text width in pixels at a given font size.
///
/// Wrapping decisions depend entirely on these metrics, so the same
/// implementation must be used for layout and for drawing.
pub trait TextMeasure {
    fn text_width(&self, text: &str, size: f32) -> f32;
}

const MAX_LINES: usize = 2;
const TAIL_CHARS: usize = 25;
const ELLIPSIS: &str = "...";

/// Greedily wrap `text` into at most two lines of `max_width` pixels.
///
/// Words accumulate into the current line while `current + " " + word`
/// still measures under `max_width`. A would-be third line truncates line
/// two to its first 25 characters plus an ellipsis. A single line that
/// overflows on its own sheds trailing characters until it fits with an
/// ellipsis appended.
pub fn wrap_title(
    text: &str,
    max_width: f32,
    size: f32,
    measure: &(impl TextMeasure + ?Sized),
) -> Vec<String> {
    let mut words = text.split(' ');
    let mut lines: Vec<String> = Vec::new();
    let mut current = words.next().unwrap_or("").to_string();

    for word in words {
        let candidate = format!("{current} {word}");
        if measure.text_width(&candidate, size) < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);

    if lines.len() > MAX_LINES {
        let tail: String = lines[1].chars().take(TAIL_CHARS).collect();
        lines[1] = format!("{tail}{ELLIPSIS}");
        lines.truncate(MAX_LINES);
        return lines;
    }

    if lines.len() == 1 && measure.text_width(&lines[0], size) > max_width {
        let line = &mut lines[0];
        while !line.is_empty() && measure.text_width(&format!("{line}{ELLIPSIS}"), size) > max_width
        {
            line.pop();
        }
        line.push_str(ELLIPSIS);
    }

    lines
}
