//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::config::{ControlsSettings, UiSettings};
use crate::library::Catalog;
use crate::player::{PlayerSnapshot, VolumeIcon};

/// Everything one frame needs, borrowed from the runtime loop.
pub struct ViewState<'a> {
    pub catalog: &'a Catalog,
    pub snapshot: Option<&'a PlayerSnapshot>,
    pub selected: usize,
    pub notice: Option<&'a str>,
    pub volume_icon: VolumeIcon,
}

/// Format a position as `M:SS`, rounding partial seconds up the way the
/// transport timecode does.
fn format_timecode(d: Duration) -> String {
    let total = d.as_secs_f64();
    let minutes = (total / 60.0).floor() as u64;
    let seconds = (total - minutes as f64 * 60.0).ceil() as u64;
    format!("{minutes}:{seconds:02}")
}

fn volume_text(icon: VolumeIcon) -> &'static str {
    match icon {
        VolumeIcon::Muted => "vol: muted",
        VolumeIcon::Low => "vol: low",
        VolumeIcon::Medium => "vol: mid",
        VolumeIcon::High => "vol: high",
    }
}

fn controls_text(controls: &ControlsSettings) -> String {
    format!(
        "[j/k] up/down | [enter] play selected | [space/p] play/pause | [h/l] prev/next | \
         [,/.] scrub -/+{}s | [s] shuffle | [r] repeat | [m] mute | [-/+] volume | [u] import | [q] quit",
        controls.scrub_seconds
    )
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, view: &ViewState<'_>, ui_settings: &UiSettings, controls: &ControlsSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" vivace ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now-playing box
    let status = match view.snapshot {
        Some(snapshot) => {
            let track = &snapshot.track;
            let mut parts = vec![
                format!("{} - {}", track.artist, track.title),
                format!("{} ({})", track.album, track.year),
                if snapshot.playing { "Playing".to_string() } else { "Paused".to_string() },
                format!("Shuffle: {}", if snapshot.shuffled { "ON" } else { "OFF" }),
                format!("Repeat: {}", if snapshot.repeating { "ON" } else { "OFF" }),
                volume_text(view.volume_icon).to_string(),
            ];
            if let Some(notice) = view.notice {
                parts.push(notice.to_string());
            }
            parts.join(" \u{2022} ")
        }
        None => "Stopped".to_string(),
    };
    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding { left: 1, right: 0, top: 0, bottom: 0 })
                .title(" now playing "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Seek gauge
    let (ratio, label) = match view.snapshot {
        Some(snapshot) => {
            let elapsed = snapshot.position;
            match snapshot.duration {
                Some(total) if !total.is_zero() => (
                    (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0),
                    format!("{} / {}", format_timecode(elapsed), format_timecode(total)),
                ),
                // Duration unknown until the device reports DataReady.
                _ => (0.0, format!("{} / -:--", format_timecode(elapsed))),
            }
        }
        None => (0.0, "-:-- / -:--".to_string()),
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" seek "))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, chunks[2]);

    // Playlist
    let playing_index = view.snapshot.map(|s| s.index);
    let items: Vec<ListItem> = view
        .catalog
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if Some(i) == playing_index { "\u{25b6} " } else { "  " };
            ListItem::new(format!("{marker}{} - {}", track.artist, track.title))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" playlist "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ratatui::widgets::ListState::default();
    if !view.catalog.is_empty() {
        list_state.select(Some(view.selected.min(view.catalog.len() - 1)));
    }
    frame.render_stateful_widget(list, chunks[3], &mut list_state);

    // Footer
    let footer = Paragraph::new(controls_text(controls))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding { left: 1, right: 0, top: 0, bottom: 0 }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_timecode_whole_seconds() {
        assert_eq!(format_timecode(Duration::ZERO), "0:00");
        assert_eq!(format_timecode(Duration::from_secs(61)), "1:01");
        assert_eq!(format_timecode(Duration::from_secs(600)), "10:00");
    }

    #[test]
    fn format_timecode_rounds_partial_seconds_up() {
        assert_eq!(format_timecode(Duration::from_millis(1500)), "0:02");
        assert_eq!(format_timecode(Duration::from_millis(60_400)), "1:01");
    }

    #[test]
    fn volume_text_matches_buckets() {
        assert_eq!(volume_text(VolumeIcon::Muted), "vol: muted");
        assert_eq!(volume_text(VolumeIcon::High), "vol: high");
    }
}
