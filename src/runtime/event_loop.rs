use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{Terminal, backend::Backend};

use crate::config::Settings;
use crate::library::{MetadataResolver, collect_uploads};
use crate::player::{PlaybackDevice, PlayerController};
use crate::ui;

/// Main terminal event loop: handles input, drives the controller tick and
/// draws each frame. Returns `Ok(())` when shutdown is requested.
pub fn run<B: Backend, D: PlaybackDevice>(
    terminal: &mut Terminal<B>,
    settings: &Settings,
    controller: &mut PlayerController<D>,
    resolver: &MetadataResolver,
    import_dir: Option<&Path>,
    initial_notice: Option<String>,
) -> Result<(), Box<dyn std::error::Error>>
where
    <B as Backend>::Error: 'static,
{
    let tick = Duration::from_millis(settings.playback.tick_ms.max(1));
    let notice_ttl = Duration::from_secs(settings.ui.notice_seconds);
    let scrub = Duration::from_secs(settings.controls.scrub_seconds);

    let mut selected = controller.current_index();
    let mut notice: Option<(String, Instant)> = initial_notice.map(|n| (n, Instant::now()));

    loop {
        controller.tick();

        if let Some((_, posted)) = &notice {
            if posted.elapsed() >= notice_ttl {
                notice = None;
            }
        }

        let snapshot = controller.snapshot();
        let view = ui::ViewState {
            catalog: controller.catalog(),
            snapshot: snapshot.as_ref(),
            selected,
            notice: notice.as_ref().map(|(n, _)| n.as_str()),
            volume_icon: controller.volume_icon(),
        };
        terminal.draw(|frame| ui::draw(frame, &view, &settings.ui, &settings.controls))?;

        if !event::poll(tick)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') => break,
            KeyCode::Char(' ') | KeyCode::Char('p') => controller.toggle_play_pause(),
            KeyCode::Char('l') | KeyCode::Right => {
                controller.advance();
                selected = controller.current_index();
            }
            KeyCode::Char('h') | KeyCode::Left => {
                controller.retreat();
                selected = controller.current_index();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = controller.catalog().len();
                if len > 0 {
                    selected = (selected + 1) % len;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let len = controller.catalog().len();
                if len > 0 {
                    selected = (selected + len - 1) % len;
                }
            }
            KeyCode::Enter => {
                if controller.select(selected).is_err() {
                    selected = controller.current_index();
                }
            }
            KeyCode::Char('s') => {
                controller.toggle_shuffle();
            }
            KeyCode::Char('r') => {
                controller.toggle_repeat();
            }
            KeyCode::Char('m') => controller.toggle_mute(),
            KeyCode::Char('-') => {
                controller.set_volume(controller.volume() - settings.controls.volume_step);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                controller.set_volume(controller.volume() + settings.controls.volume_step);
            }
            KeyCode::Char(',') => {
                if let Some(snapshot) = controller.snapshot() {
                    controller.seek_to(snapshot.position.saturating_sub(scrub));
                }
            }
            KeyCode::Char('.') => {
                if let Some(snapshot) = controller.snapshot() {
                    controller.seek_to(snapshot.position.saturating_add(scrub));
                }
            }
            KeyCode::Char('u') => {
                if let Some(dir) = import_dir {
                    let uploads = collect_uploads(dir, &settings.library);
                    let report = controller.import(&uploads, resolver);
                    notice = Some((report.notice(), Instant::now()));
                }
            }
            _ => {}
        }
    }

    Ok(())
}
