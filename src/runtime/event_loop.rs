use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PromptKind};
use crate::config;
use crate::controller::{Command, PlaylistController};
use crate::media::{Media, MediaEvent};
use crate::ui;

/// Main terminal event loop: drains media notifications, draws the UI and
/// turns key presses into controller commands. Returns `Ok(())` when
/// shutdown is requested.
pub fn run<M: Media>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut PlaylistController<M, App>,
    events: &Receiver<MediaEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(ev) = events.try_recv() {
            controller.on_media_event(ev);
        }

        terminal.draw(|f| ui::draw(f, controller.surface(), &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(cmd) = handle_key_event(key, settings, controller) {
                    if controller.handle(cmd) {
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Translate a key press into a command, or apply it to the view directly
/// (cursor movement, prompt editing) and return `None`.
fn handle_key_event<M: Media>(
    key: KeyEvent,
    settings: &config::Settings,
    controller: &mut PlaylistController<M, App>,
) -> Option<Command> {
    if controller.surface().prompt.is_some() {
        let app = controller.surface_mut();
        match key.code {
            KeyCode::Esc => app.cancel_prompt(),
            KeyCode::Backspace => app.pop_prompt_char(),
            KeyCode::Enter => return app.submit_prompt(),
            KeyCode::Char(c) if !c.is_control() => app.push_prompt_char(c),
            _ => {}
        }
        return None;
    }

    let controls = &settings.controls;
    match key.code {
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            // Whichever of play/pause is currently offered.
            if controller.state().playing {
                Some(Command::Pause)
            } else {
                Some(Command::Play)
            }
        }
        KeyCode::Char('l') => Some(Command::Next),
        KeyCode::Char('h') => Some(Command::Previous),
        KeyCode::Char('s') => Some(Command::ToggleShuffle),
        KeyCode::Char('L') => Some(Command::Seek(
            controller.surface().progress + controls.seek_step_percent,
        )),
        KeyCode::Char('H') => Some(Command::Seek(
            controller.surface().progress - controls.seek_step_percent,
        )),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::SetPlaybackRate(
            controller.state().playback_rate + controls.rate_step,
        )),
        KeyCode::Char('-') => {
            let slower = controller.state().playback_rate - controls.rate_step;
            Some(Command::SetPlaybackRate(slower.max(controls.rate_step)))
        }
        KeyCode::Char('j') => {
            controller.surface_mut().next();
            None
        }
        KeyCode::Char('k') => {
            controller.surface_mut().prev();
            None
        }
        KeyCode::Char('g') => {
            controller.surface_mut().select_first();
            None
        }
        KeyCode::Char('G') => {
            controller.surface_mut().select_last();
            None
        }
        KeyCode::Enter => {
            let app = controller.surface();
            app.has_tracks().then(|| Command::PlayAt(app.selected))
        }
        KeyCode::Char('o') => {
            controller.surface_mut().open_prompt(PromptKind::Files);
            None
        }
        KeyCode::Char('O') => {
            controller.surface_mut().open_prompt(PromptKind::Folder);
            None
        }
        _ => None,
    }
}
