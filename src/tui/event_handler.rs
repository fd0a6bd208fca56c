use super::app_logic::TuiApp;
use super::app_state::AppMode;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::Duration;

// Key repeats and releases are ignored; a held-down checkbox toggle must
// not flap the selection.
pub(super) fn handle_events(app: &mut TuiApp) -> Result<()> {
    if !event::poll(Duration::from_millis(100))? {
        return Ok(());
    }
    if let Event::Key(key_event) = event::read()? {
        if key_event.kind == KeyEventKind::Press {
            match app.mode {
                AppMode::Normal => app.handle_normal_mode_input(key_event),
                AppMode::Filtering => app.handle_filtering_mode_input(key_event),
            }
        }
    }
    Ok(())
}
