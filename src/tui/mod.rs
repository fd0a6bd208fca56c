// Interactive admin screen over a paginated catalog: checkbox column,
// header checkbox, selection banner, filter input, and bulk delete/export.
mod app_logic;
mod app_state;
mod event_handler;
mod ui_renderer;

pub use app_state::SessionSummary;

pub use self::run_tui::run_admin_tui;

// Terminal setup/teardown and the main loop.
mod run_tui {
    use super::app_logic::TuiApp;
    use super::app_state::SessionSummary;
    use super::event_handler::handle_events;
    use super::ui_renderer::ui_frame;
    use crate::catalog::Catalog;
    use anyhow::Result;
    use crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use ratatui::prelude::{CrosstermBackend, Terminal};
    use std::io::{self, Stdout};
    use std::path::PathBuf;

    pub fn run_admin_tui(
        catalog: Catalog,
        page_size: usize,
        initial_filter: String,
        export_path: PathBuf,
        exclusion_api: bool,
    ) -> Result<SessionSummary> {
        let mut app = TuiApp::new(
            catalog,
            page_size,
            initial_filter,
            export_path,
            exclusion_api,
        );

        let mut terminal = init_terminal()?;
        while !app.quit {
            terminal.draw(|frame| ui_frame(frame, &mut app))?;
            handle_events(&mut app)?;
        }
        restore_terminal(terminal)?;

        Ok(app.summary)
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor().map_err(Into::into)
    }
}
