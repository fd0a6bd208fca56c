use super::app_logic::TuiApp;
use super::app_state::AppMode;
use crate::selection::{PageProvider, view};
use crate::utils;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

pub(super) fn ui_frame(frame: &mut Frame, app: &mut TuiApp) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title/Help
            Constraint::Length(3), // Header checkbox + banner
            Constraint::Min(0),    // Rows
            Constraint::Length(3), // Filter / status
        ])
        .split(frame.area());

    let help_text = "jk: Move | Space: Toggle Row | a: Toggle Page | A: Select All Pages | c: Clear | np: Page | /: Filter | d: Delete | e: Export | q: Quit";
    let help_paragraph = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Pagemark Content Admin"),
    );
    frame.render_widget(help_paragraph, layout[0]);

    let query = app.current_query();
    let visible = query.visible_ids();
    let snapshot = app.store.snapshot();
    let page_view = view::page_view(&snapshot, &visible);

    let header_mark = if page_view.header_checked {
        "[x]"
    } else if page_view.header_indeterminate {
        "[~]"
    } else {
        "[ ]"
    };
    let banner = view::summary_line(&snapshot).unwrap_or_else(|| "No selection".to_string());
    let header_line = format!(
        "{header_mark}  Page {}/{}  ({} matching)   {banner}",
        query.page() + 1,
        query.page_count(),
        utils::group_digits(query.total_count()),
    );
    frame.render_widget(
        Paragraph::new(header_line).block(Block::default().borders(Borders::ALL)),
        layout[1],
    );

    let rows = app.visible_rows();
    let list_items: Vec<ListItem> = rows
        .iter()
        .map(|item| {
            let mark = if view::row_checked(&snapshot, &item.id) {
                "[x]"
            } else {
                "[ ]"
            };
            let lock = if item.locked { " (locked)" } else { "" };
            ListItem::new(format!(
                "{mark} {}  {:<10}  {}{lock}",
                item.id,
                item.kind.label(),
                item.title
            ))
        })
        .collect();

    let list_widget = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title("Items"))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut list_state = ratatui::widgets::ListState::default();
    if !rows.is_empty() {
        list_state.select(Some(app.cursor_row.min(rows.len() - 1)));
    }
    frame.render_stateful_widget(list_widget, layout[2], &mut list_state);

    let footer = match app.mode {
        AppMode::Filtering => format!("Filter: {}_", app.filter_input),
        AppMode::Normal if !app.filter_input.is_empty() => {
            format!("Filter: {}   {}", app.filter_input, app.status)
        }
        AppMode::Normal => app.status.clone(),
    };
    frame.render_widget(
        Paragraph::new(footer).block(Block::default().borders(Borders::ALL)),
        layout[3],
    );
}
