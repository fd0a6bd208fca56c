use super::app_state::{AppMode, SessionSummary};
use crate::catalog::{Catalog, CatalogExecutor, CatalogQuery, ContentItem};
use crate::selection::{
    BulkAction, FilterCriteria, ItemId, PageProvider, SelectionStore, run_bulk, view,
};
use crate::utils;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fs::File;
use std::path::PathBuf;

// --- TuiApp struct and impl ---
pub struct TuiApp {
    pub(super) catalog: Catalog,
    pub(super) store: SelectionStore,
    pub(super) page: usize,
    pub(super) page_size: usize,
    pub(super) cursor_row: usize,
    pub(super) quit: bool,
    pub(super) mode: AppMode,
    pub(super) filter_input: String,
    pub(super) filter_cursor_pos: usize,
    pub(super) status: String,
    pub(super) summary: SessionSummary,
    export_path: PathBuf,
    exclusion_api: bool,
}

impl TuiApp {
    pub fn new(
        catalog: Catalog,
        page_size: usize,
        initial_filter: String,
        export_path: PathBuf,
        exclusion_api: bool,
    ) -> Self {
        TuiApp {
            catalog,
            store: SelectionStore::new(),
            page: 0,
            page_size: page_size.max(1),
            cursor_row: 0,
            quit: false,
            mode: AppMode::Normal,
            filter_input: initial_filter,
            filter_cursor_pos: 0,
            status: String::new(),
            summary: SessionSummary::default(),
            export_path,
            exclusion_api,
        }
    }

    pub(super) fn filter(&self) -> FilterCriteria {
        FilterCriteria::new(self.filter_input.clone())
    }

    /// Captures the current filter/page window. Cheap enough to recompute
    /// per event and per frame; the page is clamped so deletions can never
    /// leave the cursor past the end of the list.
    pub(super) fn current_query(&mut self) -> CatalogQuery {
        let mut query = CatalogQuery::capture(&self.catalog, &self.filter(), self.page, self.page_size);
        let last_page = query.page_count() - 1;
        if self.page > last_page {
            self.page = last_page;
            query = CatalogQuery::capture(&self.catalog, &self.filter(), self.page, self.page_size);
        }
        let rows = query.visible_ids().len();
        if self.cursor_row >= rows {
            self.cursor_row = rows.saturating_sub(1);
        }
        query
    }

    pub(super) fn visible_rows(&mut self) -> Vec<ContentItem> {
        let query = self.current_query();
        query
            .visible_ids()
            .iter()
            .filter_map(|id| self.catalog.get(id).cloned())
            .collect()
    }

    pub(super) fn move_cursor(&mut self, delta: i32) {
        let rows = self.current_query().visible_ids().len();
        if rows == 0 {
            return;
        }
        let pos = self.cursor_row as i32 + delta;
        self.cursor_row = pos.rem_euclid(rows as i32) as usize;
    }

    pub(super) fn next_page(&mut self) {
        let last_page = self.current_query().page_count() - 1;
        if self.page < last_page {
            self.page += 1;
            self.cursor_row = 0;
        }
    }

    pub(super) fn previous_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.cursor_row = 0;
        }
    }

    fn cursor_id(&mut self) -> Option<ItemId> {
        let query = self.current_query();
        query.visible_ids().get(self.cursor_row).cloned()
    }

    pub(super) fn toggle_cursor_row(&mut self) {
        if let Some(id) = self.cursor_id() {
            let checked = !self.store.is_selected(&id);
            self.store.toggle_one(&id, checked);
        }
    }

    /// Header checkbox: checked header unchecks the page, anything else
    /// checks it.
    pub(super) fn toggle_page_checkbox(&mut self) {
        let query = self.current_query();
        let visible = query.visible_ids();
        let page_view = view::page_view(&self.store.snapshot(), &visible);
        self.store
            .toggle_page(&visible, !page_view.header_checked, self.page);
    }

    pub(super) fn select_all_matching(&mut self) {
        let total = self.current_query().total_count();
        self.store.select_all(total);
        self.status = format!(
            "Selected all {} items matching the current filter",
            utils::group_digits(total)
        );
    }

    pub(super) fn clear_selection(&mut self) {
        self.store.clear();
        self.status = "Selection cleared".to_string();
    }

    /// The active filter changed, so every previously captured ID may be
    /// invalid for the new result set. The selection is dropped wholesale.
    pub(super) fn on_filter_changed(&mut self) {
        self.store.clear();
        self.page = 0;
        self.cursor_row = 0;
    }

    pub(super) fn dispatch_bulk(&mut self, action: BulkAction) {
        if self.store.snapshot().is_empty() {
            self.status = "Nothing selected".to_string();
            return;
        }
        let query = self.current_query();
        let outcome = match action {
            BulkAction::Delete => {
                let mut executor =
                    CatalogExecutor::new(&mut self.catalog, std::io::sink(), self.exclusion_api);
                run_bulk(&mut self.store, action, &query, &mut executor)
            }
            BulkAction::Export => {
                let file = match File::create(&self.export_path) {
                    Ok(file) => file,
                    Err(e) => {
                        self.status =
                            format!("Cannot open {}: {e}", self.export_path.display());
                        return;
                    }
                };
                let mut executor =
                    CatalogExecutor::new(&mut self.catalog, file, self.exclusion_api);
                run_bulk(&mut self.store, action, &query, &mut executor)
            }
        };

        match outcome {
            Ok(outcome) => {
                let verb = match action {
                    BulkAction::Delete => "Deleted",
                    BulkAction::Export => "Exported",
                };
                match action {
                    BulkAction::Delete => self.summary.deleted += outcome.succeeded.len(),
                    BulkAction::Export => self.summary.exported += outcome.succeeded.len(),
                }
                self.summary.failed += outcome.failed.len();
                self.status = if outcome.fully_successful() {
                    format!("{verb} {} items", utils::group_digits(outcome.succeeded.len()))
                } else {
                    // Failed rows stay selected for retry or inspection.
                    let first = &outcome.failed[0];
                    format!(
                        "{verb} {} items; {} failed and remain selected (e.g. {}: {})",
                        utils::group_digits(outcome.succeeded.len()),
                        outcome.failed.len(),
                        first.0,
                        first.1
                    )
                };
            }
            Err(e) => self.status = format!("Bulk action failed: {e}"),
        }
        // Deletions may have emptied the tail pages.
        self.current_query();
    }

    // --- Event handling sub-methods ---
    pub(super) fn handle_normal_mode_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('/') => {
                self.mode = AppMode::Filtering;
                self.filter_cursor_pos = self.filter_input.len();
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Right | KeyCode::Char('n') => self.next_page(),
            KeyCode::Left | KeyCode::Char('p') => self.previous_page(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_cursor_row(),
            KeyCode::Char('a') => {
                if key_event.modifiers.is_empty() {
                    self.toggle_page_checkbox();
                }
            }
            KeyCode::Char('A') => self.select_all_matching(),
            KeyCode::Char('c') => self.clear_selection(),
            KeyCode::Char('d') => self.dispatch_bulk(BulkAction::Delete),
            KeyCode::Char('e') => self.dispatch_bulk(BulkAction::Export),
            _ => {}
        }
    }

    pub(super) fn handle_filtering_mode_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
            }
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.filter_input.clear();
                self.filter_cursor_pos = 0;
                self.on_filter_changed();
            }
            KeyCode::Char(c) if key_event.modifiers != KeyModifiers::CONTROL => {
                self.filter_input.insert(self.filter_cursor_pos, c);
                self.filter_cursor_pos += 1;
                self.on_filter_changed();
            }
            KeyCode::Backspace => {
                if self.filter_cursor_pos > 0 && !self.filter_input.is_empty() {
                    self.filter_cursor_pos -= 1;
                    self.filter_input.remove(self.filter_cursor_pos);
                    self.on_filter_changed();
                }
            }
            KeyCode::Left => {
                if self.filter_cursor_pos > 0 {
                    self.filter_cursor_pos -= 1;
                }
            }
            KeyCode::Right => {
                if self.filter_cursor_pos < self.filter_input.len() {
                    self.filter_cursor_pos += 1;
                }
            }
            _ => {}
        }
    }
}
