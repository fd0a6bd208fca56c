#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(super) enum AppMode {
    // pub(super) for use within tui module
    Normal,
    Filtering,
}

/// Running totals for the session, reported after the TUI exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionSummary {
    pub deleted: usize,
    pub exported: usize,
    pub failed: usize,
}
