use clap::Parser;
use std::path::PathBuf;

/// pagemark – Gmail-style bulk selection over a paginated catalog
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of rows to seed the demo catalog with.
    #[arg(long, value_name = "N", default_value_t = 1203)]
    pub count: usize,

    /// Rows per page.
    #[arg(long, value_name = "N", default_value_t = 25)]
    pub page_size: usize,

    /// Initial filter query (case-insensitive substring over title and kind).
    #[arg(long, value_name = "QUERY", default_value = "")]
    pub filter: String,

    /// Where bulk export writes its CSV.
    #[arg(long, value_name = "FILE", default_value = "pagemark-export.csv")]
    pub export_path: PathBuf,

    /// Pretend the backend cannot take exclusion-based bulk requests,
    /// forcing "select all pages" actions through the slow-path ID
    /// enumeration fallback.
    #[arg(long)]
    pub no_exclusion_api: bool,

    /// Run one bulk action over everything matching --filter and exit
    /// without the TUI.
    #[arg(long, value_enum, value_name = "ACTION")]
    pub headless: Option<HeadlessAction>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum HeadlessAction {
    Delete,
    Export,
}
