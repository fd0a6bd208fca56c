use crate::catalog::{Catalog, CatalogExecutor, CatalogQuery};
use crate::cli::{Cli, HeadlessAction};
use crate::selection::{BulkAction, FilterCriteria, PageProvider, SelectionStore, run_bulk};
use crate::{tui, utils};
use anyhow::Result;
use std::fs::File;

// Main orchestrator for the pagemark demo binary.
pub fn run_pagemark(cli_args: Cli) -> Result<()> {
    let catalog = Catalog::seeded(cli_args.count);

    match cli_args.headless {
        Some(action) => run_headless_mode(catalog, &cli_args, action.into()),
        None => {
            let summary = tui::run_admin_tui(
                catalog,
                cli_args.page_size,
                cli_args.filter.clone(),
                cli_args.export_path.clone(),
                !cli_args.no_exclusion_api,
            )?;
            println!(
                "Session finished: {} deleted, {} exported, {} failed.",
                utils::group_digits(summary.deleted),
                utils::group_digits(summary.exported),
                summary.failed
            );
            if summary.exported > 0 {
                println!("Export written to {}", cli_args.export_path.display());
            }
            Ok(())
        }
    }
}

impl From<HeadlessAction> for BulkAction {
    fn from(action: HeadlessAction) -> Self {
        match action {
            HeadlessAction::Delete => BulkAction::Delete,
            HeadlessAction::Export => BulkAction::Export,
        }
    }
}

// Headless mode: select everything matching the filter and run one bulk
// action, the way a script would drive the admin screen.
fn run_headless_mode(mut catalog: Catalog, cli_args: &Cli, action: BulkAction) -> Result<()> {
    let filter = FilterCriteria::new(cli_args.filter.clone());
    let query = CatalogQuery::capture(&catalog, &filter, 0, cli_args.page_size);
    if query.total_count() == 0 {
        println!("No items matched the filter {:?}.", cli_args.filter);
        return Ok(());
    }

    let mut store = SelectionStore::new();
    store.select_all(query.total_count());

    let exclusion_api = !cli_args.no_exclusion_api;
    let outcome = match action {
        BulkAction::Delete => {
            let mut executor = CatalogExecutor::new(&mut catalog, std::io::sink(), exclusion_api);
            run_bulk(&mut store, action, &query, &mut executor)?
        }
        BulkAction::Export => {
            let file = File::create(&cli_args.export_path)?;
            let mut executor = CatalogExecutor::new(&mut catalog, file, exclusion_api);
            run_bulk(&mut store, action, &query, &mut executor)?
        }
    };

    let verb = match action {
        BulkAction::Delete => "Deleted",
        BulkAction::Export => "Exported",
    };
    println!(
        "{verb} {} of {} matching items.",
        utils::group_digits(outcome.succeeded.len()),
        utils::group_digits(query.total_count())
    );
    if action == BulkAction::Export && !outcome.succeeded.is_empty() {
        println!("Export written to {}", cli_args.export_path.display());
    }
    // Surface failures per item, never as one opaque message.
    for (id, message) in &outcome.failed {
        eprintln!("⚠️ {id}: {message}");
    }
    if !outcome.failed.is_empty() {
        eprintln!(
            "{} items failed and would remain selected for retry.",
            outcome.failed.len()
        );
        std::process::exit(1);
    }
    Ok(())
}
