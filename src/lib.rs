//! Gmail-style multi-page bulk selection for paginated, filterable lists.
//!
//! The core is [`selection`]: a selection state machine that can cover an
//! arbitrarily large dataset — including "all N items matching the current
//! filter" — without ever materializing the full ID list, plus the pure
//! view helpers for checkbox rendering and the resolver that turns a
//! logical selection into an executable bulk request.
//!
//! Everything else is the demo harness: an in-memory [`catalog`] standing
//! in for the backend, and a [`tui`] admin screen driving the core.

pub mod catalog;
pub mod cli;
pub mod error;
pub mod selection;
pub mod tui;
pub mod utils;
pub mod workflow;

pub use error::BulkError;
pub use selection::{
    BulkAction, BulkOutcome, BulkRequest, FilterCriteria, ItemId, SelectionScope,
    SelectionSnapshot, SelectionStore,
};
