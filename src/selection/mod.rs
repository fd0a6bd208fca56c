// The selection core: state machine, derived view helpers, and the bulk
// action resolver. Framework-free; the TUI in `crate::tui` is one consumer.
mod resolver;
mod state;
mod store;
pub mod view;

pub use resolver::{
    ActionExecutor, BulkAction, BulkOutcome, BulkRequest, FilterCriteria, PageProvider,
    PerIdResult, resolve, run_bulk,
};
pub use state::{ItemId, SelectionScope, SelectionSnapshot};
pub use store::SelectionStore;
