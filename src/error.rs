use thiserror::Error;

/// Failures surfaced while resolving or executing a bulk action. Selection
/// transitions themselves never fail; unknown IDs are ignored.
#[derive(Debug, Error)]
pub enum BulkError {
    /// A bulk action was requested with nothing selected. The action UI
    /// should have been disabled, so reaching this is a caller logic error.
    #[error("no rows are selected")]
    EmptySelection,

    /// A bulk action was dispatched while another is still in flight.
    #[error("a bulk action is already in progress")]
    ActionInProgress,

    /// The executor was asked for an exclusion-based request it does not
    /// support. Internal to the resolver; the fallback path handles it.
    #[error("executor does not support exclusion-based requests")]
    ExclusionUnsupported,

    /// The whole call failed before any per-row outcome was produced. The
    /// selection is left untouched so the user can retry.
    #[error("bulk action transport failed: {0}")]
    Transport(String),
}
