use super::state::{ItemId, SelectionScope};
use super::store::SelectionStore;
use crate::error::BulkError;
use tracing::{debug, warn};

/// The filter/search criteria a list screen is currently scoped to. Carried
/// opaquely so an exclusion-based request can be pushed down to whatever
/// executes it ("delete everything matching F except these K ids").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
}

impl FilterCriteria {
    pub fn new(query: impl Into<String>) -> Self {
        FilterCriteria {
            query: query.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Delete,
    Export,
}

/// A logical selection resolved into something an executor can act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkRequest {
    /// A concrete ID list; `Page` and `Custom` scopes resolve here with no
    /// extra fetching.
    Ids(Vec<ItemId>),
    /// Everything matching `filter` except `excluded`; the `All` scope
    /// resolves here so the full ID list is never transmitted.
    AllExcept {
        excluded: Vec<ItemId>,
        filter: FilterCriteria,
    },
}

/// Outcome for one row of a bulk action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerIdResult {
    pub id: ItemId,
    pub error: Option<String>,
}

impl PerIdResult {
    pub fn ok(id: ItemId) -> Self {
        PerIdResult { id, error: None }
    }

    pub fn failed(id: ItemId, message: impl Into<String>) -> Self {
        PerIdResult {
            id,
            error: Some(message.into()),
        }
    }
}

/// Aggregated per-row outcomes of one bulk action.
#[derive(Debug, Clone, Default)]
pub struct BulkOutcome {
    pub succeeded: Vec<ItemId>,
    pub failed: Vec<(ItemId, String)>,
}

impl BulkOutcome {
    pub fn fully_successful(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Supplies page data for the currently active filter. The owner must clear
/// the selection store whenever that filter changes.
pub trait PageProvider {
    fn filter(&self) -> FilterCriteria;
    fn visible_ids(&self) -> Vec<ItemId>;
    fn total_count(&self) -> usize;
    /// Paged ID enumerator, used only by the slow-path fallback in
    /// [`run_bulk`]. Returns an empty slice past the end.
    fn id_page(&self, offset: usize, limit: usize) -> Vec<ItemId>;
}

/// Executes a resolved bulk request. Exclusion support is optional; when
/// absent the resolver materializes IDs through the provider instead.
pub trait ActionExecutor {
    fn execute_by_ids(
        &mut self,
        action: BulkAction,
        ids: &[ItemId],
    ) -> Result<Vec<PerIdResult>, BulkError>;

    fn supports_exclusion(&self) -> bool {
        false
    }

    fn execute_by_exclusion(
        &mut self,
        _action: BulkAction,
        _filter: &FilterCriteria,
        _excluded: &[ItemId],
    ) -> Result<Vec<PerIdResult>, BulkError> {
        Err(BulkError::ExclusionUnsupported)
    }
}

/// Converts the current selection into an actionable request. `None` scope
/// is a logic error: the bulk-action UI should have been disabled.
pub fn resolve(store: &SelectionStore, filter: &FilterCriteria) -> Result<BulkRequest, BulkError> {
    match store.scope() {
        SelectionScope::None => Err(BulkError::EmptySelection),
        SelectionScope::Page | SelectionScope::Custom => {
            Ok(BulkRequest::Ids(store.included_ids().cloned().collect()))
        }
        SelectionScope::All => Ok(BulkRequest::AllExcept {
            excluded: store.excluded_ids().cloned().collect(),
            filter: filter.clone(),
        }),
    }
}

// Page size used when the fallback has to enumerate IDs.
const ENUMERATION_CHUNK: usize = 500;

/// Drives one bulk action end to end: resolve, execute, then clear or prune
/// the store based on the outcome.
///
/// The store is frozen for the duration so no transition can race the
/// action. A transport-level failure leaves the selection exactly as it was
/// so the user can retry; per-row failures stay selected after the
/// successful rows are pruned.
pub fn run_bulk<P, E>(
    store: &mut SelectionStore,
    action: BulkAction,
    provider: &P,
    executor: &mut E,
) -> Result<BulkOutcome, BulkError>
where
    P: PageProvider,
    E: ActionExecutor,
{
    if store.is_frozen() {
        return Err(BulkError::ActionInProgress);
    }
    let filter = provider.filter();
    let request = resolve(store, &filter)?;

    store.freeze();
    let results = dispatch(action, request, provider, executor);
    store.thaw();

    let results = results?;
    let mut outcome = BulkOutcome::default();
    for result in results {
        match result.error {
            None => outcome.succeeded.push(result.id),
            Some(message) => outcome.failed.push((result.id, message)),
        }
    }

    debug!(
        ?action,
        succeeded = outcome.succeeded.len(),
        failed = outcome.failed.len(),
        "bulk action finished"
    );

    if outcome.fully_successful() {
        store.clear();
    } else {
        store.prune_deleted(&outcome.succeeded);
    }
    Ok(outcome)
}

fn dispatch<P, E>(
    action: BulkAction,
    request: BulkRequest,
    provider: &P,
    executor: &mut E,
) -> Result<Vec<PerIdResult>, BulkError>
where
    P: PageProvider,
    E: ActionExecutor,
{
    match request {
        BulkRequest::Ids(ids) => executor.execute_by_ids(action, &ids),
        BulkRequest::AllExcept { excluded, filter } => {
            if executor.supports_exclusion() {
                executor.execute_by_exclusion(action, &filter, &excluded)
            } else {
                // Slow path: the executor cannot push exclusion down, so the
                // full filtered ID list has to be materialized page by page.
                // Cost scales with the dataset, not with the selection.
                warn!(
                    excluded = excluded.len(),
                    "executor lacks exclusion support; enumerating all matching ids"
                );
                let ids = materialize_ids(provider, &excluded);
                executor.execute_by_ids(action, &ids)
            }
        }
    }
}

fn materialize_ids<P: PageProvider>(provider: &P, excluded: &[ItemId]) -> Vec<ItemId> {
    let mut ids = Vec::new();
    let mut offset = 0;
    loop {
        let page = provider.id_page(offset, ENUMERATION_CHUNK);
        if page.is_empty() {
            break;
        }
        offset += page.len();
        ids.extend(page.into_iter().filter(|id| !excluded.contains(id)));
    }
    ids
}
