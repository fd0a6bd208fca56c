use crate::error::BulkError;
use crate::selection::{
    ActionExecutor, BulkAction, FilterCriteria, ItemId, PageProvider, PerIdResult,
};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Module,
    Assessment,
    Survey,
}

impl ContentKind {
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Module => "module",
            ContentKind::Assessment => "assessment",
            ContentKind::Survey => "survey",
        }
    }
}

/// One row of learning content in the admin list.
#[derive(Debug, Clone)]
pub struct ContentItem {
    pub id: ItemId,
    pub title: String,
    pub kind: ContentKind,
    /// Locked rows refuse deletion, standing in for server-side constraint
    /// failures during bulk actions.
    pub locked: bool,
}

/// In-memory learning-content dataset. Plays the role the REST backend has
/// in the real admin screens: filtering, paging, bulk delete, and export all
/// go through it.
pub struct Catalog {
    items: Vec<ContentItem>,
}

const SUBJECTS: [&str; 10] = [
    "Linear Algebra",
    "Statistics",
    "Cell Biology",
    "Organic Chemistry",
    "World History",
    "Microeconomics",
    "Thermodynamics",
    "Data Structures",
    "Genetics",
    "Rhetoric",
];

impl Catalog {
    /// Deterministic seed data so demo runs and tests are reproducible.
    pub fn seeded(count: usize) -> Self {
        let items = (0..count)
            .map(|i| {
                let kind = match i % 3 {
                    0 => ContentKind::Module,
                    1 => ContentKind::Assessment,
                    _ => ContentKind::Survey,
                };
                let subject = SUBJECTS[i % SUBJECTS.len()];
                let unit = (i / SUBJECTS.len()) % 12 + 1;
                ContentItem {
                    id: ItemId::from(format!("itm-{i:05}")),
                    title: format!("{subject}: Unit {unit}"),
                    kind,
                    locked: i % 23 == 5,
                }
            })
            .collect();
        Catalog { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&ContentItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    fn matches(item: &ContentItem, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        item.title.to_lowercase().contains(&needle) || item.kind.label().contains(&needle)
    }

    pub fn filtered(&self, filter: &FilterCriteria) -> Vec<&ContentItem> {
        self.items
            .iter()
            .filter(|item| Self::matches(item, &filter.query))
            .collect()
    }

    fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }
}

/// A page of the catalog captured for one filter/page combination. Owns the
/// matching ID list so the catalog itself stays free for mutation once a
/// bulk action runs; a real deployment would hold a server cursor here
/// instead.
pub struct CatalogQuery {
    filter: FilterCriteria,
    matching_ids: Vec<ItemId>,
    page: usize,
    page_size: usize,
}

impl CatalogQuery {
    pub fn capture(
        catalog: &Catalog,
        filter: &FilterCriteria,
        page: usize,
        page_size: usize,
    ) -> Self {
        CatalogQuery {
            filter: filter.clone(),
            matching_ids: catalog
                .filtered(filter)
                .into_iter()
                .map(|item| item.id.clone())
                .collect(),
            page,
            page_size,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.matching_ids.len().div_ceil(self.page_size).max(1)
    }
}

impl PageProvider for CatalogQuery {
    fn filter(&self) -> FilterCriteria {
        self.filter.clone()
    }

    fn visible_ids(&self) -> Vec<ItemId> {
        self.matching_ids
            .iter()
            .skip(self.page * self.page_size)
            .take(self.page_size)
            .cloned()
            .collect()
    }

    fn total_count(&self) -> usize {
        self.matching_ids.len()
    }

    fn id_page(&self, offset: usize, limit: usize) -> Vec<ItemId> {
        self.matching_ids
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }
}

/// Executes bulk delete and export against the catalog. Exclusion support
/// is switchable so the resolver's slow-path fallback can be exercised from
/// the CLI.
pub struct CatalogExecutor<'a, W: Write> {
    catalog: &'a mut Catalog,
    export: csv::Writer<W>,
    wrote_header: bool,
    exclusion_capable: bool,
}

impl<'a, W: Write> CatalogExecutor<'a, W> {
    pub fn new(catalog: &'a mut Catalog, export_sink: W, exclusion_capable: bool) -> Self {
        CatalogExecutor {
            catalog,
            export: csv::Writer::from_writer(export_sink),
            wrote_header: false,
            exclusion_capable,
        }
    }

    fn run(&mut self, action: BulkAction, ids: &[ItemId]) -> Result<Vec<PerIdResult>, BulkError> {
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            match action {
                BulkAction::Delete => {
                    let locked = self.catalog.get(id).is_some_and(|item| item.locked);
                    if locked {
                        results.push(PerIdResult::failed(id.clone(), "row is locked"));
                    } else if self.catalog.remove(id) {
                        results.push(PerIdResult::ok(id.clone()));
                    } else {
                        results.push(PerIdResult::failed(id.clone(), "row no longer exists"));
                    }
                }
                BulkAction::Export => match self.catalog.get(id) {
                    Some(item) => {
                        let record = [
                            item.id.as_str().to_string(),
                            item.kind.label().to_string(),
                            item.title.clone(),
                            item.locked.to_string(),
                        ];
                        self.write_export(&record)?;
                        results.push(PerIdResult::ok(id.clone()));
                    }
                    None => results.push(PerIdResult::failed(id.clone(), "row no longer exists")),
                },
            }
        }
        self.export
            .flush()
            .map_err(|e| BulkError::Transport(e.to_string()))?;
        Ok(results)
    }

    fn write_export(&mut self, record: &[String; 4]) -> Result<(), BulkError> {
        if !self.wrote_header {
            self.export
                .write_record(["id", "kind", "title", "locked"])
                .map_err(|e| BulkError::Transport(e.to_string()))?;
            self.wrote_header = true;
        }
        self.export
            .write_record(record)
            .map_err(|e| BulkError::Transport(e.to_string()))
    }
}

impl<W: Write> ActionExecutor for CatalogExecutor<'_, W> {
    fn execute_by_ids(
        &mut self,
        action: BulkAction,
        ids: &[ItemId],
    ) -> Result<Vec<PerIdResult>, BulkError> {
        self.run(action, ids)
    }

    fn supports_exclusion(&self) -> bool {
        self.exclusion_capable
    }

    fn execute_by_exclusion(
        &mut self,
        action: BulkAction,
        filter: &FilterCriteria,
        excluded: &[ItemId],
    ) -> Result<Vec<PerIdResult>, BulkError> {
        if !self.exclusion_capable {
            return Err(BulkError::ExclusionUnsupported);
        }
        // Exclusion pushed down: match against the filter here, the way the
        // real backend applies "everything matching F except these K ids".
        let targets: Vec<ItemId> = self
            .catalog
            .filtered(filter)
            .into_iter()
            .map(|item| item.id.clone())
            .filter(|id| !excluded.contains(id))
            .collect();
        self.run(action, &targets)
    }
}
