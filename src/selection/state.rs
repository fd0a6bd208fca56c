use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// Opaque row identifier, as handed out by the backing dataset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Selection mode. `All` means "everything matching the active filter",
/// tracked by exception rather than by enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionScope {
    #[default]
    None,
    Page,
    Custom,
    All,
}

/// Read-only view of the selection, handed to renderers. Holds no page
/// knowledge; combine with the current visible IDs via `view::page_view`.
#[derive(Debug, Clone)]
pub struct SelectionSnapshot {
    pub scope: SelectionScope,
    pub selected_count: usize,
    pub(super) included: BTreeSet<ItemId>,
    pub(super) excluded: BTreeSet<ItemId>,
}

impl SelectionSnapshot {
    pub fn is_selected(&self, id: &ItemId) -> bool {
        match self.scope {
            SelectionScope::All => !self.excluded.contains(id),
            _ => self.included.contains(id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scope == SelectionScope::None
    }
}
