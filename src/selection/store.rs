use super::state::{ItemId, SelectionScope, SelectionSnapshot};
use std::collections::BTreeSet;
use tracing::debug;

/// The selection state machine for one paginated list screen.
///
/// Rows can be selected across pages — including "all N rows matching the
/// current filter" — without the full ID list ever being enumerated. In
/// `All` scope only the *exceptions* are tracked; in `Page`/`Custom` scope
/// only the inclusions are. The two sets are never populated at the same
/// time.
///
/// Every transition is a total function: unknown IDs and redundant toggles
/// are no-ops, never errors, and each operation is idempotent.
#[derive(Debug, Default)]
pub struct SelectionStore {
    scope: SelectionScope,
    included: BTreeSet<ItemId>,
    excluded: BTreeSet<ItemId>,
    total_count: usize,
    page_ref: Option<usize>,
    frozen: bool,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(&self) -> SelectionScope {
        self.scope
    }

    /// Aggregate count of logically selected rows. In `All` scope this is
    /// the captured total minus the exclusions; the full ID list is never
    /// consulted.
    pub fn selected_count(&self) -> usize {
        match self.scope {
            SelectionScope::All => self.total_count.saturating_sub(self.excluded.len()),
            _ => self.included.len(),
        }
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        match self.scope {
            SelectionScope::All => !self.excluded.contains(id),
            _ => self.included.contains(id),
        }
    }

    /// Page the header checkbox was on when scope last became `Page`.
    /// Informational only.
    pub fn page_ref(&self) -> Option<usize> {
        self.page_ref
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Blocks all transitions while a bulk action is in flight, so the user
    /// cannot reselect rows that are mid-deletion.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn thaw(&mut self) {
        self.frozen = false;
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            scope: self.scope,
            selected_count: self.selected_count(),
            included: self.included.clone(),
            excluded: self.excluded.clone(),
        }
    }

    pub(super) fn included_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.included.iter()
    }

    pub(super) fn excluded_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.excluded.iter()
    }

    /// Header checkbox toggled over the rows currently on screen.
    pub fn toggle_page(&mut self, visible: &[ItemId], checked: bool, page: usize) {
        if self.frozen {
            return;
        }
        if checked {
            if self.scope == SelectionScope::All {
                // Already covering everything; just drop any exceptions for
                // rows on this page.
                for id in visible {
                    self.excluded.remove(id);
                }
            } else {
                self.scope = SelectionScope::Page;
                self.included = visible.iter().cloned().collect();
                self.excluded.clear();
                self.page_ref = Some(page);
            }
        } else if self.scope == SelectionScope::All {
            self.excluded.extend(visible.iter().cloned());
        } else {
            let before = self.included.len();
            for id in visible {
                self.included.remove(id);
            }
            if self.included.len() != before {
                self.scope = SelectionScope::Custom;
            }
        }
        self.normalize();
    }

    /// Row checkbox toggled for a single ID.
    pub fn toggle_one(&mut self, id: &ItemId, checked: bool) {
        if self.frozen {
            return;
        }
        if self.scope == SelectionScope::All {
            if checked {
                self.excluded.remove(id);
            } else {
                self.excluded.insert(id.clone());
            }
        } else if checked {
            let grew = self.included.insert(id.clone());
            self.scope = match self.scope {
                // A no-op insert leaves a whole-page selection intact; a
                // genuine addition means it no longer maps to one page.
                SelectionScope::Page if grew => SelectionScope::Custom,
                SelectionScope::None => SelectionScope::Custom,
                other => other,
            };
        } else if self.included.remove(id) && self.scope == SelectionScope::Page {
            self.scope = SelectionScope::Custom;
        }
        self.normalize();
    }

    /// Select every row matching the active filter, across all pages. The
    /// only operation that can select rows never fetched into this session.
    pub fn select_all(&mut self, total_count: usize) {
        if self.frozen {
            return;
        }
        self.scope = SelectionScope::All;
        self.included.clear();
        self.excluded.clear();
        self.total_count = total_count;
        self.page_ref = None;
        self.normalize();
    }

    /// Back to the empty state. Must be called whenever the active filter
    /// changes or the dataset is refetched: previously captured IDs may no
    /// longer belong to the new result set.
    pub fn clear(&mut self) {
        self.scope = SelectionScope::None;
        self.included.clear();
        self.excluded.clear();
        self.total_count = 0;
        self.page_ref = None;
    }

    /// Drops rows that no longer exist, typically the successful subset of
    /// a partially failed bulk delete. Failed rows stay selected so the
    /// user can retry. In `All` scope the captured total is decremented so
    /// the aggregate count stays accurate for that retry.
    pub fn prune_deleted(&mut self, deleted: &[ItemId]) {
        if deleted.is_empty() {
            return;
        }
        if self.scope == SelectionScope::All {
            for id in deleted {
                self.excluded.remove(id);
            }
            self.total_count = self.total_count.saturating_sub(deleted.len());
        } else {
            let before = self.included.len();
            for id in deleted {
                self.included.remove(id);
            }
            if self.included.len() != before && self.scope == SelectionScope::Page {
                self.scope = SelectionScope::Custom;
            }
        }
        debug!(
            scope = ?self.scope,
            remaining = self.selected_count(),
            pruned = deleted.len(),
            "pruned deleted rows from selection"
        );
        self.normalize();
    }

    // A selection that covers nothing is the empty state, and the set not
    // backing the current scope must stay empty.
    fn normalize(&mut self) {
        match self.scope {
            SelectionScope::All => {
                self.included.clear();
                if self.total_count <= self.excluded.len() {
                    self.clear();
                }
            }
            SelectionScope::Page | SelectionScope::Custom => {
                self.excluded.clear();
                if self.included.is_empty() {
                    self.clear();
                }
            }
            SelectionScope::None => {
                self.included.clear();
                self.excluded.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(names: &[&str]) -> Vec<ItemId> {
        names.iter().map(|n| ItemId::from(*n)).collect()
    }

    #[test]
    fn starts_empty() {
        let store = SelectionStore::new();
        assert_eq!(store.scope(), SelectionScope::None);
        assert_eq!(store.selected_count(), 0);
        assert!(!store.is_selected(&ItemId::from("a")));
    }

    #[test]
    fn toggle_page_selects_whole_page() {
        let mut store = SelectionStore::new();
        let visible = ids(&["a", "b", "c"]);
        store.toggle_page(&visible, true, 2);
        assert_eq!(store.scope(), SelectionScope::Page);
        assert_eq!(store.selected_count(), 3);
        assert_eq!(store.page_ref(), Some(2));
        assert!(store.is_selected(&visible[1]));
    }

    #[test]
    fn page_becomes_custom_after_single_untoggle() {
        let mut store = SelectionStore::new();
        let visible: Vec<ItemId> = (0..10).map(|i| ItemId::from(format!("r{i}"))).collect();
        store.toggle_page(&visible, true, 1);
        assert_eq!(store.scope(), SelectionScope::Page);
        assert_eq!(store.selected_count(), 10);

        store.toggle_one(&visible[0], false);
        assert_eq!(store.scope(), SelectionScope::Custom);
        assert_eq!(store.selected_count(), 9);
    }

    #[test]
    fn retoggling_page_member_keeps_page_scope() {
        let mut store = SelectionStore::new();
        let visible = ids(&["a", "b"]);
        store.toggle_page(&visible, true, 1);
        store.toggle_one(&visible[0], true);
        assert_eq!(store.scope(), SelectionScope::Page);
        assert_eq!(store.selected_count(), 2);
    }

    #[test]
    fn adding_beyond_page_becomes_custom() {
        let mut store = SelectionStore::new();
        store.toggle_page(&ids(&["a", "b"]), true, 1);
        store.toggle_one(&ItemId::from("z"), true);
        assert_eq!(store.scope(), SelectionScope::Custom);
        assert_eq!(store.selected_count(), 3);
    }

    #[test]
    fn untoggling_all_included_clears_to_none() {
        let mut store = SelectionStore::new();
        store.toggle_one(&ItemId::from("a"), true);
        store.toggle_one(&ItemId::from("b"), true);
        assert_eq!(store.scope(), SelectionScope::Custom);

        store.toggle_one(&ItemId::from("a"), false);
        store.toggle_one(&ItemId::from("b"), false);
        assert_eq!(store.scope(), SelectionScope::None);
        assert_eq!(store.selected_count(), 0);
    }

    #[test]
    fn unchecking_header_on_partial_page_leaves_rest_selected() {
        let mut store = SelectionStore::new();
        store.toggle_one(&ItemId::from("a"), true);
        store.toggle_one(&ItemId::from("x"), true);
        // Header unchecked over a page containing only "a".
        store.toggle_page(&ids(&["a"]), false, 1);
        assert_eq!(store.scope(), SelectionScope::Custom);
        assert_eq!(store.selected_count(), 1);
        assert!(store.is_selected(&ItemId::from("x")));
    }

    #[test]
    fn select_all_then_exclude_two() {
        let mut store = SelectionStore::new();
        store.select_all(1203);
        assert_eq!(store.scope(), SelectionScope::All);
        assert_eq!(store.selected_count(), 1203);

        store.toggle_one(&ItemId::from("x7"), false);
        store.toggle_one(&ItemId::from("x9"), false);
        assert_eq!(store.scope(), SelectionScope::All);
        assert_eq!(store.selected_count(), 1201);
        assert!(!store.is_selected(&ItemId::from("x7")));
        assert!(!store.is_selected(&ItemId::from("x9")));
        assert!(store.is_selected(&ItemId::from("anything-else")));
    }

    #[test]
    fn exclude_then_reinclude_round_trips() {
        let mut store = SelectionStore::new();
        store.select_all(500);
        store.toggle_one(&ItemId::from("x"), false);
        assert_eq!(store.selected_count(), 499);
        store.toggle_one(&ItemId::from("x"), true);
        assert_eq!(store.selected_count(), 500);
        assert_eq!(store.snapshot().excluded.len(), 0);
    }

    #[test]
    fn header_check_in_all_scope_reincludes_page() {
        let mut store = SelectionStore::new();
        store.select_all(100);
        let visible = ids(&["a", "b", "c"]);
        store.toggle_page(&visible, false, 1);
        assert_eq!(store.selected_count(), 97);

        store.toggle_page(&visible, true, 1);
        assert_eq!(store.scope(), SelectionScope::All);
        assert_eq!(store.selected_count(), 100);
    }

    #[test]
    fn excluding_everything_collapses_to_none() {
        let mut store = SelectionStore::new();
        store.select_all(2);
        store.toggle_one(&ItemId::from("a"), false);
        store.toggle_one(&ItemId::from("b"), false);
        assert_eq!(store.scope(), SelectionScope::None);
        assert_eq!(store.selected_count(), 0);
    }

    #[test]
    fn select_all_of_zero_is_none() {
        let mut store = SelectionStore::new();
        store.select_all(0);
        assert_eq!(store.scope(), SelectionScope::None);
    }

    #[test]
    fn clear_resets_everything() {
        let mut store = SelectionStore::new();
        store.toggle_page(&ids(&["a", "b", "c"]), true, 3);
        store.clear();
        assert_eq!(store.scope(), SelectionScope::None);
        assert_eq!(store.selected_count(), 0);
        assert_eq!(store.page_ref(), None);
    }

    #[test]
    fn prune_after_partial_delete_keeps_failures_selected() {
        let mut store = SelectionStore::new();
        for id in ids(&["a", "b", "c"]) {
            store.toggle_one(&id, true);
        }
        store.prune_deleted(&ids(&["a", "b"]));
        assert_eq!(store.scope(), SelectionScope::Custom);
        assert_eq!(store.selected_count(), 1);
        assert!(store.is_selected(&ItemId::from("c")));
    }

    #[test]
    fn prune_in_all_scope_decrements_total() {
        let mut store = SelectionStore::new();
        store.select_all(50);
        store.toggle_one(&ItemId::from("keep-out"), false);
        assert_eq!(store.selected_count(), 49);

        store.prune_deleted(&ids(&["d1", "d2", "d3"]));
        assert_eq!(store.scope(), SelectionScope::All);
        assert_eq!(store.selected_count(), 46);
    }

    #[test]
    fn prune_unknown_ids_is_noop_for_membership() {
        let mut store = SelectionStore::new();
        store.toggle_one(&ItemId::from("a"), true);
        store.prune_deleted(&ids(&["zz"]));
        assert_eq!(store.selected_count(), 1);
        assert_eq!(store.scope(), SelectionScope::Custom);
    }

    #[test]
    fn frozen_store_ignores_transitions() {
        let mut store = SelectionStore::new();
        store.toggle_one(&ItemId::from("a"), true);
        store.freeze();
        store.toggle_one(&ItemId::from("b"), true);
        store.toggle_page(&ids(&["c", "d"]), true, 1);
        store.select_all(99);
        assert_eq!(store.selected_count(), 1);
        assert_eq!(store.scope(), SelectionScope::Custom);

        store.thaw();
        store.toggle_one(&ItemId::from("b"), true);
        assert_eq!(store.selected_count(), 2);
    }

    #[test]
    fn toggle_page_is_idempotent() {
        let visible = ids(&["a", "b", "c"]);
        let mut once = SelectionStore::new();
        once.toggle_page(&visible, true, 1);
        let mut twice = SelectionStore::new();
        twice.toggle_page(&visible, true, 1);
        twice.toggle_page(&visible, true, 1);
        assert_eq!(once.scope(), twice.scope());
        assert_eq!(once.selected_count(), twice.selected_count());
    }

    proptest! {
        #[test]
        fn toggle_one_is_idempotent(
            seed in proptest::collection::vec("[a-e]", 0..6),
            id in "[a-h]",
            checked in proptest::bool::ANY,
            all_first in proptest::bool::ANY,
        ) {
            let mut store = SelectionStore::new();
            if all_first {
                store.select_all(100);
            }
            for s in &seed {
                store.toggle_one(&ItemId::from(s.as_str()), true);
            }
            let id = ItemId::from(id.as_str());
            store.toggle_one(&id, checked);
            let count_once = store.selected_count();
            let scope_once = store.scope();
            store.toggle_one(&id, checked);
            prop_assert_eq!(store.selected_count(), count_once);
            prop_assert_eq!(store.scope(), scope_once);
        }

        #[test]
        fn complement_invariant_holds_under_random_ops(
            total in 1usize..2000,
            ops in proptest::collection::vec(("[a-z]{1,2}", proptest::bool::ANY), 0..40),
        ) {
            let mut store = SelectionStore::new();
            store.select_all(total);
            for (name, checked) in &ops {
                store.toggle_one(&ItemId::from(name.as_str()), *checked);
                if store.scope() == SelectionScope::All {
                    let excluded = store.snapshot().excluded.len();
                    prop_assert_eq!(store.selected_count(), total - excluded);
                    prop_assert!(store.selected_count() <= total);
                }
            }
        }

        #[test]
        fn sets_never_both_populated(
            ops in proptest::collection::vec((0u8..4, "[a-f]", proptest::bool::ANY), 0..50),
        ) {
            let mut store = SelectionStore::new();
            for (op, name, checked) in &ops {
                let id = ItemId::from(name.as_str());
                match op {
                    0 => store.toggle_one(&id, *checked),
                    1 => store.toggle_page(&[id.clone(), ItemId::from("p2")], *checked, 1),
                    2 => store.select_all(25),
                    _ => store.prune_deleted(&[id.clone()]),
                }
                let snap = store.snapshot();
                prop_assert!(snap.included.is_empty() || snap.excluded.is_empty());
                match store.scope() {
                    SelectionScope::None => {
                        prop_assert!(snap.included.is_empty() && snap.excluded.is_empty());
                        prop_assert_eq!(store.selected_count(), 0);
                    }
                    SelectionScope::All => prop_assert!(snap.included.is_empty()),
                    _ => {
                        prop_assert!(snap.excluded.is_empty());
                        prop_assert!(store.selected_count() > 0);
                    }
                }
            }
        }
    }
}
