use super::state::{ItemId, SelectionScope, SelectionSnapshot};
use crate::utils;

/// What the header checkbox and banner should show for one rendered page.
/// Recompute on every render: the snapshot and the visible IDs both change
/// as the user pages, filters, and toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub header_checked: bool,
    pub header_indeterminate: bool,
    pub selected_count: usize,
    pub scope: SelectionScope,
}

/// Derives the header checkbox state from the selection and the rows
/// currently on screen. An empty page renders unchecked: "every visible row
/// selected" would be vacuously true, and a checked header over zero rows
/// misleads.
pub fn page_view(snapshot: &SelectionSnapshot, visible: &[ItemId]) -> PageView {
    let selected_on_page = visible.iter().filter(|id| snapshot.is_selected(id)).count();
    let header_checked = !visible.is_empty() && selected_on_page == visible.len();
    PageView {
        header_checked,
        header_indeterminate: !header_checked && selected_on_page > 0,
        selected_count: snapshot.selected_count,
        scope: snapshot.scope,
    }
}

pub fn row_checked(snapshot: &SelectionSnapshot, id: &ItemId) -> bool {
    snapshot.is_selected(id)
}

/// Banner text under the header row, e.g. "All 47 items on this page are
/// selected" vs "All 1,203 items are selected across all pages".
pub fn summary_line(snapshot: &SelectionSnapshot) -> Option<String> {
    let count = utils::group_digits(snapshot.selected_count);
    match snapshot.scope {
        SelectionScope::None => None,
        SelectionScope::Page => Some(format!("All {count} items on this page are selected")),
        SelectionScope::Custom => Some(format!("{count} items selected")),
        SelectionScope::All => Some(format!("All {count} items are selected across all pages")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionStore;

    fn ids(names: &[&str]) -> Vec<ItemId> {
        names.iter().map(|n| ItemId::from(*n)).collect()
    }

    #[test]
    fn header_unchecked_when_nothing_selected() {
        let store = SelectionStore::new();
        let view = page_view(&store.snapshot(), &ids(&["a", "b"]));
        assert!(!view.header_checked);
        assert!(!view.header_indeterminate);
    }

    #[test]
    fn header_checked_when_whole_page_selected() {
        let mut store = SelectionStore::new();
        let visible = ids(&["a", "b", "c"]);
        store.toggle_page(&visible, true, 1);
        let view = page_view(&store.snapshot(), &visible);
        assert!(view.header_checked);
        assert!(!view.header_indeterminate);
        assert_eq!(view.selected_count, 3);
    }

    #[test]
    fn header_indeterminate_on_partial_page() {
        let mut store = SelectionStore::new();
        let visible = ids(&["a", "b", "c"]);
        store.toggle_one(&visible[1], true);
        let view = page_view(&store.snapshot(), &visible);
        assert!(!view.header_checked);
        assert!(view.header_indeterminate);
    }

    #[test]
    fn header_checked_on_unvisited_page_in_all_scope() {
        let mut store = SelectionStore::new();
        store.select_all(1000);
        let view = page_view(&store.snapshot(), &ids(&["never", "fetched", "before"]));
        assert!(view.header_checked);
    }

    #[test]
    fn all_scope_page_with_exclusion_is_indeterminate() {
        let mut store = SelectionStore::new();
        store.select_all(1000);
        store.toggle_one(&ItemId::from("b"), false);
        let view = page_view(&store.snapshot(), &ids(&["a", "b", "c"]));
        assert!(!view.header_checked);
        assert!(view.header_indeterminate);
        assert!(!row_checked(&store.snapshot(), &ItemId::from("b")));
        assert!(row_checked(&store.snapshot(), &ItemId::from("a")));
    }

    #[test]
    fn empty_page_never_reads_checked() {
        let mut store = SelectionStore::new();
        store.select_all(10);
        let view = page_view(&store.snapshot(), &[]);
        assert!(!view.header_checked);
        assert!(!view.header_indeterminate);
    }

    #[test]
    fn summary_reflects_scope() {
        let mut store = SelectionStore::new();
        assert_eq!(summary_line(&store.snapshot()), None);

        store.select_all(1203);
        assert_eq!(
            summary_line(&store.snapshot()).unwrap(),
            "All 1,203 items are selected across all pages"
        );

        store.clear();
        store.toggle_one(&ItemId::from("a"), true);
        assert_eq!(summary_line(&store.snapshot()).unwrap(), "1 items selected");
    }
}
