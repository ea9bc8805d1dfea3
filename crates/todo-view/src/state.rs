//! View state and reconciliation

use serde::Serialize;
use todo_protocol::TodoRecord;

/// Text shown when the list is empty
pub const EMPTY_PLACEHOLDER: &str = "There are no tasks for you today";

/// One rendered todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewItem {
    pub id: String,
    pub text: String,
    /// Checkbox input state
    pub checked: bool,
    /// "done" presentation class on the item container
    pub done: bool,
}

impl ViewItem {
    /// Render a record; the checkbox starts out mirroring `done`
    pub fn from_record(record: &TodoRecord) -> Self {
        Self {
            id: record.id.clone(),
            text: record.text.clone(),
            checked: record.done,
            done: record.done,
        }
    }

    fn shows(&self, record: &TodoRecord) -> bool {
        self.id == record.id
            && self.text == record.text
            && self.checked == record.done
            && self.done == record.done
    }
}

/// A single change to the rendering surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// Remove every item and the placeholder
    Clear,
    /// Show the empty-list placeholder
    ShowPlaceholder,
    /// Remove the empty-list placeholder
    HidePlaceholder,
    /// Add an item at the end, or replace the item with the same id
    Append(ViewItem),
    /// Set the presentation class of one item
    SetDone { id: String, done: bool },
}

/// The rendering surface: ordered items keyed by id, plus a placeholder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    items: Vec<ViewItem>,
    placeholder: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ViewItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&ViewItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn shows_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Record user input on a checkbox. Returns false for unknown ids.
    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Apply one patch
    pub fn apply(&mut self, patch: &Patch) {
        match patch {
            Patch::Clear => {
                self.items.clear();
                self.placeholder = false;
            }
            Patch::ShowPlaceholder => self.placeholder = true,
            Patch::HidePlaceholder => self.placeholder = false,
            Patch::Append(new_item) => {
                // Keep ids unique: a repeated id replaces the existing element
                match self.items.iter_mut().find(|item| item.id == new_item.id) {
                    Some(item) => *item = new_item.clone(),
                    None => self.items.push(new_item.clone()),
                }
            }
            Patch::SetDone { id, done } => {
                if let Some(item) = self.items.iter_mut().find(|item| &item.id == id) {
                    item.done = *done;
                }
            }
        }
    }

    /// Apply patches in order
    pub fn apply_all(&mut self, patches: &[Patch]) {
        for patch in patches {
            self.apply(patch);
        }
    }
}

/// Compute the patches that make `old` show exactly `records`.
///
/// Unchanged surfaces yield no patches. When the old items are a prefix of
/// the new list only the tail is appended; anything else clears and
/// re-renders, so stale items and placeholders never survive a load.
pub fn reconcile(old: &ViewState, records: &[TodoRecord]) -> Vec<Patch> {
    if records.is_empty() {
        if old.placeholder && old.items.is_empty() {
            return Vec::new();
        }
        return vec![Patch::Clear, Patch::ShowPlaceholder];
    }

    let is_prefix = !old.placeholder
        && old.items.len() <= records.len()
        && old
            .items
            .iter()
            .zip(records)
            .all(|(item, record)| item.shows(record));

    let (mut patches, start) = if is_prefix {
        (Vec::new(), old.items.len())
    } else {
        (vec![Patch::Clear], 0)
    };

    patches.extend(
        records[start..]
            .iter()
            .map(|record| Patch::Append(ViewItem::from_record(record))),
    );
    patches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(items: &[(&str, &str, bool)]) -> Vec<TodoRecord> {
        items
            .iter()
            .map(|(id, text, done)| TodoRecord::new(*id, *text, *done))
            .collect()
    }

    fn rendered(records: &[TodoRecord]) -> ViewState {
        let mut state = ViewState::new();
        state.apply_all(&reconcile(&ViewState::new(), records));
        state
    }

    #[test]
    fn test_reconcile_empty_shows_placeholder() {
        let patches = reconcile(&ViewState::new(), &[]);
        assert_eq!(patches, vec![Patch::Clear, Patch::ShowPlaceholder]);
    }

    #[test]
    fn test_reconcile_placeholder_is_idempotent() {
        let mut state = ViewState::new();
        state.apply_all(&reconcile(&state.clone(), &[]));
        assert!(reconcile(&state, &[]).is_empty());
        assert!(state.shows_placeholder());
    }

    #[test]
    fn test_reconcile_unchanged_is_noop() {
        let list = records(&[("a", "first", false), ("b", "second", true)]);
        let state = rendered(&list);
        assert!(reconcile(&state, &list).is_empty());
    }

    #[test]
    fn test_reconcile_appends_tail_only() {
        let mut state = rendered(&records(&[("a", "first", false)]));
        let list = records(&[("a", "first", false), ("b", "second", false)]);

        let patches = reconcile(&state, &list);
        assert_eq!(patches.len(), 1);
        assert!(matches!(&patches[0], Patch::Append(item) if item.id == "b"));

        state.apply_all(&patches);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_reconcile_changed_item_rerenders() {
        let state = rendered(&records(&[("a", "first", false)]));
        let patches = reconcile(&state, &records(&[("a", "first", true)]));
        assert_eq!(patches.first(), Some(&Patch::Clear));
        assert_eq!(patches.len(), 2);
    }

    #[test]
    fn test_reconcile_clears_placeholder_before_items() {
        let state = rendered(&[]);
        let mut next = state.clone();
        next.apply_all(&reconcile(&state, &records(&[("a", "first", false)])));
        assert!(!next.shows_placeholder());
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_append_same_id_replaces() {
        let mut state = rendered(&records(&[("a", "first", false)]));
        state.apply(&Patch::Append(ViewItem::from_record(&TodoRecord::new(
            "a", "renamed", false,
        ))));
        assert_eq!(state.len(), 1);
        assert_eq!(state.item("a").unwrap().text, "renamed");
    }

    #[test]
    fn test_set_done_touches_one_item() {
        let mut state = rendered(&records(&[("a", "x", false), ("b", "y", false)]));
        state.apply(&Patch::SetDone {
            id: "b".to_string(),
            done: true,
        });
        assert!(!state.item("a").unwrap().done);
        assert!(state.item("b").unwrap().done);
        // The checkbox input is not re-rendered
        assert!(!state.item("b").unwrap().checked);
    }
}
