//! Selection tracking for the conversation list.

use crate::entities::DialogId;
use crate::store::{DialogListStore, StoreChange, StoreObserver};
use serde::{Deserialize, Serialize};

/// What happens to the selection when the selected dialog disappears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Move to the entry that took the removed one's place, or the one before
    /// it when the removed entry was last.
    #[default]
    Advance,
    /// Drop the selection.
    Clear,
}

/// Single-select controller. The selected id always exists in the store it
/// was validated against.
#[derive(Debug, Default)]
pub struct SelectionController {
    selected: Option<DialogId>,
    policy: SelectionPolicy,
}

impl SelectionController {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self { selected: None, policy }
    }

    /// Select `id`, replacing any prior selection. Unknown ids are ignored.
    pub fn select(&mut self, store: &DialogListStore, id: &DialogId) -> bool {
        if !store.contains(id) {
            log::debug!("Selection: ignoring select of unknown dialog {}", id);
            return false;
        }
        if self.selected.as_ref() != Some(id) {
            log::debug!("Selection: {:?} -> {}", self.selected, id);
            self.selected = Some(id.clone());
        }
        true
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn current(&self) -> Option<&DialogId> {
        self.selected.as_ref()
    }

    pub fn current_index(&self, store: &DialogListStore) -> Option<usize> {
        self.selected.as_ref().and_then(|id| store.index_of(id))
    }

    /// Move to the next row, wrapping to the top. Selects the first row when
    /// nothing is selected.
    pub fn select_next(&mut self, store: &DialogListStore) {
        if store.is_empty() {
            return;
        }
        let next = match self.current_index(store) {
            Some(i) => (i + 1) % store.len(),
            None => 0,
        };
        self.select_index(store, next);
    }

    /// Move to the previous row, wrapping to the bottom.
    pub fn select_previous(&mut self, store: &DialogListStore) {
        if store.is_empty() {
            return;
        }
        let previous = match self.current_index(store) {
            Some(0) | None => store.len() - 1,
            Some(i) => i - 1,
        };
        self.select_index(store, previous);
    }

    pub fn select_index(&mut self, store: &DialogListStore, index: usize) -> bool {
        match store.get_at(index) {
            Some(dialog) => {
                self.selected = Some(dialog.id.clone());
                true
            }
            None => false,
        }
    }

    fn replacement_after_removal(&self, store: &DialogListStore, index: usize) -> Option<DialogId> {
        match self.policy {
            SelectionPolicy::Clear => None,
            SelectionPolicy::Advance => store
                .get_at(index)
                .or_else(|| index.checked_sub(1).and_then(|i| store.get_at(i)))
                .map(|dialog| dialog.id.clone()),
        }
    }
}

impl StoreObserver for SelectionController {
    fn on_store_change(&mut self, store: &DialogListStore, change: &StoreChange) {
        match change {
            StoreChange::Removed { index, id } if self.selected.as_ref() == Some(id) => {
                self.selected = self.replacement_after_removal(store, *index);
                log::debug!("Selection: {} removed, now {:?}", id, self.selected);
            }
            StoreChange::Reset | StoreChange::Reordered => {
                if let Some(id) = &self.selected {
                    if !store.contains(id) {
                        self.selected = None;
                    }
                }
            }
            _ => {}
        }
    }
}
