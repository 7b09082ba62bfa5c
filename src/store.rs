//! Ordered dialog list backing the conversation view.
//!
//! The store is the single source of truth for which dialogs exist and in which
//! order they are shown. Every mutation reports what it changed as a
//! [`StoreChange`] so the view can patch its rows by index instead of redrawing
//! the whole list. The session layer is the only writer; the UI reads.

use crate::entities::{DialogId, DialogModel};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::rc::Rc;

/// Read-only view of the list at one point in time. Cheap to clone and
/// unaffected by later store mutations.
pub type DialogSnapshot = Rc<Vec<DialogModel>>;

/// Store shared between the session context (owner) and the view controller.
pub type SharedStore = Rc<RefCell<DialogListStore>>;

/// Notification emitted by a store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Inserted { index: usize, id: DialogId },
    Updated { index: usize, id: DialogId },
    Moved { from: usize, to: usize, id: DialogId },
    Removed { index: usize, id: DialogId },
    /// The whole order changed; rows must be rebuilt from a fresh snapshot.
    Reordered,
    /// The store was (re)populated or torn down.
    Reset,
}

impl StoreChange {
    /// The dialog removed by this change, if any.
    pub fn removed_id(&self) -> Option<&DialogId> {
        match self {
            StoreChange::Removed { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Something that keeps derived state in step with the store.
pub trait StoreObserver {
    fn on_store_change(&mut self, store: &DialogListStore, change: &StoreChange);
}

/// Pinned dialogs first, then most recent preview first.
pub fn list_order(a: &DialogModel, b: &DialogModel) -> Ordering {
    b.flags
        .pinned
        .cmp(&a.flags.pinned)
        .then_with(|| b.preview_timestamp.cmp(&a.preview_timestamp))
}

#[derive(Debug, Default)]
pub struct DialogListStore {
    entries: DialogSnapshot,
    index: HashMap<DialogId, usize>,
    attached: bool,
}

impl DialogListStore {
    /// Create a detached, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already attached with the given dialogs.
    pub fn attached_with(dialogs: Vec<DialogModel>) -> Self {
        let mut store = Self::new();
        store.attach(dialogs);
        store
    }

    pub fn into_shared(self) -> SharedStore {
        Rc::new(RefCell::new(self))
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Populate the store for a new session. The supplied order is kept as is;
    /// when an id occurs more than once the last occurrence wins.
    pub fn attach(&mut self, dialogs: Vec<DialogModel>) -> StoreChange {
        let mut entries: Vec<DialogModel> = Vec::with_capacity(dialogs.len());
        let mut seen: HashMap<DialogId, usize> = HashMap::new();
        for dialog in dialogs {
            match seen.get(&dialog.id) {
                Some(&position) => {
                    log::debug!("Store: duplicate dialog {} on attach, keeping latest", dialog.id);
                    entries[position] = dialog;
                }
                None => {
                    seen.insert(dialog.id.clone(), entries.len());
                    entries.push(dialog);
                }
            }
        }

        self.entries = Rc::new(entries);
        self.attached = true;
        self.reindex();
        log::info!("Store: attached with {} dialogs", self.entries.len());
        StoreChange::Reset
    }

    /// Tear the store down. Later operations become no-ops until the next attach.
    pub fn detach(&mut self) -> Option<StoreChange> {
        if !self.attached {
            return None;
        }
        self.entries = Rc::new(Vec::new());
        self.index.clear();
        self.attached = false;
        log::info!("Store: detached");
        Some(StoreChange::Reset)
    }

    /// Insert an unseen dialog at its sorted position, or replace the fields of
    /// a known one and move it if its sort key changed.
    pub fn insert_or_update(&mut self, dialog: DialogModel) -> Option<StoreChange> {
        if !self.attached {
            log::debug!("Store: ignoring update for {} on detached store", dialog.id);
            return None;
        }

        let Some(current) = self.index.get(&dialog.id).copied() else {
            let id = dialog.id.clone();
            let index = self.insert_position(&dialog);
            Rc::make_mut(&mut self.entries).insert(index, dialog);
            self.reindex();
            return Some(StoreChange::Inserted { index, id });
        };

        let existing = &self.entries[current];
        if existing.kind() != dialog.kind() {
            log::warn!(
                "Store: rejected update turning {} from a {} into a {}",
                dialog.id,
                existing.kind().display_name(),
                dialog.kind().display_name()
            );
            return None;
        }
        debug_assert!(
            dialog.revision >= existing.revision,
            "out-of-order update for dialog {}: revision {} after {}",
            dialog.id,
            dialog.revision,
            existing.revision
        );
        if dialog.revision < existing.revision {
            log::error!(
                "Store: dropped stale update for {} (revision {} < {})",
                dialog.id,
                dialog.revision,
                existing.revision
            );
            return None;
        }

        let key_changed = list_order(existing, &dialog) != Ordering::Equal;
        let id = dialog.id.clone();
        let entries = Rc::make_mut(&mut self.entries);

        if !key_changed {
            entries[current] = dialog;
            return Some(StoreChange::Updated { index: current, id });
        }

        entries.remove(current);
        let target = self.insert_position(&dialog);
        Rc::make_mut(&mut self.entries).insert(target, dialog);
        self.reindex();

        if target == current {
            Some(StoreChange::Updated { index: current, id })
        } else {
            Some(StoreChange::Moved {
                from: current,
                to: target,
                id,
            })
        }
    }

    /// Remove a dialog. Absent ids are not an error.
    pub fn remove(&mut self, id: &DialogId) -> Option<StoreChange> {
        if !self.attached {
            return None;
        }
        let index = *self.index.get(id)?;
        Rc::make_mut(&mut self.entries).remove(index);
        self.reindex();
        Some(StoreChange::Removed { index, id: id.clone() })
    }

    /// Re-sort the whole list. Reports a change only when the order differs.
    pub fn reorder(&mut self) -> Option<StoreChange> {
        if !self.attached {
            return None;
        }
        let mut sorted = self.entries.as_ref().clone();
        sorted.sort_by(list_order);

        let unchanged = sorted
            .iter()
            .zip(self.entries.iter())
            .all(|(a, b)| a.id == b.id);
        if unchanged {
            return None;
        }

        self.entries = Rc::new(sorted);
        self.reindex();
        Some(StoreChange::Reordered)
    }

    pub fn get(&self, id: &DialogId) -> Option<&DialogModel> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn get_at(&self, index: usize) -> Option<&DialogModel> {
        self.entries.get(index)
    }

    pub fn index_of(&self, id: &DialogId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &DialogId) -> bool {
        self.index.contains_key(id)
    }

    /// Current ordered list. Safe to hold while the store keeps changing.
    pub fn all(&self) -> DialogSnapshot {
        Rc::clone(&self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pinned_count(&self) -> usize {
        self.entries.iter().filter(|d| d.flags.pinned).count()
    }

    /// Unread messages across dialogs that are not muted.
    pub fn total_unread(&self) -> u64 {
        self.entries
            .iter()
            .filter(|d| !d.flags.muted)
            .map(|d| u64::from(d.unread_count))
            .sum()
    }

    fn insert_position(&self, dialog: &DialogModel) -> usize {
        self.entries
            .iter()
            .position(|existing| list_order(dialog, existing) == Ordering::Less)
            .unwrap_or(self.entries.len())
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), i))
            .collect();
    }
}
