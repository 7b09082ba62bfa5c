//! Conversation list view controller.
//!
//! Binds the shared store to the list component, owns the selection and the
//! popup menu, and turns menu choices into dispatcher requests. It never
//! mutates the store: a chosen action only takes effect when the session
//! layer reports the resulting change.

use crate::config::Config;
use crate::entities::{DialogId, DialogModel};
use crate::icons::IconService;
use crate::menu::{ContextMenuBuilder, TriggerEvent};
use crate::selection::SelectionController;
use crate::session::ActionDispatcher;
use crate::store::{DialogListStore, SharedStore, StoreChange, StoreObserver};
use crate::ui::components::{ConversationListComponent, PopupMenu, RowMarks, RowState};
use crate::ui::core::{actions::Action, Component};
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{layout::Rect, Frame};
use std::rc::Rc;

pub struct ConversationListViewController {
    store: SharedStore,
    selection: SelectionController,
    builder: ContextMenuBuilder,
    list: ConversationListComponent,
    menu: Option<PopupMenu>,
    hovered: Option<DialogId>,
    dispatcher: Box<dyn ActionDispatcher>,
}

impl ConversationListViewController {
    pub fn new(store: SharedStore, dispatcher: Box<dyn ActionDispatcher>, config: &Config) -> Self {
        let list = ConversationListComponent::new(
            Rc::clone(&store),
            IconService::new(config.ui.icon_theme),
            config.ui.date_format.clone(),
        );
        Self {
            store,
            selection: SelectionController::new(config.selection.on_remove),
            builder: ContextMenuBuilder::new(config.menu),
            list,
            menu: None,
            hovered: None,
            dispatcher,
        }
    }

    pub fn selected(&self) -> Option<&DialogId> {
        self.selection.current()
    }

    pub fn hovered(&self) -> Option<&DialogId> {
        self.hovered.as_ref()
    }

    pub fn menu(&self) -> Option<&PopupMenu> {
        self.menu.as_ref()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_some()
    }

    pub fn list(&self) -> &ConversationListComponent {
        &self.list
    }

    /// Set the list area without rendering, for hit-testing before the first
    /// frame.
    pub fn set_area(&mut self, area: Rect) {
        self.list.set_area(area);
    }

    pub fn row_state(&self, id: &DialogId) -> RowState {
        self.marks().state_of(id)
    }

    /// Select a dialog. Unknown ids leave the selection as it was.
    pub fn select(&mut self, id: &DialogId) -> bool {
        let store = self.store.borrow();
        self.selection.select(&store, id)
    }

    /// Open the context menu for `dialog`, anchored at `trigger` and kept
    /// inside `anchor`. Any open menu is dismissed first. Returns whether a
    /// menu is now showing; a dialog the store no longer has gets none.
    pub fn show_popup_menu(&mut self, dialog: &DialogModel, trigger: TriggerEvent, anchor: Rect) -> bool {
        self.dismiss_menu();

        let entries = {
            let store = self.store.borrow();
            self.builder.build_menu_checked(&store, dialog, &trigger)
        };
        if entries.is_empty() {
            return false;
        }

        log::debug!(
            "Menu: opened for {} with {} entries ({:?})",
            dialog.id,
            entries.len(),
            trigger.source
        );
        let pointer = self.list.icons().menu_pointer();
        self.menu = Some(PopupMenu::new(dialog.id.clone(), entries, trigger, anchor, pointer));
        true
    }

    pub fn dismiss_menu(&mut self) {
        if let Some(menu) = self.menu.take() {
            log::debug!("Menu: dismissed for {}", menu.dialog_id());
        }
    }

    /// Forward the chosen menu entry to the dispatcher and close the menu.
    /// Disabled entries are rejected and leave the menu open. The choice is
    /// checked against the dialog's current flags before it is sent.
    pub fn choose(&mut self, index: usize) {
        let Some(menu) = self.menu.as_ref() else {
            log::debug!("Menu: choice {} with no menu open", index);
            return;
        };
        let Some(entry) = menu.entry(index) else {
            log::debug!("Menu: choice {} out of range", index);
            return;
        };
        if !entry.enabled {
            log::warn!("Menu: rejected disabled action {} for {}", entry.kind, menu.dialog_id());
            return;
        }

        let id = menu.dialog_id().clone();
        let kind = entry.kind;
        let menu_trigger = menu.trigger();
        self.menu = None;

        let store = self.store.borrow();
        let Some(dialog) = store.get(&id) else {
            log::debug!("Menu: dialog {} vanished before dispatch", id);
            return;
        };
        let offered = self
            .builder
            .build_menu(dialog, &menu_trigger)
            .iter()
            .any(|entry| entry.kind == kind && entry.enabled);
        drop(store);
        if !offered {
            log::warn!("Menu: rejected stale action {} for {}", kind, id);
            return;
        }
        self.dispatcher.request_action(&id, kind);
    }

    fn marks(&self) -> RowMarks {
        RowMarks {
            selected: self.selection.current().cloned(),
            hovered: self.hovered.clone(),
            menu_target: self.menu.as_ref().map(|menu| menu.dialog_id().clone()),
        }
    }

    fn refresh_marks(&mut self) {
        let marks = self.marks();
        self.list.set_marks(marks);
    }

    fn open_menu_for(&mut self, id: &DialogId, trigger: TriggerEvent) {
        let dialog = self.store.borrow().get(id).cloned();
        match dialog {
            Some(dialog) => {
                let anchor = self.list.area();
                self.show_popup_menu(&dialog, trigger, anchor);
            }
            None => log::debug!("Menu: ignoring request for unknown dialog {}", id),
        }
    }

    /// Rebuild the open menu from the store's current copy of its dialog.
    fn refresh_menu(&mut self, store: &DialogListStore) {
        let Some(menu) = self.menu.as_mut() else {
            return;
        };
        let entries = match store.get(menu.dialog_id()) {
            Some(dialog) => self.builder.build_menu_checked(store, dialog, &menu.trigger()),
            None => Vec::new(),
        };
        if entries.is_empty() {
            self.dismiss_menu();
            return;
        }
        log::debug!("Menu: refreshed for {} with {} entries", menu.dialog_id(), entries.len());
        menu.replace_entries(entries);
    }

    /// Apply one store change to everything derived from the store.
    pub fn handle_store_change(&mut self, change: &StoreChange) {
        let store = Rc::clone(&self.store);
        let store = store.borrow();
        StoreObserver::on_store_change(self, &store, change);
    }
}

impl StoreObserver for ConversationListViewController {
    fn on_store_change(&mut self, store: &DialogListStore, change: &StoreChange) {
        self.selection.on_store_change(store, change);
        self.list.on_store_change(store, change);

        let menu_gone = self.menu.as_ref().is_some_and(|menu| {
            change.removed_id() == Some(menu.dialog_id())
                || (matches!(change, StoreChange::Reset | StoreChange::Reordered) && !store.contains(menu.dialog_id()))
        });
        if menu_gone {
            log::debug!("Menu: dialog removed, dismissing without dispatch");
            self.dismiss_menu();
        }

        let menu_stale = self.menu.as_ref().is_some_and(|menu| match change {
            StoreChange::Updated { id, .. } | StoreChange::Moved { id, .. } => id == menu.dialog_id(),
            StoreChange::Reset | StoreChange::Reordered => true,
            _ => false,
        });
        if menu_stale {
            self.refresh_menu(store);
        }

        if self.hovered.as_ref().is_some_and(|id| !store.contains(id)) {
            self.hovered = None;
        }
        self.refresh_marks();
    }
}

impl Component for ConversationListViewController {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        self.refresh_marks();
        match self.menu.as_mut() {
            Some(menu) => menu.handle_key_events(key),
            None => self.list.handle_key_events(key),
        }
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        self.refresh_marks();
        match self.menu.as_mut() {
            // A secondary click elsewhere opens a menu for that row instead
            Some(menu)
                if mouse.kind == MouseEventKind::Down(MouseButton::Right)
                    && !menu.contains(mouse.column, mouse.row) =>
            {
                self.list.handle_mouse_events(mouse)
            }
            Some(menu) => menu.handle_mouse_events(mouse),
            None => self.list.handle_mouse_events(mouse),
        }
    }

    fn update(&mut self, action: Action) -> Action {
        let result = match action {
            Action::SelectNext => {
                self.selection.select_next(&self.store.borrow());
                Action::None
            }
            Action::SelectPrevious => {
                self.selection.select_previous(&self.store.borrow());
                Action::None
            }
            Action::SelectDialog(id) => {
                self.select(&id);
                Action::None
            }
            Action::HoverDialog(id) => {
                self.hovered = id;
                Action::None
            }
            Action::OpenDialog(id) => {
                log::info!("List: open {}", id);
                Action::OpenDialog(id)
            }
            Action::ShowPopupMenu { dialog_id, trigger } => {
                self.open_menu_for(&dialog_id, trigger);
                Action::None
            }
            Action::MenuNext | Action::MenuPrevious | Action::MenuChooseHighlighted => match self.menu.as_mut() {
                Some(menu) => match menu.update(action) {
                    Action::MenuChoose(index) => {
                        self.choose(index);
                        Action::None
                    }
                    other => other,
                },
                None => Action::None,
            },
            Action::MenuChoose(index) => {
                self.choose(index);
                Action::None
            }
            Action::DismissMenu => {
                self.dismiss_menu();
                Action::None
            }
            Action::CycleIcons => {
                self.list.icons_mut().cycle_icon_theme();
                Action::None
            }
            other => other,
        };
        self.refresh_marks();
        result
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        self.refresh_marks();
        self.list.render(f, rect);
        if let Some(menu) = self.menu.as_mut() {
            menu.render(f, rect);
        }
    }
}
