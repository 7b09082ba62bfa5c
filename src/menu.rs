//! Context menu construction for a single dialog.
//!
//! Building a menu is a pure function of the dialog's current state. The menu
//! only describes which transitions are available; executing one is the
//! session layer's job. Menus are rebuilt on every request because flags can
//! change between two right-clicks.
//!
//! Entries always come in this order:
//!
//! 1. Mark as read, only while the dialog has unread messages
//! 2. Pin / Unpin
//! 3. Mute / Unmute
//! 4. Archive / Unarchive, for every kind except bots unless
//!    [`MenuPolicy::archive_bots`] is set
//! 5. Delete (worded per kind), always last

use crate::constants::{
    MENU_ARCHIVE, MENU_DELETE_BOT, MENU_DELETE_CHAT, MENU_LEAVE_CHANNEL, MENU_LEAVE_GROUP, MENU_MARK_READ,
    MENU_MUTE, MENU_PIN, MENU_UNARCHIVE, MENU_UNMUTE, MENU_UNPIN,
};
use crate::entities::{DialogKind, DialogModel};
use crate::store::DialogListStore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A state transition that can be requested for a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    MarkRead,
    Pin,
    Unpin,
    Mute,
    Unmute,
    Archive,
    Unarchive,
    Delete,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::MarkRead => "mark_read",
            ActionKind::Pin => "pin",
            ActionKind::Unpin => "unpin",
            ActionKind::Mute => "mute",
            ActionKind::Unmute => "unmute",
            ActionKind::Archive => "archive",
            ActionKind::Unarchive => "unarchive",
            ActionKind::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// One entry of a context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuAction {
    pub label: String,
    pub kind: ActionKind,
    pub enabled: bool,
    pub destructive: bool,
}

impl MenuAction {
    fn new(label: &str, kind: ActionKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
            enabled: true,
            destructive: false,
        }
    }

    fn enabled_if(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }
}

/// Where a popup request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    Mouse,
    Keyboard,
}

/// The input that asked for a menu. Only used to place the menu on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    pub column: u16,
    pub row: u16,
    pub source: TriggerSource,
}

impl TriggerEvent {
    pub fn mouse(column: u16, row: u16) -> Self {
        Self {
            column,
            row,
            source: TriggerSource::Mouse,
        }
    }

    pub fn keyboard(column: u16, row: u16) -> Self {
        Self {
            column,
            row,
            source: TriggerSource::Keyboard,
        }
    }
}

impl From<crossterm::event::MouseEvent> for TriggerEvent {
    fn from(event: crossterm::event::MouseEvent) -> Self {
        Self::mouse(event.column, event.row)
    }
}

/// Tunable menu rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuPolicy {
    /// Offer archive/unarchive for bot dialogs too.
    pub archive_bots: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ContextMenuBuilder {
    policy: MenuPolicy,
}

impl ContextMenuBuilder {
    pub fn new(policy: MenuPolicy) -> Self {
        Self { policy }
    }

    /// Build the menu for `dialog`. The trigger does not influence contents.
    pub fn build_menu(&self, dialog: &DialogModel, _trigger: &TriggerEvent) -> Vec<MenuAction> {
        let flags = dialog.flags;
        let mut actions = Vec::with_capacity(5);

        if dialog.is_unread() {
            actions.push(MenuAction::new(MENU_MARK_READ, ActionKind::MarkRead));
        }

        // Archived chats cannot be pinned to the main list.
        actions.push(if flags.pinned {
            MenuAction::new(MENU_UNPIN, ActionKind::Unpin)
        } else {
            MenuAction::new(MENU_PIN, ActionKind::Pin).enabled_if(!flags.archived)
        });

        actions.push(if flags.muted {
            MenuAction::new(MENU_UNMUTE, ActionKind::Unmute)
        } else {
            MenuAction::new(MENU_MUTE, ActionKind::Mute)
        });

        if self.offers_archive(dialog.kind()) {
            actions.push(if flags.archived {
                MenuAction::new(MENU_UNARCHIVE, ActionKind::Unarchive)
            } else {
                MenuAction::new(MENU_ARCHIVE, ActionKind::Archive)
            });
        }

        actions.push(MenuAction::new(delete_label(dialog.kind()), ActionKind::Delete).destructive());
        actions
    }

    /// Like [`build_menu`](Self::build_menu), but yields nothing for a dialog
    /// the store no longer knows about.
    pub fn build_menu_checked(
        &self,
        store: &DialogListStore,
        dialog: &DialogModel,
        trigger: &TriggerEvent,
    ) -> Vec<MenuAction> {
        if !store.contains(&dialog.id) {
            log::debug!("Menu: dialog {} is not in the store, no menu", dialog.id);
            return Vec::new();
        }
        self.build_menu(dialog, trigger)
    }

    fn offers_archive(&self, kind: DialogKind) -> bool {
        match kind {
            DialogKind::DirectUser | DialogKind::Group | DialogKind::Channel => true,
            DialogKind::Bot => self.policy.archive_bots,
        }
    }
}

fn delete_label(kind: DialogKind) -> &'static str {
    match kind {
        DialogKind::DirectUser => MENU_DELETE_CHAT,
        DialogKind::Group => MENU_LEAVE_GROUP,
        DialogKind::Channel => MENU_LEAVE_CHANNEL,
        DialogKind::Bot => MENU_DELETE_BOT,
    }
}
