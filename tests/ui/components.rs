use chatlist::entities::{DialogFlags, DialogId, DialogKind, DialogModel};
use chatlist::icons::IconService;
use chatlist::menu::{ContextMenuBuilder, TriggerEvent};
use chatlist::store::{DialogListStore, SharedStore, StoreObserver};
use chatlist::ui::components::{ConversationListComponent, PopupMenu, RowMarks, RowState};
use chatlist::ui::core::{Action, Component};
use chrono::{Duration, TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::rc::Rc;

const BOUNDS: Rect = Rect {
    x: 0,
    y: 0,
    width: 40,
    height: 20,
};

fn dialog(id: u64, minutes_ago: i64) -> DialogModel {
    let base = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
    DialogModel::new(id, DialogKind::Group, format!("Chat {}", id))
        .with_preview("hello", base - Duration::minutes(minutes_ago))
}

fn group_menu(trigger: TriggerEvent) -> PopupMenu {
    let unread = dialog(1, 0).with_unread(2);
    let entries = ContextMenuBuilder::default().build_menu(&unread, &trigger);
    PopupMenu::new(unread.id.clone(), entries, trigger, BOUNDS, ">")
}

fn archived_menu() -> PopupMenu {
    let archived = dialog(2, 0).with_flags(DialogFlags {
        archived: true,
        ..Default::default()
    });
    let trigger = TriggerEvent::mouse(2, 2);
    let entries = ContextMenuBuilder::default().build_menu(&archived, &trigger);
    PopupMenu::new(archived.id.clone(), entries, trigger, BOUNDS, ">")
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn test_menu_flips_above_and_clamps_near_the_corner() {
    let menu = group_menu(TriggerEvent::mouse(35, 18));
    assert_eq!(menu.entries().len(), 5);
    assert_eq!(menu.area(), Rect::new(16, 11, 24, 7));
}

#[test]
fn test_menu_opens_below_the_trigger() {
    let menu = group_menu(TriggerEvent::mouse(2, 2));
    assert_eq!(menu.area(), Rect::new(2, 3, 24, 7));
}

#[test]
fn test_highlight_skips_disabled_entries() {
    let mut menu = archived_menu();
    // Pin is first and disabled
    assert!(!menu.entries()[0].enabled);
    assert_eq!(menu.highlighted(), 1);

    menu.highlight_previous();
    assert_eq!(menu.highlighted(), 3);
    menu.highlight_next();
    assert_eq!(menu.highlighted(), 1);
}

#[test]
fn test_shortcut_matches_first_letter_of_enabled_entries() {
    let mut menu = group_menu(TriggerEvent::mouse(2, 2));
    assert_eq!(menu.shortcut('L'), Some(4));
    assert_eq!(menu.shortcut('z'), None);

    let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
    assert_eq!(menu.handle_key_events(key), Action::MenuChoose(3));

    let archived = archived_menu();
    assert_eq!(archived.shortcut('p'), None);
    assert_eq!(archived.shortcut('u'), Some(2));
}

#[test]
fn test_shortcut_letters_never_collide() {
    // "Mark as read" owns 'm', so Mute falls back to its next free letter
    let menu = group_menu(TriggerEvent::mouse(2, 2));
    assert_eq!(menu.mnemonic(0), Some('m'));
    assert_eq!(menu.mnemonic(2), Some('u'));
    assert_eq!(menu.shortcut('m'), Some(0));
    assert_eq!(menu.shortcut('u'), Some(2));

    let flagged = dialog(3, 0).with_flags(DialogFlags {
        pinned: true,
        muted: true,
        archived: true,
    });
    let trigger = TriggerEvent::keyboard(2, 2);
    let entries = ContextMenuBuilder::default().build_menu(&flagged, &trigger);
    let menu = PopupMenu::new(flagged.id.clone(), entries, trigger, BOUNDS, ">");
    let letters: Vec<Option<char>> = (0..menu.entries().len()).map(|i| menu.mnemonic(i)).collect();
    assert_eq!(letters, vec![Some('u'), Some('n'), Some('a'), Some('l')]);
    assert_eq!(menu.shortcut('n'), Some(1));
    assert_eq!(menu.shortcut('a'), Some(2));
}

#[test]
fn test_replace_entries_keeps_anchor() {
    let trigger = TriggerEvent::mouse(35, 18);
    let mut menu = group_menu(trigger);
    menu.highlight_next();
    assert_eq!(menu.highlighted(), 1);

    let read = dialog(1, 0);
    menu.replace_entries(ContextMenuBuilder::default().build_menu(&read, &trigger));

    assert_eq!(menu.entries().len(), 4);
    // One row shorter, still flipped above the trigger
    assert_eq!(menu.area(), Rect::new(16, 12, 24, 6));
    assert_eq!(menu.highlighted(), 0);
    assert_eq!(menu.shortcut('m'), Some(1));
}

#[test]
fn test_mouse_hit_testing() {
    let mut menu = group_menu(TriggerEvent::mouse(2, 2));
    // Border row
    assert_eq!(menu.entry_at(5, 3), None);
    assert_eq!(menu.entry_at(5, 4), Some(0));
    assert_eq!(menu.entry_at(5, 8), Some(4));

    assert_eq!(
        menu.handle_mouse_events(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5)),
        Action::MenuChoose(1)
    );
    assert_eq!(
        menu.handle_mouse_events(mouse(MouseEventKind::Down(MouseButton::Left), 39, 19)),
        Action::DismissMenu
    );
    assert_eq!(
        menu.handle_mouse_events(mouse(MouseEventKind::Down(MouseButton::Right), 39, 19)),
        Action::DismissMenu
    );

    menu.handle_mouse_events(mouse(MouseEventKind::Moved, 5, 6));
    assert_eq!(menu.highlighted(), 2);
}

#[test]
fn test_menu_update_resolves_highlighted_choice() {
    let mut menu = group_menu(TriggerEvent::mouse(2, 2));
    assert_eq!(menu.update(Action::MenuNext), Action::None);
    assert_eq!(menu.update(Action::MenuChooseHighlighted), Action::MenuChoose(1));
}

#[test]
fn test_row_marks_precedence() {
    let a = DialogId::from("a");
    let marks = RowMarks {
        selected: Some(a.clone()),
        hovered: Some(a.clone()),
        menu_target: None,
    };
    assert_eq!(marks.state_of(&a), RowState::Selected);
    assert_eq!(marks.state_of(&DialogId::from("b")), RowState::Idle);

    let marks = RowMarks {
        menu_target: Some(a.clone()),
        ..marks
    };
    assert_eq!(marks.state_of(&a), RowState::MenuOpen);
}

fn list_fixture() -> (SharedStore, ConversationListComponent) {
    let store = DialogListStore::attached_with(vec![dialog(1, 0), dialog(2, 10), dialog(3, 20)]).into_shared();
    let list = ConversationListComponent::new(Rc::clone(&store), IconService::default(), "%Y-%m-%d");
    (store, list)
}

fn row_ids(list: &ConversationListComponent) -> Vec<String> {
    list.rows().iter().map(|id| id.to_string()).collect()
}

#[test]
fn test_list_rows_follow_store_changes() {
    let (store, mut list) = list_fixture();
    assert_eq!(row_ids(&list), vec!["1", "2", "3"]);

    let change = store.borrow_mut().insert_or_update(dialog(4, 5)).unwrap();
    list.on_store_change(&store.borrow(), &change);
    assert_eq!(row_ids(&list), vec!["1", "4", "2", "3"]);

    let change = store.borrow_mut().insert_or_update(dialog(3, -5)).unwrap();
    list.on_store_change(&store.borrow(), &change);
    assert_eq!(row_ids(&list), vec!["3", "1", "4", "2"]);

    let change = store.borrow_mut().remove(&DialogId::from(1)).unwrap();
    list.on_store_change(&store.borrow(), &change);
    assert_eq!(row_ids(&list), vec!["3", "4", "2"]);

    let change = store.borrow_mut().attach(vec![dialog(9, 0)]);
    list.on_store_change(&store.borrow(), &change);
    assert_eq!(row_ids(&list), vec!["9"]);
}

#[test]
fn test_list_row_hit_testing() {
    let (_store, mut list) = list_fixture();
    list.set_area(Rect::new(0, 0, 40, 20));

    // Top border
    assert_eq!(list.row_at(5, 0), None);
    assert_eq!(list.row_at(5, 1), Some(&DialogId::from(1)));
    assert_eq!(list.row_at(5, 2), Some(&DialogId::from(1)));
    assert_eq!(list.row_at(5, 3), Some(&DialogId::from(2)));
    assert_eq!(list.row_at(5, 6), Some(&DialogId::from(3)));
    // Past the last row
    assert_eq!(list.row_at(5, 7), None);
    // Left border
    assert_eq!(list.row_at(0, 3), None);

    let anchor = list.anchor_for(&DialogId::from(2));
    assert_eq!((anchor.column, anchor.row), (2, 3));
}

#[test]
fn test_list_mouse_produces_actions() {
    let (_store, mut list) = list_fixture();
    list.set_area(Rect::new(0, 0, 40, 20));

    assert_eq!(
        list.handle_mouse_events(mouse(MouseEventKind::Down(MouseButton::Left), 5, 3)),
        Action::SelectDialog(DialogId::from(2))
    );
    assert_eq!(
        list.handle_mouse_events(mouse(MouseEventKind::Down(MouseButton::Right), 5, 5)),
        Action::ShowPopupMenu {
            dialog_id: DialogId::from(3),
            trigger: TriggerEvent::mouse(5, 5),
        }
    );
    assert_eq!(
        list.handle_mouse_events(mouse(MouseEventKind::Moved, 5, 1)),
        Action::HoverDialog(Some(DialogId::from(1)))
    );
    assert_eq!(
        list.handle_mouse_events(mouse(MouseEventKind::Down(MouseButton::Right), 5, 15)),
        Action::None
    );
}

#[test]
fn test_list_keys_need_a_selection() {
    let (_store, mut list) = list_fixture();
    let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);

    assert_eq!(list.handle_key_events(enter), Action::None);
    assert_eq!(
        list.handle_key_events(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)),
        Action::SelectNext
    );

    list.set_marks(RowMarks {
        selected: Some(DialogId::from(2)),
        ..Default::default()
    });
    assert_eq!(list.handle_key_events(enter), Action::OpenDialog(DialogId::from(2)));
}
