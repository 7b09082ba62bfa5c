use chatlist::config::Config;
use chatlist::entities::{DialogFlags, DialogId, DialogKind, DialogModel};
use chatlist::menu::{ActionKind, TriggerEvent};
use chatlist::session::ActionDispatcher;
use chatlist::store::{DialogListStore, SharedStore};
use chatlist::ui::components::RowState;
use chatlist::ui::core::{Action, Component};
use chatlist::ui::ConversationListViewController;
use chrono::{Duration, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::TestBackend, layout::Rect, Terminal};
use std::cell::RefCell;
use std::rc::Rc;

type Requests = Rc<RefCell<Vec<(DialogId, ActionKind)>>>;

struct RecordingDispatcher {
    requests: Requests,
}

impl ActionDispatcher for RecordingDispatcher {
    fn request_action(&self, dialog_id: &DialogId, kind: ActionKind) {
        self.requests.borrow_mut().push((dialog_id.clone(), kind));
    }
}

const AREA: Rect = Rect {
    x: 0,
    y: 0,
    width: 48,
    height: 20,
};

fn dialogs() -> Vec<DialogModel> {
    let now = Utc::now();
    vec![
        DialogModel::new(1u64, DialogKind::Group, "Rust Users")
            .with_preview("anyone tried 2024 edition?", now)
            .with_unread(3),
        DialogModel::new(2u64, DialogKind::DirectUser, "Alice").with_preview("see you", now - Duration::minutes(10)),
        DialogModel::new(3u64, DialogKind::Channel, "News")
            .with_preview("v2 is out", now - Duration::minutes(20))
            .with_flags(DialogFlags {
                archived: true,
                ..Default::default()
            }),
        DialogModel::new(4u64, DialogKind::Bot, "Weather Bot").with_preview("sunny", now - Duration::minutes(30)),
        DialogModel::new(5u64, DialogKind::Group, "Old friends").with_preview("ok", now - Duration::minutes(40)),
    ]
}

fn setup() -> (SharedStore, ConversationListViewController, Requests) {
    let store = DialogListStore::attached_with(dialogs()).into_shared();
    let requests = Requests::default();
    let dispatcher = RecordingDispatcher {
        requests: Rc::clone(&requests),
    };
    let mut controller = ConversationListViewController::new(Rc::clone(&store), Box::new(dispatcher), &Config::default());
    controller.set_area(AREA);
    (store, controller, requests)
}

fn get(store: &SharedStore, id: u64) -> DialogModel {
    store.borrow().get(&DialogId::from(id)).cloned().unwrap()
}

fn open(controller: &mut ConversationListViewController, store: &SharedStore, id: u64) -> bool {
    controller.show_popup_menu(&get(store, id), TriggerEvent::mouse(4, 4), AREA)
}

fn press(controller: &mut ConversationListViewController, code: KeyCode) {
    let action = controller.handle_key_events(KeyEvent::new(code, KeyModifiers::NONE));
    controller.update(action);
}

fn click(controller: &mut ConversationListViewController, kind: MouseEventKind, column: u16, row: u16) {
    let action = controller.handle_mouse_events(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    });
    controller.update(action);
}

fn id(n: u64) -> DialogId {
    DialogId::from(n)
}

#[test]
fn test_menu_dismissed_without_dispatch_when_dialog_removed() {
    let (store, mut controller, requests) = setup();
    assert!(open(&mut controller, &store, 5));
    assert_eq!(controller.row_state(&id(5)), RowState::MenuOpen);

    let change = store.borrow_mut().remove(&id(5)).unwrap();
    controller.handle_store_change(&change);

    assert!(!controller.is_menu_open());
    assert!(requests.borrow().is_empty());
}

#[test]
fn test_choice_is_forwarded_and_closes_menu() {
    let (store, mut controller, requests) = setup();
    open(&mut controller, &store, 1);

    controller.choose(0);

    assert!(!controller.is_menu_open());
    assert_eq!(*requests.borrow(), vec![(id(1), ActionKind::MarkRead)]);
    // The store only changes through session events
    assert_eq!(get(&store, 1).unread_count, 3);
}

#[test]
fn test_disabled_choice_is_rejected() {
    let (store, mut controller, requests) = setup();
    open(&mut controller, &store, 3);
    let menu = controller.menu().unwrap();
    assert_eq!(menu.entries()[0].kind, ActionKind::Pin);
    assert!(!menu.entries()[0].enabled);

    controller.choose(0);

    assert!(controller.is_menu_open());
    assert!(requests.borrow().is_empty());
}

#[test]
fn test_new_menu_replaces_open_one() {
    let (store, mut controller, _) = setup();
    open(&mut controller, &store, 1);
    open(&mut controller, &store, 2);

    assert_eq!(controller.menu().unwrap().dialog_id(), &id(2));
    assert_eq!(controller.row_state(&id(1)), RowState::Idle);
}

#[test]
fn test_stale_dialog_gets_no_menu() {
    let (_store, mut controller, _) = setup();
    let stale = DialogModel::new(99u64, DialogKind::Group, "Gone");

    assert!(!controller.show_popup_menu(&stale, TriggerEvent::mouse(1, 1), AREA));
    assert!(!controller.is_menu_open());
}

#[test]
fn test_selection_advances_when_selected_dialog_removed() {
    let (store, mut controller, _) = setup();
    assert!(controller.select(&id(2)));

    let change = store.borrow_mut().remove(&id(2)).unwrap();
    controller.handle_store_change(&change);

    assert_eq!(controller.selected(), Some(&id(3)));
    assert_eq!(controller.list().rows().len(), 4);
}

#[test]
fn test_keyboard_flow() {
    let (_store, mut controller, requests) = setup();

    press(&mut controller, KeyCode::Char('j'));
    press(&mut controller, KeyCode::Char('j'));
    assert_eq!(controller.selected(), Some(&id(2)));

    press(&mut controller, KeyCode::Char('m'));
    assert_eq!(controller.menu().unwrap().dialog_id(), &id(2));

    // The open menu takes navigation keys
    press(&mut controller, KeyCode::Char('j'));
    assert_eq!(controller.selected(), Some(&id(2)));

    press(&mut controller, KeyCode::Esc);
    assert!(!controller.is_menu_open());
    assert!(requests.borrow().is_empty());
}

#[test]
fn test_highlight_and_choose_with_keys() {
    let (store, mut controller, requests) = setup();
    open(&mut controller, &store, 1);

    controller.update(Action::MenuNext);
    controller.update(Action::MenuChooseHighlighted);

    assert_eq!(*requests.borrow(), vec![(id(1), ActionKind::Pin)]);
}

#[test]
fn test_shortcut_chooses_entry() {
    let (store, mut controller, requests) = setup();
    open(&mut controller, &store, 5);

    press(&mut controller, KeyCode::Char('l'));

    assert_eq!(*requests.borrow(), vec![(id(5), ActionKind::Delete)]);
    assert!(!controller.is_menu_open());
}

#[test]
fn test_mouse_flow() {
    let (_store, mut controller, _) = setup();

    // Second row spans screen rows 3 and 4
    click(&mut controller, MouseEventKind::Down(MouseButton::Right), 6, 3);
    assert_eq!(controller.menu().unwrap().dialog_id(), &id(2));
    assert_eq!(controller.selected(), None);

    // Clicking outside the menu dismisses it
    click(&mut controller, MouseEventKind::Down(MouseButton::Left), 40, 19);
    assert!(!controller.is_menu_open());

    click(&mut controller, MouseEventKind::Down(MouseButton::Left), 6, 1);
    assert_eq!(controller.selected(), Some(&id(1)));
}

#[test]
fn test_right_click_elsewhere_moves_menu() {
    let (_store, mut controller, _) = setup();

    click(&mut controller, MouseEventKind::Down(MouseButton::Right), 6, 1);
    assert_eq!(controller.menu().unwrap().dialog_id(), &id(1));

    click(&mut controller, MouseEventKind::Down(MouseButton::Right), 40, 9);
    assert_eq!(controller.menu().unwrap().dialog_id(), &id(5));
}

#[test]
fn test_hover_tracking() {
    let (store, mut controller, _) = setup();

    click(&mut controller, MouseEventKind::Moved, 6, 5);
    assert_eq!(controller.hovered(), Some(&id(3)));
    assert_eq!(controller.row_state(&id(3)), RowState::Hovered);

    controller.select(&id(3));
    assert_eq!(controller.row_state(&id(3)), RowState::Selected);

    let change = store.borrow_mut().remove(&id(3)).unwrap();
    controller.handle_store_change(&change);
    assert_eq!(controller.hovered(), None);
}

#[test]
fn test_detach_dismisses_menu() {
    let (store, mut controller, requests) = setup();
    open(&mut controller, &store, 4);

    let change = store.borrow_mut().detach().unwrap();
    controller.handle_store_change(&change);

    assert!(!controller.is_menu_open());
    assert_eq!(controller.selected(), None);
    assert!(controller.list().rows().is_empty());
    assert!(requests.borrow().is_empty());
}

#[test]
fn test_render_shows_list_and_menu() {
    let (store, mut controller, _) = setup();
    let mut terminal = Terminal::new(TestBackend::new(AREA.width, AREA.height)).unwrap();
    open(&mut controller, &store, 1);

    terminal.draw(|f| controller.render(f, f.area())).unwrap();

    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(screen.contains("Chats (5)"));
    assert!(screen.contains("3 unread"));
    assert!(screen.contains("Rust Users"));
    assert!(screen.contains("Mark as read"));
    assert!(screen.contains("Leave group"));
}

#[test]
fn test_open_menu_follows_dialog_updates() {
    let (store, mut controller, requests) = setup();
    open(&mut controller, &store, 5);
    let area = controller.menu().unwrap().area();

    let updated = get(&store, 5)
        .with_flags(DialogFlags {
            pinned: true,
            archived: true,
            ..Default::default()
        })
        .with_revision(1);
    let change = store.borrow_mut().insert_or_update(updated).unwrap();
    controller.handle_store_change(&change);

    let menu = controller.menu().unwrap();
    let kinds: Vec<ActionKind> = menu.entries().iter().map(|entry| entry.kind).collect();
    assert_eq!(
        kinds,
        vec![ActionKind::Unpin, ActionKind::Mute, ActionKind::Unarchive, ActionKind::Delete]
    );
    assert_eq!(menu.area(), area);

    controller.choose(0);
    assert_eq!(*requests.borrow(), vec![(id(5), ActionKind::Unpin)]);
}

#[test]
fn test_highlight_follows_action_when_menu_refreshes() {
    let (store, mut controller, _) = setup();
    open(&mut controller, &store, 1);
    controller.update(Action::MenuNext);
    assert_eq!(controller.menu().unwrap().highlighted(), 1);

    let read = get(&store, 1).with_unread(0).with_revision(1);
    let change = store.borrow_mut().insert_or_update(read).unwrap();
    controller.handle_store_change(&change);

    let menu = controller.menu().unwrap();
    assert_eq!(menu.entries().len(), 4);
    assert_eq!(menu.entries()[menu.highlighted()].kind, ActionKind::Pin);
}

#[test]
fn test_choice_checked_against_current_flags() {
    let (store, mut controller, requests) = setup();
    open(&mut controller, &store, 5);
    assert_eq!(controller.menu().unwrap().entries()[0].kind, ActionKind::Pin);

    // Archived behind the controller's back: pinning is no longer allowed
    let archived = get(&store, 5)
        .with_flags(DialogFlags {
            archived: true,
            ..Default::default()
        })
        .with_revision(1);
    store.borrow_mut().insert_or_update(archived).unwrap();

    controller.choose(0);

    assert!(!controller.is_menu_open());
    assert!(requests.borrow().is_empty());
}
