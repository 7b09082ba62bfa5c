use chatlist::config::Config;
use chatlist::entities::{DialogFlags, DialogId, DialogKind, DialogModel};
use chatlist::logger::Logger;
use chatlist::session::{DemoSession, SessionBridge};
use chatlist::ui::components::SessionStatus;
use chatlist::ui::core::{Component, EventType};
use chatlist::ui::AppComponent;
use chrono::{Duration as ChronoDuration, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use std::time::Duration;

fn sample_dialogs() -> Vec<DialogModel> {
    let now = Utc::now();
    vec![
        DialogModel::new(1u64, DialogKind::DirectUser, "Alice")
            .with_preview("hi", now - ChronoDuration::minutes(30))
            .with_unread(2),
        DialogModel::new(2u64, DialogKind::Group, "Team").with_preview("standup?", now),
        DialogModel::new(3u64, DialogKind::Channel, "News")
            .with_preview("v2 is out", now - ChronoDuration::minutes(90))
            .with_flags(DialogFlags {
                archived: true,
                ..Default::default()
            }),
    ]
}

fn app() -> AppComponent {
    let bridge = SessionBridge::spawn(DemoSession::with_dialogs(sample_dialogs()), None);
    AppComponent::new(&Config::default(), Logger::new(100), bridge)
}

/// Let the session worker run until it has delivered something.
async fn pump(app: &mut AppComponent) {
    for _ in 0..200 {
        tokio::time::sleep(Duration::from_millis(5)).await;
        if app.process_session_events() {
            return;
        }
    }
    panic!("no session events arrived");
}

fn key(app: &mut AppComponent, code: KeyCode) {
    app.handle_event(EventType::Key(KeyEvent::new(code, KeyModifiers::NONE)))
        .unwrap();
}

fn screen(app: &mut AppComponent, terminal: &mut Terminal<TestBackend>) -> String {
    terminal.draw(|f| app.render(f, f.area())).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[tokio::test]
async fn test_attach_updates_status_and_store() {
    let mut app = app();
    assert_eq!(app.status(), SessionStatus::Connecting);

    pump(&mut app).await;

    assert_eq!(app.status(), SessionStatus::Attached);
    assert_eq!(app.context().store().borrow().len(), 3);
    assert_eq!(app.controller().list().rows()[0], DialogId::from(2));

    app.shutdown().await;
}

#[tokio::test]
async fn test_logs_toggle_and_quit() {
    let mut app = app();
    pump(&mut app).await;

    key(&mut app, KeyCode::Char('G'));
    assert!(app.is_showing_logs());

    // 'q' closes the logs panel before it quits
    key(&mut app, KeyCode::Char('q'));
    assert!(!app.is_showing_logs());
    assert!(!app.should_quit());

    key(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());

    app.shutdown().await;
}

#[tokio::test]
async fn test_ctrl_c_quits_even_with_menu_open() {
    let mut app = app();
    pump(&mut app).await;

    key(&mut app, KeyCode::Char('j'));
    key(&mut app, KeyCode::Char('m'));
    assert!(app.controller().is_menu_open());

    app.handle_event(EventType::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)))
        .unwrap();
    assert!(app.should_quit());

    app.shutdown().await;
}

#[tokio::test]
async fn test_menu_action_round_trips_through_session() {
    let mut app = app();
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    pump(&mut app).await;
    screen(&mut app, &mut terminal);

    key(&mut app, KeyCode::Char('j'));
    key(&mut app, KeyCode::Char('j'));
    assert_eq!(app.controller().selected(), Some(&DialogId::from(1)));

    key(&mut app, KeyCode::Enter);
    assert!(screen(&mut app, &mut terminal).contains("Opened Alice"));

    key(&mut app, KeyCode::Char('m'));
    assert!(app.controller().is_menu_open());
    assert!(screen(&mut app, &mut terminal).contains("Mark as read"));

    key(&mut app, KeyCode::Enter);
    assert!(!app.controller().is_menu_open());
    // Nothing changes until the session reports back
    assert_eq!(
        app.context().store().borrow().get(&DialogId::from(1)).unwrap().unread_count,
        2
    );

    pump(&mut app).await;
    assert_eq!(
        app.context().store().borrow().get(&DialogId::from(1)).unwrap().unread_count,
        0
    );
    assert!(!screen(&mut app, &mut terminal).contains("unread"));

    app.shutdown().await;
}
