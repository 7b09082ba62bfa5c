use crate::config::Config;
use crate::logger::Logger;
use crate::session::{SessionBridge, SessionContext, SessionEvent};
use crate::ui::components::{LogsPanel, SessionStatus, StatusBar};
use crate::ui::controller::ConversationListViewController;
use crate::ui::core::{actions::Action, event_handler::EventType, Component};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{layout::Rect, Frame};

pub struct AppComponent {
    // Component composition
    controller: ConversationListViewController,
    logs_panel: LogsPanel,

    // Session
    context: SessionContext,
    bridge: SessionBridge,

    // Simple UI state
    status: SessionStatus,
    status_message: Option<String>,
    show_logs: bool,
    list_width: u16,
    should_quit: bool,
}

impl AppComponent {
    pub fn new(config: &Config, logger: Logger, bridge: SessionBridge) -> Self {
        let context = SessionContext::new();
        let controller = ConversationListViewController::new(context.store(), Box::new(bridge.dispatcher()), config);

        Self {
            controller,
            logs_panel: LogsPanel::new(logger),
            context,
            bridge,
            status: SessionStatus::Connecting,
            status_message: None,
            show_logs: false,
            list_width: config.ui.list_width,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_showing_logs(&self) -> bool {
        self.show_logs
    }

    pub fn controller(&self) -> &ConversationListViewController {
        &self.controller
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Apply every session event that arrived since the last call. Returns
    /// whether anything was applied.
    pub fn process_session_events(&mut self) -> bool {
        let events = self.bridge.drain_events();
        let received = !events.is_empty();

        for event in events {
            match &event {
                SessionEvent::Attached(_) => self.status = SessionStatus::Attached,
                SessionEvent::Detached => self.status = SessionStatus::Detached,
                _ => {}
            }
            if let Some(change) = self.context.apply(event) {
                self.controller.handle_store_change(&change);
            }
        }

        received
    }

    /// Handle global keyboard shortcuts that aren't component-specific
    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('G') => Action::ShowLogs(true),
            KeyCode::Char('i') => Action::CycleIcons,
            _ => Action::None,
        }
    }

    fn route_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        if self.show_logs {
            return self.logs_panel.handle_key_events(key);
        }
        // The open menu takes every key
        if self.controller.is_menu_open() {
            return self.controller.handle_key_events(key);
        }
        match self.controller.handle_key_events(key) {
            Action::None => self.handle_global_key(key),
            action => action,
        }
    }

    fn route_mouse(&mut self, mouse: MouseEvent) -> Action {
        if self.show_logs {
            self.logs_panel.handle_mouse_events(mouse)
        } else {
            self.controller.handle_mouse_events(mouse)
        }
    }

    /// Handle app-level actions left over after the components saw them
    pub fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::Quit => {
                log::info!("App: quitting");
                self.should_quit = true;
                Action::None
            }
            Action::ShowLogs(show) => {
                self.show_logs = show;
                self.logs_panel.reset_scroll();
                Action::None
            }
            Action::OpenDialog(id) => {
                let title = self.context.store().borrow().get(&id).map(|d| d.title.clone());
                self.status_message = title.map(|title| format!("Opened {}", title));
                Action::None
            }
            other => other,
        }
    }

    /// Process an event through the component hierarchy
    pub fn handle_event(&mut self, event_type: EventType) -> anyhow::Result<()> {
        let action = match event_type {
            EventType::Key(key) => {
                self.status_message = None;
                self.route_key(key)
            }
            EventType::Mouse(mouse) => self.route_mouse(mouse),
            EventType::Resize(_, _) | EventType::Tick | EventType::Other => Action::None,
        };

        let action = self.update(action);
        self.handle_app_action(action);
        Ok(())
    }

    /// Stop the session worker.
    pub async fn shutdown(self) {
        self.bridge.shutdown().await;
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        self.route_key(key)
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        self.route_mouse(mouse)
    }

    fn update(&mut self, action: Action) -> Action {
        let action = self.logs_panel.update(action);
        self.controller.update(action)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let (main_area, status_area) = LayoutManager::main_layout(rect);
        let (list_area, _) = LayoutManager::list_layout(main_area, self.list_width);

        self.controller.render(f, list_area);
        StatusBar::render(f, status_area, self.status, self.status_message.as_deref());

        if self.show_logs {
            self.logs_panel.render(f, rect);
        }
    }
}
