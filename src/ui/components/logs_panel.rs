//! Logs panel showing recent log lines from the in-memory buffer

use crate::constants::TITLE_DEBUG_LOGS;
use crate::logger::Logger;
use crate::ui::core::{actions::Action, Component};
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

pub struct LogsPanel {
    logger: Logger,
    scroll_offset: usize,
}

impl LogsPanel {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            scroll_offset: 0,
        }
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max = self.logger.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + 1).min(max);
    }

    pub fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
    }

    fn message_style(level: &str) -> Style {
        match level {
            "ERROR" => Style::default().fg(Color::Red),
            "WARN" => Style::default().fg(Color::Yellow),
            "INFO" => Style::default().fg(Color::Cyan),
            "DEBUG" => Style::default().fg(Color::Gray),
            _ => Style::default().fg(Color::DarkGray),
        }
    }

    fn create_log_item(log: &str) -> ListItem<'static> {
        // Entries look like "[12:00:00.000] LEVEL message"
        let Some(bracket_end) = log.find("] ") else {
            return ListItem::new(Line::from(log.to_string()));
        };
        let timestamp = &log[1..bracket_end];
        let rest = &log[bracket_end + 2..];
        let level = rest.split_whitespace().next().unwrap_or_default();

        ListItem::new(Line::from(vec![
            Span::styled(format!("[{}] ", timestamp), Style::default().fg(Color::DarkGray)),
            Span::styled(rest.to_string(), Self::message_style(level)),
        ]))
    }
}

impl Component for LogsPanel {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('G') | KeyCode::Char('q') => Action::ShowLogs(false),
            KeyCode::Up | KeyCode::Char('k') => Action::LogsScrollUp,
            KeyCode::Down | KeyCode::Char('j') => Action::LogsScrollDown,
            _ => Action::None,
        }
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        match mouse.kind {
            MouseEventKind::ScrollUp => Action::LogsScrollUp,
            MouseEventKind::ScrollDown => Action::LogsScrollDown,
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::LogsScrollUp => {
                self.scroll_up();
                Action::None
            }
            Action::LogsScrollDown => {
                self.scroll_down();
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Take 80% of the screen
        let modal_width = area.width.saturating_mul(8) / 10;
        let modal_height = area.height.saturating_mul(8) / 10;
        let modal_area = Rect {
            x: area.x + (area.width.saturating_sub(modal_width)) / 2,
            y: area.y + (area.height.saturating_sub(modal_height)) / 2,
            width: modal_width,
            height: modal_height,
        };

        frame.render_widget(Clear, modal_area);
        let block = Block::default()
            .title(TITLE_DEBUG_LOGS)
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black))
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(block, modal_area);

        let inner_area = modal_area.inner(Margin {
            vertical: 1,
            horizontal: 1,
        });
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner_area);

        let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let header = Paragraph::new(Line::from(vec![
            Span::styled("↑/↓", key_style),
            Span::styled(" or ", Style::default().fg(Color::Gray)),
            Span::styled("j/k", key_style),
            Span::styled(" to scroll", Style::default().fg(Color::Gray)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        let logs = self.logger.get_logs();
        if logs.is_empty() {
            let no_logs = Paragraph::new("No logs yet")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            frame.render_widget(no_logs, chunks[1]);
            return;
        }

        let visible_height = chunks[1].height as usize;
        let start = self.scroll_offset.min(logs.len().saturating_sub(1));
        let end = (start + visible_height).min(logs.len());
        let items: Vec<ListItem> = logs[start..end].iter().map(|log| Self::create_log_item(log)).collect();
        frame.render_widget(List::new(items), chunks[1]);

        if logs.len() > visible_height {
            let scroll_info = format!("{}-{} of {}", start + 1, end, logs.len());
            let width = (scroll_info.len() as u16 + 2).min(chunks[1].width);
            let scroll_area = Rect {
                x: chunks[1].x + chunks[1].width.saturating_sub(width),
                y: chunks[1].y + chunks[1].height.saturating_sub(1),
                width,
                height: 1,
            };
            let indicator = Paragraph::new(scroll_info)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right);
            frame.render_widget(indicator, scroll_area);
        }
    }
}
