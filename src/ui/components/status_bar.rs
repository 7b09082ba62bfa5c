//! Status bar component

use crate::constants::{STATUS_CONNECTING, STATUS_DETACHED, STATUS_HINTS};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

/// Session state shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Connecting,
    Attached,
    Detached,
}

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar. A transient `message` wins over the key hints.
    pub fn render(f: &mut Frame, area: Rect, status: SessionStatus, message: Option<&str>) {
        let (status_text, status_color) = match (status, message) {
            (SessionStatus::Connecting, _) => (STATUS_CONNECTING, Color::Yellow),
            (SessionStatus::Detached, _) => (STATUS_DETACHED, Color::Red),
            (SessionStatus::Attached, Some(message)) => (message, Color::Cyan),
            (SessionStatus::Attached, None) => (STATUS_HINTS, Color::Gray),
        };

        let status_bar = Paragraph::new(status_text)
            .block(Block::default())
            .alignment(Alignment::Center)
            .style(Style::default().fg(status_color));

        f.render_widget(status_bar, area);
    }
}
