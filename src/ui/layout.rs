//! Layout management and calculations

use crate::constants::LIST_MIN_WIDTH;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Manages layout calculations and constraints for the UI
pub struct LayoutManager;

impl LayoutManager {
    /// Split the screen into the main area and a one-line status bar below it
    #[must_use]
    pub fn main_layout(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        (chunks[0], chunks[1])
    }

    /// Split the main area into the conversation list and the space to its
    /// right. The list never gets narrower than its minimum unless the screen
    /// itself is.
    #[must_use]
    pub fn list_layout(area: Rect, list_width: u16) -> (Rect, Rect) {
        let width = list_width.max(LIST_MIN_WIDTH).min(area.width);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(width), Constraint::Min(0)])
            .split(area);
        (chunks[0], chunks[1])
    }
}
