//! Conversation list component.
//!
//! Keeps a row projection (`rows`) of the store's order and patches it from
//! [`StoreChange`] notifications, so an update to one dialog only touches the
//! rows it moves through. Dialog contents are always read from the store at
//! render time.

use crate::constants::{EMPTY_LIST, STATUS_CONNECTING, TITLE_CHATS};
use crate::entities::{DialogId, DialogModel};
use crate::icons::IconService;
use crate::menu::TriggerEvent;
use crate::store::{DialogListStore, SharedStore, StoreChange, StoreObserver};
use crate::ui::core::{actions::Action, Component};
use crate::utils::datetime;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::rc::Rc;

/// Terminal lines per conversation row.
pub const ROW_HEIGHT: u16 = 2;

/// Visual state of a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Idle,
    Hovered,
    Selected,
    MenuOpen,
}

/// Ids the controller wants highlighted on the next render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowMarks {
    pub selected: Option<DialogId>,
    pub hovered: Option<DialogId>,
    pub menu_target: Option<DialogId>,
}

impl RowMarks {
    /// Menu target wins over selection, selection over hover.
    pub fn state_of(&self, id: &DialogId) -> RowState {
        if self.menu_target.as_ref() == Some(id) {
            RowState::MenuOpen
        } else if self.selected.as_ref() == Some(id) {
            RowState::Selected
        } else if self.hovered.as_ref() == Some(id) {
            RowState::Hovered
        } else {
            RowState::Idle
        }
    }
}

pub struct ConversationListComponent {
    store: SharedStore,
    rows: Vec<DialogId>,
    list_state: ListState,
    marks: RowMarks,
    icons: IconService,
    date_format: String,
    area: Rect,
}

impl ConversationListComponent {
    pub fn new(store: SharedStore, icons: IconService, date_format: impl Into<String>) -> Self {
        let rows = store.borrow().all().iter().map(|d| d.id.clone()).collect();
        Self {
            store,
            rows,
            list_state: ListState::default(),
            marks: RowMarks::default(),
            icons,
            date_format: date_format.into(),
            area: Rect::default(),
        }
    }

    /// Row ids in display order.
    pub fn rows(&self) -> &[DialogId] {
        &self.rows
    }

    pub fn marks(&self) -> &RowMarks {
        &self.marks
    }

    pub fn set_marks(&mut self, marks: RowMarks) {
        self.marks = marks;
    }

    pub fn icons(&self) -> &IconService {
        &self.icons
    }

    pub fn icons_mut(&mut self) -> &mut IconService {
        &mut self.icons
    }

    /// First row index currently scrolled into view.
    pub fn offset(&self) -> usize {
        self.list_state.offset()
    }

    /// Area of the last render, used for hit-testing.
    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// Dialog under the given screen cell, if any.
    pub fn row_at(&self, column: u16, row: u16) -> Option<&DialogId> {
        let area = self.area;
        let inside = column > area.x
            && column < area.right().saturating_sub(1)
            && row > area.y
            && row < area.bottom().saturating_sub(1);
        if !inside {
            return None;
        }
        let local = ((row - area.y - 1) / ROW_HEIGHT) as usize;
        self.rows.get(self.list_state.offset() + local)
    }

    /// Screen cell just below the first line of the given row, or the top of
    /// the list when the row is scrolled out of view.
    pub fn anchor_for(&self, id: &DialogId) -> TriggerEvent {
        let area = self.area;
        let fallback = TriggerEvent::keyboard(area.x + 2, area.y + 1);
        let Some(index) = self.rows.iter().position(|row| row == id) else {
            return fallback;
        };
        let offset = self.list_state.offset();
        if index < offset {
            return fallback;
        }
        let y = area.y as usize + 1 + (index - offset) * ROW_HEIGHT as usize;
        if y >= area.bottom().saturating_sub(1) as usize {
            return fallback;
        }
        TriggerEvent::keyboard(area.x + 2, y as u16)
    }

    fn rebuild(&mut self, store: &DialogListStore) {
        self.rows = store.all().iter().map(|d| d.id.clone()).collect();
        if self.list_state.offset() >= self.rows.len() {
            *self.list_state.offset_mut() = 0;
        }
    }

    fn create_row(&self, dialog: &DialogModel, width: usize) -> ListItem<'static> {
        let flags = dialog.flags;
        let mut base = Style::default().fg(Color::White);
        if flags.archived {
            base = base.add_modifier(Modifier::DIM);
        }

        // First line: kind, title, flag icons ... time
        let mut head = vec![
            Span::styled(format!("{} ", self.icons.kind(dialog.kind())), Style::default().fg(Color::Cyan)),
            Span::styled(dialog.title.clone(), base.add_modifier(Modifier::BOLD)),
        ];
        if flags.pinned {
            head.push(Span::styled(format!(" {}", self.icons.pinned()), Style::default().fg(Color::Yellow)));
        }
        if flags.muted {
            head.push(Span::styled(format!(" {}", self.icons.muted()), Style::default().fg(Color::DarkGray)));
        }
        if flags.archived {
            head.push(Span::styled(format!(" {}", self.icons.archived()), Style::default().fg(Color::DarkGray)));
        }
        let time = datetime::format_preview_time(dialog.preview_timestamp, Utc::now(), &self.date_format);
        let time = Span::styled(time, Style::default().fg(Color::Gray));
        let head = fit_line(head, time, width);

        // Second line: preview ... unread badge
        let preview = vec![Span::styled(
            format!("  {}", dialog.preview_text),
            base.fg(Color::Gray),
        )];
        let badge = if dialog.is_unread() {
            let badge_style = if flags.muted {
                Style::default().fg(Color::Black).bg(Color::DarkGray)
            } else {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD)
            };
            Span::styled(format!(" {} ", dialog.unread_count), badge_style)
        } else {
            Span::raw("")
        };
        let tail = fit_line(preview, badge, width);

        ListItem::new(vec![head, tail])
    }

    fn row_style(state: RowState) -> Style {
        match state {
            RowState::Idle => Style::default(),
            RowState::Hovered => Style::default().bg(Color::Rgb(40, 40, 48)),
            RowState::Selected => Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            RowState::MenuOpen => Style::default().bg(Color::Rgb(60, 80, 120)).add_modifier(Modifier::BOLD),
        }
    }

    fn title(store: &DialogListStore) -> String {
        let unread = store.total_unread();
        if unread > 0 {
            format!("{} ({}) • {} unread", TITLE_CHATS, store.len(), unread)
        } else {
            format!("{} ({})", TITLE_CHATS, store.len())
        }
    }
}

/// Left-aligned spans and a right-aligned span on one line, truncating the
/// left part so both fit `width` columns.
fn fit_line(mut left: Vec<Span<'static>>, right: Span<'static>, width: usize) -> Line<'static> {
    let right_width = right.width();
    let budget = width.saturating_sub(right_width + 1);
    let mut used = 0;
    let mut kept = Vec::with_capacity(left.len() + 2);

    for span in left.drain(..) {
        let span_width = span.width();
        if used + span_width <= budget {
            used += span_width;
            kept.push(span);
            continue;
        }
        let room = budget.saturating_sub(used);
        if room > 1 {
            let truncated: String = span.content.chars().take(room - 1).collect();
            used += truncated.chars().count() + 1;
            kept.push(Span::styled(format!("{}…", truncated), span.style));
        }
        break;
    }

    let padding = width.saturating_sub(used + right_width);
    kept.push(Span::raw(" ".repeat(padding)));
    kept.push(right);
    Line::from(kept)
}

impl StoreObserver for ConversationListComponent {
    fn on_store_change(&mut self, store: &DialogListStore, change: &StoreChange) {
        let offset = self.list_state.offset();
        match change {
            StoreChange::Inserted { index, id } => {
                let index = (*index).min(self.rows.len());
                self.rows.insert(index, id.clone());
                // Keep the rows on screen in place
                if index < offset {
                    *self.list_state.offset_mut() = offset + 1;
                }
            }
            StoreChange::Updated { .. } => {}
            StoreChange::Moved { from, to, id } => {
                if *from < self.rows.len() && self.rows[*from] == *id {
                    self.rows.remove(*from);
                    self.rows.insert((*to).min(self.rows.len()), id.clone());
                    if *from < offset && *to >= offset {
                        *self.list_state.offset_mut() = offset - 1;
                    } else if *from >= offset && *to < offset {
                        *self.list_state.offset_mut() = offset + 1;
                    }
                } else {
                    log::warn!("List: row projection out of step on move of {}, rebuilding", id);
                    self.rebuild(store);
                }
            }
            StoreChange::Removed { index, id } => {
                if *index < self.rows.len() && self.rows[*index] == *id {
                    self.rows.remove(*index);
                    if *index < offset {
                        *self.list_state.offset_mut() = offset - 1;
                    }
                } else {
                    log::warn!("List: row projection out of step on removal of {}, rebuilding", id);
                    self.rebuild(store);
                }
            }
            StoreChange::Reordered | StoreChange::Reset => self.rebuild(store),
        }
        debug_assert_eq!(self.rows.len(), store.len());
    }
}

impl Component for ConversationListComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
            KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
            KeyCode::Enter => match &self.marks.selected {
                Some(id) => Action::OpenDialog(id.clone()),
                None => Action::None,
            },
            KeyCode::Char('m') | KeyCode::Char('.') => match &self.marks.selected {
                Some(id) => Action::ShowPopupMenu {
                    dialog_id: id.clone(),
                    trigger: self.anchor_for(id),
                },
                None => Action::None,
            },
            _ => Action::None,
        }
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        let target = self.row_at(mouse.column, mouse.row).cloned();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match target {
                Some(id) => Action::SelectDialog(id),
                None => Action::None,
            },
            MouseEventKind::Down(MouseButton::Right) => match target {
                Some(id) => Action::ShowPopupMenu {
                    dialog_id: id,
                    trigger: TriggerEvent::from(mouse),
                },
                None => Action::None,
            },
            MouseEventKind::Moved => {
                if target != self.marks.hovered {
                    Action::HoverDialog(target)
                } else {
                    Action::None
                }
            }
            MouseEventKind::ScrollUp if self.area.contains((mouse.column, mouse.row).into()) => {
                Action::SelectPrevious
            }
            MouseEventKind::ScrollDown if self.area.contains((mouse.column, mouse.row).into()) => {
                Action::SelectNext
            }
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        self.area = rect;
        let store = Rc::clone(&self.store);
        let store = store.borrow();

        if self.rows.is_empty() {
            let message = if store.is_attached() {
                EMPTY_LIST
            } else {
                STATUS_CONNECTING
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL).title(Self::title(&store)));
            f.render_widget(empty, rect);
            return;
        }

        let width = rect.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .filter_map(|id| {
                let dialog = store.get(id)?;
                let style = Self::row_style(self.marks.state_of(id));
                Some(self.create_row(dialog, width).style(style))
            })
            .collect();

        let selected = self
            .marks
            .selected
            .as_ref()
            .and_then(|id| self.rows.iter().position(|row| row == id));
        self.list_state.select(selected);

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Self::title(&store)),
        );
        f.render_stateful_widget(list, rect, &mut self.list_state);
    }
}
