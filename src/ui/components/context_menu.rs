//! Floating context menu for one dialog.
//!
//! Entries are built from the dialog's flags when the menu opens and rebuilt
//! by the controller whenever that dialog changes while the menu is open.
//! Choosing an entry only reports it; the controller decides what to do with
//! the choice.

use crate::constants::MENU_WIDTH;
use crate::entities::DialogId;
use crate::menu::{MenuAction, TriggerEvent};
use crate::ui::core::{actions::Action, Component};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem},
    Frame,
};

/// Keys the menu already uses for navigation.
const RESERVED_KEYS: [char; 2] = ['j', 'k'];

pub struct PopupMenu {
    dialog_id: DialogId,
    entries: Vec<MenuAction>,
    /// Char position of each entry's shortcut letter in its label.
    mnemonics: Vec<Option<usize>>,
    highlighted: usize,
    trigger: TriggerEvent,
    bounds: Rect,
    area: Rect,
    pointer: &'static str,
}

impl PopupMenu {
    /// Place the menu next to `trigger`, kept inside `bounds`. It opens below
    /// the trigger row and flips above it when there is no room.
    pub fn new(
        dialog_id: DialogId,
        entries: Vec<MenuAction>,
        trigger: TriggerEvent,
        bounds: Rect,
        pointer: &'static str,
    ) -> Self {
        let area = placement(entries.len(), trigger, bounds);
        let highlighted = entries.iter().position(|e| e.enabled).unwrap_or(0);
        let mnemonics = assign_mnemonics(&entries);
        Self {
            dialog_id,
            entries,
            mnemonics,
            highlighted,
            trigger,
            bounds,
            area,
            pointer,
        }
    }

    /// Swap in entries rebuilt for the dialog's current state. The menu stays
    /// anchored where it opened and the highlight follows the same action
    /// while it is still offered and enabled.
    pub fn replace_entries(&mut self, entries: Vec<MenuAction>) {
        let current = self.entries.get(self.highlighted).map(|entry| entry.kind);
        self.highlighted = current
            .and_then(|kind| entries.iter().position(|e| e.kind == kind && e.enabled))
            .or_else(|| entries.iter().position(|e| e.enabled))
            .unwrap_or(0);
        self.area = placement(entries.len(), self.trigger, self.bounds);
        self.mnemonics = assign_mnemonics(&entries);
        self.entries = entries;
    }

    pub fn trigger(&self) -> TriggerEvent {
        self.trigger
    }

    pub fn dialog_id(&self) -> &DialogId {
        &self.dialog_id
    }

    pub fn entries(&self) -> &[MenuAction] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&MenuAction> {
        self.entries.get(index)
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains((column, row).into())
    }

    /// Entry under the given screen cell.
    pub fn entry_at(&self, column: u16, row: u16) -> Option<usize> {
        if !self.contains(column, row) || row <= self.area.y {
            return None;
        }
        let index = (row - self.area.y - 1) as usize;
        (index < self.entries.len()).then_some(index)
    }

    /// Move the highlight down, skipping disabled entries and wrapping.
    pub fn highlight_next(&mut self) {
        self.step(1);
    }

    /// Move the highlight up, skipping disabled entries and wrapping.
    pub fn highlight_previous(&mut self) {
        self.step(self.entries.len().saturating_sub(1));
    }

    fn step(&mut self, by: usize) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        let mut index = self.highlighted;
        for _ in 0..len {
            index = (index + by) % len;
            if self.entries[index].enabled {
                self.highlighted = index;
                return;
            }
        }
    }

    /// Shortcut letter of an entry, lowercase.
    pub fn mnemonic(&self, index: usize) -> Option<char> {
        let position = (*self.mnemonics.get(index)?)?;
        self.entries[index]
            .label
            .chars()
            .nth(position)
            .map(|c| c.to_ascii_lowercase())
    }

    /// Enabled entry whose shortcut letter is `c`.
    pub fn shortcut(&self, c: char) -> Option<usize> {
        let c = c.to_ascii_lowercase();
        (0..self.entries.len()).find(|&index| self.entries[index].enabled && self.mnemonic(index) == Some(c))
    }

    fn entry_style(&self, index: usize, entry: &MenuAction) -> Style {
        let mut style = if !entry.enabled {
            Style::default().fg(Color::DarkGray)
        } else if entry.destructive {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::White)
        };
        if index == self.highlighted && entry.enabled {
            style = style.bg(Color::Rgb(60, 80, 120)).add_modifier(Modifier::BOLD);
        }
        style
    }

    /// Label split so the shortcut letter is underlined.
    fn label_spans(&self, index: usize, entry: &MenuAction, style: Style) -> Vec<Span<'static>> {
        let Some(position) = self.mnemonics.get(index).copied().flatten() else {
            return vec![Span::styled(entry.label.clone(), style)];
        };
        let chars: Vec<char> = entry.label.chars().collect();
        let before: String = chars[..position].iter().collect();
        let letter: String = chars[position..=position].iter().collect();
        let after: String = chars[position + 1..].iter().collect();
        vec![
            Span::styled(before, style),
            Span::styled(letter, style.add_modifier(Modifier::UNDERLINED)),
            Span::styled(after, style),
        ]
    }
}

/// Give every entry a distinct letter from its label, preferring the first
/// one. Disabled entries still claim a letter.
fn assign_mnemonics(entries: &[MenuAction]) -> Vec<Option<usize>> {
    let mut taken: Vec<char> = RESERVED_KEYS.to_vec();
    entries
        .iter()
        .map(|entry| {
            let (position, letter) = entry
                .label
                .chars()
                .enumerate()
                .map(|(i, c)| (i, c.to_ascii_lowercase()))
                .find(|(_, c)| c.is_ascii_alphabetic() && !taken.contains(c))?;
            taken.push(letter);
            Some(position)
        })
        .collect()
}

fn placement(entry_count: usize, trigger: TriggerEvent, bounds: Rect) -> Rect {
    let width = MENU_WIDTH.min(bounds.width);
    let height = (entry_count as u16).saturating_add(2).min(bounds.height);

    let max_x = bounds.right().saturating_sub(width);
    let x = trigger.column.clamp(bounds.x, max_x.max(bounds.x));

    let below = trigger.row.saturating_add(1);
    let y = if below.saturating_add(height) <= bounds.bottom() {
        below
    } else {
        trigger.row.saturating_sub(height).max(bounds.y)
    };

    Rect { x, y, width, height }
}

impl Component for PopupMenu {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::DismissMenu,
            KeyCode::Up | KeyCode::Char('k') => Action::MenuPrevious,
            KeyCode::Down | KeyCode::Char('j') => Action::MenuNext,
            KeyCode::Enter => Action::MenuChooseHighlighted,
            KeyCode::Char(c) => match self.shortcut(c) {
                Some(index) => Action::MenuChoose(index),
                None => Action::None,
            },
            _ => Action::None,
        }
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        match mouse.kind {
            MouseEventKind::Moved => {
                if let Some(index) = self.entry_at(mouse.column, mouse.row) {
                    if self.entries[index].enabled {
                        self.highlighted = index;
                    }
                }
                Action::None
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if !self.contains(mouse.column, mouse.row) {
                    return Action::DismissMenu;
                }
                match self.entry_at(mouse.column, mouse.row) {
                    Some(index) => Action::MenuChoose(index),
                    None => Action::None,
                }
            }
            MouseEventKind::Down(_) if !self.contains(mouse.column, mouse.row) => Action::DismissMenu,
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::MenuNext => {
                self.highlight_next();
                Action::None
            }
            Action::MenuPrevious => {
                self.highlight_previous();
                Action::None
            }
            Action::MenuChooseHighlighted => Action::MenuChoose(self.highlighted),
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, _rect: Rect) {
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let marker = if i == self.highlighted && entry.enabled {
                    self.pointer
                } else {
                    " "
                };
                let style = self.entry_style(i, entry);
                let mut spans = vec![Span::styled(format!("{} ", marker), style)];
                spans.extend(self.label_spans(i, entry, style));
                ListItem::new(Line::from(spans)).style(style)
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black));

        f.render_widget(Clear, self.area);
        f.render_widget(List::new(items).block(block), self.area);
    }
}
