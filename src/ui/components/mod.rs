//! Reusable UI components

pub mod context_menu;
pub mod conversation_list;
pub mod logs_panel;
pub mod status_bar;

// Component exports
pub use context_menu::PopupMenu;
pub use conversation_list::{ConversationListComponent, RowMarks, RowState};
pub use logs_panel::LogsPanel;
pub use status_bar::{SessionStatus, StatusBar};
