//! Constants used throughout the application
//!
//! This module centralizes UI text, log messages, and layout limits.

// Context menu labels
pub const MENU_MARK_READ: &str = "Mark as read";
pub const MENU_PIN: &str = "Pin";
pub const MENU_UNPIN: &str = "Unpin";
pub const MENU_MUTE: &str = "Mute";
pub const MENU_UNMUTE: &str = "Unmute";
pub const MENU_ARCHIVE: &str = "Archive";
pub const MENU_UNARCHIVE: &str = "Unarchive";
pub const MENU_DELETE_CHAT: &str = "Delete chat";
pub const MENU_LEAVE_GROUP: &str = "Leave group";
pub const MENU_LEAVE_CHANNEL: &str = "Leave channel";
pub const MENU_DELETE_BOT: &str = "Stop and delete bot";

// Panel titles
pub const TITLE_CHATS: &str = "Chats";
pub const TITLE_DEBUG_LOGS: &str = "Logs - Press 'Esc' or 'G' to close";

// Status bar
pub const STATUS_CONNECTING: &str = "Connecting...";
pub const STATUS_DETACHED: &str = "Session detached";
pub const STATUS_HINTS: &str = "j/k: move • Enter: open • m: menu • G: logs • q: quit";
pub const EMPTY_LIST: &str = "No conversations yet.";

// UI messages
pub const CONFIG_GENERATED: &str = "Generated default configuration file";

// Layout limits
/// Minimum conversation list width in columns
pub const LIST_MIN_WIDTH: u16 = 20;
/// Maximum conversation list width in columns
pub const LIST_MAX_WIDTH: u16 = 120;
/// Default conversation list width in columns
pub const LIST_DEFAULT_WIDTH: u16 = 48;
/// Popup menu width in columns, borders included
pub const MENU_WIDTH: u16 = 24;
