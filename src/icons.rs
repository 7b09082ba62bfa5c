//! Icon service for managing different icon themes
//!
//! This module provides a centralized way to manage icons throughout the application,
//! supporting different themes like emoji, Unicode, and ASCII fallbacks.

use crate::entities::DialogKind;
use serde::{Deserialize, Serialize};

/// Icon theme variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconTheme {
    /// Emoji icons (colorful, modern look)
    Emoji,
    /// Unicode symbols (clean, native look)
    Unicode,
    /// ASCII characters (maximum compatibility)
    #[default]
    Ascii,
}

/// Dialog kind icons
#[derive(Debug, Clone)]
pub struct KindIcons {
    pub direct_user: &'static str,
    pub group: &'static str,
    pub channel: &'static str,
    pub bot: &'static str,
}

/// Dialog flag indicators
#[derive(Debug, Clone)]
pub struct FlagIcons {
    pub pinned: &'static str,
    pub muted: &'static str,
    pub archived: &'static str,
}

/// Complete icon set for a specific theme
#[derive(Debug, Clone)]
pub struct IconSet {
    pub kind: KindIcons,
    pub flags: FlagIcons,
    pub menu_pointer: &'static str,
}

/// Icon service for managing themes and providing icons
#[derive(Debug, Clone)]
pub struct IconService {
    current_theme: IconTheme,
}

impl Default for IconService {
    fn default() -> Self {
        Self::new(IconTheme::default())
    }
}

impl IconService {
    /// Create a new icon service with the specified theme
    #[must_use]
    pub fn new(theme: IconTheme) -> Self {
        Self { current_theme: theme }
    }

    /// Get the current theme
    #[must_use]
    pub fn theme(&self) -> IconTheme {
        self.current_theme
    }

    /// Cycle to the next icon theme in the sequence: Ascii -> Unicode -> Emoji -> Ascii
    pub fn cycle_icon_theme(&mut self) {
        self.current_theme = match self.current_theme {
            IconTheme::Ascii => IconTheme::Unicode,
            IconTheme::Unicode => IconTheme::Emoji,
            IconTheme::Emoji => IconTheme::Ascii,
        };
    }

    /// Get the complete icon set for the current theme
    #[must_use]
    pub fn icons(&self) -> IconSet {
        match self.current_theme {
            IconTheme::Emoji => IconSet {
                kind: KindIcons {
                    direct_user: "👤",
                    group: "👥",
                    channel: "📢",
                    bot: "🤖",
                },
                flags: FlagIcons {
                    pinned: "📌",
                    muted: "🔇",
                    archived: "🗄",
                },
                menu_pointer: "👉",
            },
            IconTheme::Unicode => IconSet {
                kind: KindIcons {
                    direct_user: "●",
                    group: "◆",
                    channel: "▶",
                    bot: "⚙",
                },
                flags: FlagIcons {
                    pinned: "↑",
                    muted: "∅",
                    archived: "▣",
                },
                menu_pointer: "›",
            },
            IconTheme::Ascii => IconSet {
                kind: KindIcons {
                    direct_user: "@",
                    group: "#",
                    channel: ">",
                    bot: "%",
                },
                flags: FlagIcons {
                    pinned: "^",
                    muted: "~",
                    archived: "=",
                },
                menu_pointer: ">",
            },
        }
    }

    #[must_use]
    pub fn kind(&self, kind: DialogKind) -> &'static str {
        let icons = self.icons().kind;
        match kind {
            DialogKind::DirectUser => icons.direct_user,
            DialogKind::Group => icons.group,
            DialogKind::Channel => icons.channel,
            DialogKind::Bot => icons.bot,
        }
    }

    #[must_use]
    pub fn pinned(&self) -> &'static str {
        self.icons().flags.pinned
    }

    #[must_use]
    pub fn muted(&self) -> &'static str {
        self.icons().flags.muted
    }

    #[must_use]
    pub fn archived(&self) -> &'static str {
        self.icons().flags.archived
    }

    #[must_use]
    pub fn menu_pointer(&self) -> &'static str {
        self.icons().menu_pointer
    }
}
