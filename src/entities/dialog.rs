use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identity of a conversation (peer or chat id).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialogId(String);

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DialogId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for DialogId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for DialogId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// What sort of conversation a dialog is. Decides which menu actions apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    DirectUser,
    Group,
    Channel,
    Bot,
}

impl DialogKind {
    pub fn display_name(self) -> &'static str {
        match self {
            DialogKind::DirectUser => "chat",
            DialogKind::Group => "group",
            DialogKind::Channel => "channel",
            DialogKind::Bot => "bot",
        }
    }
}

/// Independent status flags. Every combination is valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogFlags {
    pub muted: bool,
    pub pinned: bool,
    pub archived: bool,
}

/// One conversation summary as shown in a list row.
///
/// `kind` is fixed at construction; the store refuses updates that try to change it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DialogModel {
    pub id: DialogId,
    kind: DialogKind,
    pub title: String,
    #[serde(default)]
    pub preview_text: String,
    pub preview_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub flags: DialogFlags,
    /// Session-assigned version, increases with every update of this dialog.
    #[serde(default)]
    pub revision: u64,
}

impl DialogModel {
    pub fn new(id: impl Into<DialogId>, kind: DialogKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            preview_text: String::new(),
            preview_timestamp: DateTime::<Utc>::UNIX_EPOCH,
            unread_count: 0,
            flags: DialogFlags::default(),
            revision: 0,
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn with_preview(mut self, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        self.preview_text = text.into();
        self.preview_timestamp = timestamp;
        self
    }

    pub fn with_unread(mut self, unread_count: u32) -> Self {
        self.unread_count = unread_count;
        self
    }

    pub fn with_flags(mut self, flags: DialogFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    pub fn is_unread(&self) -> bool {
        self.unread_count > 0
    }
}
