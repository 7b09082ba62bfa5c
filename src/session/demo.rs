//! Offline session used by the binary when no network backend is wired in.
//!
//! It keeps its own copy of the dialogs, executes actions against it, and
//! produces a trickle of incoming messages so the list has something to react
//! to.

use super::{SessionError, SessionEvent, SessionSource};
use crate::config::SessionConfig;
use crate::entities::{DialogFlags, DialogId, DialogKind, DialogModel};
use crate::menu::ActionKind;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::path::Path;

const SAMPLE_TITLES: &[(&str, DialogKind)] = &[
    ("Alice Martin", DialogKind::DirectUser),
    ("Rust Users", DialogKind::Group),
    ("Release Notes", DialogKind::Channel),
    ("Weather Bot", DialogKind::Bot),
    ("Bob Chen", DialogKind::DirectUser),
    ("Weekend Hikers", DialogKind::Group),
    ("Tech News", DialogKind::Channel),
    ("Reminder Bot", DialogKind::Bot),
    ("Carol Diaz", DialogKind::DirectUser),
    ("Family", DialogKind::Group),
];

const SAMPLE_MESSAGES: &[&str] = &[
    "See you tomorrow!",
    "Did anyone try the new release?",
    "Version 2.1 is out",
    "Sunny, 21°C",
    "Sounds good to me",
    "Meeting point moved to the north gate",
    "Five things to know this week",
    "Don't forget: dentist at 3pm",
    "Thanks, got it",
    "Dinner on Sunday?",
];

/// Every this many activity polls a new conversation shows up.
const NEW_DIALOG_EVERY: u64 = 7;

pub struct DemoSession {
    dialogs: Vec<DialogModel>,
    next_revision: u64,
    activity_count: u64,
}

impl DemoSession {
    /// Generate `count` sample dialogs, newest first, a couple of them pinned.
    pub fn generated(count: usize) -> Self {
        let now = Utc::now();
        let dialogs = (0..count)
            .map(|i| {
                let (title, kind) = SAMPLE_TITLES[i % SAMPLE_TITLES.len()];
                let title = if i < SAMPLE_TITLES.len() {
                    title.to_string()
                } else {
                    format!("{} {}", title, i / SAMPLE_TITLES.len() + 1)
                };
                let flags = DialogFlags {
                    pinned: i == 2 || i == 5,
                    muted: i % 4 == 3,
                    archived: i % 9 == 8,
                };
                DialogModel::new(uuid::Uuid::new_v4().to_string(), kind, title)
                    .with_preview(
                        SAMPLE_MESSAGES[i % SAMPLE_MESSAGES.len()],
                        now - Duration::minutes((i as i64 + 1) * 37),
                    )
                    .with_unread(if i % 3 == 0 { (i as u32 % 5) + 1 } else { 0 })
                    .with_flags(flags)
                    .with_revision(1)
            })
            .collect();

        Self::with_dialogs(dialogs)
    }

    pub fn with_dialogs(dialogs: Vec<DialogModel>) -> Self {
        let next_revision = dialogs.iter().map(|d| d.revision).max().unwrap_or(0) + 1;
        Self {
            dialogs,
            next_revision,
            activity_count: 0,
        }
    }

    /// Load dialogs from a JSON array of dialog objects.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SessionError::Load(format!("{}: {}", path.display(), e)))?;
        let dialogs: Vec<DialogModel> = serde_json::from_str(&content)
            .map_err(|e| SessionError::Load(format!("{}: {}", path.display(), e)))?;
        Ok(Self::with_dialogs(dialogs))
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        match &config.dialogs_file {
            Some(path) => Self::from_json_file(path).context("Failed to prepare demo session"),
            None => Ok(Self::generated(config.demo_dialogs)),
        }
    }

    pub fn dialogs(&self) -> &[DialogModel] {
        &self.dialogs
    }

    fn bump(&mut self, dialog: &mut DialogModel) {
        dialog.revision = self.next_revision;
        self.next_revision += 1;
    }

    fn position(&self, id: &DialogId) -> Result<usize, SessionError> {
        self.dialogs
            .iter()
            .position(|d| &d.id == id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))
    }

    fn incoming_message(&mut self) -> Option<SessionEvent> {
        if self.dialogs.is_empty() {
            return None;
        }
        let index = (self.activity_count as usize * 5) % self.dialogs.len();
        let message = SAMPLE_MESSAGES[self.activity_count as usize % SAMPLE_MESSAGES.len()];

        let mut dialog = self.dialogs[index].clone();
        dialog.preview_text = message.to_string();
        dialog.preview_timestamp = Utc::now();
        dialog.unread_count = dialog.unread_count.saturating_add(1);
        // New messages bring a chat back from the archive unless it is muted
        if dialog.flags.archived && !dialog.flags.muted {
            dialog.flags.archived = false;
        }
        self.bump(&mut dialog);
        self.dialogs[index] = dialog.clone();
        Some(SessionEvent::Updated(dialog))
    }

    fn new_conversation(&mut self) -> SessionEvent {
        let (title, kind) = SAMPLE_TITLES[self.activity_count as usize % SAMPLE_TITLES.len()];
        let mut dialog = DialogModel::new(uuid::Uuid::new_v4().to_string(), kind, format!("{} (new)", title))
            .with_preview("Hi there!", Utc::now())
            .with_unread(1);
        self.bump(&mut dialog);
        self.dialogs.push(dialog.clone());
        SessionEvent::Created(dialog)
    }
}

#[async_trait]
impl SessionSource for DemoSession {
    async fn load_dialogs(&mut self) -> Result<Vec<DialogModel>, SessionError> {
        let mut dialogs = self.dialogs.clone();
        dialogs.sort_by(crate::store::list_order);
        Ok(dialogs)
    }

    async fn perform_action(
        &mut self,
        dialog_id: &DialogId,
        kind: ActionKind,
    ) -> Result<Vec<SessionEvent>, SessionError> {
        let index = self.position(dialog_id)?;
        let mut dialog = self.dialogs[index].clone();

        match kind {
            ActionKind::Delete => {
                self.dialogs.remove(index);
                return Ok(vec![SessionEvent::Removed(dialog_id.clone())]);
            }
            ActionKind::MarkRead => dialog.unread_count = 0,
            ActionKind::Pin if dialog.flags.archived => {
                return Err(SessionError::Rejected {
                    id: dialog_id.clone(),
                    kind,
                    reason: "archived dialogs cannot be pinned".to_string(),
                });
            }
            ActionKind::Pin => dialog.flags.pinned = true,
            ActionKind::Unpin => dialog.flags.pinned = false,
            ActionKind::Mute => dialog.flags.muted = true,
            ActionKind::Unmute => dialog.flags.muted = false,
            ActionKind::Archive => {
                dialog.flags.archived = true;
                dialog.flags.pinned = false;
            }
            ActionKind::Unarchive => dialog.flags.archived = false,
        }

        self.bump(&mut dialog);
        self.dialogs[index] = dialog.clone();
        Ok(vec![SessionEvent::Updated(dialog)])
    }

    async fn poll_activity(&mut self) -> Vec<SessionEvent> {
        self.activity_count += 1;
        if self.activity_count % NEW_DIALOG_EVERY == 0 {
            return vec![self.new_conversation()];
        }
        self.incoming_message().into_iter().collect()
    }
}
