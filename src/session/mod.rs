//! Session layer seam.
//!
//! The session layer owns the real dialog data (network, persistence). This
//! module defines what crosses the boundary and how it crosses threads:
//!
//! - [`SessionEvent`] flows in: created, updated, removed, reordered dialogs.
//! - [`ActionDispatcher::request_action`] flows out, fire-and-forget. Its
//!   outcome is only observed as a later [`SessionEvent`].
//! - [`SessionBridge`] runs a [`SessionSource`] on a background tokio task and
//!   hands its events to the UI loop over one FIFO channel, so updates for the
//!   same dialog are applied in the order the session produced them.
//! - [`SessionContext`] is the session-scoped owner of the dialog store and the
//!   only place store mutations happen.

use crate::entities::{DialogId, DialogModel};
use crate::menu::ActionKind;
use crate::store::{DialogListStore, SharedStore, StoreChange};
use async_trait::async_trait;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub mod demo;

pub use demo::DemoSession;

/// Errors raised by a session source.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Dialog not found: {0}")]
    NotFound(DialogId),

    #[error("Action {kind} rejected for dialog {id}: {reason}")]
    Rejected {
        id: DialogId,
        kind: ActionKind,
        reason: String,
    },

    #[error("Failed to load dialogs: {0}")]
    Load(String),
}

/// Inbound notification from the session layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Attached(Vec<DialogModel>),
    Created(DialogModel),
    Updated(DialogModel),
    Removed(DialogId),
    Reordered,
    Detached,
}

/// Outbound path for user-chosen actions.
pub trait ActionDispatcher {
    fn request_action(&self, dialog_id: &DialogId, kind: ActionKind);
}

/// A backend that supplies dialogs and executes actions.
#[async_trait]
pub trait SessionSource: Send + 'static {
    /// Initial dialog list for a freshly attached session.
    async fn load_dialogs(&mut self) -> Result<Vec<DialogModel>, SessionError>;

    /// Execute an action and report the resulting changes.
    async fn perform_action(&mut self, dialog_id: &DialogId, kind: ActionKind)
        -> Result<Vec<SessionEvent>, SessionError>;

    /// Changes that happened on their own since the last call (incoming
    /// messages, read receipts from other devices).
    async fn poll_activity(&mut self) -> Vec<SessionEvent> {
        Vec::new()
    }
}

#[derive(Debug)]
enum SessionRequest {
    Action { id: DialogId, kind: ActionKind },
    Shutdown,
}

/// Sends action requests to the session worker.
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    requests: mpsc::UnboundedSender<SessionRequest>,
}

impl ActionDispatcher for ChannelDispatcher {
    fn request_action(&self, dialog_id: &DialogId, kind: ActionKind) {
        log::info!("Session: requesting {} for {}", kind, dialog_id);
        let request = SessionRequest::Action {
            id: dialog_id.clone(),
            kind,
        };
        if self.requests.send(request).is_err() {
            log::warn!("Session: worker gone, dropped {} for {}", kind, dialog_id);
        }
    }
}

/// Background worker around a [`SessionSource`] plus the UI end of its event
/// channel.
pub struct SessionBridge {
    requests: mpsc::UnboundedSender<SessionRequest>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    worker: JoinHandle<()>,
}

impl SessionBridge {
    /// Spawn the worker. With `activity_interval` set, the source is polled
    /// for unsolicited changes at that period.
    pub fn spawn<S: SessionSource>(source: S, activity_interval: Option<Duration>) -> Self {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(source, request_rx, event_tx, activity_interval));

        Self {
            requests: request_tx,
            events: event_rx,
            worker,
        }
    }

    pub fn dispatcher(&self) -> ChannelDispatcher {
        ChannelDispatcher {
            requests: self.requests.clone(),
        }
    }

    /// All events that arrived since the last call, in arrival order.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    /// Wait for the next event. `None` once the worker has stopped.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Ask the worker to detach and stop, then wait for it.
    pub async fn shutdown(self) {
        let _ = self.requests.send(SessionRequest::Shutdown);
        if let Err(e) = self.worker.await {
            log::error!("Session: worker ended abnormally: {}", e);
        }
    }
}

async fn run_worker<S: SessionSource>(
    mut source: S,
    mut requests: mpsc::UnboundedReceiver<SessionRequest>,
    events: mpsc::UnboundedSender<SessionEvent>,
    activity_interval: Option<Duration>,
) {
    match source.load_dialogs().await {
        Ok(dialogs) => {
            log::info!("Session: loaded {} dialogs", dialogs.len());
            let _ = events.send(SessionEvent::Attached(dialogs));
        }
        Err(e) => {
            log::error!("Session: {}", e);
            let _ = events.send(SessionEvent::Detached);
            return;
        }
    }

    let mut ticker = activity_interval.map(|period| {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        ticker
    });
    // The first tick of an interval fires immediately
    if let Some(ticker) = ticker.as_mut() {
        ticker.tick().await;
    }

    loop {
        let activity_tick = async {
            match ticker.as_mut() {
                Some(ticker) => {
                    ticker.tick().await;
                }
                None => std::future::pending::<()>().await,
            }
        };

        let produced = tokio::select! {
            request = requests.recv() => match request {
                Some(SessionRequest::Action { id, kind }) => match source.perform_action(&id, kind).await {
                    Ok(produced) => produced,
                    Err(SessionError::NotFound(id)) => {
                        log::debug!("Session: action {} for vanished dialog {}", kind, id);
                        Vec::new()
                    }
                    Err(e) => {
                        log::warn!("Session: {}", e);
                        Vec::new()
                    }
                },
                Some(SessionRequest::Shutdown) | None => break,
            },
            _ = activity_tick => source.poll_activity().await,
        };

        for event in produced {
            if events.send(event).is_err() {
                log::debug!("Session: UI side closed, stopping worker");
                return;
            }
        }
    }

    let _ = events.send(SessionEvent::Detached);
    log::info!("Session: worker stopped");
}

/// Session-scoped owner of the dialog store.
pub struct SessionContext {
    store: SharedStore,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            store: DialogListStore::new().into_shared(),
        }
    }

    /// Shared handle for read-only consumers such as the view controller.
    pub fn store(&self) -> SharedStore {
        Rc::clone(&self.store)
    }

    /// Apply one session event to the store and report what changed.
    pub fn apply(&self, event: SessionEvent) -> Option<StoreChange> {
        let mut store = self.store.borrow_mut();
        match event {
            SessionEvent::Attached(dialogs) => Some(store.attach(dialogs)),
            SessionEvent::Created(dialog) | SessionEvent::Updated(dialog) => store.insert_or_update(dialog),
            SessionEvent::Removed(id) => {
                let change = store.remove(&id);
                if change.is_none() {
                    log::debug!("Session: removal of unknown dialog {}", id);
                }
                change
            }
            SessionEvent::Reordered => store.reorder(),
            SessionEvent::Detached => store.detach(),
        }
    }
}
