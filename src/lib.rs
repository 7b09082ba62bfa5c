//! chatlist - A terminal conversation list for messaging clients
//!
//! This library provides the presentation and contextual-action model of a
//! chat list: an ordered dialog store, single selection, context menus built
//! from each dialog's state, and a Ratatui view that renders the list and
//! forwards chosen actions to the session layer.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`entities`] - Dialog data model
//! * [`store`] - Ordered dialog store with change notifications
//! * [`selection`] - Selection tracking
//! * [`menu`] - Context menu construction
//! * [`session`] - Session layer seam and the demo session
//! * [`config`] - Application configuration management
//! * [`ui`] - Terminal user interface components
//! * [`utils`] - Utility functions and helpers

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Dialog data model
pub mod entities;

/// Icon definitions for visual representation in the TUI
pub mod icons;

/// Logging setup and the in-memory log buffer
pub mod logger;

/// Context menu construction
pub mod menu;

/// Selection tracking for the conversation list
pub mod selection;

/// Session layer seam: events in, action requests out
pub mod session;

/// Ordered dialog store
pub mod store;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions for date/time handling
pub mod utils;

// Re-export the core types for convenient access
pub use entities::{DialogFlags, DialogId, DialogKind, DialogModel};
pub use menu::{ActionKind, ContextMenuBuilder, MenuAction, TriggerEvent};
pub use selection::SelectionController;
pub use store::{DialogListStore, StoreChange};
