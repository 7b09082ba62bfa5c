//! Core UI functionality for the chatlist application.
//!
//! This module contains the building blocks every UI component builds upon.
//!
//! # Module Components
//!
//! - [`actions`] - Action definitions produced by input and consumed by the app
//! - [`component`] - Base component trait and rendering abstraction
//! - [`event_handler`] - Terminal event polling with a fixed tick
//!
//! # Architecture
//!
//! 1. **Events** are read by the [`EventHandler`]
//! 2. **Components** turn events into [`Action`]s
//! 3. The app routes actions back through [`Component::update`]
//!
//! Session events never pass through here; they reach the list through the
//! store and its change notifications.

pub mod actions;
pub mod component;
pub mod event_handler;

// Re-export core types for easier access from other modules
pub use actions::Action;
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
