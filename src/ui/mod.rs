//! UI module for chatlist
//!
//! This module handles the terminal user interface: the conversation list, its
//! context menu, the logs panel, and the event loop that ties them to the
//! session layer.

pub mod app_component;
pub mod components;
pub mod controller;
pub mod core;
pub mod layout;
pub mod renderer;

pub use app_component::AppComponent;
pub use controller::ConversationListViewController;
pub use layout::LayoutManager;
pub use renderer::run_app;
