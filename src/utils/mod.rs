//! Utility modules for the chatlist application.
//!
//! - [`datetime`] - Preview timestamp formatting and format validation

pub mod datetime;
