//! Screen-facing controllers.
//!
//! # Responsibility
//! - Keep the list screen's cache in step with the task store.
//! - Carry entry screen results back to the list screen.

pub mod entry;
pub mod list_controller;
