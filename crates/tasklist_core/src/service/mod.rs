//! Core use-case services.
//!
//! # Responsibility
//! - Wrap repository calls into the task store contract.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod task_store;
