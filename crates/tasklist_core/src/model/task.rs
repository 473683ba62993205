//! Task domain model.
//!
//! # Responsibility
//! - Define the single persisted record of the task list.
//!
//! # Invariants
//! - `id` is stable, never nil, and never reused for another task.
//! - `title` is free text; non-emptiness is a caller precondition, not a
//!   model invariant.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a persisted task.
pub type TaskId = Uuid;

/// Validation errors for task identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    NilId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
        }
    }
}

impl Error for TaskValidationError {}

/// A to-do item: an identity plus a single line of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
}

impl Task {
    /// Creates a new task with a generated stable ID.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
        }
    }

    /// Creates a task with a caller-provided ID.
    ///
    /// Used when rebuilding records read back from storage.
    ///
    /// # Errors
    /// - `TaskValidationError::NilId` when `id` is the nil UUID.
    pub fn with_id(id: TaskId, title: impl Into<String>) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            title: title.into(),
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks identity invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        Ok(())
    }
}

/// Returns whether `title` carries visible text.
///
/// Boundary check used by the list controller and entry screen before a
/// title is handed to the store.
pub fn is_blank_title(title: &str) -> bool {
    title.trim().is_empty()
}
