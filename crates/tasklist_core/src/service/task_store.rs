//! Task store: the sole gateway to persisted tasks.
//!
//! # Responsibility
//! - Expose create/fetch/update/delete over a `TaskRepository`.
//! - Classify repository failures into read, write and not-found errors.
//!
//! # Invariants
//! - Titles are stored as given; empty titles are accepted here.
//! - A failed read is never reported as an empty list.
//! - Storage faults are returned to the caller, never fatal.

use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoError, TaskRepository};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error taxonomy.
#[derive(Debug)]
pub enum StoreError {
    /// Stored tasks could not be read; the list is unknown, not empty.
    Read(RepoError),
    /// A create/update/delete could not be committed.
    Write(RepoError),
    /// The targeted task no longer exists in storage.
    NotFound(TaskId),
}

impl StoreError {
    fn read(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Read(other),
        }
    }

    fn write(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Write(other),
        }
    }

    /// Short stable code used in log events and FFI envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read(_) => "storage_read_failed",
            Self::Write(_) => "storage_write_failed",
            Self::NotFound(_) => "task_not_found",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read tasks: {err}"),
            Self::Write(err) => write!(f, "failed to save tasks: {err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) | Self::Write(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

/// Use-case wrapper that owns the task repository.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Creates a store over the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new task and returns it with its assigned ID.
    pub fn create(&self, title: impl Into<String>) -> StoreResult<Task> {
        let task = Task::new(title);
        match self.repo.create_task(&task) {
            Ok(_) => {
                info!("event=task_create module=store status=ok task_id={}", task.id);
                Ok(task)
            }
            Err(err) => {
                let err = StoreError::write(err);
                error!(
                    "event=task_create module=store status=error error_code={} error={}",
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Returns a snapshot of every persisted task in insertion order.
    pub fn fetch_all(&self) -> StoreResult<Vec<Task>> {
        match self.repo.list_tasks() {
            Ok(tasks) => {
                info!(
                    "event=task_fetch_all module=store status=ok count={}",
                    tasks.len()
                );
                Ok(tasks)
            }
            Err(err) => {
                let err = StoreError::read(err);
                error!(
                    "event=task_fetch_all module=store status=error error_code={} error={}",
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Looks up one task by ID.
    pub fn get(&self, id: TaskId) -> StoreResult<Option<Task>> {
        self.repo.get_task(id).map_err(StoreError::read)
    }

    /// Overwrites the title of an existing task and returns the result.
    pub fn update(&self, id: TaskId, new_title: impl Into<String>) -> StoreResult<Task> {
        let new_title = new_title.into();
        match self.repo.update_task_title(id, new_title.as_str()) {
            Ok(()) => {
                info!("event=task_update module=store status=ok task_id={id}");
                Ok(Task {
                    id,
                    title: new_title,
                })
            }
            Err(err) => {
                let err = StoreError::write(err);
                log_mutation_failure("task_update", id, &err);
                Err(err)
            }
        }
    }

    /// Removes a task from storage.
    pub fn delete(&self, id: TaskId) -> StoreResult<()> {
        match self.repo.delete_task(id) {
            Ok(()) => {
                info!("event=task_delete module=store status=ok task_id={id}");
                Ok(())
            }
            Err(err) => {
                let err = StoreError::write(err);
                log_mutation_failure("task_delete", id, &err);
                Err(err)
            }
        }
    }
}

fn log_mutation_failure(event: &str, id: TaskId, err: &StoreError) {
    if matches!(err, StoreError::NotFound(_)) {
        warn!(
            "event={event} module=store status=not_found task_id={id} error_code={}",
            err.code()
        );
    } else {
        error!(
            "event={event} module=store status=error task_id={id} error_code={} error={err}",
            err.code()
        );
    }
}
