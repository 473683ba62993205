//! List screen controller.
//!
//! # Responsibility
//! - Hold the ordered cache of tasks shown by the list screen.
//! - Translate add/edit/remove gestures into store calls.
//! - Report the minimal row change the view has to apply.
//!
//! # Invariants
//! - Cache order equals rendered row order; rows are addressed by index and
//!   resolved to a `TaskId` before any store call.
//! - The cache changes only after the store confirms a mutation.
//! - A failed full fetch leaves the list `Unavailable`, never empty-loaded.

use crate::controller::entry::EntryOutcome;
use crate::model::task::{is_blank_title, Task, TaskId};
use crate::repo::task_repo::TaskRepository;
use crate::service::task_store::{StoreError, TaskStore};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Lifecycle of the cached list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// Screen not loaded yet; cache is empty.
    Initial,
    /// Cache mirrors the last successful full fetch plus confirmed edits.
    Loaded,
    /// Last full fetch failed; the list is unknown.
    Unavailable,
}

/// View update produced by a controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowChange {
    /// Nothing to redraw.
    None,
    /// Redraw every row from the cache.
    ReloadAll,
    /// One row was appended at this index.
    Inserted(usize),
    /// The row at this index changed its title.
    Updated(usize),
    /// The row at this index was removed.
    Removed(usize),
}

#[derive(Debug)]
pub enum ControllerError {
    /// Input title was blank; the store was not called.
    EmptyTitle,
    /// Row index does not address a cached task.
    RowOutOfRange { index: usize, len: usize },
    /// List has not been loaded successfully.
    NotLoaded,
    /// Store call failed; cache left unchanged.
    Store(StoreError),
    /// Store reported a stale row; the cache was reloaded and the view must
    /// redraw every row.
    Reconciled(StoreError),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::RowOutOfRange { index, len } => {
                write!(f, "row {index} is out of range for {len} task(s)")
            }
            Self::NotLoaded => write!(f, "task list is not loaded"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Reconciled(err) => write!(f, "{err}; task list reloaded"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) | Self::Reconciled(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ControllerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Keeps the list screen's task cache synchronized with a `TaskStore`.
pub struct TaskListController<R: TaskRepository> {
    store: TaskStore<R>,
    cache: Vec<Task>,
    state: ListState,
}

impl<R: TaskRepository> TaskListController<R> {
    pub fn new(store: TaskStore<R>) -> Self {
        Self {
            store,
            cache: Vec::new(),
            state: ListState::Initial,
        }
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    /// Cached tasks in row order.
    pub fn tasks(&self) -> &[Task] {
        &self.cache
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn task_at(&self, index: usize) -> Option<&Task> {
        self.cache.get(index)
    }

    pub fn store(&self) -> &TaskStore<R> {
        &self.store
    }

    /// Populates the cache when the list screen becomes visible.
    pub fn load(&mut self) -> ControllerResult<RowChange> {
        self.refresh("list_load")
    }

    /// Re-reads the whole list, e.g. after a task was saved elsewhere.
    pub fn reload(&mut self) -> ControllerResult<RowChange> {
        self.refresh("list_reload")
    }

    /// Creates a task and appends it as the last row.
    pub fn add(&mut self, title: impl Into<String>) -> ControllerResult<RowChange> {
        let title = title.into();
        if is_blank_title(&title) {
            return Err(ControllerError::EmptyTitle);
        }
        self.ensure_loaded()?;

        let task = self.store.create(title)?;
        self.cache.push(task);
        Ok(RowChange::Inserted(self.cache.len() - 1))
    }

    /// Renames the task shown at `index`.
    pub fn edit(
        &mut self,
        index: usize,
        new_title: impl Into<String>,
    ) -> ControllerResult<RowChange> {
        let new_title = new_title.into();
        if is_blank_title(&new_title) {
            return Err(ControllerError::EmptyTitle);
        }
        let id = self.resolve_row(index)?;

        match self.store.update(id, new_title) {
            Ok(updated) => {
                self.cache[index] = updated;
                Ok(RowChange::Updated(index))
            }
            Err(err) => Err(self.reconcile(err)),
        }
    }

    /// Deletes the task shown at `index`.
    pub fn remove(&mut self, index: usize) -> ControllerResult<RowChange> {
        let id = self.resolve_row(index)?;

        match self.store.delete(id) {
            Ok(()) => {
                self.cache.remove(index);
                Ok(RowChange::Removed(index))
            }
            Err(err) => Err(self.reconcile(err)),
        }
    }

    /// Applies the result reported by an entry screen.
    pub fn apply_entry(&mut self, outcome: EntryOutcome) -> ControllerResult<RowChange> {
        match outcome {
            EntryOutcome::Saved(title) => self.add(title),
            EntryOutcome::Cancelled => Ok(RowChange::None),
        }
    }

    fn refresh(&mut self, event: &str) -> ControllerResult<RowChange> {
        match self.store.fetch_all() {
            Ok(tasks) => {
                self.cache = tasks;
                self.state = ListState::Loaded;
                info!(
                    "event={event} module=controller status=ok rows={}",
                    self.cache.len()
                );
                Ok(RowChange::ReloadAll)
            }
            Err(err) => {
                self.cache.clear();
                self.state = ListState::Unavailable;
                warn!(
                    "event={event} module=controller status=error error_code={}",
                    err.code()
                );
                Err(ControllerError::Store(err))
            }
        }
    }

    fn ensure_loaded(&self) -> ControllerResult<()> {
        if self.state != ListState::Loaded {
            return Err(ControllerError::NotLoaded);
        }
        Ok(())
    }

    fn resolve_row(&self, index: usize) -> ControllerResult<TaskId> {
        self.ensure_loaded()?;
        self.cache
            .get(index)
            .map(|task| task.id)
            .ok_or(ControllerError::RowOutOfRange {
                index,
                len: self.cache.len(),
            })
    }

    fn reconcile(&mut self, err: StoreError) -> ControllerError {
        if !matches!(err, StoreError::NotFound(_)) {
            return ControllerError::Store(err);
        }

        match self.refresh("list_reconcile") {
            Ok(_) => ControllerError::Reconciled(err),
            Err(reload_err) => reload_err,
        }
    }
}
