//! Core domain logic for the task list.
//! This crate owns task persistence and the list screen's cache contract.

pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use controller::entry::{
    entry_channel, EntryError, EntryOutcome, EntryReceiver, EntryScreen,
};
pub use controller::list_controller::{
    ControllerError, ControllerResult, ListState, RowChange, TaskListController,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{is_blank_title, Task, TaskId, TaskValidationError};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::task_store::{StoreError, StoreResult, TaskStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
