//! FFI use-case API for the list and entry screens.
//!
//! # Responsibility
//! - Expose the list screen contract (fetch all, create, update, delete)
//!   as sync calls for Dart via FRB.
//! - Translate core errors into stable response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - A failed fetch is reported with `ok = false`, never as an empty list.

use db_path::{resolve_db_path, set_db_path};
use log::warn;
use tasklist_core::db::open_db;
use tasklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, is_blank_title,
    ping as ping_inner, SqliteTaskRepository, StoreError, Task, TaskId, TaskStore,
};

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the database file used by every later call in this process.
///
/// Must be called before the first store call; returns an error message
/// when a different path is already in use or `path` is blank.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(path: String) -> String {
    match set_db_path(path.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One row of the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Stable task ID in string form.
    pub task_id: String,
    pub title: String,
}

/// Response envelope for the full list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// `false` means the list is unknown; show a retry affordance.
    pub ok: bool,
    pub items: Vec<TaskItem>,
    /// Stable machine-readable error code, empty on success.
    pub error_code: String,
    pub message: String,
}

/// Response envelope for single-task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    pub ok: bool,
    /// Affected task on success.
    pub item: Option<TaskItem>,
    pub error_code: String,
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, item: Option<TaskItem>) -> Self {
        Self {
            ok: true,
            item,
            error_code: String::new(),
            message: message.into(),
        }
    }

    fn failure(error_code: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item: None,
            error_code: error_code.to_string(),
            message: message.into(),
        }
    }
}

/// Fetches every task in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list_fetch_all() -> TaskListResponse {
    match with_task_store(|store| store.fetch_all()) {
        Ok(tasks) => {
            let items = tasks.into_iter().map(to_task_item).collect::<Vec<_>>();
            let message = format!("Loaded {} task(s).", items.len());
            TaskListResponse {
                ok: true,
                items,
                error_code: String::new(),
                message,
            }
        }
        Err(failure) => TaskListResponse {
            ok: false,
            items: Vec::new(),
            error_code: failure.code.to_string(),
            message: format!("task_list_fetch_all failed: {}", failure.message),
        },
    }
}

/// Creates a task from the entry screen's text.
///
/// Blank titles are rejected here since this is the boundary nearest the
/// user; the store itself accepts any title.
#[flutter_rust_bridge::frb(sync)]
pub fn task_create(title: String) -> TaskActionResponse {
    if is_blank_title(&title) {
        return TaskActionResponse::failure("empty_title", "Task title must not be empty.");
    }
    let title = title.trim().to_string();
    match with_task_store(|store| store.create(title)) {
        Ok(task) => TaskActionResponse::success("Task created.", Some(to_task_item(task))),
        Err(failure) => TaskActionResponse::failure(
            failure.code,
            format!("task_create failed: {}", failure.message),
        ),
    }
}

/// Renames an existing task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update(task_id: String, title: String) -> TaskActionResponse {
    if is_blank_title(&title) {
        return TaskActionResponse::failure("empty_title", "Task title must not be empty.");
    }
    let id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let title = title.trim().to_string();
    match with_task_store(|store| store.update(id, title)) {
        Ok(task) => TaskActionResponse::success("Task updated.", Some(to_task_item(task))),
        Err(failure) => TaskActionResponse::failure(
            failure.code,
            format!("task_update failed: {}", failure.message),
        ),
    }
}

/// Deletes a task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(task_id: String) -> TaskActionResponse {
    let id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_task_store(|store| store.delete(id)) {
        Ok(()) => TaskActionResponse::success("Task deleted.", None),
        Err(failure) => TaskActionResponse::failure(
            failure.code,
            format!("task_delete failed: {}", failure.message),
        ),
    }
}

struct CallFailure {
    code: &'static str,
    message: String,
}

impl From<StoreError> for CallFailure {
    fn from(value: StoreError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}

fn with_task_store<T>(
    f: impl FnOnce(&TaskStore<SqliteTaskRepository<'_>>) -> Result<T, StoreError>,
) -> Result<T, CallFailure> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        warn!("event=ffi_store_open module=ffi status=error error={err}");
        CallFailure {
            code: "db_open_failed",
            message: err.to_string(),
        }
    })?;
    let repo = SqliteTaskRepository::try_new(&conn).map_err(|err| CallFailure {
        code: "db_open_failed",
        message: err.to_string(),
    })?;
    let store = TaskStore::new(repo);
    Ok(f(&store)?)
}

fn parse_task_id(raw: &str) -> Result<TaskId, TaskActionResponse> {
    uuid::Uuid::parse_str(raw.trim()).map_err(|_| {
        TaskActionResponse::failure("invalid_task_id", format!("invalid task id `{raw}`"))
    })
}

fn to_task_item(task: Task) -> TaskItem {
    TaskItem {
        task_id: task.id.to_string(),
        title: task.title,
    }
}

mod db_path {
    use std::path::PathBuf;
    use std::sync::OnceLock;
    use tasklist_core::db::DEFAULT_DB_FILE_NAME;

    static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

    pub(super) fn set_db_path(raw: &str) -> Result<(), String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("db path cannot be empty".to_string());
        }
        let requested = PathBuf::from(trimmed);
        let active = DB_PATH.get_or_init(|| requested.clone());
        if *active != requested {
            return Err(format!(
                "db path already set to `{}`; refusing to switch to `{}`",
                active.display(),
                requested.display()
            ));
        }
        Ok(())
    }

    pub(super) fn resolve_db_path() -> PathBuf {
        DB_PATH
            .get_or_init(|| {
                if let Ok(raw) = std::env::var("TASKLIST_DB_PATH") {
                    let trimmed = raw.trim();
                    if !trimmed.is_empty() {
                        return PathBuf::from(trimmed);
                    }
                }
                std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        configure_db_path, core_version, init_logging, ping, task_create, task_delete,
        task_list_fetch_all, task_update,
    };
    use std::path::PathBuf;
    use std::sync::OnceLock;

    static TEST_DB_DIR: OnceLock<tempfile::TempDir> = OnceLock::new();

    fn use_test_db() {
        let dir = TEST_DB_DIR.get_or_init(|| tempfile::tempdir().expect("temp dir"));
        let path: PathBuf = dir.path().join("TaskList.sqlite3");
        let error = configure_db_path(path.to_string_lossy().into_owned());
        assert!(error.is_empty(), "{error}");
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn configure_db_path_rejects_blank_and_switching() {
        use_test_db();
        assert!(!configure_db_path("  ".to_string()).is_empty());
        assert!(!configure_db_path("/elsewhere/TaskList.sqlite3".to_string()).is_empty());
    }

    #[test]
    fn create_update_delete_round_trip_through_envelopes() {
        use_test_db();

        let created = task_create("  ffi round trip ".to_string());
        assert!(created.ok, "{}", created.message);
        let item = created.item.expect("create should return the task");
        assert_eq!(item.title, "ffi round trip");

        let listed = task_list_fetch_all();
        assert!(listed.ok, "{}", listed.message);
        assert!(listed.items.contains(&item));

        let updated = task_update(item.task_id.clone(), "ffi renamed".to_string());
        assert!(updated.ok, "{}", updated.message);
        assert_eq!(updated.item.map(|task| task.title).as_deref(), Some("ffi renamed"));

        let deleted = task_delete(item.task_id.clone());
        assert!(deleted.ok, "{}", deleted.message);

        let again = task_delete(item.task_id);
        assert!(!again.ok);
        assert_eq!(again.error_code, "task_not_found");
    }

    #[test]
    fn blank_title_and_bad_id_are_rejected() {
        use_test_db();

        let blank = task_create("   ".to_string());
        assert!(!blank.ok);
        assert_eq!(blank.error_code, "empty_title");

        let bad_id = task_update("not-a-uuid".to_string(), "x".to_string());
        assert!(!bad_id.ok);
        assert_eq!(bad_id.error_code, "invalid_task_id");
    }
}
