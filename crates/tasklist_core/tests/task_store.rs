use rusqlite::Connection;
use std::collections::HashSet;
use tasklist_core::db::migrations::latest_version;
use tasklist_core::db::open_db_in_memory;
use tasklist_core::{RepoError, SqliteTaskRepository, StoreError, Task, TaskRepository, TaskStore};
use uuid::Uuid;

fn store(conn: &Connection) -> TaskStore<SqliteTaskRepository<'_>> {
    TaskStore::new(SqliteTaskRepository::try_new(conn).unwrap())
}

#[test]
fn create_then_fetch_contains_exactly_one_new_record() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    store.create("existing").unwrap();

    let created = store.create("Buy milk").unwrap();
    let tasks = store.fetch_all().unwrap();

    assert_eq!(tasks.len(), 2);
    let matching: Vec<_> = tasks.iter().filter(|task| task.id == created.id).collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].title, "Buy milk");
}

#[test]
fn create_accepts_empty_title() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);

    let created = store.create("").unwrap();
    assert_eq!(store.get(created.id).unwrap(), Some(created));
}

#[test]
fn fetch_all_preserves_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);

    for title in ["zeta", "alpha", "mid"] {
        store.create(title).unwrap();
    }

    let titles: Vec<_> = store
        .fetch_all()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn update_changes_only_target_title() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let first = store.create("first").unwrap();
    let second = store.create("second").unwrap();

    let updated = store.update(first.id, "renamed").unwrap();
    assert_eq!(updated.id, first.id);
    assert_eq!(updated.title, "renamed");

    let tasks = store.fetch_all().unwrap();
    assert_eq!(tasks, vec![updated, second]);
}

#[test]
fn delete_removes_only_target() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let first = store.create("first").unwrap();
    let second = store.create("second").unwrap();
    let third = store.create("third").unwrap();

    store.delete(second.id).unwrap();

    let tasks = store.fetch_all().unwrap();
    assert_eq!(tasks, vec![first, third]);
    assert_eq!(store.get(second.id).unwrap(), None);
}

#[test]
fn duplicate_titles_get_distinct_ids() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);

    let a1 = store.create("A").unwrap();
    let a2 = store.create("A").unwrap();
    store.create("B").unwrap();

    let ids: HashSet<_> = store
        .fetch_all()
        .unwrap()
        .into_iter()
        .map(|task| task.id)
        .collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.contains(&a1.id) && ids.contains(&a2.id));
}

#[test]
fn update_and_delete_unknown_id_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let kept = store.create("kept").unwrap();
    let missing = Uuid::new_v4();

    let update_err = store.update(missing, "ghost").unwrap_err();
    assert!(matches!(update_err, StoreError::NotFound(id) if id == missing));

    let delete_err = store.delete(missing).unwrap_err();
    assert!(matches!(delete_err, StoreError::NotFound(id) if id == missing));

    assert_eq!(store.fetch_all().unwrap(), vec![kept]);
}

#[test]
fn corrupted_row_is_a_read_error_not_an_empty_list() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    store.create("fine").unwrap();
    conn.execute(
        "INSERT INTO tasks (id, title) VALUES ('not-a-uuid', 'broken');",
        [],
    )
    .unwrap();

    let err = store.fetch_all().unwrap_err();
    assert!(matches!(err, StoreError::Read(RepoError::InvalidData(_))));
    assert_eq!(err.code(), "storage_read_failed");
}

#[test]
fn missing_table_after_open_is_a_read_error() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    conn.execute_batch("DROP TABLE tasks;").unwrap();

    assert!(matches!(store.fetch_all(), Err(StoreError::Read(RepoError::Db(_)))));
}

#[test]
fn write_failure_is_recoverable() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    conn.execute_batch(
        "CREATE TRIGGER reject_inserts BEFORE INSERT ON tasks
         BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
    )
    .unwrap();

    let err = store.create("won't stick").unwrap_err();
    assert!(matches!(err, StoreError::Write(_)));
    assert!(store.fetch_all().unwrap().is_empty());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteTaskRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_tasks_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteTaskRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("tasks"))
    ));
}

#[test]
fn repository_rejects_tasks_table_missing_seq_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE tasks (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteTaskRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "tasks",
            column: "seq"
        })
    ));
}

#[test]
fn repository_rejects_nil_id_on_create() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let task = Task {
        id: Uuid::nil(),
        title: "nil".to_string(),
    };

    assert!(matches!(repo.create_task(&task), Err(RepoError::Validation(_))));
}
