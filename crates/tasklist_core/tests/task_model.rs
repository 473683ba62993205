use tasklist_core::{is_blank_title, Task, TaskValidationError};
use uuid::Uuid;

#[test]
fn task_new_generates_distinct_ids() {
    let first = Task::new("A");
    let second = Task::new("A");

    assert!(!first.id.is_nil());
    assert_ne!(first.id, second.id);
    assert_eq!(first.title, second.title);
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Task::with_id(Uuid::nil(), "invalid").unwrap_err();
    assert_eq!(err, TaskValidationError::NilId);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let task = Task::with_id(id, "Buy milk").unwrap();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["title"], "Buy milk");

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn blank_title_check_ignores_surrounding_whitespace() {
    assert!(is_blank_title(""));
    assert!(is_blank_title(" \t\n"));
    assert!(!is_blank_title(" x "));
}
