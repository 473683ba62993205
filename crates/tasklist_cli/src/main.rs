//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `tasklist_core` linkage without the mobile shell.
//! - Run one in-memory store round trip and print deterministic output.

use std::process::ExitCode;
use tasklist_core::db::open_db_in_memory;
use tasklist_core::{SqliteTaskRepository, TaskListController, TaskStore};

fn main() -> ExitCode {
    println!("tasklist_core ping={}", tasklist_core::ping());
    println!("tasklist_core version={}", tasklist_core::core_version());

    match round_trip() {
        Ok(rows) => {
            println!("tasklist_core round_trip=ok rows={rows}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("tasklist_core round_trip=error error={err}");
            ExitCode::FAILURE
        }
    }
}

fn round_trip() -> Result<usize, Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let repo = SqliteTaskRepository::try_new(&conn)?;
    let mut list = TaskListController::new(TaskStore::new(repo));
    list.load()?;
    list.add("smoke")?;
    list.edit(0, "smoke renamed")?;
    list.remove(0)?;
    list.reload()?;
    Ok(list.len())
}
