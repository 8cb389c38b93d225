use chrono::NaiveDate;

use super::{not_found, required, time_of_day};
use crate::models::{generate_id, AppState, Priority, Task};
use crate::state::ValidationError;

/// Adds a task at the front of the list. The weekday is derived from `date`.
pub fn add_task(
    state: &AppState,
    title: &str,
    time: &str,
    date: NaiveDate,
    priority: Priority,
) -> Result<AppState, ValidationError> {
    let title = required(title, "Task title")?;
    let time = time_of_day(time)?;
    let mut next = state.clone();
    next.tasks
        .insert(0, Task::new(generate_id(None), title, time, date, priority));
    Ok(next)
}

pub fn toggle_task(state: &AppState, id: &str) -> Result<AppState, ValidationError> {
    let mut next = state.clone();
    let task = next
        .tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| not_found("Task", id))?;
    task.completed = !task.completed;
    Ok(next)
}

pub fn delete_task(state: &AppState, id: &str) -> Result<AppState, ValidationError> {
    if !state.tasks.iter().any(|t| t.id == id) {
        return Err(not_found("Task", id));
    }
    let mut next = state.clone();
    next.tasks.retain(|t| t.id != id);
    Ok(next)
}
