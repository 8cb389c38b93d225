use chrono::NaiveDate;

use crate::models::{Task, DAYS_IN_WEEK};

/// Percentage (rounded) of today's tasks that are complete; 0 with no tasks.
pub fn daily_task_progress(tasks: &[Task], today: NaiveDate) -> u8 {
    let (done, total) = tasks
        .iter()
        .filter(|t| t.date == today)
        .fold((0usize, 0usize), |(done, total), t| {
            (done + usize::from(t.completed), total + 1)
        });
    if total == 0 {
        0
    } else {
        (done as f64 / total as f64 * 100.0).round() as u8
    }
}

/// Tasks scheduled on `date`, ordered by time of day.
pub fn tasks_for_day(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    let mut day: Vec<&Task> = tasks.iter().filter(|t| t.date == date).collect();
    day.sort_by(|a, b| a.time.cmp(&b.time));
    day
}

/// Tasks grouped by weekday index (0 = Sunday), regardless of week.
pub fn weekly_tasks(tasks: &[Task]) -> [Vec<&Task>; DAYS_IN_WEEK] {
    let mut week: [Vec<&Task>; DAYS_IN_WEEK] = Default::default();
    for task in tasks {
        if let Some(slot) = week.get_mut(task.day as usize) {
            slot.push(task);
        }
    }
    week
}
