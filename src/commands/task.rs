//! Daily routine and weekly planner commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::error::Error;

use super::{parse_date_or_today, progress_bar, resolve, short_id, OutputFormat};
use crate::app::{today, App};
use zenith_core::state::ops;
use zenith_core::views::{daily_task_progress, tasks_for_day, weekly_tasks};
use zenith_core::{AppState, Priority, Task};

const WEEKDAYS: [&str; 7] = [
    "Domingo", "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado",
];

#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub command: TaskSubcommand,
}

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// Add a task
    Add {
        /// Task title
        title: String,

        /// Time of day (HH:MM)
        #[arg(long, short, default_value = "09:00")]
        time: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Priority (low, medium, high)
        #[arg(long, short, default_value = "medium")]
        priority: Priority,
    },

    /// List tasks for a day
    List {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Mark a task done, or not done
    Toggle {
        /// Task id (or unique prefix) or title
        task: String,
    },

    /// Delete a task
    Delete {
        /// Task id (or unique prefix) or title
        task: String,
    },

    /// Show tasks grouped by weekday
    Week {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show today's completion percentage
    Progress,
}

impl TaskCommand {
    pub fn run(&self, app: &App) -> Result<(), Box<dyn Error>> {
        match &self.command {
            TaskSubcommand::Add {
                title,
                time,
                date,
                priority,
            } => {
                let date = parse_date_or_today(date.as_deref())?;
                let state = app.try_apply(|s| ops::add_task(s, title, time, date, *priority))?;
                if let Some(task) = state.tasks.first() {
                    println!("Added task: {}", format_task(task));
                }
                Ok(())
            }

            TaskSubcommand::List { date, format } => {
                let date = parse_date_or_today(date.as_deref())?;
                let state = app.state();
                let tasks = tasks_for_day(&state.tasks, date);

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&tasks)?);
                    }
                    OutputFormat::Text => {
                        println!("Tasks for {}", format_day(date));
                        println!("{}", "=".repeat(44));
                        if tasks.is_empty() {
                            println!("No tasks.");
                        }
                        for task in tasks {
                            println!("{}", format_task(task));
                        }
                    }
                }
                Ok(())
            }

            TaskSubcommand::Toggle { task } => {
                let id = find_task(&app.state(), task)?;
                let state = app.try_apply(|s| ops::toggle_task(s, &id))?;
                if let Some(task) = state.tasks.iter().find(|t| t.id == id) {
                    println!("{}", format_task(task));
                }
                Ok(())
            }

            TaskSubcommand::Delete { task } => {
                let id = find_task(&app.state(), task)?;
                app.try_apply(|s| ops::delete_task(s, &id))?;
                println!("Task deleted.");
                Ok(())
            }

            TaskSubcommand::Week { format } => {
                let state = app.state();
                let week = weekly_tasks(&state.tasks);

                match format {
                    OutputFormat::Json => {
                        let output: Vec<_> = week
                            .iter()
                            .enumerate()
                            .map(|(day, tasks)| {
                                serde_json::json!({ "day": day, "name": WEEKDAYS[day], "tasks": tasks })
                            })
                            .collect();
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Text => {
                        for (day, tasks) in week.iter().enumerate() {
                            println!("{} ({})", WEEKDAYS[day], tasks.len());
                            for task in tasks {
                                println!("  {} {}", task.date, format_task(task));
                            }
                        }
                    }
                }
                Ok(())
            }

            TaskSubcommand::Progress => {
                let state = app.state();
                let percent = daily_task_progress(&state.tasks, today());
                println!("{} {}%", progress_bar(percent as f64, 20), percent);
                Ok(())
            }
        }
    }
}

fn find_task(state: &AppState, key: &str) -> Result<String, String> {
    resolve(
        &state.tasks,
        key,
        "Task",
        |t| t.id.as_str(),
        |t| t.title.as_str(),
    )
    .map(|t| t.id.clone())
}

fn format_day(date: NaiveDate) -> String {
    let weekday = zenith_core::models::weekday_index(date) as usize;
    format!("{}, {}", WEEKDAYS[weekday], date.format("%d/%m/%Y"))
}

fn format_task(task: &Task) -> String {
    let check = if task.completed { "[x]" } else { "[ ]" };
    format!(
        "{} {} {:<30} {:<6} ({})",
        check,
        task.time,
        task.title,
        task.priority,
        short_id(&task.id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_day() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap();
        assert_eq!(format_day(date), "Domingo, 05/05/2024");
    }

    #[test]
    fn test_format_task() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let mut task = Task::new("0123456789", "Treino", "07:30", date, Priority::High);
        task.completed = true;
        let line = format_task(&task);
        assert!(line.starts_with("[x] 07:30 Treino"));
        assert!(line.ends_with("(01234567)"));
    }

    #[test]
    fn test_find_task_by_title() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let mut state = AppState::default();
        state
            .tasks
            .push(Task::new("t-1", "Ler livro", "20:00", date, Priority::Low));
        assert_eq!(find_task(&state, "ler livro").unwrap(), "t-1");
        assert!(find_task(&state, "Correr").is_err());
    }
}
