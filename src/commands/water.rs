//! Hydration tracking commands.

use clap::{Args, Subcommand};
use std::error::Error;

use super::{progress_bar, resolve, OutputFormat};
use crate::app::{today, App};
use zenith_core::state::ops;
use zenith_core::views::hydration_stats;
use zenith_core::Reminder;

#[derive(Args)]
pub struct WaterCommand {
    #[command(subcommand)]
    pub command: WaterSubcommand,
}

#[derive(Subcommand)]
pub enum WaterSubcommand {
    /// Record water intake for today
    Add {
        /// Amount in milliliters
        ml: u32,
    },

    /// Zero today's intake
    Reset,

    /// Show today's progress and statistics
    Status {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Manage drink reminders
    Reminder {
        #[command(subcommand)]
        command: ReminderSubcommand,
    },
}

#[derive(Subcommand)]
pub enum ReminderSubcommand {
    /// List reminders
    List,

    /// Turn a reminder on or off
    Toggle {
        /// Reminder id or label
        reminder: String,
    },

    /// Add a reminder
    Add {
        /// Time of day (HH:MM)
        time: String,

        /// Label
        label: String,
    },

    /// Remove a reminder
    Remove {
        /// Reminder id or label
        reminder: String,
    },
}

impl WaterCommand {
    pub fn run(&self, app: &App) -> Result<(), Box<dyn Error>> {
        match &self.command {
            WaterSubcommand::Add { ml } => {
                let today = today();
                let state = app.try_apply(|s| ops::add_water(s, today, *ml))?;
                let stats = hydration_stats(&state.water_history, state.user.water_goal, today);
                println!(
                    "Added {} ml. Today: {} ml ({:.0}%)",
                    ml, stats.today_ml, stats.progress_percent
                );
                Ok(())
            }

            WaterSubcommand::Reset => {
                let today = today();
                app.apply(|s| ops::reset_today(s, today));
                println!("Today's intake reset.");
                Ok(())
            }

            WaterSubcommand::Status { format } => {
                let state = app.state();
                let goal = state.user.effective_water_goal();
                let stats = hydration_stats(&state.water_history, state.user.water_goal, today());

                match format {
                    OutputFormat::Json => {
                        let output = serde_json::json!({
                            "goal_ml": goal,
                            "stats": stats,
                        });
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Text => {
                        println!("Hydration");
                        println!("{}", "=".repeat(44));
                        println!(
                            "Today:    {} / {} ml {} {:.0}%",
                            stats.today_ml,
                            goal,
                            progress_bar(stats.progress_percent, 20),
                            stats.progress_percent
                        );
                        println!("Average:  {:.1} L/day", stats.average_liters);
                        println!("Streak:   {} days", stats.streak);
                        println!("Total:    {:.1} L", stats.total_liters);
                    }
                }
                Ok(())
            }

            WaterSubcommand::Reminder { command } => run_reminder(app, command),
        }
    }
}

fn run_reminder(app: &App, command: &ReminderSubcommand) -> Result<(), Box<dyn Error>> {
    match command {
        ReminderSubcommand::List => {
            let state = app.state();
            if state.water_reminders.is_empty() {
                println!("No reminders.");
            }
            for reminder in &state.water_reminders {
                println!("{}", format_reminder(reminder));
            }
            Ok(())
        }

        ReminderSubcommand::Toggle { reminder } => {
            let id = find_reminder(app, reminder)?;
            let state = app.try_apply(|s| ops::toggle_reminder(s, &id))?;
            if let Some(r) = state.water_reminders.iter().find(|r| r.id == id) {
                println!("{}", format_reminder(r));
            }
            Ok(())
        }

        ReminderSubcommand::Add { time, label } => {
            app.try_apply(|s| ops::add_reminder(s, time, label))?;
            println!("Reminder added: {} {}", time, label.trim());
            Ok(())
        }

        ReminderSubcommand::Remove { reminder } => {
            let id = find_reminder(app, reminder)?;
            app.try_apply(|s| ops::remove_reminder(s, &id))?;
            println!("Reminder removed.");
            Ok(())
        }
    }
}

fn find_reminder(app: &App, key: &str) -> Result<String, String> {
    let state = app.state();
    resolve(
        &state.water_reminders,
        key,
        "Reminder",
        |r| r.id.as_str(),
        |r| r.label.as_str(),
    )
    .map(|r| r.id.clone())
}

fn format_reminder(reminder: &Reminder) -> String {
    let check = if reminder.is_active { "[on] " } else { "[off]" };
    format!("{} {} {}  ({})", check, reminder.time, reminder.label, reminder.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reminder() {
        let reminder = Reminder {
            id: "r1".into(),
            time: "08:00".into(),
            label: "Ao acordar".into(),
            is_active: false,
        };
        assert_eq!(format_reminder(&reminder), "[off] 08:00 Ao acordar  (r1)");
    }
}
