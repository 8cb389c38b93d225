//! Music practice commands.

use clap::{Args, Subcommand};
use std::error::Error;

use super::{format_timestamp, short_id, OutputFormat};
use crate::app::{now_ms, App};
use zenith_core::state::ops;
use zenith_core::views::music_practice_total;
use zenith_core::AppState;

#[derive(Args)]
pub struct MusicCommand {
    #[command(subcommand)]
    pub command: MusicSubcommand,
}

#[derive(Subcommand)]
pub enum MusicSubcommand {
    /// Record a practice session
    Log {
        /// Instrument
        instrument: String,

        /// Minutes practiced
        minutes: u32,

        /// What was practiced
        #[arg(long, short, default_value = "")]
        notes: String,
    },

    /// List practice sessions with the total time
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a practice session
    Delete {
        /// Session id (or unique prefix)
        id: String,
    },

    /// Manage the instrument list
    Instrument {
        #[command(subcommand)]
        command: InstrumentSubcommand,
    },
}

#[derive(Subcommand)]
pub enum InstrumentSubcommand {
    /// List instruments
    List,

    /// Add an instrument
    Add { name: String },

    /// Remove an instrument
    Remove { name: String },
}

impl MusicCommand {
    pub fn run(&self, app: &App) -> Result<(), Box<dyn Error>> {
        match &self.command {
            MusicSubcommand::Log {
                instrument,
                minutes,
                notes,
            } => {
                let instrument = match_instrument(&app.state(), instrument);
                app.try_apply(|s| ops::add_music_session(s, &instrument, *minutes, notes, now_ms()))?;
                println!("Logged {} min of {}.", minutes, instrument);
                Ok(())
            }

            MusicSubcommand::List { format } => {
                let state = app.state();
                let total = music_practice_total(&state.music_sessions);

                match format {
                    OutputFormat::Json => {
                        let output = serde_json::json!({
                            "total": total,
                            "sessions": state.music_sessions,
                        });
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Text => {
                        println!("Practice time: {}", total);
                        println!("{}", "=".repeat(44));
                        if state.music_sessions.is_empty() {
                            println!("No sessions yet.");
                        }
                        for session in &state.music_sessions {
                            println!(
                                "{}  {:<8} {:<12} {:>4} min  {}",
                                format_timestamp(session.date),
                                short_id(&session.id),
                                session.instrument,
                                session.duration,
                                session.notes
                            );
                        }
                    }
                }
                Ok(())
            }

            MusicSubcommand::Delete { id } => {
                let id = find_session(&app.state(), id)?;
                app.try_apply(|s| ops::delete_music_session(s, &id))?;
                println!("Session deleted.");
                Ok(())
            }

            MusicSubcommand::Instrument { command } => match command {
                InstrumentSubcommand::List => {
                    for instrument in &app.state().music_instruments {
                        println!("{}", instrument);
                    }
                    Ok(())
                }
                InstrumentSubcommand::Add { name } => {
                    app.try_apply(|s| ops::add_instrument(s, name))?;
                    println!("Instrument added: {}", name.trim());
                    Ok(())
                }
                InstrumentSubcommand::Remove { name } => {
                    let name = match_instrument(&app.state(), name);
                    app.try_apply(|s| ops::delete_instrument(s, &name))?;
                    println!("Instrument removed: {}", name);
                    Ok(())
                }
            },
        }
    }
}

/// Uses the listed spelling of an instrument when the input matches one
/// case-insensitively.
fn match_instrument(state: &AppState, input: &str) -> String {
    let input = input.trim();
    state
        .music_instruments
        .iter()
        .find(|i| i.to_lowercase() == input.to_lowercase())
        .cloned()
        .unwrap_or_else(|| input.to_string())
}

fn find_session(state: &AppState, key: &str) -> Result<String, String> {
    let key = key.trim();
    let matches: Vec<&str> = state
        .music_sessions
        .iter()
        .map(|s| s.id.as_str())
        .filter(|id| id.starts_with(key))
        .collect();
    if matches.contains(&key) {
        return Ok(key.to_string());
    }
    match matches.as_slice() {
        [single] if !key.is_empty() => Ok(single.to_string()),
        [] => Err(format!("Music session '{}' not found", key)),
        _ => Err(format!("Music session '{}' is ambiguous; use a longer id", key)),
    }
}
