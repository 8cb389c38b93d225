//! Profile and appearance settings.

use clap::{Args, Subcommand};
use std::error::Error;

use super::OutputFormat;
use crate::app::App;
use zenith_core::state::ops;
use zenith_core::Theme;

#[derive(Args)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub command: SettingsSubcommand,
}

#[derive(Subcommand)]
pub enum SettingsSubcommand {
    /// Show profile and appearance settings
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Set the theme (light, dark); toggles when omitted
    Theme { theme: Option<Theme> },

    /// Set the display name
    Name { name: String },

    /// Set the daily water goal in milliliters
    Goal { ml: u32 },

    /// Set the avatar image reference; clears it when omitted
    Avatar { reference: Option<String> },
}

impl SettingsCommand {
    pub fn run(&self, app: &App) -> Result<(), Box<dyn Error>> {
        match &self.command {
            SettingsSubcommand::Show { format } => {
                let state = app.state();
                match format {
                    OutputFormat::Json => {
                        let output = serde_json::json!({
                            "user": state.user,
                            "theme": state.theme,
                        });
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Text => {
                        println!("Name:        {}", state.user.name);
                        println!("Email:       {}", app.session().email);
                        println!("Water goal:  {} ml", state.user.water_goal);
                        println!(
                            "Avatar:      {}",
                            state.user.avatar_url.as_deref().unwrap_or("(none)")
                        );
                        println!("Theme:       {}", state.theme);
                    }
                }
                Ok(())
            }

            SettingsSubcommand::Theme { theme } => {
                let state = match theme {
                    Some(theme) => app.apply(|s| ops::set_theme(s, *theme)),
                    None => app.apply(ops::toggle_theme),
                };
                println!("Theme: {}", state.theme);
                Ok(())
            }

            SettingsSubcommand::Name { name } => {
                let state = app.try_apply(|s| ops::set_user_name(s, name))?;
                println!("Name: {}", state.user.name);
                Ok(())
            }

            SettingsSubcommand::Goal { ml } => {
                app.try_apply(|s| ops::set_water_goal(s, *ml))?;
                println!("Water goal: {} ml", ml);
                Ok(())
            }

            SettingsSubcommand::Avatar { reference } => {
                let state = app.apply(|s| ops::set_avatar(s, reference.clone()));
                match &state.user.avatar_url {
                    Some(url) => println!("Avatar: {}", url),
                    None => println!("Avatar cleared."),
                }
                Ok(())
            }
        }
    }
}
