//! Home screen: headline numbers and the quote of the day.

use clap::Args;
use std::error::Error;

use super::{progress_bar, OutputFormat};
use crate::app::{gemini, quote_day, today, App};
use crate::config::Config;
use crate::quote_store::FileQuoteStore;
use zenith_core::views::dashboard_summary;
use zenith_core::TextGenerator;

#[derive(Args)]
pub struct DashboardCommand {
    /// Skip the quote of the day
    #[arg(long)]
    no_quote: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl DashboardCommand {
    pub async fn run(&self, app: &App, config: &Config) -> Result<(), Box<dyn Error>> {
        let state = app.state();
        let today = today();
        let summary = dashboard_summary(&state, today);

        let quote = if self.no_quote {
            None
        } else {
            let store = FileQuoteStore::new(config.data_dir.value.clone());
            let mut cache = store.load();
            let client = gemini(config);
            let generator: Option<&dyn TextGenerator> = config
                .gemini_api_key
                .value
                .as_ref()
                .map(|_| &client as &dyn TextGenerator);
            let quote = cache.get_quote(generator, &state.user.name, quote_day()).await;
            if let Err(e) = store.save(&cache) {
                tracing::warn!("Failed to save quote cache: {}", e);
            }
            Some(quote)
        };

        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "date": today.to_string(),
                    "user": state.user.name,
                    "quote": quote,
                    "summary": summary,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                println!("Olá, {}!", state.user.name);
                if let Some(quote) = &quote {
                    println!("\n  \"{}\"\n", quote);
                }
                println!("{}", "=".repeat(44));
                println!(
                    "Tasks today:  {} {}%",
                    progress_bar(summary.task_progress as f64, 20),
                    summary.task_progress
                );
                println!(
                    "Water today:  {} / {} ml",
                    summary.water_today_ml,
                    state.user.effective_water_goal()
                );
                println!("Study:        {:.1} h", summary.study_hours);
                println!("Music:        {} sessions", summary.music_sessions);
            }
        }
        Ok(())
    }
}
