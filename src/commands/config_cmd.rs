use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

const DEFAULT_CONFIG: &str = r#"# zenith configuration

# Where the session, the offline copy of your data and the quote cache live
# data_dir: ~/.local/share/zenith

supabase:
  # url: https://<project>.supabase.co
  # key: <publishable key>

gemini:
  # api_key: <key>
  model: gemini-3-flash-preview

sync:
  # Quiet period before changes are written to the server
  debounce_ms: 2000
"#;

impl ConfigCommand {
    pub fn run(
        &self,
        config: &Config,
        cli_config_path: Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                cli_config_path
                                    .unwrap_or_else(Config::default_config_path)
                                    .display()
                            );
                        }
                        println!();

                        println!("data_dir: {}", config.data_dir.value.display());
                        println!("  source: {}", config.data_dir.source);
                        println!();

                        println!("supabase.url: {}", config.supabase_url.value);
                        println!("  source: {}", config.supabase_url.source);
                        println!("supabase.key: {}", mask(&config.supabase_key.value));
                        println!("  source: {}", config.supabase_key.source);
                        println!();

                        let api_key = config.gemini_api_key.value.as_deref().map(mask);
                        println!(
                            "gemini.api_key: {}",
                            api_key.as_deref().unwrap_or("(not set)")
                        );
                        println!("  source: {}", config.gemini_api_key.source);
                        println!("gemini.model: {}", config.gemini_model.value);
                        println!("  source: {}", config.gemini_model.source);
                        println!();

                        println!("sync.debounce_ms: {}", config.debounce_ms.value);
                        println!("  source: {}", config.debounce_ms.source);
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = cli_config_path.unwrap_or_else(Config::default_config_path);

                // Check if config already exists
                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'zenith config show' to view current configuration.");
                    return Ok(());
                }

                // Create parent directory
                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let mut file = fs::File::create(&config_path)?;
                file.write_all(DEFAULT_CONFIG.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to customize your settings.");
                Ok(())
            }
        }
    }
}

/// Mask a secret for display
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "****".to_string()
    }
}
