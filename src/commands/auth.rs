//! Account commands: login, signup, logout and whoami.

use clap::Args;
use std::error::Error;
use std::io::{self, Write};

use super::OutputFormat;
use crate::app::{supabase, App};
use crate::config::Config;
use crate::remote::SignUpOutcome;
use crate::session::SessionStore;
use zenith_core::{state::ops, LoadOutcome};

#[derive(Args)]
pub struct LoginCommand {
    /// Account email (prompted when omitted)
    email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, short)]
    password: Option<String>,
}

#[derive(Args)]
pub struct SignupCommand {
    /// Account email (prompted when omitted)
    email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, short)]
    password: Option<String>,
}

#[derive(Args)]
pub struct WhoamiCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl LoginCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn Error>> {
        let email = value_or_prompt(self.email.as_deref(), "Email: ")?;
        let password = value_or_prompt(self.password.as_deref(), "Password: ")?;

        let session = supabase(config).sign_in(&email, &password).await?;
        SessionStore::new(config.data_dir.value.clone()).save(&session)?;

        let app = App::with_session(config, session).await;
        let result = adopt_account_name(&app);
        println!(
            "Logged in as {} ({})",
            app.state().user.name,
            app.session().email
        );
        app.finish().await;
        result
    }
}

impl SignupCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn Error>> {
        let email = value_or_prompt(self.email.as_deref(), "Email: ")?;
        let password = value_or_prompt(self.password.as_deref(), "Password: ")?;

        match supabase(config).sign_up(&email, &password).await? {
            SignUpOutcome::SignedIn(session) => {
                SessionStore::new(config.data_dir.value.clone()).save(&session)?;
                let app = App::with_session(config, session).await;
                let result = adopt_account_name(&app);
                println!("Account created. Welcome, {}!", app.state().user.name);
                app.finish().await;
                result
            }
            SignUpOutcome::ConfirmationRequired { email } => {
                println!("Account created. Confirm the email sent to {},", email);
                println!("then run 'zenith login'.");
                Ok(())
            }
        }
    }
}

/// Revokes and forgets the stored session.
pub async fn logout(config: &Config) -> Result<(), Box<dyn Error>> {
    let sessions = SessionStore::new(config.data_dir.value.clone());
    let Some(session) = sessions.load()? else {
        println!("Already logged out.");
        return Ok(());
    };

    if let Err(e) = supabase(config).sign_out(&session).await {
        tracing::warn!("Server-side sign out failed: {}", e);
    }
    sessions.clear()?;
    println!("Logged out.");
    Ok(())
}

impl WhoamiCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn Error>> {
        let sessions = SessionStore::new(config.data_dir.value.clone());
        let session = sessions.load()?;

        match self.format {
            OutputFormat::Json => {
                let output = match &session {
                    Some(s) => serde_json::json!({
                        "logged_in": true,
                        "user_id": s.user_id,
                        "email": s.email,
                        "name": s.name(),
                        "expires_at": s.expires_at,
                    }),
                    None => serde_json::json!({ "logged_in": false }),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => match &session {
                Some(s) => {
                    println!("Logged in as {} <{}>", s.name(), s.email);
                    println!("  user id: {}", s.user_id);
                }
                None => println!("Not logged in. Run 'zenith login' to sign in."),
            },
        }
        Ok(())
    }
}

/// A freshly created profile takes its display name from the account.
fn adopt_account_name(app: &App) -> Result<(), Box<dyn Error>> {
    if app.outcome() == LoadOutcome::New {
        let name = app.session().name();
        if !name.is_empty() {
            app.try_apply(|s| ops::set_user_name(s, &name))?;
        }
    }
    Ok(())
}

fn value_or_prompt(value: Option<&str>, prompt: &str) -> io::Result<String> {
    if let Some(value) = value {
        return Ok(value.to_string());
    }
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
