//! The signed-in session, persisted between CLI runs.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

use zenith_core::SessionProvider;

/// Seconds before expiry at which the access token is refreshed.
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    /// Name from the account metadata, if any
    #[serde(default)]
    pub display_name: Option<String>,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds) at which the access token expires
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl Session {
    pub fn needs_refresh(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at - REFRESH_MARGIN_SECS <= Utc::now().timestamp(),
            None => false,
        }
    }

    /// Display name, falling back to the email's local part.
    pub fn name(&self) -> String {
        self.display_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| name_from_email(&self.email))
    }
}

/// Derives a display name from an email address: the local part with its
/// first letter capitalized.
pub fn name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let mut chars = local.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `session.json` in the data directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    data_dir: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    /// Returns `Ok(None)` if nobody is signed in.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let path = self.path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::ReadError(path, e)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| SessionError::ParseError(path, e))
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let path = self.path();
        fs::create_dir_all(&self.data_dir).map_err(|e| SessionError::WriteError(path.clone(), e))?;
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| SessionError::ParseError(path.clone(), e))?;
        fs::write(&path, json).map_err(|e| SessionError::WriteError(path, e))
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::WriteError(path, e)),
        }
    }
}

#[async_trait]
impl SessionProvider for SessionStore {
    async fn current_user_id(&self) -> Option<String> {
        match self.load() {
            Ok(session) => session.map(|s| s.user_id),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session: {}", e);
                None
            }
        }
    }
}

#[derive(Debug)]
pub enum SessionError {
    ReadError(PathBuf, io::Error),
    WriteError(PathBuf, io::Error),
    ParseError(PathBuf, serde_json::Error),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::ReadError(path, e) => {
                write!(f, "Failed to read session '{}': {}", path.display(), e)
            }
            SessionError::WriteError(path, e) => {
                write!(f, "Failed to write session '{}': {}", path.display(), e)
            }
            SessionError::ParseError(path, e) => {
                write!(f, "Invalid session file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for SessionError {}
