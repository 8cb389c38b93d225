//! Supabase client: GoTrue password auth and the PostgREST `profiles` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::session::{name_from_email, Session};
use zenith_core::{AppState, ProfileError, ProfileStore};

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

/// Result of a signup: a live session, or a pending email confirmation.
#[derive(Debug)]
pub enum SignUpOutcome {
    SignedIn(Session),
    ConfirmationRequired { email: String },
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
    #[serde(default)]
    user_metadata: Value,
}

/// GoTrue answers either with a session (user nested) or, when email
/// confirmation is pending, with the bare user.
#[derive(Debug, Deserialize)]
struct AuthPayload {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<AuthUser>,
    id: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    data: Value,
}

impl SupabaseClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            access_token: None,
        }
    }

    /// Authorizes table requests as the signed-in user.
    pub fn with_access_token(mut self, access_token: &str) -> Self {
        self.access_token = Some(access_token.to_string());
        self
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn profiles_url(&self) -> String {
        format!("{}/rest/v1/profiles", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", bearer))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = normalize_credentials(email, password)?;
        let response = self
            .authorized(self.client.post(self.auth_url("token?grant_type=password")))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::HttpError(e.to_string()))?;

        let payload = read_auth_payload(response).await?;
        session_from_payload(payload, &email)?.ok_or(AuthError::MissingSession)
    }

    /// Registers a new account. The display name is derived from the email.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        let email = normalize_credentials(email, password)?;
        let full_name = name_from_email(&email);
        let response = self
            .authorized(self.client.post(self.auth_url("signup")))
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name },
            }))
            .send()
            .await
            .map_err(|e| AuthError::HttpError(e.to_string()))?;

        let payload = read_auth_payload(response).await?;
        Ok(match session_from_payload(payload, &email)? {
            Some(session) => SignUpOutcome::SignedIn(session),
            None => SignUpOutcome::ConfirmationRequired { email },
        })
    }

    pub async fn refresh(&self, session: &Session) -> Result<Session, AuthError> {
        let refresh_token = session
            .refresh_token
            .as_deref()
            .ok_or(AuthError::SessionExpired)?;
        let response = self
            .authorized(self.client.post(self.auth_url("token?grant_type=refresh_token")))
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| AuthError::HttpError(e.to_string()))?;

        let payload = read_auth_payload(response).await?;
        session_from_payload(payload, &session.email)?.ok_or(AuthError::SessionExpired)
    }

    /// Revokes the session server-side.
    pub async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.auth_url("logout"))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", session.access_token))
            .send()
            .await
            .map_err(|e| AuthError::HttpError(e.to_string()))?;

        let status = response.status();
        if status.is_success() || status.as_u16() == 401 {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(AuthError::ServerError {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Value>, ProfileError> {
        let request = self
            .client
            .get(self.profiles_url())
            .query(&[("id", format!("eq.{}", user_id)), ("select", "data".to_string())]);
        let response = send(self.authorized(request)).await?;
        let body = response
            .text()
            .await
            .map_err(|e| ProfileError::Unavailable(e.to_string()))?;

        let rows: Vec<ProfileRow> =
            serde_json::from_str(&body).map_err(|e| ProfileError::Malformed(e.to_string()))?;
        Ok(rows.into_iter().next().map(|row| row.data))
    }

    async fn create_profile(&self, user_id: &str, document: &AppState) -> Result<(), ProfileError> {
        let request = self
            .client
            .post(self.profiles_url())
            .header("Prefer", "return=minimal")
            .json(&json!([{ "id": user_id, "data": document }]));
        send(self.authorized(request)).await?;
        Ok(())
    }

    async fn upsert_profile(
        &self,
        user_id: &str,
        document: &AppState,
        updated_at: DateTime<Utc>,
    ) -> Result<(), ProfileError> {
        let request = self
            .client
            .post(self.profiles_url())
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&json!({
                "id": user_id,
                "data": document,
                "updated_at": updated_at.to_rfc3339(),
            }));
        send(self.authorized(request)).await?;
        Ok(())
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ProfileError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProfileError::Unavailable(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ProfileError::Rejected {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

fn normalize_credentials(email: &str, password: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || password.trim().is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(email)
}

async fn read_auth_payload(response: Response) -> Result<AuthPayload, AuthError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AuthError::HttpError(e.to_string()))?;

    if !status.is_success() {
        return Err(AuthError::ServerError {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    serde_json::from_str(&body).map_err(|e| AuthError::HttpError(format!("invalid response: {}", e)))
}

/// Builds a session from an auth payload. `None` when the payload carries no
/// access token (signup awaiting confirmation).
fn session_from_payload(payload: AuthPayload, email: &str) -> Result<Option<Session>, AuthError> {
    let Some(access_token) = payload.access_token else {
        return Ok(None);
    };
    let user = payload.user.ok_or(AuthError::MissingSession)?;

    let expires_at = payload
        .expires_at
        .or_else(|| payload.expires_in.map(|secs| Utc::now().timestamp() + secs));
    let display_name = user
        .user_metadata
        .get("full_name")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Some(Session {
        user_id: user.id,
        email: user.email.or(payload.email).unwrap_or_else(|| email.to_string()),
        display_name,
        access_token,
        refresh_token: payload.refresh_token,
        expires_at,
    }))
}

/// Pulls a human-readable message out of a GoTrue or PostgREST error body.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}

/// Errors that can occur during authentication
#[derive(Debug)]
pub enum AuthError {
    /// Email or password left blank
    MissingCredentials,
    /// HTTP request error
    HttpError(String),
    /// Server returned an error
    ServerError { status: u16, message: String },
    /// Response carried no session
    MissingSession,
    /// The stored session can no longer be refreshed
    SessionExpired,
    /// Command requires a signed-in user
    NotLoggedIn,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingCredentials => write!(f, "Email and password are required"),
            AuthError::HttpError(e) => write!(f, "HTTP error: {}", e),
            AuthError::ServerError { status, message } => {
                write!(f, "Authentication failed ({}): {}", status, message)
            }
            AuthError::MissingSession => write!(f, "Server response did not include a session"),
            AuthError::SessionExpired => {
                write!(f, "Session expired. Run 'zenith login' to sign in again.")
            }
            AuthError::NotLoggedIn => {
                write!(f, "Not logged in. Run 'zenith login' or 'zenith signup' first.")
            }
        }
    }
}

impl std::error::Error for AuthError {}
