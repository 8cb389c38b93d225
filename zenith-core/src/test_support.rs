//! In-memory collaborators for unit tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::models::AppState;
use crate::quote::{GenerationError, GenerationOptions, TextGenerator};
use crate::sync::{LocalStore, LocalStoreError, ProfileError, ProfileStore, SessionProvider};

#[derive(Default)]
pub struct MemoryProfileStore {
    rows: Mutex<HashMap<String, Value>>,
    upserts: Mutex<Vec<(String, AppState)>>,
    creates: Mutex<Vec<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    read_delay: Mutex<Option<Duration>>,
}

impl MemoryProfileStore {
    pub fn with_row(user_id: &str, document: Value) -> Self {
        let store = Self::default();
        store.rows.lock().unwrap().insert(user_id.to_string(), document);
        store
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn delay_reads(&self, delay: Duration) {
        *self.read_delay.lock().unwrap() = Some(delay);
    }

    pub fn upserts(&self) -> Vec<(String, AppState)> {
        self.upserts.lock().unwrap().clone()
    }

    pub fn creates(&self) -> Vec<String> {
        self.creates.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Value>, ProfileError> {
        let delay = *self.read_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ProfileError::Unavailable("offline".into()));
        }
        Ok(self.rows.lock().unwrap().get(user_id).cloned())
    }

    async fn create_profile(&self, user_id: &str, document: &AppState) -> Result<(), ProfileError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ProfileError::Unavailable("offline".into()));
        }
        self.creates.lock().unwrap().push(user_id.to_string());
        self.rows.lock().unwrap().insert(
            user_id.to_string(),
            serde_json::to_value(document).map_err(|e| ProfileError::Malformed(e.to_string()))?,
        );
        Ok(())
    }

    async fn upsert_profile(
        &self,
        user_id: &str,
        document: &AppState,
        _updated_at: DateTime<Utc>,
    ) -> Result<(), ProfileError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ProfileError::Rejected {
                status: 503,
                message: "unavailable".into(),
            });
        }
        self.upserts
            .lock()
            .unwrap()
            .push((user_id.to_string(), document.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySessions {
    user_id: Mutex<Option<String>>,
}

impl MemorySessions {
    pub fn signed_in(user_id: &str) -> Self {
        Self {
            user_id: Mutex::new(Some(user_id.to_string())),
        }
    }

    pub fn set(&self, user_id: Option<&str>) {
        *self.user_id.lock().unwrap() = user_id.map(str::to_string);
    }
}

#[async_trait]
impl SessionProvider for MemorySessions {
    async fn current_user_id(&self) -> Option<String> {
        self.user_id.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct MemoryLocalStore {
    contents: Mutex<Option<String>>,
    writes: AtomicUsize,
}

impl MemoryLocalStore {
    pub fn with_contents(contents: &str) -> Self {
        Self {
            contents: Mutex::new(Some(contents.to_string())),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl LocalStore for MemoryLocalStore {
    fn read(&self) -> Result<Option<String>, LocalStoreError> {
        Ok(self.contents())
    }

    fn write(&self, contents: &str) -> Result<(), LocalStoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.contents.lock().unwrap() = Some(contents.to_string());
        Ok(())
    }
}

pub enum Reply {
    Text(String),
    Fail,
    Hang,
}

pub struct FakeGenerator {
    reply: Reply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    options: Mutex<Option<GenerationOptions>>,
}

impl FakeGenerator {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            options: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_options(&self) -> Option<GenerationOptions> {
        *self.options.lock().unwrap()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        *self.options.lock().unwrap() = Some(options);
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail => Err(GenerationError::Request("quota exceeded".into())),
            Reply::Hang => std::future::pending().await,
        }
    }
}
