use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

use crate::category::Category;
use crate::profile::{Identity, Profile, QuotaCounts};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no remaining {0} quota")]
    LimitReached(Category),
    #[error("request was not authorized")]
    Unauthorized,
    #[error("no profile found for user {0}")]
    NotFound(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Backend that owns the authoritative per-user daily counters.
///
/// `decrement` must be atomic on the store side: two concurrent calls for
/// the same user and category can never both consume the last unit.
#[async_trait]
pub trait QuotaStore: Send + Sync {
    async fn decrement(&self, identity: &Identity, category: Category) -> Result<(), StoreError>;

    async fn fetch_profile(&self, identity: &Identity) -> Result<Profile, StoreError>;
}

/// Process-local store used for dry runs and tests.
#[derive(Default)]
pub struct InMemoryStore {
    profiles: Mutex<HashMap<String, Profile>>,
    decrement_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    fail_decrement: Mutex<Option<StoreError>>,
    fail_fetch: Mutex<Option<StoreError>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with one user already holding the given counts
    pub fn with_user(user_id: impl Into<String>, counts: QuotaCounts) -> Self {
        let store = Self::new();
        store.set_profile(user_id, Profile::new(counts));
        store
    }

    pub fn set_profile(&self, user_id: impl Into<String>, profile: Profile) {
        self.lock_profiles().insert(user_id.into(), profile);
    }

    pub fn set_count(&self, user_id: &str, category: Category, value: u32) {
        let mut profiles = self.lock_profiles();
        let profile = profiles.entry(user_id.to_string()).or_default();
        profile.counts.set(category, value);
    }

    /// Make every following `decrement` fail with `error` until cleared
    pub fn fail_decrements_with(&self, error: Option<StoreError>) {
        *lock(&self.fail_decrement) = error;
    }

    /// Make every following `fetch_profile` fail with `error` until cleared
    pub fn fail_fetches_with(&self, error: Option<StoreError>) {
        *lock(&self.fail_fetch) = error;
    }

    pub fn decrement_calls(&self) -> usize {
        self.decrement_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn count(&self, user_id: &str, category: Category) -> Option<u32> {
        self.lock_profiles()
            .get(user_id)
            .map(|p| p.remaining(category))
    }

    fn lock_profiles(&self) -> std::sync::MutexGuard<'_, HashMap<String, Profile>> {
        lock(&self.profiles)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl QuotaStore for InMemoryStore {
    async fn decrement(&self, identity: &Identity, category: Category) -> Result<(), StoreError> {
        self.decrement_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = lock(&self.fail_decrement).clone() {
            return Err(err);
        }

        // Check and decrement happen under one lock.
        let mut profiles = self.lock_profiles();
        let profile = profiles
            .get_mut(&identity.user_id)
            .ok_or_else(|| StoreError::NotFound(identity.user_id.clone()))?;
        let remaining = profile.remaining(category);
        if remaining == 0 {
            return Err(StoreError::LimitReached(category));
        }
        profile.counts.set(category, remaining - 1);
        debug!(
            "In-memory decrement for {} ({}): {} left",
            identity.user_id,
            category,
            remaining - 1
        );
        Ok(())
    }

    async fn fetch_profile(&self, identity: &Identity) -> Result<Profile, StoreError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = lock(&self.fail_fetch).clone() {
            return Err(err);
        }
        self.lock_profiles()
            .get(&identity.user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(identity.user_id.clone()))
    }
}
