//! Quota gate: decides whether one generation may proceed and accounts for it.
//!
//! The local checks (signed in, cached count above zero) only save a round
//! trip. The store's atomic decrement is the enforcement point; its answer is
//! final even when it disagrees with the cached profile.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::category::Category;
use crate::profile::{Identity, Profile};
use crate::session::SessionProvider;
use crate::store::{QuotaStore, StoreError};

pub const SUCCESS_MESSAGE: &str = "Prompt generated successfully!";

/// Which layer refused the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitSource {
    /// Cached profile said zero; no remote call was made
    Local,
    /// The store refused the decrement
    Remote,
}

/// Why a generation was refused. `Display` is the message shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuotaError {
    #[error("You must be signed in to generate prompts.")]
    NotAuthenticated,
    #[error("You have reached your daily limit for {category} prompts. Please try again tomorrow.")]
    LimitReached {
        category: Category,
        origin: LimitSource,
    },
    #[error("There was an issue updating your prompt count.")]
    RemoteError(String),
    #[error("Could not load your profile. Please try again later.")]
    ProfileUnavailable(String),
}

impl QuotaError {
    fn from_store(category: Category, err: StoreError) -> Self {
        match err {
            StoreError::LimitReached(_) => QuotaError::LimitReached {
                category,
                origin: LimitSource::Remote,
            },
            other => QuotaError::RemoteError(other.to_string()),
        }
    }
}

pub struct QuotaGate {
    session: Arc<dyn SessionProvider>,
    store: Arc<dyn QuotaStore>,
    cache: RwLock<Option<CachedProfile>>,
    in_flight: AtomicUsize,
}

#[derive(Debug, Clone)]
struct CachedProfile {
    owner: Identity,
    profile: Profile,
}

/// Decrements `in_flight` when a `try_consume` call settles, however it exits.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl QuotaGate {
    pub fn new(session: Arc<dyn SessionProvider>, store: Arc<dyn QuotaStore>) -> Self {
        Self {
            session,
            store,
            cache: RwLock::new(None),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Gate with a profile already cached for `identity`
    pub fn with_profile(
        session: Arc<dyn SessionProvider>,
        store: Arc<dyn QuotaStore>,
        identity: Identity,
        profile: Profile,
    ) -> Self {
        let gate = Self::new(session, store);
        gate.replace_cache(Some(CachedProfile {
            owner: identity,
            profile,
        }));
        gate
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.current_identity().is_some()
    }

    /// Snapshot of the cached profile
    pub fn profile(&self) -> Option<Profile> {
        self.read_cache().map(|c| c.profile)
    }

    /// Remaining count for display; 0 when nothing is cached
    pub fn remaining_count(&self, category: Category) -> u32 {
        self.profile().map(|p| p.remaining(category)).unwrap_or(0)
    }

    /// Number of `try_consume` calls that have not settled yet
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Consume one unit of today's quota for `category`.
    ///
    /// Exactly one remote decrement is attempted once the local checks pass.
    /// On success the cached profile is replaced by a fresh fetch. On any
    /// failure the cache is left as it was.
    pub async fn try_consume(&self, category: Category) -> Result<(), QuotaError> {
        let _guard = InFlight::enter(&self.in_flight);

        let Some(identity) = self.session.current_identity() else {
            warn!("Generation refused for {}: not signed in", category);
            return Err(QuotaError::NotAuthenticated);
        };

        // A session without its own loaded profile is not ready to generate.
        let Some(cached) = self
            .read_cache()
            .filter(|c| c.owner == identity)
            .map(|c| c.profile.remaining(category))
        else {
            warn!(
                "Generation refused for {}: no profile loaded for {}",
                category, identity.user_id
            );
            return Err(QuotaError::NotAuthenticated);
        };
        if cached == 0 {
            info!(
                "Generation refused for {}: cached count is 0 for {}",
                category, identity.user_id
            );
            return Err(QuotaError::LimitReached {
                category,
                origin: LimitSource::Local,
            });
        }

        debug!(
            "Decrementing {} quota for {} (cached: {})",
            category, identity.user_id, cached
        );
        if let Err(err) = self.store.decrement(&identity, category).await {
            warn!("Error decrementing {} prompt count: {}", category, err);
            return Err(QuotaError::from_store(category, err));
        }

        // The unit is spent at this point. A failed refresh leaves the old
        // cache in place but does not undo the generation.
        match self.store.fetch_profile(&identity).await {
            Ok(profile) => {
                debug!(
                    "Refreshed profile for {}: {} {} left",
                    identity.user_id,
                    profile.remaining(category),
                    category
                );
                self.store_fetched(identity, profile);
            }
            Err(err) => warn!(
                "Decrement succeeded but profile refresh failed for {}: {}",
                identity.user_id, err
            ),
        }

        info!("{}", SUCCESS_MESSAGE);
        Ok(())
    }

    /// Fetch the signed-in user's profile and replace the cache with it.
    pub async fn refresh_profile(&self) -> Result<Profile, QuotaError> {
        let identity = self
            .session
            .current_identity()
            .ok_or(QuotaError::NotAuthenticated)?;
        let profile = self.store.fetch_profile(&identity).await.map_err(|err| {
            warn!("Failed to fetch profile for {}: {}", identity.user_id, err);
            QuotaError::ProfileUnavailable(err.to_string())
        })?;
        self.store_fetched(identity, profile.clone());
        Ok(profile)
    }

    pub fn clear_profile(&self) {
        self.replace_cache(None);
    }

    /// Bring the cache in line with the session: drop it after sign-out or
    /// an identity switch, load it when a user is signed in without one.
    pub async fn sync_session(&self) -> Result<(), QuotaError> {
        let identity = self.session.current_identity();
        let cached_owner = self.read_cache().map(|c| c.owner);

        match (identity, cached_owner) {
            (None, None) => Ok(()),
            (None, Some(_)) => {
                debug!("Session ended, discarding cached profile");
                self.clear_profile();
                Ok(())
            }
            (Some(current), Some(owner)) if current == owner => Ok(()),
            (Some(_), _) => {
                self.clear_profile();
                self.refresh_profile().await.map(|_| ())
            }
        }
    }

    // Only writes a profile whose owner is still the signed-in user, so a
    // fetch that lands after sign-out cannot resurrect the cache.
    fn store_fetched(&self, owner: Identity, profile: Profile) {
        if self.session.current_identity().as_ref() != Some(&owner) {
            debug!("Discarding profile for {}: session changed", owner.user_id);
            return;
        }
        self.replace_cache(Some(CachedProfile { owner, profile }));
    }

    fn read_cache(&self) -> Option<CachedProfile> {
        self.cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn replace_cache(&self, value: Option<CachedProfile>) {
        *self
            .cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = value;
    }
}
