use anyhow::{bail, Context, Result};
use std::sync::Arc;

use super::client::{InMemoryStore, QuotaStore};
use super::supabase::SupabaseStore;
use crate::config::Config;
use crate::profile::Identity;
use crate::session::SessionHandle;

/// User id of the identity that dry runs sign in as
pub const DRY_RUN_USER: &str = "dry-run-user";

/// Create a quota store based on configuration
pub fn create_store(config: &Config, dry_run: bool) -> Result<Arc<dyn QuotaStore>> {
    if dry_run {
        return Ok(Arc::new(InMemoryStore::with_user(
            DRY_RUN_USER,
            config.limits.to_counts(),
        )));
    }

    match config.store.provider.as_str() {
        "supabase" => {
            let url = config
                .store
                .url
                .clone()
                .context("store.url must be set for the supabase provider")?;
            let anon_key = config.get_anon_key()?;
            Ok(Arc::new(SupabaseStore::new(
                url,
                anon_key,
                config.store.timeout_secs,
            )?))
        }

        // Local store: the configured user starts with a full day's quota.
        "memory" => {
            let store = InMemoryStore::new();
            if let Ok(user_id) = std::env::var(&config.store.user_id_env) {
                store.set_profile(
                    user_id,
                    crate::profile::Profile::new(config.limits.to_counts()),
                );
            }
            Ok(Arc::new(store))
        }

        unknown => bail!("Unknown store provider: {}", unknown),
    }
}

/// Create the session matching `create_store`'s choice
pub fn create_session(config: &Config, dry_run: bool) -> SessionHandle {
    if dry_run {
        return SessionHandle::signed_in(Identity::new(DRY_RUN_USER, "dry-run"));
    }
    SessionHandle::from_env(&config.store.user_id_env, &config.store.access_token_env)
}
