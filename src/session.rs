use std::env;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::profile::Identity;

/// Supplies the currently signed-in identity, if any.
pub trait SessionProvider: Send + Sync {
    fn current_identity(&self) -> Option<Identity>;
}

/// In-process session holder. Sign-in state changes are broadcast to
/// subscribers so dependent caches can reload or drop their data.
pub struct SessionHandle {
    tx: watch::Sender<Option<Identity>>,
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::signed_out()
    }
}

impl SessionHandle {
    pub fn signed_out() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn signed_in(identity: Identity) -> Self {
        let (tx, _rx) = watch::channel(Some(identity));
        Self { tx }
    }

    /// Build a session from environment variables holding the user id and
    /// access token. Missing or empty variables yield a signed-out session.
    pub fn from_env(user_id_env: &str, access_token_env: &str) -> Self {
        let user_id = env::var(user_id_env).unwrap_or_default();
        let token = env::var(access_token_env).unwrap_or_default();
        if user_id.is_empty() || token.is_empty() {
            debug!(
                "No session in environment ({} / {})",
                user_id_env, access_token_env
            );
            return Self::signed_out();
        }
        Self::signed_in(Identity::new(user_id, token))
    }

    pub fn sign_in(&self, identity: Identity) {
        info!("Signed in as {}", identity.user_id);
        self.tx.send_replace(Some(identity));
    }

    pub fn sign_out(&self) {
        if self.tx.send_replace(None).is_some() {
            info!("Signed out");
        }
    }

    /// Receiver that observes every identity change
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.tx.subscribe()
    }
}

impl SessionProvider for SessionHandle {
    fn current_identity(&self) -> Option<Identity> {
        self.tx.borrow().clone()
    }
}
