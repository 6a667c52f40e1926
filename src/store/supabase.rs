use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::client::{QuotaStore, StoreError};
use crate::category::Category;
use crate::profile::{Identity, Profile, ProfileRow};
use crate::util::SecretString;

const DECREMENT_RPC: &str = "decrement_prompt_count";
const PROFILES_TABLE: &str = "profiles";

/// Quota store backed by a Supabase project (PostgREST).
pub struct SupabaseStore {
    base_url: String,
    anon_key: SecretString,
    client: Client,
}

#[derive(Debug, Serialize)]
struct DecrementRequest<'a> {
    category: &'a str,
}

/// PostgREST error body
#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl SupabaseStore {
    pub fn new(base_url: String, anon_key: String, timeout_secs: u64) -> Result<Self, StoreError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .map_err(|e| StoreError::Transport(format!("failed to build HTTP client: {}", e)))?,
        })
    }

    fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, function)
    }

    fn profile_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, PROFILES_TABLE)
    }

    /// PostgREST filter and column list for one user's row
    fn profile_query(user_id: &str) -> [(&'static str, String); 2] {
        let mut columns = vec!["id", "username"];
        columns.extend(Category::ALL.iter().map(|c| c.profile_column()));
        [
            ("id", format!("eq.{}", user_id)),
            ("select", columns.join(",")),
        ]
    }

    fn authorized(&self, req: reqwest::RequestBuilder, identity: &Identity) -> reqwest::RequestBuilder {
        let mut req = req.header("content-type", "application/json");
        if !self.anon_key.is_empty() {
            req = req.header("apikey", self.anon_key.expose());
        }
        req.header(
            "authorization",
            format!("Bearer {}", identity.access_token().expose()),
        )
    }
}

/// Translate a non-success response into a store error.
/// A message mentioning "limit" is the RPC refusing an exhausted counter.
async fn error_from_response(response: Response, category: Option<Category>) -> StoreError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<PostgrestError>(&body)
        .map(|e| match e.code {
            Some(code) if !code.is_empty() => format!("{} ({})", e.message, code),
            _ => e.message,
        })
        .unwrap_or(body);

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return StoreError::Unauthorized;
    }
    if let Some(category) = category {
        if message.to_lowercase().contains("limit") {
            return StoreError::LimitReached(category);
        }
    }
    StoreError::Server {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl QuotaStore for SupabaseStore {
    async fn decrement(&self, identity: &Identity, category: Category) -> Result<(), StoreError> {
        debug!(
            "Calling {} for user {} ({})",
            DECREMENT_RPC, identity.user_id, category
        );

        let request = DecrementRequest {
            category: category.as_str(),
        };
        let response = self
            .authorized(self.client.post(self.rpc_url(DECREMENT_RPC)), identity)
            .json(&request)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, Some(category)).await);
        }
        Ok(())
    }

    async fn fetch_profile(&self, identity: &Identity) -> Result<Profile, StoreError> {
        debug!("Fetching profile for user {}", identity.user_id);

        let response = self
            .authorized(self.client.get(self.profile_url()), identity)
            .query(&Self::profile_query(&identity.user_id))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, None).await);
        }

        let rows: Vec<ProfileRow> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        rows.into_iter()
            .next()
            .map(Profile::from)
            .ok_or_else(|| StoreError::NotFound(identity.user_id.clone()))
    }
}
