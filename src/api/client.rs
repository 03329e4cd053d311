//! HTTP Store Client
//!
//! Functions for communicating with the managed table store over its
//! PostgREST-compatible REST surface. The client is an explicitly
//! constructed value passed down through context, never a module-level
//! singleton, so the fetch layer can be pointed at a test store.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use crate::state::dashboard::{sanitize_queries, sanitize_trend, QuickStats, TrendPoint, UserQuery};

/// Compile-time environment variable holding the store's base URL.
pub const STORE_URL_ENV: &str = "MENTORDASH_STORE_URL";

/// Compile-time environment variable holding the store's access key.
pub const STORE_KEY_ENV: &str = "MENTORDASH_STORE_KEY";

/// Connection handle for the table store.
///
/// Holds the base URL and the access key sent with every request. Both are
/// required; construction fails without them (startup-time fatal for the
/// data layer).
#[derive(Clone, Debug, PartialEq)]
pub struct StoreClient {
    base_url: String,
    api_key: String,
}

impl StoreClient {
    /// Build a client from explicit credentials.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, String> {
        if base_url.trim().is_empty() {
            return Err(format!("{} is not set", STORE_URL_ENV));
        }
        if api_key.trim().is_empty() {
            return Err(format!("{} is not set", STORE_KEY_ENV));
        }
        Ok(Self {
            // Normalize: remove trailing slash
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Build a client from the compile-time environment.
    pub fn from_env() -> Result<Self, String> {
        let base_url =
            option_env!("MENTORDASH_STORE_URL").ok_or_else(|| format!("{} is not set", STORE_URL_ENV))?;
        let api_key =
            option_env!("MENTORDASH_STORE_KEY").ok_or_else(|| format!("{} is not set", STORE_KEY_ENV))?;
        Self::new(base_url, api_key)
    }

    /// URL for a table endpoint with query parameters appended.
    fn table_url(&self, table: &str, params: &str) -> String {
        if params.is_empty() {
            format!("{}/rest/v1/{}?select=*", self.base_url, table)
        } else {
            format!("{}/rest/v1/{}?select=*&{}", self.base_url, table, params)
        }
    }

    /// Read rows from a table. `params` is the raw PostgREST query string
    /// (order, limit, filters), without the leading `?`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &str,
    ) -> Result<Vec<T>, String> {
        let response = Request::get(&self.table_url(table, params))
            .header("apikey", &self.api_key)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            let error: StoreApiError = response.json().await.unwrap_or_default();
            return Err(error.into_message(response.status()));
        }

        response.json().await.map_err(|e| format!("Parse error: {}", e))
    }

    /// Update rows matched by a PostgREST filter (e.g. `id=eq.<uuid>`).
    pub async fn update(
        &self,
        table: &str,
        filter: &str,
        body: &serde_json::Value,
    ) -> Result<(), String> {
        let url = format!("{}/rest/v1/{}?{}", self.base_url, table, filter);

        let response = Request::patch(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Prefer", "return=minimal")
            .json(body)
            .map_err(|e| format!("Request build error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            let error: StoreApiError = response.json().await.unwrap_or_default();
            return Err(error.into_message(response.status()));
        }

        Ok(())
    }
}

/// PostgREST error body.
#[derive(Debug, Default, serde::Deserialize)]
struct StoreApiError {
    #[serde(default)]
    message: Option<String>,
}

impl StoreApiError {
    fn into_message(self, status: u16) -> String {
        match self.message {
            Some(msg) => msg,
            None => format!("Store error: HTTP {}", status),
        }
    }
}

// ============ Typed fetch functions ============

/// Fetch the precomputed dashboard aggregates. The view holds exactly one
/// row; `None` means the store returned no rows.
pub async fn fetch_quick_stats(store: &StoreClient) -> Result<Option<QuickStats>, String> {
    let rows: Vec<QuickStats> = store.select("dashboard_quick_stats", "limit=1").await?;
    Ok(rows.into_iter().next())
}

/// Fetch the daily registration series, ordered by ascending day.
///
/// Rows whose `day` is not a calendar date are rejected at this boundary,
/// and the sequence is re-sorted so rendering order never depends on the
/// store honoring the `order` parameter.
pub async fn fetch_registration_trend(store: &StoreClient) -> Result<Vec<TrendPoint>, String> {
    let rows: Vec<TrendPoint> = store.select("mentee_daily", "order=day.asc").await?;
    Ok(sanitize_trend(rows))
}

/// Fetch user queries, newest first, capped at 100 rows. Rows without an id
/// are rejected; ordering and the cap are re-enforced client-side so
/// truncation never drops the newest rows.
pub async fn fetch_user_queries(store: &StoreClient) -> Result<Vec<UserQuery>, String> {
    let rows: Vec<UserQuery> = store
        .select("user_queries", "order=createdat.desc&limit=100")
        .await?;
    Ok(sanitize_queries(rows))
}

/// Mark a single user query as cleared. The transition is one-way; there is
/// no API to un-clear a query.
pub async fn clear_user_query(store: &StoreClient, id: &str) -> Result<(), String> {
    store
        .update(
            "user_queries",
            &format!("id=eq.{}", id),
            &serde_json::json!({ "iscleared": true }),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> StoreClient {
        StoreClient::new("https://store.example.com/", "service-key").unwrap()
    }

    #[test]
    fn test_new_requires_credentials() {
        assert!(StoreClient::new("", "key").is_err());
        assert!(StoreClient::new("https://store.example.com", "").is_err());
        assert!(StoreClient::new("https://store.example.com", "key").is_ok());
    }

    #[test]
    fn test_base_url_is_normalized() {
        let url = client().table_url("dashboard_quick_stats", "limit=1");
        assert_eq!(
            url,
            "https://store.example.com/rest/v1/dashboard_quick_stats?select=*&limit=1"
        );
    }

    #[test]
    fn test_table_url_without_params() {
        let url = client().table_url("mentee_daily", "");
        assert_eq!(url, "https://store.example.com/rest/v1/mentee_daily?select=*");
    }

    #[test]
    fn test_error_body_message_wins_over_status() {
        let err = StoreApiError {
            message: Some("permission denied for view".to_string()),
        };
        assert_eq!(err.into_message(401), "permission denied for view");

        let err = StoreApiError { message: None };
        assert_eq!(err.into_message(500), "Store error: HTTP 500");
    }
}
