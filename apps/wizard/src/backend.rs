//! Profile backend client.
//!
//! The engine consumes three endpoints: `GET /users/profile`,
//! `PUT /users/profile` (partial or full flat record; the backend merges
//! non-destructively) and `POST /users/profile/submit`. All HTTP goes
//! through `HttpProfileBackend`; the trait exists so the store and its
//! tests can swap in fakes.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::WizardError;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[async_trait]
pub trait ProfileBackend: Send + Sync {
    /// Fetches the canonical flat profile record.
    async fn fetch_profile(&self) -> Result<Value, WizardError>;

    /// Pushes a partial or full flat record.
    async fn update_profile(&self, record: &Value) -> Result<(), WizardError>;

    /// Finalizes the profile with the fully flattened record.
    async fn submit_profile(&self, record: &Value) -> Result<(), WizardError>;
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// reqwest-backed implementation of the portal's profile endpoints.
/// No automatic retry: a failed autosave is retried by the next edit's
/// debounce cycle, and explicit saves are retried by the user.
#[derive(Clone)]
pub struct HttpProfileBackend {
    client: Client,
    base_url: String,
}

impl HttpProfileBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, WizardError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        // Prefer the backend's error envelope; fall back to the raw body.
        let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        Err(WizardError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ProfileBackend for HttpProfileBackend {
    async fn fetch_profile(&self) -> Result<Value, WizardError> {
        let response = self
            .client
            .get(self.url("/users/profile"))
            .send()
            .await?;
        let profile = Self::check(response).await?.json::<Value>().await?;
        debug!("Fetched profile record");
        Ok(profile)
    }

    async fn update_profile(&self, record: &Value) -> Result<(), WizardError> {
        let response = self
            .client
            .put(self.url("/users/profile"))
            .json(record)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn submit_profile(&self, record: &Value) -> Result<(), WizardError> {
        let response = self
            .client
            .post(self.url("/users/profile/submit"))
            .json(record)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = HttpProfileBackend::new("http://localhost:8080/");
        assert_eq!(
            backend.url("/users/profile"),
            "http://localhost:8080/users/profile"
        );
    }
}
