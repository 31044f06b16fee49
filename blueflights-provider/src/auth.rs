use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::Mutex;

use blueflights_core::UpstreamError;

use crate::{provider_error, transport_error};

/// Refresh this long before the advertised expiry.
const EXPIRY_LEEWAY: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// OAuth2 client-credentials token source for the provider API. The token is
/// fetched on first use and cached until shortly before it expires.
pub struct TokenManager {
    http: reqwest::Client,
    token_url: String,
    api_key: String,
    api_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: &str, api_secret: &str) -> Self {
        Self {
            http,
            token_url: format!("{}/v1/security/oauth2/token", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            cached: Mutex::new(None),
        }
    }

    pub async fn access_token(&self) -> Result<String, UpstreamError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() + EXPIRY_LEEWAY < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        tracing::debug!("fetching new provider access token");
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.api_key.as_str()),
                ("client_secret", self.api_secret.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        });
        Ok(access_token)
    }
}
