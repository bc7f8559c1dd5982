use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::TokenSource;
use crate::api::sanitize_error_body;
use crate::error::{AuthError, Result};
use crate::shutdown::cancellable;

/// Refresh this long before the reported expiry.
const REFRESH_MARGIN: Duration = Duration::from_secs(30);

/// Service-account credentials as issued by `r2g2 iam service-account create`.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub audience: String,
    pub token_uri: String,
}

impl fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("audience", &self.audience)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountCredentials {
    pub fn from_file(path: &Path) -> Result<Self> {
        let invalid = |message: String| AuthError::Credentials {
            path: path.to_path_buf(),
            message,
        };

        let contents = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let credentials: Self =
            serde_json::from_str(&contents).map_err(|e| invalid(e.to_string()))?;

        if credentials.client_id.trim().is_empty() || credentials.token_uri.trim().is_empty() {
            return Err(invalid("client_id and token_uri are required".into()).into());
        }
        Ok(credentials)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    value: String,
    expires_at: Option<Instant>,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at
            .is_none_or(|expires_at| now + REFRESH_MARGIN < expires_at)
    }
}

/// OAuth2 client-credentials token source. Tokens are cached until shortly
/// before they expire.
pub struct ServiceAccount {
    credentials: ServiceAccountCredentials,
    http: Client,
    cancel: CancellationToken,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccount {
    pub fn new(
        credentials: ServiceAccountCredentials,
        http: Client,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            credentials,
            http,
            cancel,
            cached: Mutex::new(None),
        }
    }

    async fn exchange(&self) -> Result<CachedToken> {
        let creds = &self.credentials;
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.as_str()),
            ("audience", creds.audience.as_str()),
        ];

        debug!(token_uri = %creds.token_uri, "exchanging client credentials");
        let issued_at = Instant::now();
        let response = cancellable(
            &self.cancel,
            "TokenExchange",
            self.http.post(&creds.token_uri).form(&params).send(),
        )
        .await?
        .map_err(AuthError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = cancellable(&self.cancel, "TokenExchange", response.text())
                .await?
                .unwrap_or_default();
            return Err(AuthError::Exchange {
                status: status.as_u16(),
                body: sanitize_error_body(&body),
            }
            .into());
        }

        let token: TokenResponse = cancellable(&self.cancel, "TokenExchange", response.json())
            .await?
            .map_err(AuthError::Request)?;

        Ok(CachedToken {
            value: token.access_token,
            expires_at: token
                .expires_in
                .map(|secs| issued_at + Duration::from_secs(secs)),
        })
    }
}

#[async_trait]
impl TokenSource for ServiceAccount {
    async fn bearer_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref()
            && token.is_fresh(Instant::now())
        {
            return Ok(token.value.clone());
        }

        let fresh = self.exchange().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }
}
