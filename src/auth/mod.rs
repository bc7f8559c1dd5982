//! Bearer-token sources for the assistant service.

mod service_account;

pub use service_account::{ServiceAccount, ServiceAccountCredentials};

use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{ConfigError, Result};

#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Token to send as `Authorization: Bearer <token>`.
    async fn bearer_token(&self) -> Result<String>;
}

/// A pre-supplied, opaque bearer token.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken([REDACTED])")
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn bearer_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Pick the token source for `config`: a static token wins over service
/// account credentials.
pub fn token_source(
    config: &Config,
    http: Client,
    cancel: CancellationToken,
) -> Result<Arc<dyn TokenSource>> {
    if let Some(token) = config.token.as_deref().filter(|t| !t.trim().is_empty()) {
        return Ok(Arc::new(StaticToken::new(token.trim())));
    }

    if let Some(path) = config.credentials_path.as_deref() {
        let credentials = ServiceAccountCredentials::from_file(path)?;
        return Ok(Arc::new(ServiceAccount::new(credentials, http, cancel)));
    }

    Err(ConfigError::MissingToken.into())
}
