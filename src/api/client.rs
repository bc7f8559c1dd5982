use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Body, Client, StatusCode};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::operation::ApiOperation;
use super::scrub::{sanitize_error_body, scrub_secret_patterns};
use crate::auth::TokenSource;
use crate::error::{DecodeError, R2g2Error, Result, TransportError};
use crate::shutdown::cancellable;

const PUT_OBJECT: &str = "PutObject";

/// Authenticated JSON client for the assistant service.
///
/// Cheap to clone; clones share the connection pools, the token source and
/// the cancellation token. Object writes go through a separate storage
/// client, which defaults to the API client until one is supplied.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    storage: Client,
    base_url: Arc<str>,
    tokens: Arc<dyn TokenSource>,
    cancel: CancellationToken,
}

impl ApiClient {
    pub fn new(
        http: Client,
        base_url: &str,
        tokens: Arc<dyn TokenSource>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            storage: http.clone(),
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            tokens,
            cancel,
        }
    }

    pub fn with_storage_client(mut self, storage: Client) -> Self {
        self.storage = storage;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Issue `O` with `request` and decode the reply as `O::Response`.
    ///
    /// Fails unless the reply status equals `O::EXPECTED_STATUS`. Nothing is
    /// retried here.
    pub async fn call<O: ApiOperation>(&self, request: &O::Request) -> Result<O::Response> {
        let token = self.tokens.bearer_token().await?;
        let url = format!("{}{}", self.base_url, O::PATH);
        debug!(operation = O::NAME, url = %url, "calling API");

        let send = self
            .http
            .post(&url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send();
        let response = cancellable(&self.cancel, O::NAME, send)
            .await?
            .map_err(|source| transport(O::NAME, source))?;

        let status = response.status();
        if status != O::EXPECTED_STATUS {
            let body = cancellable(&self.cancel, O::NAME, response.text())
                .await?
                .unwrap_or_default();
            return Err(TransportError::UnexpectedStatus {
                operation: O::NAME,
                expected: O::EXPECTED_STATUS.as_u16(),
                actual: status.as_u16(),
                body: sanitize_error_body(&body),
            }
            .into());
        }

        let bytes = cancellable(&self.cancel, O::NAME, response.bytes())
            .await?
            .map_err(|source| transport(O::NAME, source))?;

        serde_json::from_slice(&bytes).map_err(|source| {
            DecodeError {
                operation: O::NAME,
                source,
            }
            .into()
        })
    }

    /// Write `body` directly to a storage destination with exactly `headers`
    /// attached. No bearer token is sent. Returns the reply status.
    pub async fn put_object(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: Body,
    ) -> Result<StatusCode> {
        debug!(
            operation = PUT_OBJECT,
            url = %scrub_secret_patterns(url),
            "writing object"
        );

        let send = self
            .storage
            .put(url)
            .headers(header_map(headers)?)
            .body(body)
            .send();
        let response = cancellable(&self.cancel, PUT_OBJECT, send)
            .await?
            .map_err(|source| transport(PUT_OBJECT, source))?;

        Ok(response.status())
    }
}

fn transport(operation: &'static str, source: reqwest::Error) -> R2g2Error {
    TransportError::Request {
        operation,
        source: source.without_url(),
    }
    .into()
}

fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let invalid = || TransportError::InvalidHeader {
            operation: PUT_OBJECT,
            name: name.clone(),
        };
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        map.insert(name, value);
    }
    Ok(map)
}
