use reqwest::Client;
use std::time::Duration;

use crate::config::HttpConfig;

pub fn build_api_client(config: &HttpConfig) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Client for direct object writes. Transfers are bounded by the connect
/// timeout only, so large files are never cut off mid-stream.
pub fn build_storage_client(config: &HttpConfig) -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}
