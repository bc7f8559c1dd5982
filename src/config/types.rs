use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://api-proxy-prod.prod.gcp.minisme.ai";

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path the config was read from - not serialized
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Base URL of the assistant service.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Pre-supplied bearer token. Takes precedence over `credentials_path`.
    #[serde(default)]
    pub token: Option<String>,

    /// Service-account credentials JSON used for the client-credentials flow.
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub run: RunDefaults,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            api_url: default_api_url(),
            token: None,
            credentials_path: None,
            http: HttpConfig::default(),
            polling: PollingConfig::default(),
            run: RunDefaults::default(),
        }
    }
}

impl Config {
    /// Base URL without a trailing slash.
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base().is_empty() {
            return Err(ConfigError::Validation("api_url must not be empty".into()));
        }
        if self.polling.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "polling.interval_ms must be greater than zero".into(),
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.polling.deadline_secs == Some(0) {
            return Err(ConfigError::Validation(
                "polling.deadline_secs must be greater than zero when set".into(),
            ));
        }
        Ok(())
    }
}

// ── HTTP ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

// ── Run polling ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Fixed wait between two `GetRun` polls.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Upper bound on the total wait. `None` polls until a terminal state.
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

fn default_interval_ms() -> u64 {
    100
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            deadline_secs: None,
        }
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

// ── Run defaults ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDefaults {
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    #[serde(default = "default_query")]
    pub query: String,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("./testdata")
}

fn default_query() -> String {
    "Write me a story.".into()
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            query: default_query(),
        }
    }
}
