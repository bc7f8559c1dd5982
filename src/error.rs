use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `r2g2`.
///
/// Each stage of the upload → run → collect sequence reports through its own
/// variant, and every variant names the operation that failed. The binary
/// wraps these in `anyhow` context chains; library callers can match on them
/// directly.
#[derive(Debug, Error)]
pub enum R2g2Error {
    // ── Transport ───────────────────────────────────────────────────────
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    // ── Response decoding ───────────────────────────────────────────────
    #[error("decode: {0}")]
    Decode(#[from] DecodeError),

    // ── Run lifecycle ───────────────────────────────────────────────────
    #[error("run: {0}")]
    Run(#[from] RunError),

    // ── Content upload ──────────────────────────────────────────────────
    #[error("upload: {0}")]
    Upload(#[from] UploadError),

    // ── Config ──────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Auth ────────────────────────────────────────────────────────────
    #[error("auth: {0}")]
    Auth(#[from] AuthError),

    // ── Local I/O ───────────────────────────────────────────────────────
    #[error("io: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // ── Shutdown ────────────────────────────────────────────────────────
    #[error("{operation} cancelled")]
    Cancelled { operation: &'static str },
}

impl R2g2Error {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// True when the error was caused by the shared cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

// ─── Transport errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{operation} request failed: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} returned unexpected status {actual} (expected {expected}): {body}")]
    UnexpectedStatus {
        operation: &'static str,
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("{operation} header {name} is not a valid HTTP header")]
    InvalidHeader {
        operation: &'static str,
        name: String,
    },
}

// ─── Decode errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
#[error("{operation} response could not be decoded: {source}")]
pub struct DecodeError {
    pub operation: &'static str,
    #[source]
    pub source: serde_json::Error,
}

// ─── Run lifecycle errors ───────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RunError {
    #[error("run {run_id} failed: {reason}")]
    Failed { run_id: String, reason: String },

    #[error("run {run_id} requires a tool response, which this client does not support")]
    ToolResponseRequired { run_id: String },

    #[error("run {run_id} did not finish within {waited:?}")]
    DeadlineExceeded { run_id: String, waited: Duration },
}

// ─── Upload errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("transfer of {filename} returned unexpected status {status}")]
    Transfer { filename: String, status: u16 },

    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} has no usable file name", .path.display())]
    InvalidName { path: PathBuf },
}

// ─── Config errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("no bearer token configured; set R2G2_TOKEN or R2G2_CREDENTIALS")]
    MissingToken,
}

// ─── Auth errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials file {}: {message}", .path.display())]
    Credentials { path: PathBuf, message: String },

    #[error("token exchange returned status {status}: {body}")]
    Exchange { status: u16, body: String },

    #[error("token request failed: {0}")]
    Request(#[source] reqwest::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, R2g2Error>;
