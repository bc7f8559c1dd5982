use std::fmt;

use crate::api::types::Run;

/// Lifecycle state of a run as reported by the service.
///
/// The service does not guarantee stable casing, so matching is
/// case-insensitive. Anything that is not a known terminal or
/// action-required value counts as still in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Succeeded,
    Failed,
    /// The run waits for a tool response; this client cannot provide one.
    ToolResponseRequired,
    /// Queued, running, or any state this client does not know about.
    InProgress(String),
}

impl RunState {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("succeeded") {
            Self::Succeeded
        } else if raw.eq_ignore_ascii_case("failed") {
            Self::Failed
        } else if raw.eq_ignore_ascii_case("tool_response_required") {
            Self::ToolResponseRequired
        } else {
            Self::InProgress(raw.to_string())
        }
    }

    pub fn of(run: &Run) -> Self {
        Self::parse(&run.state)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => f.write_str("SUCCEEDED"),
            Self::Failed => f.write_str("FAILED"),
            Self::ToolResponseRequired => f.write_str("TOOL_RESPONSE_REQUIRED"),
            Self::InProgress(raw) if raw.is_empty() => f.write_str("<unspecified>"),
            Self::InProgress(raw) => f.write_str(raw),
        }
    }
}
