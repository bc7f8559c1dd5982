use std::borrow::Cow;

const MAX_ERROR_BODY_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

const MARKER_PATTERNS: [&str; 10] = [
    "Bearer ",
    "bearer ",
    "access_token=",
    "client_secret=",
    "X-Goog-Signature=",
    "Signature=",
    "\"access_token\":\"",
    "\"client_secret\":\"",
    "\"authorization\":\"",
    "\"token\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=' | '%')
}

fn token_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .find(|&(_, c)| !is_secret_char(c))
        .map_or(input.len(), |(i, _)| from + i)
}

fn redact_after(scrubbed: &mut String, marker: &str) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let value_start = search_from + rel + marker.len();
        let end = token_end(scrubbed, value_start);

        if end == value_start {
            search_from = value_start;
            continue;
        }

        scrubbed.replace_range(value_start..end, REDACTED);
        search_from = value_start + REDACTED.len();
    }
}

/// Redact bearer tokens, OAuth secrets and storage signatures from text that
/// is about to end up in an error message or a log line.
///
/// The marker itself is kept so the reader can still tell what was removed.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    if !MARKER_PATTERNS.iter().any(|m| input.contains(m)) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in MARKER_PATTERNS {
        redact_after(&mut scrubbed, marker);
    }
    Cow::Owned(scrubbed)
}

/// Scrub and truncate a response body for inclusion in an error.
pub fn sanitize_error_body(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input.trim());

    if scrubbed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return scrubbed.into_owned();
    }

    let end = scrubbed
        .char_indices()
        .nth(MAX_ERROR_BODY_CHARS)
        .map_or(scrubbed.len(), |(i, _)| i);
    format!("{}...", &scrubbed[..end])
}
