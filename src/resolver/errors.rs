// Error types for URL resolution

use std::fmt;

use thiserror::Error;

/// Which extraction stage failed to match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStage {
    /// The `var swfHTML ... ;` script region was not found
    MarkerRegion,
    /// The region had no `&fmt_url_map=...&` parameter
    FormatMapParam,
}

impl fmt::Display for ExtractionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarkerRegion => write!(f, "player script region not found"),
            Self::FormatMapParam => write!(f, "fmt_url_map parameter not found"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Caller passed an unusable video id
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Watch page answered with something other than 200
    #[error("Failed to get URL for video: {url} (HTTP response code: {status}){}", redirect_hint(.location))]
    FetchFailed {
        url: String,
        status: u16,
        location: Option<String>,
    },

    /// Page did not carry a recognizable format map
    #[error("Could not retrieve YouTube video URL: {stage}")]
    ExtractionFailed { stage: ExtractionStage },

    /// Format map found but no entry satisfied the selection rules
    #[error("Could not retrieve YouTube video URL: none of {entries} format entries matched")]
    NoMatchingFormat { entries: usize },

    /// Resolver used from a thread other than the one that created it
    #[error("Resolver owned by thread {owner} was called from thread {current}")]
    ConcurrencyViolation { owner: String, current: String },

    /// Transport-level failure before any status code was received
    #[error("Network error while fetching {url}: {message}")]
    Network { url: String, message: String },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

fn redirect_hint(location: &Option<String>) -> String {
    match location {
        Some(target) => format!(", redirected to {}", target),
        None => String::new(),
    }
}

impl ResolveError {
    /// Whether the caller can fix this by changing its input
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::ConcurrencyViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failed_message_carries_url_and_status() {
        let err = ResolveError::FetchFailed {
            url: "http://www.youtube.com/watch?v=abc".to_string(),
            status: 404,
            location: None,
        };
        let msg = err.to_string();
        assert!(msg.contains("http://www.youtube.com/watch?v=abc"));
        assert!(msg.contains("404"));
        assert!(!msg.contains("redirected"));
    }

    #[test]
    fn test_fetch_failed_message_mentions_redirect() {
        let err = ResolveError::FetchFailed {
            url: "http://www.youtube.com/watch?v=abc".to_string(),
            status: 303,
            location: Some("http://www.youtube.com/verify_age".to_string()),
        };
        assert!(err
            .to_string()
            .ends_with(", redirected to http://www.youtube.com/verify_age"));
    }

    #[test]
    fn test_extraction_stage_in_message() {
        let err = ResolveError::ExtractionFailed {
            stage: ExtractionStage::FormatMapParam,
        };
        assert!(err.to_string().contains("fmt_url_map"));
    }

    #[test]
    fn test_usage_errors() {
        assert!(ResolveError::InvalidInput("empty".into()).is_usage_error());
        assert!(!ResolveError::NoMatchingFormat { entries: 0 }.is_usage_error());
    }
}
