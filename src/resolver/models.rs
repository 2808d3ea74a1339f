// Common data models for URL resolution

use serde::{Deserialize, Serialize};

/// Low-quality FLV, always acceptable as a fallback
pub const FORMAT_FLV_LOW: i32 = 5;
/// Standard-definition MP4
pub const FORMAT_MP4: i32 = 18;
/// 720p MP4
pub const FORMAT_HD: i32 = 22;

/// One `code|url` pair from the embedded format map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatEntry {
    pub code: i32,
    pub url: String,
}

impl FormatEntry {
    pub fn new(code: i32, url: impl Into<String>) -> Self {
        Self {
            code,
            url: url.into(),
        }
    }

    /// Human-readable label for logging
    pub fn label(&self) -> &'static str {
        match self.code {
            FORMAT_FLV_LOW => "flv-low",
            FORMAT_MP4 => "mp4",
            FORMAT_HD => "hd720",
            _ => "other",
        }
    }
}

/// Entries in the order they appear on the page. Codes are not unique.
pub type FormatMap = Vec<FormatEntry>;

/// Caller's quality wishes. Both flags may be set at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityPreference {
    pub prefer_mp4: bool,
    pub prefer_hd: bool,
}

impl QualityPreference {
    pub fn new(prefer_mp4: bool, prefer_hd: bool) -> Self {
        Self {
            prefer_mp4,
            prefer_hd,
        }
    }

    pub fn standard() -> Self {
        Self::default()
    }

    pub fn mp4() -> Self {
        Self::new(true, false)
    }

    pub fn hd() -> Self {
        Self::new(false, true)
    }
}

/// Arguments for a single page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub use_cache: bool,
    pub verbose: bool,
    pub follow_redirects: bool,
}

impl FetchRequest {
    /// Fresh, non-redirecting fetch as used for watch pages
    pub fn fresh(url: impl Into<String>, verbose: bool) -> Self {
        Self {
            url: url.into(),
            use_cache: false,
            verbose,
            follow_redirects: false,
        }
    }
}

/// Raw result of a page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub body: String,
    pub status: u16,
    /// `Location` header, present on redirects that were not followed
    pub location: Option<String>,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            status,
            location: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Full outcome of a resolution, for callers that need more than the URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVideo {
    pub video_id: String,
    pub watch_url: String,
    pub format_code: i32,
    pub url: String,
    /// Page's own `IS_HD_AVAILABLE` flag, when it has one
    pub hd_available: Option<bool>,
}
