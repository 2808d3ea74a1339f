// VideoUrlResolver - watch page in, stream URL out
//
// Pipeline: owner check -> id check -> fetch -> extract -> select.
// One fetch per call, no retries, nothing cached between calls.

use std::thread::{self, ThreadId};

use super::config::ResolverConfig;
use super::errors::ResolveError;
use super::extractor::FormatMapExtractor;
use super::fetchers::HttpPageFetcher;
use super::format_selector::FormatSelector;
use super::models::{FetchRequest, QualityPreference, ResolvedVideo};
use super::traits::PageFetcher;

pub const WATCH_URL_PREFIX: &str = "http://www.youtube.com/watch?v=";

/// Resolves stream URLs through a fetcher it owns for its whole lifetime.
///
/// The fetcher's client is not meant to be driven from several threads, so the
/// resolver remembers the thread that created it and refuses calls from any
/// other thread with [`ResolveError::ConcurrencyViolation`]. Under
/// `#[tokio::main]` the top-level future stays on the main thread; tasks
/// spawned onto the worker pool should build their own resolver.
pub struct VideoUrlResolver {
    fetcher: Box<dyn PageFetcher>,
    config: ResolverConfig,
    owner: ThreadId,
}

impl VideoUrlResolver {
    /// Resolver backed by the HTTP fetcher
    pub fn new(config: ResolverConfig) -> Result<Self, ResolveError> {
        let fetcher = HttpPageFetcher::new(&config)?;
        Ok(Self::with_fetcher(Box::new(fetcher), config))
    }

    pub fn with_fetcher(fetcher: Box<dyn PageFetcher>, config: ResolverConfig) -> Self {
        Self {
            fetcher,
            config,
            owner: thread::current().id(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Watch page URL for an id. The id is appended verbatim.
    pub fn watch_url(video_id: &str) -> String {
        format!("{}{}", WATCH_URL_PREFIX, video_id)
    }

    /// Stream URL for `video_id` under the given quality flags
    pub async fn resolve(
        &self,
        video_id: &str,
        prefer_mp4: bool,
        prefer_hd: bool,
    ) -> Result<String, ResolveError> {
        self.resolve_detailed(video_id, QualityPreference::new(prefer_mp4, prefer_hd))
            .await
            .map(|resolved| resolved.url)
    }

    /// Like [`resolve`](Self::resolve), also reporting the chosen format code
    /// and the page's HD-availability flag
    pub async fn resolve_detailed(
        &self,
        video_id: &str,
        preference: QualityPreference,
    ) -> Result<ResolvedVideo, ResolveError> {
        self.check_owner()?;

        if video_id.trim().is_empty() {
            return Err(ResolveError::InvalidInput(
                "No video ID specified!".to_string(),
            ));
        }

        let watch = Self::watch_url(video_id);
        let request = FetchRequest::fresh(&watch, self.config.verbose_logging);

        tracing::debug!(fetcher = self.fetcher.name(), url = %watch, "Requesting watch page");
        let response = self.fetcher.fetch(&request).await.map_err(|e| {
            tracing::warn!(url = %watch, error = %e, "Watch page fetch failed");
            e
        })?;

        if !response.is_success() {
            tracing::warn!(url = %watch, status = response.status, "Unexpected watch page status");
            return Err(ResolveError::FetchFailed {
                url: watch,
                status: response.status,
                location: response.location,
            });
        }

        let formats = FormatMapExtractor::extract(&response.body).map_err(|e| {
            tracing::warn!(url = %watch, error = %e, "No format map in watch page");
            e
        })?;
        tracing::debug!(entries = formats.len(), "Parsed format map");

        let hd_available = FormatMapExtractor::hd_available(&response.body);
        let entry = FormatSelector::select_entry(&formats, preference).map_err(|e| {
            tracing::warn!(url = %watch, ?preference, error = %e, "No acceptable format");
            e
        })?;

        Ok(ResolvedVideo {
            video_id: video_id.to_string(),
            watch_url: watch,
            format_code: entry.code,
            url: entry.url.clone(),
            hd_available,
        })
    }

    fn check_owner(&self) -> Result<(), ResolveError> {
        let current = thread::current().id();
        if current == self.owner {
            return Ok(());
        }

        tracing::warn!(owner = ?self.owner, current = ?current, "Resolver called off its owner thread");
        Err(ResolveError::ConcurrencyViolation {
            owner: format!("{:?}", self.owner),
            current: format!("{:?}", current),
        })
    }
}
