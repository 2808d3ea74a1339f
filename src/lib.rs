//! Resolve a playable stream URL for a YouTube video id.
//!
//! The watch page embeds a `fmt_url_map` of format codes to direct media
//! URLs. [`VideoUrlResolver`] fetches the page, decodes that map and picks one
//! URL according to the caller's MP4/HD preferences.
//!
//! ```rust,no_run
//! use youtube_video_url::{ResolverConfig, VideoUrlResolver};
//!
//! # async fn example() -> Result<(), youtube_video_url::ResolveError> {
//! let resolver = VideoUrlResolver::new(ResolverConfig::discover()?)?;
//! let url = resolver.resolve("dQw4w9WgXcQ", true, false).await?;
//! println!("{}", url);
//! # Ok(())
//! # }
//! ```

pub mod logging;
pub mod resolver;

pub use resolver::{
    FetchRequest, FetchResponse, FormatEntry, FormatMap, FormatMapExtractor, FormatSelector,
    HttpPageFetcher, PageFetcher, QualityPreference, ResolveError, ResolvedVideo,
    ResolverConfig, VideoUrlResolver,
};
