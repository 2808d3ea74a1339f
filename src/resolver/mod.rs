// Resolver module - watch page fetch, format map extraction, URL selection

pub mod config;
pub mod errors;
pub mod extractor;
pub mod fetchers;
pub mod format_selector;
pub mod models;
pub mod orchestrator;
pub mod traits;

pub use config::ResolverConfig;
pub use errors::{ExtractionStage, ResolveError};
pub use extractor::{parse_format_map, FormatMapExtractor};
pub use fetchers::HttpPageFetcher;
pub use format_selector::FormatSelector;
pub use models::{
    FetchRequest, FetchResponse, FormatEntry, FormatMap, QualityPreference, ResolvedVideo,
};
pub use orchestrator::{VideoUrlResolver, WATCH_URL_PREFIX};
pub use traits::PageFetcher;
