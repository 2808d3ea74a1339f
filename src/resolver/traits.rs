// Page fetcher trait definition

use async_trait::async_trait;

use super::errors::ResolveError;
use super::models::{FetchRequest, FetchResponse};

/// Retrieves raw page content for the resolver.
///
/// A non-200 status is not an error at this level; implementations return it
/// in [`FetchResponse::status`] and let the resolver decide. Only transport
/// failures (DNS, connect, TLS, timeout) should come back as `Err`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Name of the fetcher (for logging)
    fn name(&self) -> &'static str;

    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, ResolveError>;
}
