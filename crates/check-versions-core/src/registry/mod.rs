//! Registry client
//!
//! This module provides:
//! - The [`HttpFetcher`] seam and its reqwest implementation
//! - Response shapes and "latest version" parsers for each registry

pub mod fetcher;
pub mod response;

use crate::error::Result;
use crate::runtime::tool::ToolDescriptor;

pub use fetcher::{HttpFetcher, ReqwestFetcher, DEFAULT_HTTP_TIMEOUT};
pub use response::latest_version;

/// Fetch a tool's registry and return the latest published version.
pub async fn fetch_latest<F: HttpFetcher>(fetcher: &F, tool: &ToolDescriptor) -> Result<String> {
    let body = fetcher.get(&tool.registry_url).await?;
    latest_version(&tool.registry_url, &body, tool.parse_latest)
}
