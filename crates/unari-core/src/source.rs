//! Menu data source contract.

use std::future::Future;

use crate::{FetchError, MenuRecord};

/// Upstream retrieval of menu records.
///
/// # Implementations
///
/// - **Server**: HTTP client against the Unicafe restaurant endpoint
/// - **Tests**: canned records or a canned failure
pub trait MenuSource: Send + Sync + 'static {
    /// Fetch every restaurant record currently published upstream.
    fn fetch(&self) -> impl Future<Output = Result<Vec<MenuRecord>, FetchError>> + Send;
}
