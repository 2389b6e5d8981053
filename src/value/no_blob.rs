//! Always-failing fetcher
//!
//! Wired into readers where sstables must not reference blob values, or where
//! callers must never fetch a handle. Reaching it is a logic error upstream.

use std::sync::{Arc, OnceLock};

use tracing::error;

use crate::error::{AtlasError, Result};

use super::context::FetchContext;
use super::fetcher::{BlobFileId, Fetched, ValueFetcher};

/// A `ValueFetcher` that fails every fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoBlobFetches;

/// Ready-to-use instance of `NoBlobFetches`
pub static NO_BLOB_FETCHES: NoBlobFetches = NoBlobFetches;

impl NoBlobFetches {
    /// The fetcher as a shareable trait object, for binding into a `LazyFetcher`
    ///
    /// Every call returns the same allocation.
    pub fn shared() -> Arc<dyn ValueFetcher> {
        static SHARED: OnceLock<Arc<dyn ValueFetcher>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(NO_BLOB_FETCHES)))
    }
}

impl ValueFetcher for NoBlobFetches {
    fn fetch_handle(
        &self,
        _ctx: &FetchContext,
        _handle: &[u8],
        blob_file_id: BlobFileId,
        value_len: u32,
        _buf: &mut Vec<u8>,
    ) -> Result<Fetched<'_>> {
        error!(%blob_file_id, value_len, "Unexpected blob value fetch");
        Err(AtlasError::AssertionFailed(format!(
            "unexpected blob value: {}-byte from {}",
            value_len, blob_file_id
        )))
    }
}
