//! Fetch capability and lazy fetch descriptor

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::attribute::AttributeAndLen;
use super::context::FetchContext;
use super::no_blob::NoBlobFetches;

/// Identifies the blob file holding an out-of-line value
///
/// Opaque to this layer; only the `ValueFetcher` interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct BlobFileId(pub u64);

impl fmt::Display for BlobFileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{:06}", self.0)
    }
}

impl From<u64> for BlobFileId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Where a fetched value ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<'f> {
    /// Reader-owned memory, valid until the reader is repositioned or dropped
    Borrowed(&'f [u8]),

    /// Reference-counted bytes the caller may keep; independent of the reader,
    /// its position and the fetcher's lifetime
    Shared(Bytes),

    /// The value was written to the caller's buffer, which now holds exactly
    /// the value bytes (the buffer grew if its capacity was too small)
    Buffered,
}

/// Fetches an out-of-line value given its handle
///
/// Implemented by the blob/value-block reader. Calling it is valid as long as
/// the database is open, but expect a fast path only while the iterator tree
/// is still positioned on the reader that produced the `LazyValue`. Callers
/// should decide whether they need a value as early as possible.
///
/// `buf` is used when the fetcher cannot keep the value alive in its own
/// memory (e.g. the producing iterator is gone). Implementations must honour
/// `ctx` and return `Cancelled`/`DeadlineExceeded` instead of partial data.
pub trait ValueFetcher: Send + Sync + fmt::Debug {
    fn fetch_handle(
        &self,
        ctx: &FetchContext,
        handle: &[u8],
        blob_file_id: BlobFileId,
        value_len: u32,
        buf: &mut Vec<u8>,
    ) -> Result<Fetched<'_>>;
}

/// Binds a `ValueFetcher` to the metadata needed to resolve one handle
///
/// Fields are set at creation time. The default descriptor is wired to
/// `NoBlobFetches`, so an unused clone slot can never resolve anything.
#[derive(Debug, Clone)]
pub struct LazyFetcher {
    /// Given a handle, returns the value
    pub fetcher: Arc<dyn ValueFetcher>,
    /// Short attribute and value length
    pub attribute: AttributeAndLen,
    /// Blob file containing the value
    pub blob_file_id: BlobFileId,
}

impl LazyFetcher {
    pub fn new(
        fetcher: Arc<dyn ValueFetcher>,
        attribute: AttributeAndLen,
        blob_file_id: BlobFileId,
    ) -> Self {
        Self {
            fetcher,
            attribute,
            blob_file_id,
        }
    }
}

impl Default for LazyFetcher {
    fn default() -> Self {
        Self::new(
            NoBlobFetches::shared(),
            AttributeAndLen::default(),
            BlobFileId::default(),
        )
    }
}
