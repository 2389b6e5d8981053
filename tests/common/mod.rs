//! Shared helpers for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use atlaskv_value::{
    AtlasError, AttributeAndLen, BlobFileId, FetchContext, Fetched, LazyFetcher, Result,
    ShortAttribute, ValueFetcher,
};
use bytes::Bytes;
use tracing_subscriber::EnvFilter;

// =============================================================================
// Logging
// =============================================================================

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

// =============================================================================
// In-Memory Fetcher
// =============================================================================

/// How `MapFetcher` hands values back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Point into the fetcher's own memory
    Borrowed,
    /// Hand out a refcounted `Bytes`
    Shared,
    /// Copy into the caller's buffer
    Buffered,
}

/// Resolves handles from an in-memory map and counts every fetch
#[derive(Debug)]
pub struct MapFetcher {
    mode: FetchMode,
    values: HashMap<Vec<u8>, Bytes>,
    fetches: AtomicUsize,
}

impl MapFetcher {
    pub fn new<H, V>(mode: FetchMode, entries: &[(H, V)]) -> Arc<Self>
    where
        H: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let values = entries
            .iter()
            .map(|(h, v)| (h.as_ref().to_vec(), Bytes::copy_from_slice(v.as_ref())))
            .collect();
        Arc::new(Self {
            mode,
            values,
            fetches: AtomicUsize::new(0),
        })
    }

    /// A fetcher that knows no handles
    pub fn empty(mode: FetchMode) -> Arc<Self> {
        Self::new::<&[u8], &[u8]>(mode, &[])
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl ValueFetcher for MapFetcher {
    fn fetch_handle(
        &self,
        ctx: &FetchContext,
        handle: &[u8],
        blob_file_id: BlobFileId,
        _value_len: u32,
        buf: &mut Vec<u8>,
    ) -> Result<Fetched<'_>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        ctx.check()?;

        let value = self.values.get(handle).ok_or_else(|| {
            AtlasError::BlobFetch(format!("unknown handle {:?} in {}", handle, blob_file_id))
        })?;

        Ok(match self.mode {
            FetchMode::Borrowed => Fetched::Borrowed(&value[..]),
            FetchMode::Shared => Fetched::Shared(value.clone()),
            FetchMode::Buffered => {
                buf.clear();
                buf.extend_from_slice(value);
                Fetched::Buffered
            }
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

pub fn attr(value_len: u32, short_attribute: u8) -> AttributeAndLen {
    AttributeAndLen::new(value_len, ShortAttribute::new(short_attribute).unwrap())
}

pub fn lazy_fetcher(
    fetcher: &Arc<MapFetcher>,
    value_len: u32,
    short_attribute: u8,
    blob_file_id: u64,
) -> LazyFetcher {
    let fetcher: Arc<dyn ValueFetcher> = fetcher.clone();
    LazyFetcher::new(
        fetcher,
        attr(value_len, short_attribute),
        BlobFileId(blob_file_id),
    )
}
