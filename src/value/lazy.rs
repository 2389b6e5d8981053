//! LazyValue
//!
//! A value that may not have been extracted yet: either an in-place value
//! (stored with the key) or a handle to a value stored out of line.
//!
//! ## Memory management
//!
//! A `LazyValue` returned by an iterator borrows the iterator's memory and is
//! unstable: repositioning the iterator ends the borrow. To keep a value
//! around, call `stable_clone`, which copies the value or handle into a
//! caller-owned buffer and descriptor slot. It does not fetch anything.
//!
//! Two promises make fetched values cheap:
//!
//! 1. [P1] A caller holds at most one fetched view per producing reader at a
//!    time. If it needs two (e.g. the previous key's value during reverse
//!    iteration) it clones the one it keeps.
//! 2. [P2] The producing reader keeps the fetched view valid until it is
//!    repositioned. After a clone outlives the reader, the fetcher cannot
//!    keep P2 and hands the caller its own bytes instead, either in the caller's
//!    buffer or as a reference-counted `Bytes`; `ValueBytes` says which
//!    happened.
//!
//! Fetched values are not cached. Every `value` call on a handle goes to the
//! fetcher again, and a clone carries no fetched state.

use std::ops::Deref;
use std::sync::Arc;

use bytes::Bytes;
use tracing::trace;

use crate::error::Result;

use super::attribute::ShortAttribute;
use super::context::FetchContext;
use super::fetcher::{Fetched, LazyFetcher};

/// A value that may still need fetching
///
/// Must stay within 32 bytes: iteration loops pass it by value, and larger
/// structs measurably slow them down.
#[derive(Debug, Clone, Copy)]
pub struct LazyValue<'a> {
    /// `fetcher == None`: the value. Otherwise: a handle for the fetcher.
    value_or_handle: &'a [u8],
    fetcher: Option<&'a LazyFetcher>,
}

const _: () = assert!(std::mem::size_of::<LazyValue<'static>>() <= 32);

impl<'a> LazyValue<'a> {
    /// An in-place value
    pub fn inline(value: &'a [u8]) -> Self {
        Self {
            value_or_handle: value,
            fetcher: None,
        }
    }

    /// A handle that `fetcher` resolves to `fetcher.attribute.value_len` bytes
    pub fn with_fetcher(handle: &'a [u8], fetcher: &'a LazyFetcher) -> Self {
        Self {
            value_or_handle: handle,
            fetcher: Some(fetcher),
        }
    }

    /// The value if inline, otherwise the handle
    pub fn value_or_handle(&self) -> &'a [u8] {
        self.value_or_handle
    }

    pub fn fetcher(&self) -> Option<&'a LazyFetcher> {
        self.fetcher
    }

    pub fn is_inline(&self) -> bool {
        self.fetcher.is_none()
    }

    /// Get the value bytes
    ///
    /// Inline values come back as `ValueBytes::Borrowed` without touching
    /// `buf` or `ctx`. Handles are passed to the fetcher together with `buf`;
    /// pass an empty `Vec` when P2 is known to hold and no allocation will
    /// happen. Fetch errors are returned unchanged.
    pub fn value<'r>(&self, ctx: &FetchContext, buf: &'r mut Vec<u8>) -> Result<ValueBytes<'r>>
    where
        'a: 'r,
    {
        let f = match self.fetcher {
            None => return Ok(ValueBytes::Borrowed(self.value_or_handle)),
            Some(f) => f,
        };

        trace!(
            blob_file_id = %f.blob_file_id,
            value_len = f.attribute.value_len,
            "Fetching lazy value"
        );

        let fetched = f.fetcher.fetch_handle(
            ctx,
            self.value_or_handle,
            f.blob_file_id,
            f.attribute.value_len,
            buf,
        )?;

        Ok(match fetched {
            Fetched::Borrowed(v) => ValueBytes::Borrowed(v),
            Fetched::Shared(b) => ValueBytes::Shared(b),
            Fetched::Buffered => ValueBytes::CallerOwned(buf.as_slice()),
        })
    }

    /// Length of the value, without fetching it
    pub fn len(&self) -> usize {
        match self.fetcher {
            None => self.value_or_handle.len(),
            Some(f) => f.attribute.value_len as usize,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The short attribute, if this is a handle
    pub fn try_get_short_attribute(&self) -> Option<ShortAttribute> {
        self.fetcher.map(|f| f.attribute.short_attribute)
    }

    /// Create a stable copy by appending the value or handle to `buf`
    ///
    /// For a handle, `slot` is overwritten with a fresh descriptor (same
    /// fetcher, attribute and blob file) and the copy points at it. Nothing
    /// fetched earlier is carried over, so fetching from the copy goes to the
    /// fetcher again and may invalidate memory the fetcher kept for `self`
    /// (P1 applies to both). Prefer cloning before calling `value`.
    ///
    /// Empty values leave `buf` untouched. Callers typically keep a fixed
    /// pool of slots, see `ClonePool`.
    pub fn stable_clone<'b>(&self, buf: &'b mut Vec<u8>, slot: &'b mut LazyFetcher) -> LazyValue<'b> {
        let fetcher = match self.fetcher {
            Some(f) => {
                *slot = LazyFetcher {
                    fetcher: Arc::clone(&f.fetcher),
                    attribute: f.attribute,
                    blob_file_id: f.blob_file_id,
                };
                Some(&*slot)
            }
            None => None,
        };

        if self.value_or_handle.is_empty() {
            return LazyValue {
                value_or_handle: &[],
                fetcher,
            };
        }

        let start = buf.len();
        buf.extend_from_slice(self.value_or_handle);
        LazyValue {
            value_or_handle: &buf[start..],
            fetcher,
        }
    }
}

impl<'a> From<&'a [u8]> for LazyValue<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::inline(value)
    }
}

/// Bytes of a resolved value, tagged with who owns them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueBytes<'r> {
    /// Inline value or fetcher memory; valid until the reader moves
    Borrowed(&'r [u8]),

    /// Reference-counted bytes handed to the caller; they stay valid after
    /// the reader, the fetcher and the handle are gone
    Shared(Bytes),

    /// The caller's buffer
    CallerOwned(&'r [u8]),
}

impl<'r> ValueBytes<'r> {
    pub fn as_slice(&self) -> &[u8] {
        match self {
            ValueBytes::Borrowed(v) | ValueBytes::CallerOwned(v) => v,
            ValueBytes::Shared(b) => b,
        }
    }

    /// True when the bytes no longer depend on the producing reader: they
    /// live in the caller's buffer or in a refcount the caller now holds
    pub fn is_caller_owned(&self) -> bool {
        matches!(self, ValueBytes::CallerOwned(_) | ValueBytes::Shared(_))
    }
}

impl Deref for ValueBytes<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for ValueBytes<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
