//! Value Module
//!
//! Lazy value handles passed through the iteration path.
//!
//! ## Responsibilities
//! - Hand out inline values without copying or allocating
//! - Defer fetching out-of-line (blob) values until a caller needs the bytes
//! - Expose value length and short attribute without fetching
//! - Let callers retain a value past the next iterator step via a stable clone
//!
//! ## Layout
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ LazyValue (24 bytes, must stay <= 32)    │
//! │ ┌────────────────────┬─────────────────┐ │
//! │ │ value_or_handle    │ fetcher         │ │
//! │ │ &[u8] (16)         │ Option<&LF> (8) │ │
//! │ └────────────────────┴────────┬────────┘ │
//! └───────────────────────────────┼──────────┘
//!                                 ▼
//! ┌──────────────────────────────────────────┐
//! │ LazyFetcher                              │
//! │   fetcher: Arc<dyn ValueFetcher>         │
//! │   attribute: { value_len, short_attr }   │
//! │   blob_file_id                           │
//! └──────────────────────────────────────────┘
//! ```
//!
//! `fetcher == None` means `value_or_handle` is the value itself. Otherwise
//! it is a handle only the bound `ValueFetcher` understands.

mod attribute;
mod context;
mod fetcher;
mod lazy;
mod no_blob;
mod pool;

pub use attribute::{AttributeAndLen, ShortAttribute, ShortAttributeExtractor, MAX_SHORT_ATTRIBUTE};
pub use context::{CancelHandle, FetchContext};
pub use fetcher::{BlobFileId, Fetched, LazyFetcher, ValueFetcher};
pub use lazy::{LazyValue, ValueBytes};
pub use no_blob::{NoBlobFetches, NO_BLOB_FETCHES};
pub use pool::{ClonePool, CloneSlot};
