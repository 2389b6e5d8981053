//! # AtlasKV Lazy Values
//!
//! Value handles for the AtlasKV iteration layer:
//! - Zero-copy, zero-allocation inline values
//! - Deferred fetching of values stored out of line (blob files)
//! - Length and short attribute available without fetching
//! - Stable clones in caller-owned buffers
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Iterator tree                             │
//! │          (produces one LazyValue per position)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     LazyValue                                │
//! │       len() / try_get_short_attribute() / value()            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │   Inline    │          │ LazyFetcher  │
//!   │  (borrow)   │          │ (attr + id)  │
//!   └─────────────┘          └──────┬───────┘
//!                                   │
//!                                   ▼
//!                           ┌──────────────┐
//!                           │ ValueFetcher │
//!                           │ (blob reader)│
//!                           └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod value;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{AtlasError, Result};
pub use config::Config;
pub use value::{
    AttributeAndLen, BlobFileId, CancelHandle, ClonePool, CloneSlot, FetchContext, Fetched,
    LazyFetcher, LazyValue, NoBlobFetches, ShortAttribute, ShortAttributeExtractor, ValueBytes,
    ValueFetcher, MAX_SHORT_ATTRIBUTE, NO_BLOB_FETCHES,
};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
