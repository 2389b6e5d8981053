//! Clone slots
//!
//! Most callers hold a small, fixed number of cloned values at once, so they
//! keep one buffer and one `LazyFetcher` per clone and reuse them.

use tracing::trace;

use crate::config::Config;
use crate::error::Result;

use super::fetcher::LazyFetcher;
use super::lazy::LazyValue;

/// Caller-owned storage for one stable clone
#[derive(Debug, Default)]
pub struct CloneSlot {
    buf: Vec<u8>,
    fetcher: LazyFetcher,
}

impl CloneSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the buffer so typical clones don't allocate
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            fetcher: LazyFetcher::default(),
        }
    }

    /// Clone `value` into this slot, replacing whatever it held before
    ///
    /// The buffer keeps its capacity across calls.
    pub fn retain(&mut self, value: &LazyValue<'_>) -> LazyValue<'_> {
        trace!(
            len = value.value_or_handle().len(),
            capacity = self.buf.capacity(),
            "Retaining lazy value in clone slot"
        );
        self.buf.clear();
        value.stable_clone(&mut self.buf, &mut self.fetcher)
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }
}

/// A fixed set of clone slots
#[derive(Debug)]
pub struct ClonePool {
    slots: Vec<CloneSlot>,
}

impl ClonePool {
    /// Create a pool of exactly `size` slots
    pub fn new(size: usize) -> Self {
        Self {
            slots: (0..size).map(|_| CloneSlot::new()).collect(),
        }
    }

    /// Create a pool sized by `config.clone_pool_size`
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.clone_pool_size))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut CloneSlot> {
        self.slots.get_mut(index)
    }

    /// Disjoint access to every slot, for holding several clones at once
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, CloneSlot> {
        self.slots.iter_mut()
    }
}
