//! Tests for clone slots
//!
//! These tests verify:
//! - Pools are sized from config
//! - Several clones can be held at once from one pool
//! - Slots are reused once their clone is dropped
//! - Unused slots are wired to the always-failing fetcher

mod common;

use atlaskv_value::config::Config;
use atlaskv_value::{AtlasError, ClonePool, CloneSlot, FetchContext, LazyFetcher, LazyValue};
use common::{lazy_fetcher, FetchMode, MapFetcher};

// =============================================================================
// Pool Sizing Tests
// =============================================================================

#[test]
fn test_pool_from_config() {
    let config = Config::builder().clone_pool_size(3).build();
    let mut pool = ClonePool::from_config(&config).unwrap();
    assert_eq!(pool.len(), 3);
    assert!(!pool.is_empty());
    assert!(pool.slot_mut(2).is_some());
    assert!(pool.slot_mut(3).is_none());
}

#[test]
fn test_pool_rejects_invalid_config() {
    let config = Config::builder().clone_pool_size(0).build();
    assert!(matches!(
        ClonePool::from_config(&config),
        Err(AtlasError::Config(_))
    ));
}

// =============================================================================
// Retain Tests
// =============================================================================

#[test]
fn test_hold_two_clones_from_pool() {
    let fetcher = MapFetcher::new(FetchMode::Buffered, &[(b"blob", b"out-of-line")]);
    let lf = lazy_fetcher(&fetcher, 11, 4, 2);
    let mut pool = ClonePool::new(2);

    let (first, second) = {
        let block = b"blob".to_vec();
        let inline = LazyValue::inline(b"in-place");
        let handle = LazyValue::with_fetcher(&block, &lf);

        let mut slots = pool.iter_mut();
        let first = slots.next().unwrap().retain(&inline);
        let second = slots.next().unwrap().retain(&handle);
        (first, second)
    };

    let ctx = FetchContext::background();
    let mut buf = Vec::new();
    assert_eq!(first.value(&ctx, &mut buf).unwrap().as_slice(), b"in-place");
    assert_eq!(second.len(), 11);
    assert_eq!(second.try_get_short_attribute().map(u8::from), Some(4));
    assert_eq!(second.value(&ctx, &mut buf).unwrap().as_slice(), b"out-of-line");
    assert_eq!(fetcher.fetch_count(), 1);
}

#[test]
fn test_slot_reuse_replaces_previous_clone() {
    let mut slot = CloneSlot::with_capacity(64);
    assert!(slot.capacity() >= 64);

    let first = slot.retain(&LazyValue::inline(b"first-value"));
    assert_eq!(first.value_or_handle(), b"first-value");

    let second = slot.retain(&LazyValue::inline(b"second"));
    assert_eq!(second.value_or_handle(), b"second");
    assert!(slot.capacity() >= 64);
}

#[test]
fn test_slot_reuse_after_handle_keeps_no_binding() {
    let fetcher = MapFetcher::new(FetchMode::Buffered, &[(b"h", b"value")]);
    let lf = lazy_fetcher(&fetcher, 5, 1, 1);
    let mut slot = CloneSlot::new();

    let handle = slot.retain(&LazyValue::with_fetcher(b"h", &lf));
    assert!(!handle.is_inline());

    let inline = slot.retain(&LazyValue::inline(b"plain"));
    assert!(inline.is_inline());
    assert_eq!(inline.try_get_short_attribute(), None);
}

// =============================================================================
// Default Slot Tests
// =============================================================================

#[test]
fn test_default_descriptor_uses_sentinel() {
    let lf = LazyFetcher::default();
    let lv = LazyValue::with_fetcher(b"h", &lf);
    let mut buf = Vec::new();

    let err = lv.value(&FetchContext::background(), &mut buf).unwrap_err();
    assert!(matches!(err, AtlasError::AssertionFailed(_)));
    assert!(err.to_string().contains("0-byte from B000000"));
}
