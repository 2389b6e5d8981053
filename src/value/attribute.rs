//! Short attributes
//!
//! A value can carry a user-defined attribute that is a function of the value
//! bytes (and optionally the key). Only "short attributes" exist for now: a
//! category that fits in 3 bits.
//!
//! When a writer decides not to store a value together with its key, it runs
//! the `ShortAttributeExtractor` and stores the result next to the key. Readers
//! then get `AttributeAndLen` cheaply, without fetching the value. The
//! extractor is only paid for when the value is stored separately, either on
//! the initial write or when a compaction moves the value out of line.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, Result};

/// Maximum value of a short attribute (3 bits)
pub const MAX_SHORT_ATTRIBUTE: u8 = 7;

/// A user-specified attribute of a value, in `0..=MAX_SHORT_ATTRIBUTE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ShortAttribute(u8);

impl ShortAttribute {
    /// The largest representable attribute
    pub const MAX: ShortAttribute = ShortAttribute(MAX_SHORT_ATTRIBUTE);

    /// Create a short attribute, rejecting anything above 7
    pub fn new(value: u8) -> Result<Self> {
        if value > MAX_SHORT_ATTRIBUTE {
            return Err(AtlasError::InvalidShortAttribute(value));
        }
        Ok(Self(value))
    }

    /// Get the raw 3-bit value
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ShortAttribute {
    type Error = AtlasError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ShortAttribute> for u8 {
    fn from(attr: ShortAttribute) -> Self {
        attr.0
    }
}

impl fmt::Display for ShortAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pair of value length and short attribute, stored next to a value handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AttributeAndLen {
    /// Length of the value the handle resolves to
    pub value_len: u32,
    /// Category of the value
    pub short_attribute: ShortAttribute,
}

impl AttributeAndLen {
    pub fn new(value_len: u32, short_attribute: ShortAttribute) -> Self {
        Self {
            value_len,
            short_attribute,
        }
    }

    /// Build the attribute for a value that is about to be stored out of line
    ///
    /// Fails with `ValueTooLarge` if the length does not fit in a u32, or with
    /// whatever error the extractor reports.
    pub fn extract<E>(extractor: &E, key: &[u8], key_prefix_len: usize, value: &[u8]) -> Result<Self>
    where
        E: ShortAttributeExtractor + ?Sized,
    {
        let value_len =
            u32::try_from(value.len()).map_err(|_| AtlasError::ValueTooLarge(value.len()))?;
        let short_attribute = extractor.extract(key, key_prefix_len, value)?;
        Ok(Self::new(value_len, short_attribute))
    }
}

/// Derives the short attribute of a value on the write path
///
/// Implemented for any `Fn(&[u8], usize, &[u8]) -> Result<ShortAttribute>`.
pub trait ShortAttributeExtractor {
    /// `key_prefix_len` is the length of the key prefix the application
    /// considers significant (e.g. the key without its version suffix).
    fn extract(&self, key: &[u8], key_prefix_len: usize, value: &[u8]) -> Result<ShortAttribute>;
}

impl<F> ShortAttributeExtractor for F
where
    F: Fn(&[u8], usize, &[u8]) -> Result<ShortAttribute>,
{
    fn extract(&self, key: &[u8], key_prefix_len: usize, value: &[u8]) -> Result<ShortAttribute> {
        self(key, key_prefix_len, value)
    }
}
