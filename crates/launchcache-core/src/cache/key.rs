use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, caller-chosen name of one logical dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for the upcoming-launches listing.
    pub const TOP_LAUNCHES: &'static str = "top-10-launches";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn top_launches() -> Self {
        Self::new(Self::TOP_LAUNCHES)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key for the next `count` upcoming launches.
    pub fn for_launch_count(count: usize) -> Self {
        Self(format!("top-{}-launches", count))
    }

    /// File-system safe form of the key, distinct for distinct keys.
    ///
    /// `[A-Za-z0-9.-]` pass through. Every other byte, `_` included, is
    /// written as `_XX` (uppercase hex), so the mapping can be reversed. A
    /// leading dot is escaped too, which keeps keys from naming hidden files
    /// or `.`/`..`. The empty key becomes a lone `_`, which no escape produces.
    pub fn file_stem(&self) -> String {
        if self.0.is_empty() {
            return "_".to_string();
        }

        let mut stem = String::with_capacity(self.0.len());
        for (i, byte) in self.0.bytes().enumerate() {
            let plain = byte.is_ascii_alphanumeric() || byte == b'-' || (byte == b'.' && i > 0);
            if plain {
                stem.push(byte as char);
            } else {
                stem.push_str(&format!("_{:02X}", byte));
            }
        }
        stem
    }
}

impl Default for CacheKey {
    fn default() -> Self {
        Self::top_launches()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CacheKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}
