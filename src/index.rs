//! The sorted-offset header shared by both data files: a record count
//! followed by that many absolute byte offsets, sorted by each record's
//! natural key. Provides count, ith-offset, and binary-search-by-key.

use crate::codec::{read_u32, CorruptRecord};

/// A 1-based view over a file's `[count][offset...]` header.
pub struct SortedIndex<'a> {
    view: &'a [u8],
}

impl<'a> SortedIndex<'a> {
    pub fn new(view: &'a [u8]) -> Self {
        Self { view }
    }

    /// The record count stored in the first 32-bit word of the file.
    pub fn count(&self) -> usize {
        match read_u32(self.view, 0) {
            Ok(n) => n as usize,
            _ => 0,
        }
    }

    /// Returns the absolute byte offset of the `i`th record, 1-based.
    /// Out-of-range indices are a caller error: logs a diagnostic and
    /// returns the sentinel offset `0`.
    pub fn ith_offset(&self, i: usize) -> u32 {
        let count = self.count();
        if i < 1 || i > count {
            log::warn!("ith_offset: index {i} out of range 1..={count}");
            return 0;
        }
        match read_u32(self.view, 4 * i) {
            Ok(off) => off,
            Err(CorruptRecord::OutOfRange { offset, len }) => {
                log::warn!("ith_offset: header truncated at offset {offset} (wanted {len} bytes)");
                0
            }
            Err(e) => {
                log::warn!("ith_offset: {e}");
                0
            }
        }
    }

    /// Binary search over `1..=count` for `key`, decoding each probed
    /// record's key with `decode_key`. Returns the 1-based index on a
    /// match, `None` on a miss. Each probe costs one codec decode, not a
    /// full record read.
    pub fn find_by_key<K, F>(&self, key: &K, decode_key: F) -> Option<usize>
    where
        K: Ord,
        F: Fn(u32) -> Option<K>,
    {
        let mut lo = 1usize;
        let mut hi = self.count() + 1; // exclusive upper bound
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let offset = self.ith_offset(mid);
            let probe = decode_key(offset)?;
            match probe.cmp(key) {
                std::cmp::Ordering::Equal => return Some(mid),
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
            }
        }
        None
    }
}
