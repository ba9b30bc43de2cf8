//! Content fingerprints for reload deduplication.
//!
//! Uses `rustc_hash::FxHasher`: fast and deterministic, which is all a
//! "did this file change" check needs.

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Hash several byte slices as one stream, with length framing so that
/// `["ab", "c"]` and `["a", "bc"]` differ.
pub fn compute_all<'a>(parts: impl IntoIterator<Item = &'a [u8]>) -> u64 {
    let mut hasher = FxHasher::default();
    for part in parts {
        hasher.write_usize(part.len());
        hasher.write(part);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_all_is_deterministic() {
        let parts = || [b"site".as_slice(), b"sidebars".as_slice()];
        assert_eq!(compute_all(parts()), compute_all(parts()));
        assert_ne!(compute_all(parts()), compute_all([b"site".as_slice()]));
    }

    #[test]
    fn test_compute_all_frames_parts() {
        let a = compute_all([b"ab".as_slice(), b"c".as_slice()]);
        let b = compute_all([b"a".as_slice(), b"bc".as_slice()]);
        assert_ne!(a, b);
    }
}
