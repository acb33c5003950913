//! Folding a node's contents into one digest
//!
//! The encoding is length-prefixed so that no two distinct
//! (fragment, value, children) triples stream the same bytes:
//!
//! ```text
//! u64 LE fragment length | fragment bytes
//! value tag: 0 = no key here, 1 = key with null value, 2 = key with value
//! [32-byte value digest, only for tag 2]
//! u64 LE child count | (discriminating byte, 32-byte child digest)*
//! ```
//!
//! Children must be supplied in ascending byte order.

use crate::model::Hash;

const TAG_ABSENT: u8 = 0;
const TAG_NULL: u8 = 1;
const TAG_VALUE: u8 = 2;

/// What a node holds in its value slot, as seen by the digest
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueState {
    /// No key terminates at this node
    Absent,
    /// A key terminates here with a null value
    Null,
    /// A key terminates here with a value of this digest
    Present(Hash),
}

/// Combine a fragment, value state and ordered child digests
pub fn combine(fragment: &[u8], value: ValueState, children: &[(u8, Hash)]) -> Hash {
    debug_assert!(
        children.windows(2).all(|w| w[0].0 < w[1].0),
        "children out of order"
    );

    let fragment_len = (fragment.len() as u64).to_le_bytes();
    let child_count = (children.len() as u64).to_le_bytes();

    let mut parts: Vec<&[u8]> = Vec::with_capacity(6 + 2 * children.len());
    parts.push(&fragment_len);
    parts.push(fragment);
    match &value {
        ValueState::Absent => parts.push(&[TAG_ABSENT]),
        ValueState::Null => parts.push(&[TAG_NULL]),
        ValueState::Present(digest) => {
            parts.push(&[TAG_VALUE]);
            parts.push(digest.as_bytes());
        }
    }
    parts.push(&child_count);
    for (byte, digest) in children {
        parts.push(std::slice::from_ref(byte));
        parts.push(digest.as_bytes());
    }

    Hash::digest_many(&parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_deterministic() {
        let children = [(b'a', Hash::digest(b"a")), (b'b', Hash::digest(b"b"))];
        let h1 = combine(b"x", ValueState::Null, &children);
        let h2 = combine(b"x", ValueState::Null, &children);
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_value_states_are_distinct() {
        let absent = combine(b"k", ValueState::Absent, &[]);
        let null = combine(b"k", ValueState::Null, &[]);
        let zero = combine(b"k", ValueState::Present(Hash::ZERO), &[]);
        assert_ne!(absent, null);
        assert_ne!(null, zero);
        assert_ne!(absent, zero);
    }

    #[test]
    fn test_fragment_boundary_is_encoded() {
        // "ab" + child 'c' must differ from "a" + child 'b' carrying "c"
        let child = Hash::digest(b"leaf");
        let h1 = combine(b"ab", ValueState::Absent, &[(b'c', child)]);
        let h2 = combine(b"a", ValueState::Absent, &[(b'b', child)]);
        assert_ne!(h1, h2);
    }
}
