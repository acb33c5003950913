//! The hashable-value capability and a string-backed value type

use super::Hash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything that can be stored in a [`RadixTree`](crate::RadixTree).
///
/// The trie never looks inside a value; it only folds the value's digest
/// into the digest of the node holding it. Equal values must produce equal
/// digests, and computing a digest must always succeed.
pub trait Hashable {
    fn digest(&self) -> Hash;
}

impl Hashable for Hash {
    fn digest(&self) -> Hash {
        *self
    }
}

impl Hashable for [u8] {
    fn digest(&self) -> Hash {
        Hash::digest(self)
    }
}

impl Hashable for Vec<u8> {
    fn digest(&self) -> Hash {
        Hash::digest(self)
    }
}

impl Hashable for str {
    fn digest(&self) -> Hash {
        Hash::digest(self.as_bytes())
    }
}

impl Hashable for String {
    fn digest(&self) -> Hash {
        Hash::digest(self.as_bytes())
    }
}

impl<T: Hashable + ?Sized> Hashable for &T {
    fn digest(&self) -> Hash {
        (**self).digest()
    }
}

impl<T: Hashable + ?Sized> Hashable for Box<T> {
    fn digest(&self) -> Hash {
        (**self).digest()
    }
}

/// A value backed by a UTF-8 string
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StringValue(pub String);

impl StringValue {
    pub fn new(s: impl Into<String>) -> Self {
        StringValue(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Hashable for StringValue {
    fn digest(&self) -> Hash {
        Hash::digest(self.0.as_bytes())
    }
}

impl fmt::Display for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StringValue {
    fn from(s: &str) -> Self {
        StringValue(s.to_string())
    }
}

impl From<String> for StringValue {
    fn from(s: String) -> Self {
        StringValue(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_values_equal_digests() {
        assert_eq!(
            StringValue::from("fruit").digest(),
            StringValue::new(String::from("fruit")).digest()
        );
        assert_ne!(
            StringValue::from("fruit").digest(),
            StringValue::from("animal").digest()
        );
    }

    #[test]
    fn test_string_and_bytes_agree() {
        let s = "crab".to_string();
        assert_eq!(s.digest(), b"crab".to_vec().digest());
        assert_eq!(s.as_str().digest(), StringValue::from("crab").digest());
        assert_eq!((&s).digest(), Box::new(s.clone()).digest());
    }

    #[test]
    fn test_hash_is_its_own_digest() {
        let h = Hash::digest(b"value");
        assert_eq!(h.digest(), h);
    }
}
