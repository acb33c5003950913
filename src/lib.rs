//! # radix_merkle
//!
//! A content-addressed radix trie: an ordered, path-compressed map from byte
//! keys to hashable values, carrying a Merkle digest over its whole contents.
//!
//! The root digest is a pure function of the key→value mapping. Two replicas
//! built through different sequences of puts and removes agree on it exactly
//! when they hold the same entries, which makes it a cheap equality check for
//! anti-entropy between stores.
//!
//! ## Example
//!
//! ```
//! use radix_merkle::{RadixTree, StringValue};
//!
//! let mut a = RadixTree::new();
//! a.put("crab", Some(StringValue::from("animal")));
//! a.put("crabapple", Some(StringValue::from("fruit")));
//!
//! let mut b = RadixTree::new();
//! b.put("crabapple", Some(StringValue::from("fruit")));
//! b.put("crab", Some(StringValue::from("animal")));
//!
//! assert_eq!(a.hash(), b.hash());
//! assert_eq!(a.get("crab"), (Some(&StringValue::from("animal")), true));
//! assert_eq!(a.get("cra"), (None, false));
//! ```

pub mod config;
pub mod model;
pub mod trie;

mod error;

pub use config::{DigestMode, TrieConfig};
pub use error::{Error, Result};
pub use model::{Hash, Hashable, StringValue};
pub use trie::{Node, RadixTree, SharedTree};
