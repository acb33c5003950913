//! Content-addressed radix trie
//!
//! - Keys are raw byte strings; edges carry compressed fragments
//! - Each node's digest folds its fragment, its value digest and its
//!   children's digests in ascending byte order
//! - The root digest depends only on the stored mapping, so two trees
//!   holding the same entries hash identically however they were built

mod digest;
mod node;
mod shared;
mod tree;

pub use digest::{combine, ValueState};
pub use node::Node;
pub use shared::SharedTree;
pub use tree::RadixTree;
