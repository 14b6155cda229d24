//! Node identity: one wrapper per (tree, node id)

mod cache;

pub use cache::{IdentityCache, NodeObject};
