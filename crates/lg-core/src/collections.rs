//! Id-keyed hash collections.
//!
//! With the `fx-hash` feature these use `rustc-hash`'s FxHash, which is
//! markedly faster than SipHash for small integer keys.  Construct with
//! `NodeMap::default()` so call sites are identical under both hashers.

use crate::NodeId;

#[cfg(feature = "fx-hash")]
pub type NodeMap<V> = rustc_hash::FxHashMap<NodeId, V>;
#[cfg(not(feature = "fx-hash"))]
pub type NodeMap<V> = std::collections::HashMap<NodeId, V>;

#[cfg(feature = "fx-hash")]
pub type NodeSet = rustc_hash::FxHashSet<NodeId>;
#[cfg(not(feature = "fx-hash"))]
pub type NodeSet = std::collections::HashSet<NodeId>;
